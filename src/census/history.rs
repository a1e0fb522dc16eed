use std::collections::VecDeque;
use std::rc::Rc;

use thiserror::Error;

use super::snapshot::ResourceCensus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("slot {slot} is out of range ({slots} slots)")]
    SlotOutOfRange { slot: usize, slots: usize },
    #[error("the live census cannot be unpinned")]
    CurrentNotRemovable,
    #[error("slot {slot} has no older entry to compare against")]
    NoOlderEntry { slot: usize },
}

/// The live census plus the operator's pinned censuses.
///
/// Slots address both under one scheme: slot 0 is the live census, slot `n`
/// is the `n`-th most recently pinned one. Pinning inserts at the front, so
/// higher slots are always older pins.
#[derive(Debug)]
pub struct SnapshotHistory {
    current: Rc<ResourceCensus>,
    pinned: VecDeque<Rc<ResourceCensus>>,
}

impl SnapshotHistory {
    pub fn new(current: ResourceCensus) -> Self {
        SnapshotHistory {
            current: Rc::new(current),
            pinned: VecDeque::new(),
        }
    }

    pub fn current(&self) -> &Rc<ResourceCensus> {
        &self.current
    }

    /// Pinned entries keep their own reference to the previous census.
    pub fn replace_current(&mut self, census: ResourceCensus) {
        self.current = Rc::new(census);
    }

    pub fn pin_current(&mut self) {
        self.pin(Rc::clone(&self.current));
    }

    pub fn pin(&mut self, census: Rc<ResourceCensus>) {
        self.pinned.push_front(census);
    }

    pub fn unpin(&mut self, slot: usize) -> Result<Rc<ResourceCensus>, HistoryError> {
        if slot == 0 {
            return Err(HistoryError::CurrentNotRemovable);
        }
        let slots = self.slot_count();
        self.pinned
            .remove(slot - 1)
            .ok_or(HistoryError::SlotOutOfRange { slot, slots })
    }

    pub fn at(&self, slot: usize) -> Option<&Rc<ResourceCensus>> {
        match slot {
            0 => Some(&self.current),
            n => self.pinned.get(n - 1),
        }
    }

    /// The census a slot is colored against: the next older slot.
    pub fn baseline_for(&self, slot: usize) -> Option<&Rc<ResourceCensus>> {
        self.at(slot + 1)
    }

    /// Live census plus pinned entries.
    pub fn slot_count(&self) -> usize {
        self.pinned.len() + 1
    }

    pub fn pinned_len(&self) -> usize {
        self.pinned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pinned.is_empty()
    }

    pub fn slots(&self) -> impl Iterator<Item = &Rc<ResourceCensus>> {
        std::iter::once(&self.current).chain(self.pinned.iter())
    }
}
