//! The context object that owns all inspector state.
//!
//! A host drives it by calling [`Inspector::render_pass`] once per displayed
//! frame and forwards operator actions to the other methods. Everything runs
//! on the caller's thread.

use std::rc::Rc;
use std::time::Duration;

use crate::census::{
    Clock, HistoryError, ResourceCensus, Sampler, SnapshotHistory, SystemClock,
};
use crate::format::{self, RenderedColumn};
use crate::host::{EngineObject, Host, ResourceKind};
use crate::report::NewObjectsReport;

/// Everything a frame needs to draw the overlay.
#[derive(Debug, Clone)]
pub struct OverlayFrame {
    pub labels: Vec<&'static str>,
    /// One column per history slot, slot 0 first.
    pub columns: Vec<RenderedColumn>,
}

pub struct Inspector<H: Host, C: Clock = SystemClock> {
    host: H,
    clock: C,
    sampler: Sampler,
    history: SnapshotHistory,
}

impl<H: Host> Inspector<H, SystemClock> {
    pub fn new(host: H, interval: Duration) -> Self {
        Self::with_clock(host, SystemClock, interval)
    }
}

impl<H: Host, C: Clock> Inspector<H, C> {
    pub fn with_clock(host: H, clock: C, interval: Duration) -> Self {
        let now = clock.now();
        let history = SnapshotHistory::new(ResourceCensus::capture(&host, now));
        Inspector {
            host,
            clock,
            sampler: Sampler::new(interval, now),
            history,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    /// Replaces the live census if the sampling interval has elapsed.
    /// Returns whether a capture happened.
    pub fn refresh(&mut self) -> bool {
        let now = self.clock.now();
        if !self.sampler.is_due(now) {
            return false;
        }
        self.history
            .replace_current(ResourceCensus::capture(&self.host, now));
        self.sampler.mark_captured(now);
        true
    }

    /// Per-frame entry point. Layout-only passes do nothing.
    pub fn render_pass(&mut self, layout_only: bool) -> Option<OverlayFrame> {
        if layout_only {
            return None;
        }
        self.refresh();
        Some(OverlayFrame {
            labels: format::labels(),
            columns: (0..self.history.slot_count())
                .filter_map(|slot| self.absolute_column(slot))
                .collect(),
        })
    }

    /// A slot's values, toned against the next older slot.
    pub fn absolute_column(&self, slot: usize) -> Option<RenderedColumn> {
        let census = self.history.at(slot)?;
        let baseline = self.history.baseline_for(slot).map(Rc::as_ref);
        Some(format::render_absolute(census, baseline))
    }

    /// How far the next newer slot moved away from `slot`. Slot 0 has no
    /// newer entry.
    pub fn delta_column(&self, slot: usize) -> Option<RenderedColumn> {
        let newer = self.history.at(slot.checked_sub(1)?)?;
        let older = self.history.at(slot)?;
        Some(format::render_delta(newer, older))
    }

    pub fn pin_current(&mut self) {
        self.history.pin_current();
        tracing::info!(pinned = self.history.pinned_len(), "pinned current census");
    }

    pub fn unpin(&mut self, slot: usize) -> Result<Rc<ResourceCensus>, HistoryError> {
        match self.history.unpin(slot) {
            Ok(census) => {
                tracing::info!(slot, pinned = self.history.pinned_len(), "unpinned census");
                Ok(census)
            }
            Err(err) => {
                tracing::warn!(slot, %err, "unpin rejected");
                Err(err)
            }
        }
    }

    /// Objects of `kind` alive in `slot` that were not alive in the next
    /// older slot.
    pub fn new_objects_since(
        &self,
        slot: usize,
        kind: ResourceKind,
    ) -> Result<Vec<Rc<dyn EngineObject>>, HistoryError> {
        let slots = self.history.slot_count();
        let newer = self
            .history
            .at(slot)
            .ok_or(HistoryError::SlotOutOfRange { slot, slots })?;
        let older = self
            .history
            .baseline_for(slot)
            .ok_or(HistoryError::NoOlderEntry { slot })?;
        Ok(newer.new_objects_since(older, kind))
    }

    pub fn log_new_objects(
        &self,
        slot: usize,
        kind: ResourceKind,
    ) -> Result<NewObjectsReport, HistoryError> {
        let objects = self.new_objects_since(slot, kind)?;
        let report = NewObjectsReport::from_objects(kind, slot, &objects);
        tracing::info!(slot, kind = kind.noun(), count = report.entries.len(), "{report}");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::census::{ManualClock, Metric};
    use crate::host::sim::SimulatedEngine;

    const INTERVAL: Duration = Duration::from_millis(500);

    fn inspector(clock: &ManualClock) -> Inspector<SimulatedEngine, &ManualClock> {
        Inspector::with_clock(SimulatedEngine::new(2), clock, INTERVAL)
    }

    #[test]
    fn layout_pass_is_skipped() {
        let clock = ManualClock::default();
        let mut inspector = inspector(&clock);
        assert!(inspector.render_pass(true).is_none());
    }

    #[test]
    fn render_pass_reuses_census_until_interval_elapses() {
        let clock = ManualClock::default();
        let mut inspector = inspector(&clock);
        let first = Rc::clone(inspector.history().current());

        inspector.host_mut().load_batch();
        clock.advance(Duration::from_millis(200));
        inspector.render_pass(false);
        assert!(Rc::ptr_eq(&first, inspector.history().current()));

        clock.advance(Duration::from_millis(400));
        inspector.render_pass(false);
        assert!(!Rc::ptr_eq(&first, inspector.history().current()));
        assert_eq!(inspector.history().current().value(Metric::AudioClipCount), 1);
    }

    #[test]
    fn frame_has_one_column_per_slot() {
        let clock = ManualClock::default();
        let mut inspector = inspector(&clock);
        inspector.pin_current();
        inspector.pin_current();

        let frame = inspector.render_pass(false).expect("full pass");
        assert_eq!(frame.columns.len(), 3);
        for column in &frame.columns {
            assert_eq!(column.len(), frame.labels.len());
        }
        // the oldest slot has nothing to be toned against
        assert!(frame.columns[2].lines.iter().all(|l| l.tone.is_none()));
        assert!(frame.columns[0].lines.iter().any(|l| l.tone.is_some()));
    }

    #[test]
    fn delta_column_compares_with_next_newer_slot() {
        let clock = ManualClock::default();
        let mut inspector = inspector(&clock);
        inspector.pin_current();

        inspector.host_mut().load_batch();
        clock.advance(Duration::from_secs(65));
        inspector.render_pass(false);

        assert!(inspector.delta_column(0).is_none());
        let delta = inspector.delta_column(1).expect("pinned slot");
        assert_eq!(delta.lines[0].text, "1:05");
        assert!(inspector.delta_column(2).is_none());
    }

    #[test]
    fn new_objects_between_slots() {
        let clock = ManualClock::default();
        let mut inspector = inspector(&clock);
        inspector.pin_current();

        inspector.host_mut().load_batch();
        clock.advance(Duration::from_secs(1));
        inspector.render_pass(false);

        let report = inspector
            .log_new_objects(0, ResourceKind::Material)
            .expect("slot 1 exists");
        assert_eq!(report.entries.len(), 2);
        assert!(report.entries[0].starts_with("batch1/mat0["));

        assert_eq!(
            inspector.new_objects_since(1, ResourceKind::Texture).err(),
            Some(HistoryError::NoOlderEntry { slot: 1 })
        );
        assert_eq!(
            inspector.new_objects_since(4, ResourceKind::Texture).err(),
            Some(HistoryError::SlotOutOfRange { slot: 4, slots: 2 })
        );
    }

    #[test]
    fn unpin_rejects_live_slot() {
        let clock = ManualClock::default();
        let mut inspector = inspector(&clock);
        inspector.pin_current();
        assert!(inspector.unpin(0).is_err());
        assert!(inspector.unpin(1).is_ok());
        assert!(inspector.history().is_empty());
    }
}
