use std::collections::VecDeque;
use std::rc::Rc;

use super::process::ProcessProbe;
use super::{EngineObject, Host, RawMemoryCounters, ResourceKind};

const MB: u64 = 1024 * 1024;
const MANAGED_BASE: u64 = 8 * MB;
const MANAGED_PER_OBJECT: u64 = 64 * 1024;
const MANAGED_CHUNK: u64 = 16 * MB;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

#[derive(Debug)]
pub struct SimObject {
    id: ObjectId,
    kind: ResourceKind,
    name: String,
    bytes: u64,
    detail: Option<String>,
    non_streaming: bool,
    batch: Option<u64>,
}

impl EngineObject for SimObject {
    fn name(&self) -> &str {
        &self.name
    }

    fn runtime_memory_size(&self) -> u64 {
        self.bytes
    }

    fn detail(&self) -> Option<String> {
        self.detail.clone()
    }
}

/// In-process stand-in for a game engine's object registry.
///
/// Objects are loaded in batches (a "scene") and can be unloaded batch by
/// batch or one at a time. Dropping the registry's `Rc` is the only thing
/// that destroys an object, which is what makes weak handles go dead.
pub struct SimulatedEngine {
    objects: Vec<Rc<SimObject>>,
    loaded_batches: VecDeque<u64>,
    next_id: u64,
    next_batch: u64,
    batch_size: usize,
    probe: Option<ProcessProbe>,
}

impl SimulatedEngine {
    pub fn new(batch_size: usize) -> Self {
        SimulatedEngine {
            objects: Vec::new(),
            loaded_batches: VecDeque::new(),
            next_id: 1,
            next_batch: 1,
            batch_size,
            probe: None,
        }
    }

    /// Read heap and reserved counters from the real process instead of
    /// deriving them from the synthetic objects.
    pub fn with_process_probe(mut self) -> Self {
        self.probe = Some(ProcessProbe::new());
        self
    }

    pub fn loaded_batches(&self) -> usize {
        self.loaded_batches.len()
    }

    pub fn insert(&mut self, kind: ResourceKind, name: &str, bytes: u64) -> ObjectId {
        self.insert_with(kind, name, bytes, None, false, None)
    }

    pub fn remove(&mut self, id: ObjectId) -> bool {
        let before = self.objects.len();
        self.objects.retain(|o| o.id != id);
        self.objects.len() != before
    }

    /// Loads one batch of textures, materials, meshes and an audio clip,
    /// plus an unnamed internal texture. Returns the batch number.
    pub fn load_batch(&mut self) -> u64 {
        let batch = self.next_batch;
        self.next_batch += 1;

        for i in 0..self.batch_size {
            let size_step = i as u64 + 1;
            let texture = format!("batch{batch}/tex{i}");
            self.insert_with(
                ResourceKind::Texture,
                &texture,
                256 * 1024 * size_step,
                Some(format!("{}x{}", 64 * size_step, 64 * size_step)),
                i % 3 == 0,
                Some(batch),
            );
            self.insert_with(
                ResourceKind::Material,
                &format!("batch{batch}/mat{i}"),
                4 * 1024,
                Some(texture),
                false,
                Some(batch),
            );
            self.insert_with(
                ResourceKind::Mesh,
                &format!("batch{batch}/mesh{i}"),
                128 * 1024 * size_step,
                Some(format!("{}", 120 * size_step)),
                false,
                Some(batch),
            );
        }
        self.insert_with(
            ResourceKind::AudioClip,
            &format!("batch{batch}/clip"),
            2 * MB,
            Some(format!("{}s", 3 + batch % 5)),
            false,
            Some(batch),
        );
        self.insert_with(ResourceKind::Texture, "", 64 * 1024, None, true, Some(batch));

        self.loaded_batches.push_back(batch);
        tracing::debug!(batch, objects = self.objects.len(), "loaded batch");
        batch
    }

    pub fn unload_oldest_batch(&mut self) -> Option<u64> {
        let batch = self.loaded_batches.pop_front()?;
        self.objects.retain(|o| o.batch != Some(batch));
        tracing::debug!(batch, objects = self.objects.len(), "unloaded batch");
        Some(batch)
    }

    fn insert_with(
        &mut self,
        kind: ResourceKind,
        name: &str,
        bytes: u64,
        detail: Option<String>,
        non_streaming: bool,
        batch: Option<u64>,
    ) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push(Rc::new(SimObject {
            id,
            kind,
            name: name.to_string(),
            bytes,
            detail,
            non_streaming,
            batch,
        }));
        id
    }

    fn bytes_of(&self, kind: ResourceKind) -> u64 {
        self.objects
            .iter()
            .filter(|o| o.kind == kind)
            .map(|o| o.bytes)
            .sum()
    }
}

impl Host for SimulatedEngine {
    fn memory_counters(&self) -> RawMemoryCounters {
        let total_bytes: u64 = self.objects.iter().map(|o| o.bytes).sum();
        let mono_used = MANAGED_BASE + self.objects.len() as u64 * MANAGED_PER_OBJECT;
        let mono_heap = mono_used.div_ceil(MANAGED_CHUNK) * MANAGED_CHUNK;

        let (used_heap, total_reserved) = match &self.probe {
            Some(probe) => {
                let process = probe.sample();
                (process.resident, process.virtual_size)
            }
            None => (total_bytes + mono_used, total_bytes + mono_heap + MANAGED_CHUNK),
        };

        let non_streaming = self
            .objects
            .iter()
            .filter(|o| o.kind == ResourceKind::Texture && o.non_streaming);
        let (non_streaming_texture_count, non_streaming_texture_memory) =
            non_streaming.fold((0, 0), |(count, bytes), o| (count + 1, bytes + o.bytes));

        RawMemoryCounters {
            used_heap,
            mono_heap,
            mono_used,
            total_reserved,
            total_unused_reserved: total_reserved.saturating_sub(used_heap),
            current_texture_memory: self.bytes_of(ResourceKind::Texture),
            non_streaming_texture_count,
            non_streaming_texture_memory,
        }
    }

    fn loaded_objects(&self, kind: ResourceKind) -> Vec<Rc<dyn EngineObject>> {
        self.objects
            .iter()
            .filter(|o| o.kind == kind)
            .map(|o| Rc::clone(o) as Rc<dyn EngineObject>)
            .collect()
    }

    fn live_object_count(&self) -> u64 {
        self.objects.len() as u64
    }
}
