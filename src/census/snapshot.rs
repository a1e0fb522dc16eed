use std::rc::Rc;

use chrono::{DateTime, Local};

use super::metric::{Metric, MetricValues, to_count, to_megabytes};
use super::weak_set::WeakObjectSet;
use crate::host::{EngineObject, Host, ResourceKind};

pub type HandleSet = WeakObjectSet<dyn EngineObject>;

/// A point-in-time reading of memory counters plus weak handles to every
/// named texture, material, mesh and audio clip loaded at that moment.
#[derive(Debug, Clone)]
pub struct ResourceCensus {
    pub captured_at: DateTime<Local>,
    pub values: MetricValues,
    textures: HandleSet,
    materials: HandleSet,
    meshes: HandleSet,
    audio_clips: HandleSet,
}

impl ResourceCensus {
    /// Reads the host's counters and enumerates all loaded resources.
    ///
    /// This walks every live engine object and is expensive.
    pub fn capture<H: Host + ?Sized>(host: &H, now: DateTime<Local>) -> Self {
        let _span = tracing::debug_span!("census.capture").entered();

        let mut values = MetricValues::from_raw(&host.memory_counters());

        let textures = host.loaded_objects(ResourceKind::Texture);
        let materials = host.loaded_objects(ResourceKind::Material);
        let meshes = host.loaded_objects(ResourceKind::Mesh);
        let audio_clips = host.loaded_objects(ResourceKind::AudioClip);

        values.set(Metric::TextureCount, to_count(textures.len() as u64));
        values.set(Metric::TextureMemory, to_megabytes(total_bytes(&textures)));
        values.set(Metric::MaterialCount, to_count(materials.len() as u64));
        values.set(Metric::MaterialMemory, to_megabytes(total_bytes(&materials)));
        values.set(Metric::MeshCount, to_count(meshes.len() as u64));
        values.set(Metric::MeshMemory, to_megabytes(total_bytes(&meshes)));
        values.set(Metric::ObjectCount, to_count(host.live_object_count()));
        values.set(Metric::AudioClipCount, to_count(audio_clips.len() as u64));

        let census = ResourceCensus {
            captured_at: now,
            values,
            textures: WeakObjectSet::capture(&textures),
            materials: WeakObjectSet::capture(&materials),
            meshes: WeakObjectSet::capture(&meshes),
            audio_clips: WeakObjectSet::capture(&audio_clips),
        };
        tracing::debug!(
            textures = census.textures.captured_len(),
            materials = census.materials.captured_len(),
            meshes = census.meshes.captured_len(),
            audio_clips = census.audio_clips.captured_len(),
            "census captured"
        );
        census
    }

    /// A counters-only census with no object handles.
    pub fn from_values(captured_at: DateTime<Local>, values: MetricValues) -> Self {
        ResourceCensus {
            captured_at,
            values,
            textures: WeakObjectSet::default(),
            materials: WeakObjectSet::default(),
            meshes: WeakObjectSet::default(),
            audio_clips: WeakObjectSet::default(),
        }
    }

    pub fn value(&self, metric: Metric) -> i64 {
        self.values.get(metric)
    }

    pub fn handles(&self, kind: ResourceKind) -> &HandleSet {
        match kind {
            ResourceKind::Texture => &self.textures,
            ResourceKind::Material => &self.materials,
            ResourceKind::Mesh => &self.meshes,
            ResourceKind::AudioClip => &self.audio_clips,
        }
    }

    /// Objects of `kind` alive in this census that were not alive in `older`.
    pub fn new_objects_since(
        &self,
        older: &ResourceCensus,
        kind: ResourceKind,
    ) -> Vec<Rc<dyn EngineObject>> {
        self.handles(kind).new_since(older.handles(kind))
    }
}

fn total_bytes(objects: &[Rc<dyn EngineObject>]) -> u64 {
    objects.iter().map(|o| o.runtime_memory_size()).sum()
}
