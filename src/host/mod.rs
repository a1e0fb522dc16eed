//! Interfaces the inspector consumes from the application it observes.
//!
//! The census code never talks to a concrete engine. Everything it needs,
//! object enumeration and raw memory counters, comes through [`Host`].

pub mod process;
pub mod sim;

use std::rc::Rc;

/// The four kinds of engine resources a census enumerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Texture,
    Material,
    Mesh,
    AudioClip,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Texture,
        ResourceKind::Material,
        ResourceKind::Mesh,
        ResourceKind::AudioClip,
    ];

    pub fn next(self) -> Self {
        match self {
            ResourceKind::Texture => ResourceKind::Material,
            ResourceKind::Material => ResourceKind::Mesh,
            ResourceKind::Mesh => ResourceKind::AudioClip,
            ResourceKind::AudioClip => ResourceKind::Texture,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Texture => "Textures",
            ResourceKind::Material => "Materials",
            ResourceKind::Mesh => "Meshes",
            ResourceKind::AudioClip => "Audio Clips",
        }
    }

    /// Singular lowercase noun used in report messages.
    pub fn noun(self) -> &'static str {
        match self {
            ResourceKind::Texture => "texture",
            ResourceKind::Material => "material",
            ResourceKind::Mesh => "mesh",
            ResourceKind::AudioClip => "audio clip",
        }
    }
}

/// An engine-managed object. The host owns it; the inspector only ever
/// holds weak references.
pub trait EngineObject {
    fn name(&self) -> &str;

    /// Runtime memory footprint in bytes.
    fn runtime_memory_size(&self) -> u64;

    /// Short kind-specific annotation shown next to the name in reports.
    fn detail(&self) -> Option<String> {
        None
    }
}

/// Raw counters straight from the host, in bytes (counts where noted).
///
/// A host that cannot provide a counter leaves it at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawMemoryCounters {
    pub used_heap: u64,
    pub mono_heap: u64,
    pub mono_used: u64,
    pub total_reserved: u64,
    pub total_unused_reserved: u64,
    pub current_texture_memory: u64,
    /// Count, not bytes.
    pub non_streaming_texture_count: u64,
    pub non_streaming_texture_memory: u64,
}

pub trait Host {
    fn memory_counters(&self) -> RawMemoryCounters;

    /// Every currently loaded object of `kind`, named or not.
    fn loaded_objects(&self, kind: ResourceKind) -> Vec<Rc<dyn EngineObject>>;

    /// Number of live engine objects of any type.
    fn live_object_count(&self) -> u64;
}
