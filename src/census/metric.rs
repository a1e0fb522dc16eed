//! The fixed counter schema of a census.

use crate::host::RawMemoryCounters;

pub const BYTES_PER_MB: u64 = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Megabytes,
    Count,
}

impl Unit {
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Megabytes => " MB",
            Unit::Count => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricGroup {
    Heap,
    Textures,
    Materials,
    Meshes,
    Objects,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    UsedHeap,
    MonoHeap,
    MonoUsed,
    TotalReserved,
    TotalUnusedReserved,
    CurrentTextureMemory,
    NonStreamingTextureCount,
    NonStreamingTextureMemory,
    TextureCount,
    TextureMemory,
    MaterialCount,
    MaterialMemory,
    MeshCount,
    MeshMemory,
    ObjectCount,
    AudioClipCount,
}

impl Metric {
    pub const COUNT: usize = 16;

    /// Schema order. Rendering relies on it.
    pub const ALL: [Metric; Metric::COUNT] = [
        Metric::UsedHeap,
        Metric::MonoHeap,
        Metric::MonoUsed,
        Metric::TotalReserved,
        Metric::TotalUnusedReserved,
        Metric::CurrentTextureMemory,
        Metric::NonStreamingTextureCount,
        Metric::NonStreamingTextureMemory,
        Metric::TextureCount,
        Metric::TextureMemory,
        Metric::MaterialCount,
        Metric::MaterialMemory,
        Metric::MeshCount,
        Metric::MeshMemory,
        Metric::ObjectCount,
        Metric::AudioClipCount,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::UsedHeap => "Used heap",
            Metric::MonoHeap => "Mono heap",
            Metric::MonoUsed => "Mono used",
            Metric::TotalReserved => "Reserved",
            Metric::TotalUnusedReserved => "Unused reserved",
            Metric::CurrentTextureMemory => "Texture memory",
            Metric::NonStreamingTextureCount => "Non-streaming textures",
            Metric::NonStreamingTextureMemory => "Non-streaming memory",
            Metric::TextureCount => "Textures",
            Metric::TextureMemory => "Texture runtime memory",
            Metric::MaterialCount => "Materials",
            Metric::MaterialMemory => "Material memory",
            Metric::MeshCount => "Meshes",
            Metric::MeshMemory => "Mesh memory",
            Metric::ObjectCount => "Objects",
            Metric::AudioClipCount => "Audio clips",
        }
    }

    pub fn unit(self) -> Unit {
        match self {
            Metric::NonStreamingTextureCount
            | Metric::TextureCount
            | Metric::MaterialCount
            | Metric::MeshCount
            | Metric::ObjectCount
            | Metric::AudioClipCount => Unit::Count,
            _ => Unit::Megabytes,
        }
    }

    pub fn group(self) -> MetricGroup {
        match self {
            Metric::UsedHeap
            | Metric::MonoHeap
            | Metric::MonoUsed
            | Metric::TotalReserved
            | Metric::TotalUnusedReserved => MetricGroup::Heap,
            Metric::CurrentTextureMemory
            | Metric::NonStreamingTextureCount
            | Metric::NonStreamingTextureMemory
            | Metric::TextureCount
            | Metric::TextureMemory => MetricGroup::Textures,
            Metric::MaterialCount | Metric::MaterialMemory => MetricGroup::Materials,
            Metric::MeshCount | Metric::MeshMemory => MetricGroup::Meshes,
            Metric::ObjectCount | Metric::AudioClipCount => MetricGroup::Objects,
        }
    }
}

/// Whole megabytes, truncating.
pub fn to_megabytes(bytes: u64) -> i64 {
    i64::try_from(bytes / BYTES_PER_MB).unwrap_or(i64::MAX)
}

pub fn to_count(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

/// One value per [`Metric`], memory already in megabytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricValues([i64; Metric::COUNT]);

impl MetricValues {
    pub fn get(&self, metric: Metric) -> i64 {
        self.0[metric.index()]
    }

    pub fn set(&mut self, metric: Metric, value: i64) {
        self.0[metric.index()] = value;
    }

    pub fn with(mut self, metric: Metric, value: i64) -> Self {
        self.set(metric, value);
        self
    }

    /// Seeds the host-counter metrics. Enumeration-derived metrics are
    /// filled by the census capture.
    pub fn from_raw(raw: &RawMemoryCounters) -> Self {
        MetricValues::default()
            .with(Metric::UsedHeap, to_megabytes(raw.used_heap))
            .with(Metric::MonoHeap, to_megabytes(raw.mono_heap))
            .with(Metric::MonoUsed, to_megabytes(raw.mono_used))
            .with(Metric::TotalReserved, to_megabytes(raw.total_reserved))
            .with(
                Metric::TotalUnusedReserved,
                to_megabytes(raw.total_unused_reserved),
            )
            .with(
                Metric::CurrentTextureMemory,
                to_megabytes(raw.current_texture_memory),
            )
            .with(
                Metric::NonStreamingTextureCount,
                to_count(raw.non_streaming_texture_count),
            )
            .with(
                Metric::NonStreamingTextureMemory,
                to_megabytes(raw.non_streaming_texture_memory),
            )
    }
}
