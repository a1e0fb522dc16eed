pub mod history;
pub mod metric;
pub mod sampler;
pub mod snapshot;
pub mod weak_set;

pub use history::{HistoryError, SnapshotHistory};
pub use metric::{Metric, MetricValues, Unit};
pub use sampler::{Clock, ManualClock, Sampler, SystemClock};
pub use snapshot::ResourceCensus;
pub use weak_set::WeakObjectSet;
