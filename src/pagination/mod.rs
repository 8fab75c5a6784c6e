//! Incremental text pagination driven by an external measurement port

mod measure;
mod paginator;
pub mod split;

pub use measure::{MeasurementPort, NoReport, PageCount, PageCountReporter};
pub use paginator::{DriveOutcome, Page, PaginationState, Paginator, Phase};
pub use split::{split_at_center, Split};
