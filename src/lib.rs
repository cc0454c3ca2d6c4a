//! Schedule ("cronograma") ingestion for shutdown/maintenance project exports.
//!
//! Reads an MS-Project-style CSV export, rebuilds the outline hierarchy,
//! groups tasks into domain categories, classifies schedule health against
//! the baseline and rolls everything up into a project summary.

pub mod analysis;
pub mod app;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod pipeline;

pub use app::Dashboard;
pub use config::AppConfig;
pub use error::{Error, Result};
pub use model::{Category, Schedule, ScheduleHealth, ScheduleHealthCounts, Summary, Task};
pub use pipeline::{run, PipelineOptions};
