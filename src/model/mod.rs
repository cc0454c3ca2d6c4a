pub mod category;
pub mod evolution;
pub mod forest;
pub mod health;
pub mod schedule;
pub mod summary;
pub mod task;

pub use category::{Category, CategoryRule, CategoryStyle, CategoryVocabulary};
pub use evolution::{EvolutionPoint, EvolutionSeries};
pub use forest::TaskForest;
pub use health::{ScheduleHealth, ScheduleHealthCounts};
pub use schedule::{InputFormat, RowWarning, Schedule};
pub use summary::{CategoryOutlook, Summary};
pub use task::{Task, TaskId};
