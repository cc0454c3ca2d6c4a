pub mod categories;
pub mod classify;
pub mod evolution;
pub mod hierarchy;
pub mod summary;

pub use categories::{group_by_category, CategoryOrder};
pub use classify::{classify, classify_categories};
pub use hierarchy::build_forest;
pub use summary::summarize;
