pub mod csv_import;
pub mod file;
pub mod lenient;
pub mod tokenizer;

pub use csv_import::{import_text, ImportOptions, ImportedRows};
pub use file::{
    clear_snapshot, default_snapshot_path, load_snapshot, save_snapshot, snapshot_exists,
    snapshot_info, SnapshotInfo,
};
