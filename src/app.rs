use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::Result;
use crate::io;
use crate::model::Schedule;
use crate::pipeline::{self, PipelineOptions};

/// Holds the current schedule model and performs the I/O around the pipeline.
///
/// The model is swapped as a whole: readers holding an `Arc` from
/// [`Dashboard::current`] keep a valid schedule while a new import replaces it.
pub struct Dashboard {
    config: AppConfig,
    snapshot_path: PathBuf,
    current: RwLock<Option<Arc<Schedule>>>,
    status_message: RwLock<String>,
}

impl Dashboard {
    pub fn new(config: AppConfig) -> Self {
        let snapshot_path = config.snapshot_path();
        Self {
            config,
            snapshot_path,
            current: RwLock::new(None),
            status_message: RwLock::new("Ready".to_string()),
        }
    }

    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = path.into();
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    pub fn current(&self) -> Option<Arc<Schedule>> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn status_message(&self) -> String {
        self.status_message
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn install(&self, schedule: Schedule) -> Arc<Schedule> {
        let schedule = Arc::new(schedule);
        *self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(Arc::clone(&schedule));
        schedule
    }

    fn set_status(&self, message: String) {
        *self
            .status_message
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = message;
    }

    // --- Import ---

    /// Run the pipeline over already-read text and install the result.
    pub fn import_text(
        &self,
        text: &str,
        source: Option<&str>,
        options: &PipelineOptions,
    ) -> Result<Arc<Schedule>> {
        match pipeline::run(text, options) {
            Ok(mut schedule) => {
                if let Some(source) = source {
                    schedule = schedule.with_source(source);
                }
                let message = if schedule.skipped_rows > 0 {
                    format!(
                        "Imported {} tasks ({} rows skipped)",
                        schedule.summary.total_tasks, schedule.skipped_rows
                    )
                } else {
                    format!("Imported {} tasks", schedule.summary.total_tasks)
                };
                self.set_status(message);
                Ok(self.install(schedule))
            }
            Err(e) => {
                self.set_status(format!("Schedule import failed: {}", e));
                Err(e)
            }
        }
    }

    /// Read a schedule export from disk and import it.
    pub fn import_file(&self, path: &Path, reference_date: NaiveDate) -> Result<Arc<Schedule>> {
        let options = PipelineOptions::from_config(&self.config, reference_date)?;
        self.import_file_with(path, &options)
    }

    pub fn import_file_with(&self, path: &Path, options: &PipelineOptions) -> Result<Arc<Schedule>> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.set_status(format!("Failed to read file: {}", e));
                return Err(e.into());
            }
        };
        // Some exports are Latin-1.
        let text = String::from_utf8_lossy(&bytes);
        let source = path.file_name().and_then(|s| s.to_str());
        info!(path = %path.display(), bytes = bytes.len(), "Importing schedule file");
        self.import_text(&text, source, options)
    }

    // --- Snapshot ---

    pub fn save_snapshot(&self) -> Result<bool> {
        let Some(schedule) = self.current() else {
            self.set_status("Nothing to save: no schedule loaded".to_string());
            return Ok(false);
        };
        io::save_snapshot(&schedule, &self.snapshot_path)?;
        self.set_status("Schedule saved".to_string());
        Ok(true)
    }

    /// Install the stored snapshot without re-running the pipeline.
    pub fn load_snapshot(&self) -> Result<Arc<Schedule>> {
        match io::load_snapshot(&self.snapshot_path) {
            Ok(schedule) => {
                self.set_status("Schedule loaded".to_string());
                Ok(self.install(schedule))
            }
            Err(e) => {
                warn!(error = %e, "Could not load schedule snapshot");
                self.set_status(format!("Error loading: {}", e));
                Err(e)
            }
        }
    }

    pub fn clear_snapshot(&self) -> Result<()> {
        io::clear_snapshot(&self.snapshot_path)?;
        self.set_status("Saved schedule removed".to_string());
        Ok(())
    }
}
