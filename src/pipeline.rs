//! The import pipeline: text in, [`Schedule`] out.
//!
//! Every step is a pure function of the input text and the options; the
//! reference date is always supplied by the caller.

use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use crate::analysis::{build_forest, classify_categories, group_by_category, summarize, CategoryOrder};
use crate::config::AppConfig;
use crate::error::Result;
use crate::io::csv_import::{import_text, ImportOptions};
use crate::model::{InputFormat, Schedule};

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub import: ImportOptions,
    /// The "today" against which schedule health and remaining days are judged.
    pub reference_date: NaiveDate,
    pub fallback_finish: NaiveDate,
    pub at_risk_days: i64,
    /// Category order; `None` picks by input format.
    pub order: Option<CategoryOrder>,
}

impl PipelineOptions {
    pub fn new(reference_date: NaiveDate) -> Self {
        let defaults = AppConfig::default();
        Self {
            import: ImportOptions::default(),
            reference_date,
            fallback_finish: defaults
                .fallback_finish()
                .unwrap_or(reference_date),
            at_risk_days: defaults.at_risk_days,
            order: None,
        }
    }

    pub fn from_config(config: &AppConfig, reference_date: NaiveDate) -> Result<Self> {
        Ok(Self {
            import: ImportOptions {
                format: config.format.forced(),
                delimiter: config.delimiter()?,
                vocabulary: config.vocabulary(),
                denylist: None,
            },
            reference_date,
            fallback_finish: config.fallback_finish()?,
            at_risk_days: config.at_risk_days,
            order: None,
        })
    }
}

/// Run the whole pipeline over an in-memory schedule export.
///
/// All-or-nothing: either every step succeeds and a complete schedule is
/// returned, or the error explains why no task could be extracted.
pub fn run(text: &str, options: &PipelineOptions) -> Result<Schedule> {
    let rows = import_text(text, &options.import)?;

    let order = options.order.unwrap_or(match rows.format {
        InputFormat::Named => CategoryOrder::Alphabetical,
        InputFormat::Fixed => CategoryOrder::Principal,
    });

    let forest = build_forest(rows.tasks);
    let mut categories = group_by_category(forest.tasks(), &options.import.vocabulary, order);
    classify_categories(&mut categories, options.reference_date, options.at_risk_days);
    let summary = summarize(
        &forest,
        &categories,
        options.reference_date,
        options.fallback_finish,
    );

    info!(
        tasks = summary.total_tasks,
        categories = categories.len(),
        skipped = rows.skipped,
        warnings = rows.warnings.len(),
        progress = summary.overall_progress,
        "Schedule imported"
    );

    Ok(Schedule {
        id: Uuid::new_v4(),
        source_file: None,
        imported_at: Utc::now(),
        reference_date: options.reference_date,
        format: rows.format,
        forest,
        categories,
        summary,
        skipped_rows: rows.skipped,
        warnings: rows.warnings,
    })
}
