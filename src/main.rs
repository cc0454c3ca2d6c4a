mod cli;
mod logging;

use std::path::Path;
use std::process;

use chrono::{Local, NaiveDate};
use clap::{CommandFactory, Parser};
use cronograma::analysis::evolution;
use cronograma::config::{self, AppConfig, FormatSetting};
use cronograma::io::lenient::parse_date;
use cronograma::model::EvolutionSeries;
use cronograma::{Dashboard, Error, PipelineOptions, Schedule};
use tracing::error;

use cli::{Cli, Commands, FormatArg};

fn main() {
    logging::init_logger();

    let mut config = match config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();
    if let Some(path) = args.snapshot {
        config.snapshot_path = Some(path);
    }

    let result = match args.command {
        Some(Commands::Import {
            file,
            reference_date,
            format,
            delimiter,
            save,
            json,
        }) => {
            if let Some(format) = format {
                config.format = match format {
                    FormatArg::Auto => FormatSetting::Auto,
                    FormatArg::Named => FormatSetting::Named,
                    FormatArg::Fixed => FormatSetting::Fixed,
                };
            }
            if delimiter.is_some() {
                config.delimiter = delimiter;
            }
            run_import(config, &file, reference_date.as_deref(), save, json)
        }
        Some(Commands::Show { json }) => run_show(config, json),
        Some(Commands::Info) => run_info(&config),
        Some(Commands::Clear) => Dashboard::new(config).clear_snapshot(),
        Some(Commands::Evolution {
            file,
            reference_date,
        }) => run_evolution(config, &file, reference_date.as_deref()),
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:#?}", config);
            Ok(())
        }
        None => {
            let _ = Cli::command().print_long_help();
            Ok(())
        }
    };

    if let Err(err) = result {
        error!("Error: {}", err);
        process::exit(1);
    }
}

fn reference_date(raw: Option<&str>) -> Result<NaiveDate, Error> {
    match raw {
        Some(raw) => parse_date(raw).ok_or_else(|| Error::InvalidDate(raw.to_string())),
        None => Ok(Local::now().date_naive()),
    }
}

fn run_import(
    config: AppConfig,
    file: &Path,
    reference: Option<&str>,
    save: bool,
    json: bool,
) -> Result<(), Error> {
    let reference = reference_date(reference)?;
    let dashboard = Dashboard::new(config);
    let schedule = dashboard.import_file(file, reference)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&*schedule)?);
    } else {
        print_report(&schedule);
    }
    if save {
        dashboard.save_snapshot()?;
        println!("Saved to {}", dashboard.snapshot_path().display());
    }
    Ok(())
}

fn run_show(config: AppConfig, json: bool) -> Result<(), Error> {
    let dashboard = Dashboard::new(config);
    let schedule = dashboard.load_snapshot()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&*schedule)?);
    } else {
        print_report(&schedule);
    }
    Ok(())
}

fn run_info(config: &AppConfig) -> Result<(), Error> {
    let path = config.snapshot_path();
    let info = cronograma::io::snapshot_info(&path)?;
    println!("Snapshot:    {}", path.display());
    println!("Source file: {}", info.source_file.as_deref().unwrap_or("-"));
    println!("Imported at: {}", info.imported_at.to_rfc3339());
    println!("Saved at:    {}", info.saved_at.to_rfc3339());
    println!("Version:     {}", info.version);
    println!("Size:        {} KB", info.size_kb);
    Ok(())
}

fn run_evolution(config: AppConfig, file: &Path, reference: Option<&str>) -> Result<(), Error> {
    let reference = reference_date(reference)?;
    let options = PipelineOptions::from_config(&config, reference)?;
    let schedule = Dashboard::new(config).import_file_with(file, &options)?;

    let (planned, projected) = evolution::s_curves(schedule.forest.tasks());
    let mut series: Vec<EvolutionSeries> = vec![planned, projected];
    series.extend(evolution::category_series(&schedule.categories));
    println!("{}", serde_json::to_string_pretty(&series)?);
    Ok(())
}

fn print_report(schedule: &Schedule) {
    let s = &schedule.summary;
    println!(
        "Schedule {} (reference {})",
        schedule.source_file.as_deref().unwrap_or("<text>"),
        schedule.reference_date.format("%d/%m/%Y")
    );
    println!(
        "  Progress {:.1}%  |  {} tasks: {} done, {} in progress, {} pending",
        s.overall_progress, s.total_tasks, s.completed_tasks, s.in_progress_tasks, s.pending_tasks
    );
    println!(
        "  Finish {} ({} days remaining)",
        s.projected_completion_date, s.remaining_days
    );
    println!(
        "  Health: {} on time, {} late, {} at risk, {} ahead",
        s.schedule_health.on_time, s.schedule_health.late, s.schedule_health.at_risk, s.schedule_health.ahead
    );
    println!();

    for category in &schedule.categories {
        let h = &category.schedule_health;
        println!(
            "  {:<52} {:>6.1}%  {:>4} tasks  [{} late, {} at risk, {} ahead, {} on time]",
            category.name,
            category.average_progress,
            category.tasks.len(),
            h.late,
            h.at_risk,
            h.ahead,
            h.on_time
        );
    }

    if schedule.skipped_rows > 0 || !schedule.warnings.is_empty() {
        println!();
        println!(
            "  {} rows skipped, {} values defaulted",
            schedule.skipped_rows,
            schedule.warnings.len()
        );
    }
}
