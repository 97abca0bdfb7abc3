// Rollcall - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading (platform config dir or --config)
// 3. Logging initialisation (debug mode support)
// 4. Dispatch to reports, maintenance and image commands
//
// Command results are printed to stdout; diagnostics go through tracing.

use clap::{Parser, Subcommand, ValueEnum};
use rollcall::app::images::ImageValidator;
use rollcall::app::maintenance;
use rollcall::app::reporter::{ExportFormat, Reporter};
use rollcall::app::store::LogStore;
use rollcall::core::model::{AttendanceRecord, RangeSummary};
use rollcall::platform::config::{load_config, AppConfig, PlatformPaths};
use rollcall::util;
use rollcall::util::error::Result;
use std::path::PathBuf;

/// Rollcall - attendance log reports and housekeeping.
///
/// Reads the JSON attendance log written by the face-recognition check-in
/// station. Runs the demo (today's and this week's counts, backup, dedup)
/// when no command is given.
#[derive(Parser, Debug)]
#[command(name = "rollcall", version, about)]
struct Cli {
    /// Attendance log file (overrides [store] log_file).
    #[arg(short = 'l', long = "log", global = true)]
    log: Option<PathBuf>,

    /// Configuration file (defaults to the platform config directory).
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print today's and this week's record counts, then back up and dedup.
    Demo,
    /// List records of one day (YYYY-MM-DD).
    Day { date: String },
    /// List records between two dates, inclusive.
    Range { start: String, end: String },
    /// List records of the current week (Monday to Sunday).
    Week,
    /// List records of the current month.
    Month,
    /// Hours worked by one person on one day.
    Hours { name: String, date: String },
    /// Per-person days and hours between two dates, inclusive.
    Summary { start: String, end: String },
    /// People whose first check-in was after the standard start time.
    Late {
        date: String,
        /// Standard start time, HH:MM (defaults to [schedule] standard_start).
        #[arg(long)]
        standard: Option<String>,
    },
    /// People whose last check-out was before the standard end time.
    Early {
        date: String,
        /// Standard end time, HH:MM (defaults to [schedule] standard_end).
        #[arg(long)]
        standard: Option<String>,
    },
    /// Export records and totals between two dates to a spreadsheet.
    Export {
        start: String,
        end: String,
        /// Output file (defaults to attendance_report_<start>_to_<end>.<ext>).
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = FormatArg::Xlsx)]
        format: FormatArg,
    },
    /// Remove duplicate records (same name, timestamp and action).
    Dedup,
    /// Write a timestamped copy of the log.
    Backup {
        /// Backup directory (defaults to [store] backup_dir).
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Face image preparation.
    #[command(subcommand)]
    Images(ImagesCommand),
}

#[derive(Subcommand, Debug)]
enum ImagesCommand {
    /// Resize every .jpg/.jpeg/.png in a directory.
    Resize {
        input_dir: PathBuf,
        output_dir: PathBuf,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
    },
    /// Check that images decode and are large enough.
    Validate {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Xlsx,
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Xlsx => ExportFormat::Xlsx,
            FormatArg::Csv => ExportFormat::Csv,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PlatformPaths::resolve().config_file());
    let (mut config, config_warnings) = load_config(&config_path);

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "Rollcall starting"
    );
    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    if let Some(log) = cli.log {
        config.attendance_log = log;
    }

    if let Err(e) = run(cli.command.unwrap_or(Command::Demo), &config) {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(command: Command, config: &AppConfig) -> Result<()> {
    let store = LogStore::new(&config.attendance_log);
    let reporter = Reporter::new(store.clone())
        .with_schedule(&config.standard_start, &config.standard_end);

    match command {
        Command::Demo => run_demo(&reporter, config)?,
        Command::Day { date } => print_records(&reporter.by_date(&date)),
        Command::Range { start, end } => print_records(&reporter.by_date_range(&start, &end)?),
        Command::Week => print_records(&reporter.weekly()?),
        Command::Month => print_records(&reporter.monthly()?),
        Command::Hours { name, date } => {
            println!("{name} {date}: {:.2} h", reporter.hours_for(&name, &date)?);
        }
        Command::Summary { start, end } => print_summary(&reporter.summary(&start, &end)?),
        Command::Late { date, standard } => {
            let late = reporter.late_arrivals(&date, standard.as_deref())?;
            println!("Late arrivals on {date}: {}", late.len());
            for person in late {
                println!(
                    "  {:<24} {}  {} min late",
                    person.name, person.arrival_time, person.minutes_late
                );
            }
        }
        Command::Early { date, standard } => {
            let early = reporter.early_departures(&date, standard.as_deref())?;
            println!("Early departures on {date}: {}", early.len());
            for person in early {
                println!(
                    "  {:<24} {}  {} min early",
                    person.name, person.departure_time, person.minutes_early
                );
            }
        }
        Command::Export {
            start,
            end,
            output,
            format,
        } => {
            let path = reporter.export(&start, &end, output.as_deref(), format.into())?;
            println!("Report exported: {}", path.display());
        }
        Command::Dedup => {
            let removed = maintenance::dedup(&store)?;
            println!("Removed {removed} duplicate records");
        }
        Command::Backup { dir } => {
            let dir = dir.unwrap_or_else(|| config.backup_dir.clone());
            let path = maintenance::backup(&store, &dir)?;
            println!("Backup written: {}", path.display());
        }
        Command::Images(images) => run_images(images, config),
    }
    Ok(())
}

/// Today's count, this week's count, then a backup and a dedup. Maintenance
/// failures are reported and do not stop the run.
fn run_demo(reporter: &Reporter, config: &AppConfig) -> Result<()> {
    let today = chrono::Local::now()
        .date_naive()
        .format(util::constants::DATE_FORMAT)
        .to_string();
    println!("Today ({today}): {} records", reporter.by_date(&today).len());
    println!("This week: {} records", reporter.weekly()?.len());

    match maintenance::backup(reporter.store(), &config.backup_dir) {
        Ok(path) => println!("Backup written: {}", path.display()),
        Err(e) => {
            tracing::error!(error = %e, "Backup failed");
            println!("Backup failed: {e}");
        }
    }

    let removed = match maintenance::dedup(reporter.store()) {
        Ok(removed) => removed,
        Err(e) => {
            tracing::error!(error = %e, "Dedup failed");
            println!("Dedup failed: {e}");
            0
        }
    };
    println!("Removed {removed} duplicate records");
    Ok(())
}

fn run_images(command: ImagesCommand, config: &AppConfig) {
    match command {
        ImagesCommand::Resize {
            input_dir,
            output_dir,
            width,
            height,
        } => {
            let size = (
                width.unwrap_or(config.image_size.0),
                height.unwrap_or(config.image_size.1),
            );
            let validator = ImageValidator::new(size, config.min_image_dimension);
            let count = validator.batch_resize(&input_dir, &output_dir);
            println!("Resized {count} images to {}x{}", size.0, size.1);
        }
        ImagesCommand::Validate { paths } => {
            let validator = ImageValidator::new(config.image_size, config.min_image_dimension);
            for path in paths {
                let check = validator.validate(&path);
                println!("{}: {}", path.display(), check.reason());
            }
        }
    }
}

fn print_records(records: &[AttendanceRecord]) {
    println!("{} records", records.len());
    for record in records {
        println!("  {}  {:<3}  {}", record.timestamp, record.action.label(), record.name);
    }
}

fn print_summary(summary: &RangeSummary) {
    if summary.is_empty() {
        println!("No attendance in range");
        return;
    }
    for person in summary.values() {
        println!(
            "{}: {} days, {:.2} h",
            person.name, person.total_days, person.total_hours
        );
        for (date, hours) in &person.days_detail {
            println!("  {date}  {hours:.2} h");
        }
    }
}
