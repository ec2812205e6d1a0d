use arso_archive::{
    directory_to_dataframe, plan, run_batch, write_frame, Archive, ArchiveError,
    BatchJob, DateWindow, OutputFormat, OutputOptions, ReferencePolicy, SchemaPolicy,
    StationType, DEFAULT_BASE_URL, DEFAULT_LANG,
};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use log::{error, info};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

/// Download historic station data from the ARSO meteorological web archive.
#[derive(Debug, Parser)]
#[command(name = "arso-archive", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Download every planned window and write one file per window
    Batch(BatchArgs),
    /// Download a single window for one station type
    Window(WindowArgs),
    /// List the stations of one type for a window
    Stations(StationsArgs),
}

#[derive(Debug, Args)]
struct ArchiveArgs {
    /// Archive root URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Language tag sent with every request
    #[arg(long, default_value = DEFAULT_LANG)]
    lang: String,

    /// Timestamp reference row: 'global' or 'per-station'
    #[arg(long, default_value = "global")]
    reference: ReferencePolicy,

    /// Handling of differing column schemas: 'last-station' or 'strict'
    #[arg(long, default_value = "last-station")]
    schema_policy: SchemaPolicy,
}

impl ArchiveArgs {
    fn archive(&self) -> Archive {
        Archive::builder()
            .base_url(self.base_url.as_str())
            .lang(self.lang.as_str())
            .reference(self.reference)
            .schema_policy(self.schema_policy)
            .build()
    }
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Directory the output files are written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Output file format: 'csv' or 'parquet'
    #[arg(long, default_value = "csv")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct BatchArgs {
    #[command(flatten)]
    archive: ArchiveArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Station types to download (codes 1-4 or labels)
    #[arg(long, value_delimiter = ',', default_value = "4,1,2,3")]
    types: Vec<StationType>,

    /// Years to split into half-month windows for automatic stations
    #[arg(long, num_args = 1.., default_values_t = [2020, 2023])]
    years: Vec<i32>,

    /// Start of the full window used for station types 1-3
    #[arg(long, default_value = "2020-01-01")]
    from: NaiveDate,

    /// End of the full window used for station types 1-3
    #[arg(long, default_value = "2023-12-31")]
    to: NaiveDate,
}

#[derive(Debug, Args)]
struct WindowArgs {
    #[command(flatten)]
    archive: ArchiveArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Station type (code 1-4 or label)
    #[arg(long = "type")]
    station_type: StationType,

    #[arg(long)]
    from: NaiveDate,

    #[arg(long)]
    to: NaiveDate,

    /// Start of the window used to list stations [default: --from]
    #[arg(long, requires = "directory_to")]
    directory_from: Option<NaiveDate>,

    /// End of the window used to list stations [default: --to]
    #[arg(long, requires = "directory_from")]
    directory_to: Option<NaiveDate>,
}

#[derive(Debug, Args)]
struct StationsArgs {
    #[command(flatten)]
    archive: ArchiveArgs,

    /// Station type (code 1-4 or label)
    #[arg(long = "type")]
    station_type: StationType,

    #[arg(long)]
    from: NaiveDate,

    #[arg(long)]
    to: NaiveDate,

    /// Write the listing to this CSV file instead of printing it
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

async fn run(command: Command) -> Result<(), ArchiveError> {
    match command {
        Command::Batch(args) => {
            let full_window = DateWindow::new(args.from, args.to)?;
            let jobs = plan(&args.types, &args.years, full_window)?;
            info!("Planned {} jobs", jobs.len());
            let output = OutputOptions {
                dir: args.output.output,
                format: args.output.format,
            };
            run_batch(&args.archive.archive(), &jobs, &output).await?;
        }
        Command::Window(args) => {
            let window = DateWindow::new(args.from, args.to)?;
            let directory_window = match (args.directory_from, args.directory_to) {
                (Some(from), Some(to)) => DateWindow::new(from, to)?,
                _ => window,
            };
            let job = BatchJob {
                station_type: args.station_type,
                directory_window,
                data_window: window,
            };
            let output = OutputOptions {
                dir: args.output.output,
                format: args.output.format,
            };
            let summary = run_batch(&args.archive.archive(), &[job], &output).await?;
            info!("Wrote {} rows", summary.rows);
        }
        Command::Stations(args) => {
            let window = DateWindow::new(args.from, args.to)?;
            let stations = args
                .archive
                .archive()
                .stations(args.station_type.code(), window)
                .await?;
            let df = directory_to_dataframe(&stations)?;
            match args.output {
                Some(path) => {
                    write_frame(df, &path, OutputFormat::Csv).await?;
                    info!("Wrote {} stations to {}", stations.len(), path.display());
                }
                None => println!("{df}"),
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            let mut source = e.source();
            while let Some(cause) = source {
                error!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
