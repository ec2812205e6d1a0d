use crate::archive::Archive;
use crate::batch::output::{output_file_name, write_dataset, OutputFormat};
use crate::batch::plan::BatchJob;
use crate::error::ArchiveError;
use crate::utils::ensure_dir_exists;
use log::info;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputOptions {
    pub dir: PathBuf,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub files: Vec<PathBuf>,
    pub rows: usize,
}

/// Runs `jobs` one after another, writing one file per job.
///
/// The first error stops the run. Files written by earlier jobs stay on disk.
pub async fn run_batch(
    archive: &Archive,
    jobs: &[BatchJob],
    output: &OutputOptions,
) -> Result<BatchSummary, ArchiveError> {
    ensure_dir_exists(&output.dir)
        .await
        .map_err(|e| ArchiveError::OutputDirCreation(output.dir.clone(), e))?;

    let started = Instant::now();
    let mut summary = BatchSummary::default();
    for (index, job) in jobs.iter().enumerate() {
        info!(
            "Job {}/{}: {} data {} (stations listed for {})",
            index + 1,
            jobs.len(),
            job.station_type,
            job.data_window,
            job.directory_window
        );
        let dataset = archive
            .fetch_window()
            .station_type(job.station_type.code())
            .window(job.data_window)
            .directory_window(job.directory_window)
            .call()
            .await?;
        let name = output_file_name(job.station_type, &job.data_window, output.format);
        let path = write_dataset(&dataset, &output.dir, &name, output.format).await?;
        info!(
            "Finished {}: date from {} to {}, {} rows written to {}",
            job.station_type,
            job.data_window.d1(),
            job.data_window.d2(),
            dataset.len(),
            path.display()
        );
        summary.rows += dataset.len();
        summary.files.push(path);
    }
    info!(
        "Batch finished: {} files, {} rows in {:?}",
        summary.files.len(),
        summary.rows,
        started.elapsed()
    );
    Ok(summary)
}
