//! MSR-VTT: one zip of videos plus caption rows in the `train_9k` config.

use doomscroll_core::{DatasetKind, DirectoryCreationStrategy, HfDatasetPort, ensure_directory};

use crate::archive;
use crate::captions::CaptionIndex;
use crate::config::{CaptionLayout, MsrvttConfig};
use crate::error::PrepareError;
use crate::progress::CliProgressPrinter;
use crate::report::PrepareReport;
use crate::rows::{self, RowWindow, str_field};
use crate::staging::{blocking, staging_dir};

/// Download, extract and caption MSR-VTT into `config.output_dir`.
pub async fn prepare_msrvtt(
    hf: &dyn HfDatasetPort,
    config: &MsrvttConfig,
) -> Result<PrepareReport, PrepareError> {
    ensure_directory(&config.output_dir, DirectoryCreationStrategy::AutoCreate)?;
    let mut report = PrepareReport::new(DatasetKind::Msrvtt, config.output_dir.clone());

    report.videos_moved = download_and_extract_videos(hf, config).await?;
    println!(
        "Moved {} .mp4 files into {}",
        report.videos_moved,
        config.output_dir.display()
    );

    let captions = collect_captions(hf, config).await?;
    match config.layout {
        CaptionLayout::PerVideo => {
            let dir = config.output_dir.clone();
            report.captions_written = blocking(move || captions.write_sidecars(&dir)).await?;
        }
        CaptionLayout::Csv => {
            let dir = config.output_dir.clone();
            let csv_path = config.csv_path.clone();
            report.csv_rows = blocking(move || captions.write_csv(&dir, &csv_path)).await?;
            report.csv_path = Some(config.csv_path.clone());
        }
    }

    tracing::info!(
        videos_moved = report.videos_moved,
        captions_written = report.captions_written,
        csv_rows = report.csv_rows,
        layout = %config.layout,
        "MSR-VTT prepared"
    );
    Ok(report)
}

async fn download_and_extract_videos(
    hf: &dyn HfDatasetPort,
    config: &MsrvttConfig,
) -> Result<usize, PrepareError> {
    let staging = staging_dir(&config.staging_root, "_msrvtt_tmp_extract")?;

    println!("Downloading video zip from Hugging Face…");
    let zip_path = hf
        .download_file(&config.dataset_id, &config.archive_file)
        .await?;
    println!("Downloaded to: {}", zip_path.display());
    println!("Extracting videos (this might take a bit)…");

    let staging_path = staging.path().to_path_buf();
    let output_dir = config.output_dir.clone();
    let moved = blocking(move || {
        archive::extract_zip(&zip_path, &staging_path)?;
        archive::move_videos(&staging_path, &output_dir)
    })
    .await?;

    drop(staging);
    Ok(moved)
}

async fn collect_captions(
    hf: &dyn HfDatasetPort,
    config: &MsrvttConfig,
) -> Result<CaptionIndex, PrepareError> {
    println!(
        "Loading MSR-VTT split: config={}, split='{}' …",
        config.hf_config, config.split
    );

    let mut index = CaptionIndex::new();
    let mut skipped = 0usize;
    let mut progress = CliProgressPrinter::visible_if(config.show_progress, "Collecting captions");
    rows::for_each_row(
        hf,
        &config.dataset_id,
        &config.hf_config,
        &config.split,
        RowWindow::ALL,
        &mut progress,
        |row| match (str_field(&row, "video_id"), row.get("caption")) {
            (Some(video_id), Some(caption)) => index.push(video_id, caption),
            _ => skipped += 1,
        },
    )
    .await?;

    if skipped > 0 {
        tracing::warn!(skipped, "Skipped MSR-VTT rows without video_id or caption");
    }
    Ok(index)
}
