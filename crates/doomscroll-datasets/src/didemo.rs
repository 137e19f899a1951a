//! DiDeMo: tar archives (some split into parts) plus train/test caption rows.

use std::path::PathBuf;

use doomscroll_core::{DatasetKind, DirectoryCreationStrategy, HfDatasetPort, ensure_directory};
use indexmap::IndexMap;

use crate::archive::{self, TarPlan};
use crate::captions::{CaptionIndex, video_id_from_path};
use crate::config::DidemoConfig;
use crate::error::PrepareError;
use crate::progress::CliProgressPrinter;
use crate::report::PrepareReport;
use crate::rows::{self, RowWindow, str_field};
use crate::staging::{blocking, staging_dir};

/// Download, extract and caption DiDeMo into `config.output_dir`.
pub async fn prepare_didemo(
    hf: &dyn HfDatasetPort,
    config: &DidemoConfig,
) -> Result<PrepareReport, PrepareError> {
    ensure_directory(&config.output_dir, DirectoryCreationStrategy::AutoCreate)?;
    let mut report = PrepareReport::new(DatasetKind::Didemo, config.output_dir.clone());

    report.videos_moved = download_and_extract_videos(hf, config).await?;
    println!(
        "Moved {} .mp4 files into {}",
        report.videos_moved,
        config.output_dir.display()
    );

    let captions = collect_captions(hf, config).await;
    let dir = config.output_dir.clone();
    report.captions_written = blocking(move || captions.write_sidecars(&dir)).await?;
    println!(
        "Wrote {} caption files to {}",
        report.captions_written,
        config.output_dir.display()
    );

    tracing::info!(
        videos_moved = report.videos_moved,
        captions_written = report.captions_written,
        "DiDeMo prepared"
    );
    Ok(report)
}

async fn download_and_extract_videos(
    hf: &dyn HfDatasetPort,
    config: &DidemoConfig,
) -> Result<usize, PrepareError> {
    println!("Fetching file list from Hugging Face…");
    let files = hf.list_repo_files(&config.dataset_id).await?;
    let plan = TarPlan::from_files(&files);
    println!("Found tar files: {:?}", plan.files().collect::<Vec<_>>());
    if plan.is_empty() {
        tracing::warn!(dataset = %config.dataset_id, "No tar archives found in repository");
    }

    let total = plan.files().count() as u64;
    let mut progress = CliProgressPrinter::visible_if(config.show_progress, "Downloading tar files");
    let mut local: IndexMap<String, PathBuf> = IndexMap::new();
    for (done, name) in plan.files().enumerate() {
        let path = hf.download_file(&config.dataset_id, name).await?;
        local.insert(name.to_string(), path);
        progress.update(done as u64 + 1, total);
    }
    progress.finish();

    let staging = staging_dir(&config.staging_root, "_didemo_tmp_extract")?;
    let staging_path = staging.path().to_path_buf();
    let output_dir = config.output_dir.clone();
    let moved = blocking(move || {
        for (prefix, parts) in &plan.split {
            println!("Combining and extracting {prefix} parts…");
            let part_paths: Vec<PathBuf> = parts
                .iter()
                .filter_map(|name| local.get(name).cloned())
                .collect();
            let combined = staging_path.join(format!("{}_combined.tar", file_label(prefix)));
            archive::concat_parts(&part_paths, &combined)?;
            archive::extract_tar(&combined, &staging_path)?;
            std::fs::remove_file(&combined)?;
        }

        for name in &plan.whole {
            if let Some(path) = local.get(name) {
                println!("Extracting {}…", path.display());
                archive::extract_tar(path, &staging_path)?;
            }
        }

        archive::move_videos(&staging_path, &output_dir)
    })
    .await?;

    drop(staging);
    Ok(moved)
}

/// Last path component of a repository file prefix, without `.tar`.
fn file_label(prefix: &str) -> &str {
    let name = prefix.rsplit('/').next().unwrap_or(prefix);
    name.strip_suffix(".tar").unwrap_or(name)
}

/// Collect captions of every configured split; splits that fail are skipped.
async fn collect_captions(hf: &dyn HfDatasetPort, config: &DidemoConfig) -> CaptionIndex {
    let mut index = CaptionIndex::new();

    for split in &config.splits {
        println!("Processing {split} split…");
        if let Err(e) = collect_split(hf, config, split, &mut index).await {
            println!("Warning: Could not load {split} split: {e}");
            tracing::warn!(split = %split, error = %e, "Skipping DiDeMo split");
        }
    }
    index
}

async fn collect_split(
    hf: &dyn HfDatasetPort,
    config: &DidemoConfig,
    split: &str,
    index: &mut CaptionIndex,
) -> Result<(), PrepareError> {
    let hf_config = rows::resolve_config(hf, &config.dataset_id, split).await?;
    let mut progress = CliProgressPrinter::visible_if(
        config.show_progress,
        &format!("Collecting captions ({split})"),
    );

    rows::for_each_row(
        hf,
        &config.dataset_id,
        &hf_config,
        split,
        RowWindow::ALL,
        &mut progress,
        |row| {
            let video_id = str_field(&row, "video").and_then(video_id_from_path);
            if let (Some(video_id), Some(caption)) = (video_id, row.get("caption")) {
                index.push(&video_id, caption);
            }
        },
    )
    .await?;
    Ok(())
}
