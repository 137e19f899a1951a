//! Prepare command handler.

use std::sync::Arc;

use doomscroll_core::normalize_user_path;
use doomscroll_datasets::{
    DidemoConfig, MsrvttConfig, Panda70mConfig, PrepareReport, YtDlpFetcher, prepare_didemo,
    prepare_msrvtt, prepare_panda70m,
};

use crate::bootstrap::{self, CliConfig};
use crate::error::CliError;
use crate::prepare_commands::PrepareCommand;

/// Execute `doomscroll prepare <dataset>`.
pub async fn execute(config: &CliConfig, command: PrepareCommand) -> Result<(), CliError> {
    let report = match command {
        PrepareCommand::Msrvtt { layout, output_dir } => {
            let mut msrvtt = MsrvttConfig::new(&config.assets_root)
                .with_layout(layout)
                .with_progress(config.show_progress);
            if let Some(dir) = output_dir {
                msrvtt = msrvtt.with_output_dir(normalize_user_path(&dir)?);
            }
            let hf = bootstrap::hf_client(config)?;
            prepare_msrvtt(&hf, &msrvtt).await?
        }
        PrepareCommand::Didemo { output_dir } => {
            let mut didemo = DidemoConfig::new(&config.assets_root).with_progress(config.show_progress);
            if let Some(dir) = output_dir {
                didemo = didemo.with_output_dir(normalize_user_path(&dir)?);
            }
            let hf = bootstrap::hf_client(config)?;
            prepare_didemo(&hf, &didemo).await?
        }
        PrepareCommand::Panda70m {
            output_dir,
            target,
            workers,
            metadata_rows,
            yt_dlp,
        } => {
            let mut panda = Panda70mConfig::new(&config.assets_root)
                .with_target(target)
                .with_workers(workers)
                .with_metadata_rows(metadata_rows)
                .with_progress(config.show_progress);
            if let Some(dir) = output_dir {
                panda = panda.with_output_dir(normalize_user_path(&dir)?);
            }
            // Fail before touching the Hub when yt-dlp is missing
            let fetcher = YtDlpFetcher::locate(yt_dlp.as_deref())?;
            let hf = bootstrap::hf_client(config)?;
            prepare_panda70m(&hf, Arc::new(fetcher), &panda).await?
        }
    };

    print_report(&report);
    Ok(())
}

fn print_report(report: &PrepareReport) {
    println!();
    println!("Done!");
    println!("{report}");
}
