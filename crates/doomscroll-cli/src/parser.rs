//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Prepare public video datasets and scroll through them.
#[derive(Parser)]
#[command(name = "doomscroll")]
#[command(about = "Prepare captioned video datasets and run the scroll feed")]
#[command(version)]
pub struct Cli {
    /// Override the assets directory for this invocation
    #[arg(long = "assets-dir", env = "DOOMSCROLL_ASSETS_DIR", global = true)]
    pub assets_dir: Option<String>,

    /// HuggingFace token for gated or rate-limited datasets
    #[arg(long = "hf-token", env = "HF_TOKEN", global = true, hide_env_values = true)]
    pub hf_token: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prepare_commands::PrepareCommand;
    use clap::CommandFactory;
    use doomscroll_datasets::CaptionLayout;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "doomscroll",
            "--verbose",
            "--assets-dir",
            "/tmp/assets",
            "paths",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.assets_dir, Some("/tmp/assets".to_string()));
        assert!(matches!(cli.command, Some(Commands::Paths)));
    }

    #[test]
    fn test_launch_defaults() {
        let cli = Cli::parse_from(["doomscroll", "launch"]);
        let Some(Commands::Launch(args)) = cli.command else {
            panic!("expected launch");
        };
        assert_eq!(args.video_dir, None);
        assert_eq!(args.x_handle, "zhang_yunzhi");
        assert!(!args.disable_x_profile);
        assert!(args.player.is_none());
    }

    #[test]
    fn test_launch_accepts_underscore_spelling() {
        let cli = Cli::parse_from([
            "doomscroll",
            "launch",
            "--video_dir",
            "/data/videos",
            "--disable_x_profile",
        ]);
        let Some(Commands::Launch(args)) = cli.command else {
            panic!("expected launch");
        };
        assert_eq!(args.video_dir.as_deref(), Some("/data/videos"));
        assert!(args.disable_x_profile);
    }

    #[test]
    fn test_prepare_msrvtt_layout() {
        let cli = Cli::parse_from(["doomscroll", "prepare", "msrvtt", "--layout", "csv"]);
        let Some(Commands::Prepare { dataset }) = cli.command else {
            panic!("expected prepare");
        };
        assert!(matches!(
            dataset,
            PrepareCommand::Msrvtt {
                layout: CaptionLayout::Csv,
                output_dir: None
            }
        ));
    }

    #[test]
    fn test_prepare_panda70m_defaults() {
        let cli = Cli::parse_from(["doomscroll", "prepare", "panda70m", "--workers", "8"]);
        let Some(Commands::Prepare {
            dataset:
                PrepareCommand::Panda70m {
                    target,
                    workers,
                    metadata_rows,
                    yt_dlp,
                    ..
                },
        }) = cli.command
        else {
            panic!("expected prepare panda70m");
        };
        assert_eq!(target, 1000);
        assert_eq!(workers, 8);
        assert_eq!(metadata_rows, 5000);
        assert!(yt_dlp.is_none());
    }

    #[test]
    fn test_unknown_layout_is_rejected() {
        let result = Cli::try_parse_from(["doomscroll", "prepare", "msrvtt", "--layout", "xml"]);
        assert!(result.is_err());
    }
}
