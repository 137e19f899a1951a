//! Main commands enum and primary subcommands.

use clap::{Args, Subcommand};

use crate::prepare_commands::PrepareCommand;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Download a public dataset into the assets directory
    Prepare {
        #[command(subcommand)]
        dataset: PrepareCommand,
    },

    /// Scroll through a directory of captioned videos
    Launch(LaunchArgs),

    /// Show resolved paths for the assets tree
    Paths,
}

/// Options of `doomscroll launch`.
#[derive(Args, Debug, Clone)]
pub struct LaunchArgs {
    /// Directory of videos with `<id>.txt` captions [default: <assets>/videos/panda70m]
    #[arg(long = "video-dir", alias = "video_dir")]
    pub video_dir: Option<String>,

    /// X handle shown as the active profile
    #[arg(long = "x-handle", alias = "x_handle", default_value = "zhang_yunzhi")]
    pub x_handle: String,

    /// Hide the X profile
    #[arg(long = "disable-x-profile", alias = "disable_x_profile")]
    pub disable_x_profile: bool,

    /// External player command run for each video (e.g. "mpv --loop")
    #[arg(long)]
    pub player: Option<String>,

    /// Override the persisted user stats file
    #[arg(long = "stats-path")]
    pub stats_path: Option<String>,
}

impl LaunchArgs {
    /// Handle to display, or `None` when the profile is disabled.
    pub fn profile(&self) -> Option<&str> {
        (!self.disable_x_profile).then_some(self.x_handle.as_str())
    }
}
