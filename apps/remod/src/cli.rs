//! Command line interface definition

use clap::Parser;
use remod_types::ColorChoice;
use std::path::PathBuf;

/// remod - reinstall node_modules without waiting for the delete
#[derive(Parser)]
#[command(name = "remod")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Reinstalls node_modules, deleting the old tree in the background")]
#[command(long_about = None)]
pub struct Cli {
    /// Pull source changes before reinstalling
    #[arg(short, long)]
    pub pull: bool,

    /// Reproduce the lockfile exactly (clean install, prefer offline)
    #[arg(short = 'l', long)]
    pub use_lock_file: bool,

    /// Delete the lockfile before installing
    #[arg(short = 'r', long)]
    pub remove_lock_file: bool,

    /// Remove the old dependency directory without reinstalling
    #[arg(short = 's', long)]
    pub skip_install: bool,

    /// Reset the accumulated savings and exit
    #[arg(short = 'c', long)]
    pub clear_cache: bool,

    /// Suppress progress output (fatal errors still print)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output the final report in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Color output control
    #[arg(long, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Extra arguments forwarded to the installer, after `--`
    #[arg(last = true, value_name = "INSTALLER_ARGS")]
    pub installer_args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_args_require_the_separator() {
        let cli = Cli::parse_from(["remod", "-p", "--", "--legacy-peer-deps"]);
        assert!(cli.pull);
        assert_eq!(cli.installer_args, ["--legacy-peer-deps"]);
    }

    #[test]
    fn short_flags_cover_the_common_options() {
        let cli = Cli::parse_from(["remod", "-l", "-r", "-s", "-c", "-q"]);
        assert!(cli.use_lock_file);
        assert!(cli.remove_lock_file);
        assert!(cli.skip_install);
        assert!(cli.clear_cache);
        assert!(cli.quiet);
        assert!(!cli.pull);
    }
}
