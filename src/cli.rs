use clap::Parser;
use std::path::PathBuf;

const VERSION_INFO: &str = const_format::concatcp!(
    env!("CARGO_PKG_VERSION"), "\n",
    "Target: ", std::env::consts::ARCH, "-", std::env::consts::OS
);

/// Nested value visualizer: shows JSON as a tree of linked cards
#[derive(Parser, Debug)]
#[command(author, version = VERSION_INFO, about, long_about = None)]
pub struct Args {
    /// JSON file to show ("-" reads stdin) - optional, can also drag-and-drop
    #[arg(value_name = "FILE")]
    pub file_path: Option<PathBuf>,

    /// Enable logging to file (default: nestview.log)
    #[arg(short = 'l', long = "log", value_name = "LOG_FILE")]
    pub log_file: Option<Option<PathBuf>>,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Custom configuration directory (overrides default platform paths)
    #[arg(short = 'c', long = "config-dir", value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Horizontal gap between a card and its children
    #[arg(long = "gap-x", value_name = "PX")]
    pub gap_x: Option<f32>,

    /// Vertical gap between sibling cards
    #[arg(long = "gap-y", value_name = "PX")]
    pub gap_y: Option<f32>,

    /// Smallest width/height the view may zoom in to
    #[arg(long = "min-dimension", value_name = "PX")]
    pub min_dimension: Option<f32>,

    /// Maximum nesting depth before loading fails
    #[arg(long = "max-depth", value_name = "N")]
    pub max_depth: Option<usize>,
}

impl Args {
    /// True when no flag or file was given (GUI-only launch).
    pub fn is_empty(&self) -> bool {
        self.file_path.is_none()
            && self.log_file.is_none()
            && self.verbosity == 0
            && self.config_dir.is_none()
            && self.gap_x.is_none()
            && self.gap_y.is_none()
            && self.min_dimension.is_none()
            && self.max_depth.is_none()
    }

    /// Apply CLI overrides on top of persisted visualizer settings.
    pub fn apply_overrides(&self, config: &mut crate::core::VisualizerConfig) {
        if let Some(gap_x) = self.gap_x {
            config.layout.gap_x = gap_x;
        }
        if let Some(gap_y) = self.gap_y {
            config.layout.gap_y = gap_y;
        }
        if let Some(min_dimension) = self.min_dimension {
            config.min_dimension = min_dimension.max(1.0);
        }
        if let Some(max_depth) = self.max_depth {
            config.layout.max_depth = max_depth;
        }
    }
}
