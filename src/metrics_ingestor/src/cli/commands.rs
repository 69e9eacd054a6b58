use clap::Parser;
use shared_utils::layout::DEFAULT_DATA_DIR;

/// Download index valuation metrics and merge them into the local series files.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the credentials file (config.json). Falls back to $LXR_CONFIG,
    /// then ./config.json
    #[arg(short, long)]
    pub config: Option<String>,

    /// Folder holding the per-index JSON series
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: String,

    /// Only update these index codes (repeatable); default is the whole registry
    #[arg(long = "only", value_name = "CODE")]
    pub only: Vec<String>,
}
