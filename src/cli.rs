//! Command-line interface definitions.

use clap::Parser;

/// Command-line arguments for the gazette and press watch.
///
/// # Examples
///
/// ```sh
/// # Run with built-in defaults, writing under ./output
/// amtsblatt_watch -o ./output
///
/// # Run with a custom keyword/URL configuration
/// amtsblatt_watch -o ./output -c watch.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for the run report and downloaded gazette artifacts
    #[arg(short, long, default_value = "./output")]
    pub output_dir: String,

    /// Optional path to a YAML config file (keywords, URLs, retry policy)
    #[arg(short, long)]
    pub config: Option<String>,
}
