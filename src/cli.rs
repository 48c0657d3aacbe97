use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "arbor-inspect")]
#[command(about = "Tree inspection logging: AI photo assessment, risk inventory, map/CSV/PDF export", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the inspection database
    #[arg(long, global = true, default_value = "arbor.db")]
    pub db: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze photographs and append one inspection record
    Inspect {
        /// Image files to analyze (camera/upload intake)
        images: Vec<PathBuf>,

        /// Take every image directly inside this folder instead (gallery intake)
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// Device latitude; omit both coordinates when no fix is available
        #[arg(long)]
        lat: Option<f64>,

        /// Device longitude
        #[arg(long)]
        lon: Option<f64>,
    },

    /// Show the technical inventory, most recent first
    List,

    /// Emit map point data (JSON) for the plottable records
    Map {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the inventory as CSV, or one record as PDF
    Export {
        /// Output format (csv/pdf)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// Record id (required for pdf)
        #[arg(long)]
        id: Option<i64>,

        /// Output directory (csv) or file (pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report title
        #[arg(short, long, default_value = "Tree Inspection Report")]
        title: String,
    },

    /// Email one record's PDF report over the configured relay
    Email {
        /// Record id
        #[arg(required = true)]
        id: i64,

        /// Recipient address
        #[arg(long)]
        to: String,

        /// SMTP account (falls back to the configured one)
        #[arg(long)]
        smtp_user: Option<String>,

        /// SMTP relay host (falls back to the configured one)
        #[arg(long)]
        smtp_host: Option<String>,

        /// Message subject
        #[arg(long)]
        subject: Option<String>,
    },

    /// Delete one record by id (no-op when absent)
    Delete {
        #[arg(required = true)]
        id: i64,
    },

    /// Show or edit configuration
    Config {
        /// Store the classifier API key
        #[arg(long)]
        set_api_key: Option<String>,

        /// Show current settings
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Pdf,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(format!("Unknown format: {}. Use csv or pdf", s)),
        }
    }
}
