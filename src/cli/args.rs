use crate::{
    cli::commands::{example_command, optimize_command, validate_command},
    error::Result,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cutlist")]
#[command(about = "Optimize material cutting layouts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Number of worker threads to use
    #[arg(short, long, global = true, default_value_t = num_cpus::get())]
    pub threads: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Optimize cutting layout from an input file
    Optimize {
        /// Demand panels: a full request in JSON, or a panel list in CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Stock panels in CSV, required when `input` is CSV
        #[arg(long)]
        stock: Option<PathBuf>,

        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration overrides as JSON, used only with CSV input
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Cut thickness (kerf), used only with CSV input
        #[arg(long, default_value_t = 3)]
        cut_thickness: i32,

        /// Minimum trim dimension, used only with CSV input
        #[arg(long, default_value_t = 10)]
        min_trim: i32,

        /// Optimization accuracy (1-10), used only with CSV input
        #[arg(long, default_value_t = 5)]
        accuracy: i32,
    },

    /// Validate an input file without running the optimizer
    Validate {
        /// Input file to validate
        #[arg(short, long)]
        input: PathBuf,

        /// Stock panels in CSV, required when `input` is CSV
        #[arg(long)]
        stock: Option<PathBuf>,
    },

    /// Print an example input file
    Example {
        /// Output format (csv, json)
        #[arg(short, long, default_value = "csv")]
        format: String,
    },
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Optimize {
                input,
                stock,
                output,
                config,
                cut_thickness,
                min_trim,
                accuracy,
            } => {
                optimize_command(
                    input,
                    stock,
                    output,
                    config,
                    cut_thickness,
                    min_trim,
                    accuracy,
                    self.threads,
                )
                .await
            }
            Commands::Validate { input, stock } => validate_command(input, stock).await,
            Commands::Example { format } => example_command(format).await,
        }
    }
}
