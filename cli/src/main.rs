mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use pbir_similarity::{ConfigError, ScanError};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "pbir-similarity")]
#[command(about = "Find near-duplicate Power BI report projects by visual similarity")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Analyze a folder of report projects for near-duplicates")]
    Analyze {
        #[arg(help = "Folder containing report project folders (one per report)")]
        root: String,
        #[arg(long, short, value_enum, default_value = "text", help = "Output format")]
        format: OutputFormat,
        #[arg(long, value_name = "PATH", help = "Also write the similarity matrix as CSV to this path")]
        matrix_csv: Option<String>,
        #[arg(long, value_name = "SCORE", help = "Per-visual Jaccard threshold for a match")]
        visual_threshold: Option<f64>,
        #[arg(long, value_name = "SCORE", help = "Per-visual threshold for master (full coverage) detection")]
        master_threshold: Option<f64>,
        #[arg(long, value_name = "LIST", help = "Comma-separated report-level grouping cutoffs (e.g. 0.7,0.9,1.0)")]
        group_thresholds: Option<String>,
        #[arg(long, short, help = "Quiet mode: only show keep/eliminate sets and summary")]
        quiet: bool,
    },
    #[command(about = "List the collected visual inventory per report")]
    Visuals {
        #[arg(help = "Folder containing report project folders")]
        root: String,
    },
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            root,
            format,
            matrix_csv,
            visual_threshold,
            master_threshold,
            group_thresholds,
            quiet,
        } => commands::analyze::run(
            &root,
            format,
            matrix_csv.as_deref(),
            visual_threshold,
            master_threshold,
            group_thresholds.as_deref(),
            quiet,
        ),
        Commands::Visuals { root } => commands::visuals::run(&root),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for_error(&e)
        }
    }
}

fn exit_code_for_error(err: &anyhow::Error) -> ExitCode {
    let input_error = err
        .chain()
        .any(|cause| cause.is::<ScanError>() || cause.is::<ConfigError>());
    if input_error {
        ExitCode::from(2)
    } else {
        ExitCode::from(3)
    }
}
