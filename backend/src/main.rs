//! Tabulate CLI - reshape CSV files and render them as tables
//!
//! # Main Commands
//!
//! ```bash
//! tabulate people.csv --swap 1 3 --sort 2 --desc   # Process a file
//! tabulate people.csv --to-html --document         # Standalone HTML page
//! tabulate people.csv --pipeline steps.json        # Replay a saved pipeline
//! tabulate serve                                   # Start HTTP server (port 3000)
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! tabulate records people.csv      # Show the records an upload would produce
//! tabulate operations              # Show available operations
//! tabulate example-pipeline        # Show an example saved pipeline
//! ```

use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tabulate::{
    example_pipeline, load_pipeline, normalize_line_endings, operations_description,
    process_file, read_input, records::records_from_csv, ProcessOptions, ServerConfig,
};

#[derive(Parser)]
#[command(name = "tabulate")]
#[command(about = "Swap, delete, sort and transpose CSV columns and rows", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    process: ProcessArgs,
}

/// Flags for processing one file
#[derive(Args)]
struct ProcessArgs {
    /// Input CSV file
    input: Option<PathBuf>,

    /// Swap two columns (1-based)
    #[arg(long, num_args = 2, value_names = ["N", "M"])]
    swap: Option<Vec<usize>>,

    /// Delete a row (1-based, the header is row 1)
    #[arg(long)]
    delete_row: Option<usize>,

    /// Delete a column (1-based)
    #[arg(long)]
    delete_column: Option<usize>,

    /// Sort data rows by a column (1-based), keeping the header first
    #[arg(long, value_name = "COL")]
    sort: Option<usize>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Transpose rows and columns (applied last)
    #[arg(long)]
    transpose: bool,

    /// Write a markup table instead of CSV
    #[arg(long)]
    to_html: bool,

    /// Wrap the markup table in a standalone HTML document
    #[arg(long, requires = "to_html")]
    document: bool,

    /// Output file (default: <input>_processed.csv or .html)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Apply a saved pipeline instead of the flags above
    #[arg(short, long, conflicts_with_all = ["swap", "delete_row", "delete_column", "sort", "transpose"])]
    pipeline: Option<PathBuf>,

    /// Save the pipeline built from the flags to a JSON file
    #[arg(long)]
    save_pipeline: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on (default: TABULATE_PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the records a CSV file turns into, as JSON
    Records {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show available operations
    Operations,

    /// Show an example saved pipeline
    ExamplePipeline,
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Serve { port }) => cmd_serve(port).await,
        Some(Commands::Records { input, output }) => cmd_records(&input, output.as_deref()).await,
        Some(Commands::Operations) => cmd_operations(),
        Some(Commands::ExamplePipeline) => cmd_example_pipeline(),
        None => cmd_process(cli.process).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_process(args: ProcessArgs) -> Result<(), Box<dyn std::error::Error>> {
    let input = args
        .input
        .ok_or("No input file given (try `tabulate --help`)")?;

    let pipeline = match args.pipeline {
        Some(ref path) => {
            eprintln!("📋 Using pipeline: {}", path.display());
            Some(load_pipeline(path).await?)
        }
        None => None,
    };

    let options = ProcessOptions {
        swap: args.swap.as_deref().and_then(|v| match v {
            [n, m] => Some((*n, *m)),
            _ => None,
        }),
        delete_row: args.delete_row,
        delete_column: args.delete_column,
        sort: args.sort,
        descending: args.desc,
        transpose: args.transpose,
        to_html: args.to_html,
        document: args.document,
        output: args.output,
        pipeline,
    };

    if let Some(save_path) = args.save_pipeline {
        let json = options.to_pipeline().to_json()?;
        fs::write(&save_path, &json)?;
        eprintln!("💾 Pipeline saved to: {}", save_path.display());
    }

    let report = process_file(&input, &options).await?;
    eprintln!(
        "\n✨ Done! {} → {} ({} rows in, {} rows out)",
        report.input.display(),
        report.output.display(),
        report.rows_in,
        report.rows_out
    );
    Ok(())
}

async fn cmd_records(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Reading: {}", input.display());

    let decoded = read_input(input).await?;
    let records = records_from_csv(&normalize_line_endings(&decoded.text));
    eprintln!("   Encoding: {}", decoded.encoding);
    eprintln!("✅ {} records", records.len());

    let json = serde_json::to_string_pretty(&records)?;
    write_output(&json, output)
}

fn cmd_example_pipeline() -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = example_pipeline();
    let json = pipeline.to_json()?;
    println!("{}", json);
    Ok(())
}

fn cmd_operations() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", operations_description());
    Ok(())
}

async fn cmd_serve(port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ServerConfig::from_env()?;
    if let Some(port) = port {
        config = config.with_port(port);
    }
    tabulate::server::start_server(config).await?;
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
