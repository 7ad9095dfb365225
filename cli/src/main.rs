//! unslide CLI - PowerPoint to static HTML slides
//!
//! Converts a single .pptx file, or every .pptx file of a directory, into
//! navigable HTML slide pages.

use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use unslide::{ConversionResult, Converter, ConverterOptions, DirectoryResult, FileOutcome};

/// PowerPoint (.pptx) to static HTML slide pages
#[derive(Parser)]
#[command(
    name = "unslide",
    version,
    about = "Convert PowerPoint presentations to static HTML slides",
    long_about = "unslide - PowerPoint (.pptx) to static HTML slide pages.\n\n\
                  Give a .pptx file to convert one deck, or a directory to convert\n\
                  every deck in it and generate a main.html landing page."
)]
struct Cli {
    /// Input .pptx file or directory of .pptx files
    input: PathBuf,

    /// Output directory (default: {name}_html next to a file, html_output inside a directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write HTML without line breaks or indentation
    #[arg(long)]
    compact: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the conversion manifest as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = ConverterOptions::new().with_compact(cli.compact);
    let converter = Converter::new(options);

    if cli.input.is_dir() {
        let pb = create_spinner(&format!("Converting {}...", cli.input.display()));
        let result = converter.convert_directory(Some(cli.input.as_path()), cli.output.as_deref())?;
        pb.finish_and_clear();

        if cli.json {
            println!("{}", result.to_json()?);
        } else {
            print_directory_summary(&result);
        }
    } else if cli.input.is_file() && unslide::detect::has_pptx_extension(&cli.input) {
        let pb = create_spinner("Converting presentation...");
        let result = converter.convert_file(&cli.input, cli.output.as_deref())?;
        pb.finish_and_clear();

        if cli.json {
            println!("{}", result.to_json()?);
        } else {
            print_file_summary(&result);
        }
    } else {
        return Err(format!(
            "{} is neither a .pptx file nor a directory",
            cli.input.display()
        )
        .into());
    }

    Ok(())
}

fn print_file_summary(result: &ConversionResult) {
    println!(
        "{} Converted {} ({} slides)",
        "✓".green().bold(),
        file_name(&result.source_path),
        result.slide_count
    );
    println!("  {}: {}", "Index".bold(), result.index_file.display());
    println!("  {}: {}", "Media files".bold(), result.media_files.len());
}

fn print_directory_summary(result: &DirectoryResult) {
    for outcome in &result.results {
        match outcome {
            FileOutcome::Converted(r) => println!(
                "{} {} ({} slides)",
                "✓".green().bold(),
                file_name(&r.source_path),
                r.slide_count
            ),
            FileOutcome::Failed { source_path, error } => println!(
                "{} {}: {}",
                "✗".red().bold(),
                file_name(source_path),
                error
            ),
        }
    }

    if result.results.is_empty() {
        println!(
            "{} No .pptx files found in {}",
            "!".yellow().bold(),
            result.source_dir.display()
        );
        return;
    }

    println!("{}", "─".repeat(40));
    println!(
        "{}: {}, {}: {}",
        "Converted".bold(),
        result.converted_files,
        "Failed".bold(),
        result.failed_files
    );
    println!("{}: {}", "Output".bold(), result.output_dir.display());
    if let Some(ref main) = result.main_file {
        println!("{}: {}", "Main page".bold(), main.display());
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
