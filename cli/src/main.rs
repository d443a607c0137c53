//! redocx CLI - structure-preserving DOCX resume reconciliation

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use redocx::{ExtractOptions, Redocx, ReplacementSet, TailorResponse};

#[derive(Parser)]
#[command(name = "redocx")]
#[command(version)]
#[command(about = "Extract and rewrite DOCX resumes without touching formatting", long_about = None)]
struct Cli {
    /// Input DOCX file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the summary and experience blocks to JSON
    Extract {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Maximum summary paragraph count
        #[arg(long, default_value = "3")]
        summary_max: usize,
    },

    /// Write replacement text back into the original document
    #[command(alias = "rw")]
    Rewrite {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Replacement JSON file (ReplacementSet or tailoring response shape)
        #[arg(short, long, value_name = "FILE")]
        replacements: PathBuf,

        /// Output DOCX file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Fuzzy relocation threshold (0.0 - 1.0)
        #[arg(long, default_value = "0.70")]
        fuzzy_threshold: f64,
    },

    /// Show document statistics
    Info {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Extract {
            input,
            output,
            compact,
            summary_max,
        }) => cmd_extract(&input, output.as_deref(), compact, summary_max),
        Some(Commands::Rewrite {
            input,
            replacements,
            output,
            fuzzy_threshold,
        }) => cmd_rewrite(&input, &replacements, &output, fuzzy_threshold),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: extract if input is provided
            if let Some(input) = cli.input {
                cmd_extract(&input, None, false, ExtractOptions::default().summary_max_paragraphs)
            } else {
                println!("{}", "Usage: redocx <FILE>".yellow());
                println!("       redocx --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    summary_max: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let extraction = Redocx::new()
        .with_summary_max_paragraphs(summary_max)
        .extract(input)?;

    let json = extraction.to_json(!compact)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_rewrite(
    input: &Path,
    replacements_path: &Path,
    output: &Path,
    fuzzy_threshold: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    if !(0.0..=1.0).contains(&fuzzy_threshold) {
        return Err(format!("Invalid fuzzy threshold: {}", fuzzy_threshold).into());
    }

    let replacements = load_replacements(replacements_path)?;
    if replacements.is_empty() {
        println!("{}", "Nothing to rewrite (empty replacement set)".yellow());
    }

    let extraction = Redocx::new()
        .with_fuzzy_threshold(fuzzy_threshold)
        .extract(input)?;
    let rewritten = extraction.rewrite(&replacements)?;

    fs::write(output, rewritten)?;
    println!("{} {}", "Saved to".green(), output.display());

    Ok(())
}

/// Parse the replacement file, accepting either the flat `ReplacementSet`
/// shape or the indexed tailoring-response shape. The two are told apart by
/// their top-level keys, since both carry a `summary`.
fn load_replacements(path: &Path) -> Result<ReplacementSet, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;

    if value.get("experiences").is_some() {
        let response: TailorResponse = serde_json::from_value(value)
            .map_err(|e| format!("Invalid tailoring response: {}", e))?;
        return Ok(response.into());
    }

    let set: ReplacementSet = serde_json::from_value(value)
        .map_err(|e| format!("Invalid replacement set: {}", e))?;
    Ok(set)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let model = redocx::extract_file(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Experience blocks".bold(), model.block_count());
    println!("{}: {}", "Bullets".bold(), model.bullet_count());
    println!(
        "{}: {}",
        "Summary paragraphs".bold(),
        model.summary.para_idxs.len()
    );

    if !model.summary.is_empty() {
        println!();
        println!("{}", "Summary".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        println!("{}", model.summary.text);
    }

    if !model.experiences.is_empty() {
        println!();
        println!("{}", "Blocks".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for (i, block) in model.experiences.iter().enumerate() {
            let header = if block.header.is_empty() {
                "(no header)".dimmed().to_string()
            } else {
                block.header.clone()
            };
            println!(
                "{:>3}. {} {}",
                i,
                header,
                format!("({} bullets)", block.bullet_count()).dimmed()
            );
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "redocx".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Structure-preserving DOCX resume reconciliation");
}
