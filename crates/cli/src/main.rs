//! Command-line front end for the export pipeline.
//!
//! `convert` renders an HTML (or plain text) file to PDF, DOCX or both;
//! `check` renders inputs in both formats and reports how the outputs
//! compare.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use consistency::{render_batch_report, to_json, ConsistencyPolicy, ConsistencyValidator};
use export::{render, to_data_uri, Format};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "go-word-export",
    version,
    about = "Render HTML content to PDF and DOCX",
    arg_required_else_help = true
)]
struct Cli {
    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one input file.
    Convert {
        /// HTML or plain text file, `-` for stdin.
        input: PathBuf,

        /// Document title; defaults to the input file stem.
        #[arg(short, long)]
        title: Option<String>,

        /// Output format.
        #[arg(short, long, value_enum, default_value = "pdf")]
        format: FormatArg,

        /// Output path; the extension is replaced per format.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a base64 data URI to stdout instead of writing files.
        #[arg(long)]
        data_uri: bool,
    },
    /// Render inputs in both formats and report their consistency.
    Check {
        /// HTML or plain text files.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// JSON file with `maxTimeSkewMs` and `maxSizeRatio`.
        #[arg(long)]
        policy: Option<PathBuf>,

        /// Print the batch report as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum FormatArg {
    Pdf,
    Docx,
    Both,
}

impl FormatArg {
    fn formats(self) -> &'static [Format] {
        match self {
            FormatArg::Pdf => &[Format::Pdf],
            FormatArg::Docx => &[Format::Docx],
            FormatArg::Both => &Format::ALL,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let outcome = match cli.command {
        Command::Convert {
            input,
            title,
            format,
            output,
            data_uri,
        } => convert(&input, title, format, output, data_uri).await,
        Command::Check {
            inputs,
            policy,
            json,
        } => check(&inputs, policy.as_deref(), json).await,
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// File stem of the input, empty for stdin
fn default_title(path: &Path) -> String {
    if path.as_os_str() == "-" {
        return String::new();
    }
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn output_path(input: &Path, output: Option<&Path>, format: Format) -> PathBuf {
    let base = match output {
        Some(path) => path.to_path_buf(),
        None if input.as_os_str() == "-" => PathBuf::from("document"),
        None => input.to_path_buf(),
    };
    base.with_extension(format.extension())
}

async fn convert(
    input: &Path,
    title: Option<String>,
    format: FormatArg,
    output: Option<PathBuf>,
    data_uri: bool,
) -> Result<ExitCode> {
    let content = read_input(input)?;
    let title = title.unwrap_or_else(|| default_title(input));
    let imported = html_import::import(&content, &title);

    for &format in format.formats() {
        let bytes = render(&imported.elements, format)
            .await
            .with_context(|| format!("Failed to render {}", format))?;

        if data_uri {
            println!("{}", to_data_uri(format, &bytes));
            continue;
        }

        let path = output_path(input, output.as_deref(), format);
        tokio::fs::write(&path, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
        eprintln!("{}", path.display());
    }

    Ok(ExitCode::SUCCESS)
}

async fn check(inputs: &[PathBuf], policy: Option<&Path>, json: bool) -> Result<ExitCode> {
    let policy = match policy {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            ConsistencyPolicy::from_json(&raw)
                .with_context(|| format!("Invalid policy in {}", path.display()))?
        }
        None => ConsistencyPolicy::default(),
    };

    let mut documents = Vec::with_capacity(inputs.len());
    for input in inputs {
        documents.push((read_input(input)?, default_title(input)));
    }

    let batch = ConsistencyValidator::with_policy(policy)
        .validate_batch(&documents)
        .await;

    if json {
        println!("{}", to_json(&batch)?);
    } else {
        print!("{}", render_batch_report(&batch));
    }

    Ok(if batch.consistent == batch.total {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_convert() {
        let cli = Cli::try_parse_from([
            "go-word-export",
            "convert",
            "notes.html",
            "--format",
            "both",
            "-o",
            "out/notes",
        ])
        .unwrap();

        let Command::Convert { format, output, title, .. } = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(format, FormatArg::Both);
        assert_eq!(format.formats(), &Format::ALL);
        assert_eq!(output, Some(PathBuf::from("out/notes")));
        assert!(title.is_none());
    }

    #[test]
    fn test_check_requires_input() {
        assert!(Cli::try_parse_from(["go-word-export", "check"]).is_err());
    }

    #[test]
    fn test_paths() {
        let input = Path::new("docs/report.html");
        assert_eq!(default_title(input), "report");
        assert_eq!(default_title(Path::new("-")), "");
        assert_eq!(
            output_path(input, None, Format::Docx),
            PathBuf::from("docs/report.docx")
        );
        assert_eq!(
            output_path(input, Some(Path::new("out/final.pdf")), Format::Pdf),
            PathBuf::from("out/final.pdf")
        );
        assert_eq!(
            output_path(Path::new("-"), None, Format::Pdf),
            PathBuf::from("document.pdf")
        );
    }
}
