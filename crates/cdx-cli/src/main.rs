use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cdx_cli::case::{CaseFile, evaluate_case, split_turns};
use cdx_core::config::{DiagnosisConfig, load_config};
use cdx_eval::Evaluator;
use cdx_parser::ActionParser;
use cdx_vocab::{LabItemTable, Vocabulary, VocabularyBuilder};
use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cdx")]
#[command(about = "Parse and score clinical decision-making transcripts")]
struct Cli {
    /// Diagnosis config (JSON). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Lab item table (JSON) to build the vocabulary from instead of the
    /// bundled one.
    #[arg(long, global = true)]
    lab_table: Option<PathBuf>,
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse each `---`-separated turn and print the outcome as JSON
    Parse {
        /// Transcript file, or `-` for stdin
        input: PathBuf,
    },
    /// Replay a recorded case and print its evaluation as JSON
    Evaluate {
        /// appendicitis, cholecystitis, diverticulitis or pancreatitis
        #[arg(long)]
        pathology: String,
        /// Case file with `turns`, `answer` and `reference`
        case: PathBuf,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let config = match &cli.config {
        Some(path) => load_config(path)
            .wrap_err_with(|| format!("failed to load config {}", path.display()))?,
        None => DiagnosisConfig::default(),
    };
    let vocabulary = Arc::new(build_vocabulary(cli.lab_table.as_deref())?);
    let parser = ActionParser::new(vocabulary, config.clone());

    match cli.command {
        Commands::Parse { input } => {
            let transcript = read_input(&input)?;
            for turn in split_turns(&transcript) {
                let outcome = parser.parse(&turn);
                println!("{}", serde_json::to_string(&outcome)?);
            }
        }
        Commands::Evaluate { pathology, case } => {
            let evaluator = Evaluator::for_pathology(&pathology, config)?;
            let case = CaseFile::load(&case)?;
            let evaluation = evaluate_case(&parser, &evaluator, &case);
            println!("{}", serde_json::to_string_pretty(&evaluation)?);
        }
    }

    Ok(())
}

fn build_vocabulary(lab_table: Option<&Path>) -> Result<Vocabulary> {
    let vocabulary = match lab_table {
        Some(path) => {
            let table = LabItemTable::load(path)
                .wrap_err_with(|| format!("failed to load lab table {}", path.display()))?;
            VocabularyBuilder::new(table).build()?
        }
        None => Vocabulary::bundled()?,
    };
    Ok(vocabulary)
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut contents = String::new();
        std::io::stdin()
            .read_to_string(&mut contents)
            .wrap_err("failed to read stdin")?;
        return Ok(contents);
    }
    std::fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path.display()))
}
