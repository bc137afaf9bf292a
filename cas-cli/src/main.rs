use anyhow::{Context, Result};
use cas_ingest::parse_cas_text;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cas", version, about = "CAS extracted-text parser")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse an extracted-text CAS file and print the statement as JSON
    Parse {
        /// Path to the extracted text (UTF-8)
        file: PathBuf,

        /// Emit compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,

        /// Print folio/scheme/transaction counts to stderr
        #[arg(long)]
        counts: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Parse {
            file,
            compact,
            counts,
        } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let statement = parse_cas_text(&text)
                .with_context(|| format!("parsing {}", file.display()))?;

            if counts {
                let schemes: usize = statement.folios.iter().map(|f| f.schemes.len()).sum();
                let txns: usize = statement
                    .folios
                    .iter()
                    .flat_map(|f| &f.schemes)
                    .map(|s| s.transactions.len())
                    .sum();
                eprintln!(
                    "folios: {}, schemes: {}, transactions: {}, summary holdings: {}",
                    statement.folios.len(),
                    schemes,
                    txns,
                    statement.holdings.len()
                );
            }

            let json = if compact {
                serde_json::to_string(&statement)?
            } else {
                serde_json::to_string_pretty(&statement)?
            };
            println!("{json}");
        }
    }
    Ok(())
}
