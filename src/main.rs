use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use framectl::Result;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "framectl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Framework corpus normalizer", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert legacy markup content into structured YAML trees
    Convert {
        /// Directory of framework documents
        #[arg(default_value = "frameworks")]
        dir: PathBuf,
    },

    /// Fix serialization compliance issues across a directory
    Remediate {
        /// Directory of framework documents
        #[arg(default_value = "frameworks")]
        dir: PathBuf,

        /// Write the JSON remediation report to this path
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Suppress per-file output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Fill missing documentation metadata from the catalog
    #[command(name = "fix-meta")]
    FixMeta {
        /// Directory of framework documents
        #[arg(default_value = "frameworks")]
        dir: PathBuf,

        /// YAML catalog of stem-pattern → metadata templates
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// Generate markdown reference documentation for the corpus
    Docs {
        /// Directory of framework documents
        #[arg(default_value = "frameworks")]
        dir: PathBuf,

        /// Output directory for generated markdown
        #[arg(short, long, default_value = "docs")]
        output: PathBuf,
    },

    /// Parse-check every document in the corpus
    Validate {
        /// Directory of framework documents
        #[arg(default_value = "frameworks")]
        dir: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert { dir } => framectl::cli::convert::run(&dir),
        Commands::Remediate { dir, report, quiet } => {
            framectl::cli::remediate::run(&dir, report.as_deref(), quiet)
        }
        Commands::FixMeta { dir, catalog } => framectl::cli::fix_meta::run(&dir, catalog.as_deref()),
        Commands::Docs { dir, output } => framectl::cli::docs::run(&dir, &output),
        Commands::Validate { dir } => framectl::cli::validate::run(&dir),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "✗".red(), e);
        std::process::exit(1);
    }
}
