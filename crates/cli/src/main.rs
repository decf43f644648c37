use anyhow::Result;
use clap::{Parser, Subcommand};
use qtpack::commands::{default_rules_command, emit_command, inspect_command, scan_command};

/// Qt binary artifact packager CLI.
///
/// This CLI is a thin wrapper around `qtpack-core` (exposed in code as
/// `qtpack_core`). All substantive logic lives in the library so it can be
/// tested thoroughly and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "qtpack",
    version,
    about = "Classify Qt binary artifacts and build dependency-annotated package descriptors",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk a tree of artifacts, classify them into packages, apply the merge
    /// table, resolve dependencies, and print the result.
    Scan {
        /// Root of the extracted distribution tree. Defaults to the current
        /// working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Package version to stamp on every package. Defaults to the rules'
        /// default version.
        #[arg(long)]
        version: Option<String>,

        /// Path to a rules file (.json, .yaml or .yml). Defaults to the
        /// built-in Qt 5.4 rules.
        #[arg(long)]
        rules: Option<String>,

        /// Binary header inspector to use (see `qtpack inspect --help`).
        #[arg(long, default_value = "goblin")]
        inspector: String,

        /// Emit the full registry as JSON instead of the summary text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Scan a tree and write one `.autopkg` package descriptor per package.
    Emit {
        /// Root of the extracted distribution tree. Defaults to the current
        /// working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Directory to write `.autopkg` documents into.
        #[arg(long)]
        output: String,

        /// Package version to stamp on every package. Defaults to the rules'
        /// default version.
        #[arg(long)]
        version: Option<String>,

        /// Path to a rules file (.json, .yaml or .yml).
        #[arg(long)]
        rules: Option<String>,

        /// Binary header inspector to use.
        #[arg(long, default_value = "goblin")]
        inspector: String,
    },

    /// Show what an inspector reports for a single artifact.
    Inspect {
        /// Path to the artifact.
        #[arg(long)]
        path: String,

        /// Binary header inspector to use.
        #[arg(long, default_value = "goblin")]
        inspector: String,

        /// Skip the SHA-256 content hash.
        #[arg(long, default_value_t = false)]
        skip_hash: bool,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the built-in domain rules, for bootstrapping a rules file.
    DefaultRules {
        /// Emit YAML instead of JSON.
        #[arg(long, default_value_t = false)]
        yaml: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan { root, version, rules, inspector, json } => {
            scan_command(&root, version, rules, &inspector, json)?
        }
        Command::Emit { root, output, version, rules, inspector } => {
            emit_command(&root, &output, version, rules, &inspector)?
        }
        Command::Inspect { path, inspector, skip_hash, json } => {
            inspect_command(&path, &inspector, skip_hash, json)?
        }
        Command::DefaultRules { yaml } => default_rules_command(yaml)?,
    }

    Ok(())
}
