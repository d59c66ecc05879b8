#![allow(missing_docs)]

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use omni_synaptic::pipeline::candidate_notes;
use omni_synaptic::{
    NoteGraph, NoteRef, SynapticError, SynapticRouteOptions, SynapticRouteOutcome,
    SynapticRouter, SynapticSettings, VaultGraph, resolve_synaptic_settings,
};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "synaptic",
    about = "Synaptic Route keyword clouds for a markdown vault",
    arg_required_else_help = true
)]
struct Cli {
    /// Vault root directory.
    #[arg(
        long,
        short = 'r',
        value_name = "DIR",
        default_value = ".",
        global = true
    )]
    root: PathBuf,

    /// YAML settings file merged over the vault's plugin `data.json`.
    #[arg(long = "conf", short = 'c', value_name = "FILE", global = true)]
    config_file: Option<PathBuf>,

    /// Output format.
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Json, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the keyword cloud of one block for a focus note.
    Cloud {
        focus: String,
        #[command(flatten)]
        block: BlockSource,
    },
    /// Process every SynapticRoute block written in a note.
    Render { note: String },
    /// Validate block options without touching the vault.
    Validate {
        #[command(flatten)]
        block: BlockSource,
    },
    /// List the candidate notes scanned for a focus note.
    Neighborhood {
        focus: String,
        #[arg(long, default_value_t = false)]
        global: bool,
    },
    /// Return vault graph stats.
    Stats,
}

#[derive(clap::Args, Debug)]
#[group(multiple = false)]
struct BlockSource {
    /// Inline block text (`\n`-separated `key: value` lines).
    #[arg(long, value_name = "TEXT")]
    block: Option<String>,
    /// File holding the block text.
    #[arg(long = "block-file", value_name = "FILE")]
    block_file: Option<PathBuf>,
}

impl BlockSource {
    fn read(&self) -> Result<String> {
        if let Some(path) = &self.block_file {
            return std::fs::read_to_string(path)
                .with_context(|| format!("failed to read block file {}", path.display()));
        }
        Ok(self
            .block
            .as_deref()
            .map(|text| text.replace("\\n", "\n"))
            .unwrap_or_default())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

fn emit<T: Serialize>(value: &T, output: OutputFormat) -> Result<()> {
    let rendered = match output {
        OutputFormat::Json => serde_json::to_string(value),
        OutputFormat::Pretty => serde_json::to_string_pretty(value),
    }
    .context("failed to serialize CLI output as JSON")?;
    println!("{rendered}");
    Ok(())
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
}

fn build_graph(root: &Path) -> Result<VaultGraph> {
    VaultGraph::build(root).with_context(|| format!("failed to index vault {}", root.display()))
}

fn load_settings(cli: &Cli) -> Result<SynapticSettings> {
    resolve_synaptic_settings(&cli.root, cli.config_file.as_deref())
        .context("failed to resolve synaptic settings")
}

fn resolve_note(graph: &VaultGraph, name: &str) -> Result<NoteRef> {
    let direct = NoteRef::new(name.replace('\\', "/"));
    if graph.contains(&direct) {
        return Ok(direct);
    }
    graph
        .resolve_note_path(name)
        .ok_or_else(|| SynapticError::NoteNotFound(name.to_string()))
        .context("focus note is not part of the vault")
}

fn ensure_rendered(outcome: &SynapticRouteOutcome) -> Result<()> {
    match outcome {
        SynapticRouteOutcome::Rendered { .. } => Ok(()),
        SynapticRouteOutcome::SyntaxErrors { errors } => {
            bail!("{} syntax error(s) in block", errors.len())
        }
        SynapticRouteOutcome::Failed { message } => bail!("{message}"),
    }
}

fn execute(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Validate { block } => {
            let source = block.read()?;
            match SynapticRouteOptions::parse(&source) {
                Ok(options) => emit(
                    &json!({"valid": true, "options": options, "block": options.to_block()}),
                    cli.output,
                ),
                Err(err) => {
                    let errors = err.syntax_errors().unwrap_or_default();
                    emit(&json!({"valid": false, "errors": errors}), cli.output)?;
                    bail!("{err}")
                }
            }
        }
        Command::Cloud { focus, block } => {
            let source = block.read()?;
            let graph = build_graph(&cli.root)?;
            let focus = resolve_note(&graph, focus)?;
            let router = SynapticRouter::new(load_settings(cli)?);
            let outcome = router.process(&graph, &focus, &source);
            emit(&outcome, cli.output)?;
            ensure_rendered(&outcome)
        }
        Command::Render { note } => {
            let graph = build_graph(&cli.root)?;
            let focus = resolve_note(&graph, note)?;
            let path = cli.root.join(focus.as_str());
            let markdown = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read note {}", path.display()))?;
            let router = SynapticRouter::new(load_settings(cli)?);
            let outcomes = router.process_note(&graph, &focus, &markdown);
            emit(
                &json!({"note": focus, "blocks": outcomes.len(), "outcomes": outcomes}),
                cli.output,
            )
        }
        Command::Neighborhood { focus, global } => {
            let graph = build_graph(&cli.root)?;
            let focus = resolve_note(&graph, focus)?;
            let settings = load_settings(cli)?;
            let candidates = candidate_notes(&graph, &focus, *global, &settings);
            emit(
                &json!({
                    "focus": focus,
                    "global": global,
                    "lucy_zettelkasten": settings.lucy_zettelkasten,
                    "total": candidates.len(),
                    "candidates": candidates,
                }),
                cli.output,
            )
        }
        Command::Stats => {
            let graph = build_graph(&cli.root)?;
            emit(&graph.stats(), cli.output)
        }
    }
}

fn main() -> Result<()> {
    init_logger();
    let cli = Cli::parse();
    execute(&cli)
}
