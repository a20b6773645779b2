//! RISC-V Vector Trace Analyzer CLI.
//!
//! The main executable around the analysis library. It handles command-line
//! argument parsing, configuration loading, logging setup and printing of
//! result summaries.
//!
//! # Usage
//!
//! 1. **build**: Reads a trace and writes the enabled graph variants.
//! 2. **select**: Reloads a written graph and windows it for display.
//! 3. **decode**: Decodes a `vtype`/`vcsr` value or an instruction word.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use rvv_tracer::arch::{decode_vcsr_text, decode_vtype_text};
use rvv_tracer::common::{parse_word, InstructionType};
use rvv_tracer::config::Config;
use rvv_tracer::graph::{
    load_graph, save_graph, select_with, GraphBuilder, GraphKind, SelectionFilter,
};
use rvv_tracer::isa::Disassembler;
use rvv_tracer::stats::GraphStats;
use rvv_tracer::trace::load_trace;

const DEFAULT_CONFIG: &str = "tracer/configs/default.toml";

/// Command-line arguments for the trace analyzer.
#[derive(Parser, Debug)]
#[command(author, version, about = "RISC-V Vector Trace Graph Analyzer")]
struct Args {
    /// Configuration file. Defaults are used when the default file is absent.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build dependency and execution graphs from a trace.
    Build(BuildArgs),
    /// Window a written graph by instruction number and type.
    Select(SelectArgs),
    /// Decode a vtype/vcsr value or an instruction word.
    Decode(DecodeArgs),
}

#[derive(clap::Args, Debug)]
struct BuildArgs {
    #[arg(default_value = "vector_trace.json")]
    trace: PathBuf,

    /// Output file of the per-instruction dependency graph.
    #[arg(long = "output1", visible_alias = "o1")]
    output1: Option<String>,

    /// Output file of the aggregated dependency graph.
    #[arg(long = "output2", visible_alias = "o2")]
    output2: Option<String>,

    /// Output file of the execution-order graph.
    #[arg(long = "output3", visible_alias = "o3")]
    output3: Option<String>,

    #[arg(long)]
    remove_standard: bool,

    #[arg(long)]
    remove_aggregated: bool,

    #[arg(long)]
    remove_execution: bool,
}

#[derive(clap::Args, Debug)]
struct SelectArgs {
    graph: PathBuf,

    #[arg(short, long)]
    start: Option<u64>,

    #[arg(short, long)]
    end: Option<u64>,

    /// Allowed instruction types.
    #[arg(short, long, value_enum, value_delimiter = ',', num_args = 1..)]
    types: Option<Vec<InstructionType>>,

    #[arg(long)]
    max_nodes: Option<usize>,

    /// Output file; the selection is printed when absent.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeTarget {
    Vtype,
    Vcsr,
    Insn,
}

#[derive(clap::Args, Debug)]
struct DecodeArgs {
    #[arg(value_enum)]
    target: DecodeTarget,

    /// Hexadecimal value; the `0x` prefix is optional.
    value: String,
}

/// Installs the global `tracing` subscriber.
///
/// The default level is `info`; `RUST_LOG` overrides it.
fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config '{}'", path.display())),
        None if Path::new(DEFAULT_CONFIG).exists() => {
            Config::load(DEFAULT_CONFIG).context("failed to load default config")
        }
        None => Ok(Config::default()),
    }
}

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Build(build) => run_build(&config, build),
        Command::Select(select) => run_select(&config, select),
        Command::Decode(decode) => run_decode(&config, decode),
    }
}

fn run_build(config: &Config, args: BuildArgs) -> Result<()> {
    let trace = load_trace(&args.trace)
        .with_context(|| format!("failed to load trace '{}'", args.trace.display()))?;
    info!(records = trace.len(), "trace loaded");

    let jobs = [
        (
            GraphKind::Dependency,
            config.graphs.standard && !args.remove_standard,
            args.output1.unwrap_or_else(|| config.output.computational.clone()),
        ),
        (
            GraphKind::AggregatedDependency,
            config.graphs.aggregated && !args.remove_aggregated,
            args.output2.unwrap_or_else(|| config.output.aggregated.clone()),
        ),
        (
            GraphKind::ExecutionOrder,
            config.graphs.execution && !args.remove_execution,
            args.output3.unwrap_or_else(|| config.output.execution.clone()),
        ),
    ];

    for (kind, enabled, output) in jobs {
        if !enabled {
            continue;
        }
        println!("Building {} graph...", kind);
        let graph = GraphBuilder::new(kind)
            .build(&trace)
            .with_context(|| format!("failed to build {} graph", kind))?;
        save_graph(&output, &graph).with_context(|| format!("failed to write '{}'", output))?;

        println!("  Output:                  {}", output);
        GraphStats::from_graph(&graph).print();
        println!();
    }

    println!("Done!");
    Ok(())
}

fn run_select(config: &Config, args: SelectArgs) -> Result<()> {
    let defaults = config.select.filter()?;
    let filter = SelectionFilter {
        start: args.start.unwrap_or(defaults.start),
        end: args.end.or(defaults.end),
        types: args
            .types
            .map(|types| types.into_iter().collect())
            .or(defaults.types),
        max_nodes: args.max_nodes.unwrap_or(defaults.max_nodes),
    };
    if let Some(end) = filter.end {
        if end <= filter.start {
            bail!("end ({}) must be greater than start ({})", end, filter.start);
        }
    }

    let graph = load_graph(&args.graph)
        .with_context(|| format!("failed to load graph '{}'", args.graph.display()))?;
    let disasm = Disassembler::new(config.decode.layout()?);
    let view = select_with(&graph, &filter, &disasm);
    let text = serde_json::to_string_pretty(&view)?;

    match args.output {
        Some(path) => {
            fs::write(&path, text)
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            println!(
                "Selected {} nodes and {} edges into {}",
                view.nodes.len(),
                view.edges.len(),
                path.display()
            );
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn run_decode(config: &Config, args: DecodeArgs) -> Result<()> {
    let layout = config.decode.layout()?;
    let entries = match args.target {
        DecodeTarget::Vtype => decode_vtype_text(&layout, &args.value).map(|f| f.entries()),
        DecodeTarget::Vcsr => decode_vcsr_text(&args.value).map(|f| f.entries()),
        DecodeTarget::Insn => {
            let Some(raw) = parse_word(&args.value) else {
                bail!("invalid instruction word '{}'", args.value);
            };
            let Ok(word) = u32::try_from(raw) else {
                bail!("instruction word {:#x} is wider than 32 bits", raw);
            };
            println!("{}", Disassembler::new(layout).disassemble(word));
            return Ok(());
        }
    };

    let Some(entries) = entries else {
        bail!("invalid value '{}'", args.value);
    };
    for (name, value) in entries {
        println!("{:<8} {}", name, value);
    }
    Ok(())
}
