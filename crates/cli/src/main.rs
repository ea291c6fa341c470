mod provenance;

use std::collections::BTreeSet;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use sfc_orient::prelude::*;
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

use provenance::{envelope, Payload};

#[derive(Parser)]
#[command(name = "sfc-orient")]
#[command(about = "Enumerate Gray-code displacement sequences and closed orientation tables")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Enumerate displacement sequences for one dimension
    Traverse {
        #[arg(long)]
        dim: u32,
        /// Abort after this many backtracking steps (D=5 never finishes)
        #[arg(long)]
        max_steps: Option<u64>,
        /// Abort after this many seconds
        #[arg(long)]
        time_limit: Option<u64>,
        /// Print the ordered orientation sequence of these solution indices
        #[arg(long, num_args = 1..)]
        capture: Vec<u64>,
        /// Include every distinct orientation set in the output
        #[arg(long)]
        with_sets: bool,
    },
    /// Traverse, project through the symmetry group, and solve for a closed table
    Solve {
        #[arg(long)]
        dim: u32,
        /// Branch-and-bound node budget; 0 searches exhaustively
        #[arg(long, default_value_t = sfc_orient::cfg::DEFAULT_NODE_BUDGET)]
        node_budget: u64,
    },
    /// Print a small provenance JSON block
    Report,
}

/// Traversal statistics without the (large) set collection.
#[derive(Serialize)]
struct TraverseSummary<'a> {
    dim: u32,
    complete: bool,
    steps: u64,
    total_solutions: u64,
    distinct_sets: usize,
    min_count: Option<usize>,
    min_indices: &'a [u64],
    max_count: Option<usize>,
    max_indices: &'a [u64],
}

impl<'a> From<&'a Traversal> for TraverseSummary<'a> {
    fn from(t: &'a Traversal) -> Self {
        Self {
            dim: t.dim,
            complete: t.complete,
            steps: t.steps,
            total_solutions: t.total_solutions,
            distinct_sets: t.solutions.len(),
            min_count: t.min_count,
            min_indices: &t.min_indices,
            max_count: t.max_count,
            max_indices: &t.max_indices,
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Traverse {
            dim,
            max_steps,
            time_limit,
            capture,
            with_sets,
        } => run_traverse(dim, max_steps, time_limit, capture, with_sets),
        Action::Solve { dim, node_budget } => run_solve(dim, node_budget),
        Action::Report => report(),
    }
}

fn run_traverse(
    dim: u32,
    max_steps: Option<u64>,
    time_limit: Option<u64>,
    capture: Vec<u64>,
    with_sets: bool,
) -> Result<()> {
    tracing::info!(dim, max_steps = ?max_steps, time_limit = ?time_limit, "traverse");
    let cfg = TraverseCfg {
        max_steps,
        time_limit: time_limit.map(Duration::from_secs),
        capture: capture.iter().copied().collect::<BTreeSet<_>>(),
    };
    let t = traverse_with(dim, cfg).with_context(|| format!("traversing dimension {dim}"))?;
    if !t.complete {
        tracing::warn!(
            steps = t.steps,
            solutions = t.total_solutions,
            "budget spent; statistics are partial"
        );
    }
    let mut result = serde_json::to_value(TraverseSummary::from(&t))?;
    result["captured"] = serde_json::to_value(&t.captured)?;
    if with_sets {
        result["solutions"] = serde_json::to_value(&t.solutions)?;
    }
    let params = serde_json::json!({
        "dim": dim,
        "max_steps": max_steps,
        "time_limit": time_limit,
        "capture": capture,
    });
    print_json(&envelope(Payload::new("traverse", params), result))
}

fn run_solve(dim: u32, node_budget: u64) -> Result<()> {
    tracing::info!(dim, node_budget, "solve");
    let t = traverse(dim).with_context(|| format!("traversing dimension {dim}"))?;
    let cfg = ClosureCfg {
        node_budget: (node_budget > 0).then_some(node_budget),
    };
    let table = solve_with(dim, Task::root(dim), &t.solutions, cfg)
        .with_context(|| format!("solving closure for dimension {dim}"))?;
    let result = serde_json::json!({
        "traversal": TraverseSummary::from(&t),
        "table": table,
    });
    let params = serde_json::json!({ "dim": dim, "node_budget": node_budget });
    print_json(&envelope(Payload::new("solve", params), result))
}

fn report() -> Result<()> {
    let doc = envelope(
        Payload::new("report", serde_json::json!({})),
        serde_json::json!({
            "max_dimension": sfc_orient::cfg::MAX_DIMENSION,
        }),
    );
    print_json(&doc)
}

fn print_json(doc: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(doc)?);
    Ok(())
}
