//! rgs-partitions CLI
//!
//! Lists and counts set partitions, and steps through the call tree of S(n, k).

use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rgs_partitions::query::{ENUMERATION_MAX_N, RECURSION_TREE_MAX_N};
use rgs_partitions::recursion::CallTree;
use rgs_partitions::stirling::StirlingCache;
use rgs_partitions::{Query, Strategy};

#[derive(Parser)]
#[command(name = "rgs-partitions")]
#[command(about = "Set partitions in lexicographic order of restricted growth sequences", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// One label per element, e.g. `0 1 0`
    Encoding,
    /// Blocks of 1-based elements, e.g. `{1,3} {2}`
    Blocks,
}

#[derive(Subcommand)]
enum Commands {
    /// Print partitions in lexicographic order
    List {
        /// N (all partitions), N:K (exactly K blocks) or N:KMIN..=KMAX
        #[arg(allow_hyphen_values = true)]
        query: Query,

        /// Successor strategy for exact block counts
        #[arg(short, long, value_enum, default_value_t = Strategy::Retry)]
        strategy: Strategy,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Encoding)]
        format: Format,

        /// Stop after this many partitions
        #[arg(short, long)]
        limit: Option<usize>,

        /// Largest accepted set size
        #[arg(long, default_value_t = ENUMERATION_MAX_N)]
        max_n: usize,
    },

    /// Print the number of partitions a query yields
    Count {
        /// N (all partitions), N:K (exactly K blocks) or N:KMIN..=KMAX
        #[arg(allow_hyphen_values = true)]
        query: Query,
    },

    /// Print the call tree of the recurrence for S(N, K)
    Tree {
        /// Size of the set
        n: usize,

        /// Number of blocks
        k: usize,

        /// Describe the call with this preorder id
        #[arg(long)]
        step: Option<usize>,

        /// Largest accepted set size
        #[arg(long, default_value_t = RECURSION_TREE_MAX_N)]
        max_n: usize,
    },
}

fn list(out: &mut impl Write, query: Query, format: Format, limit: Option<usize>, max_n: usize) -> Result<()> {
    if query.n > max_n {
        anyhow::bail!(
            "refusing to enumerate partitions of {} elements (more than {}); raise --max-n to allow it",
            query.n,
            max_n
        );
    }

    let limit = limit.unwrap_or(usize::MAX);
    match format {
        Format::Encoding => {
            for a in query.encodings().take(limit) {
                let labels: Vec<String> = a.iter().map(|l| l.to_string()).collect();
                writeln!(out, "{}", labels.join(" "))?;
            }
        }
        Format::Blocks => {
            for blocks in query.block_lists().take(limit) {
                let blocks: Vec<String> = blocks
                    .iter()
                    .map(|b| {
                        let elements: Vec<String> = b.iter().map(|e| e.to_string()).collect();
                        format!("{{{}}}", elements.join(","))
                    })
                    .collect();
                writeln!(out, "{}", blocks.join(" "))?;
            }
        }
    }
    Ok(())
}

fn count(out: &mut impl Write, query: Query) -> Result<()> {
    match query.count() {
        Some(count) => writeln!(out, "{}", count)?,
        None => anyhow::bail!("the number of partitions for {} does not fit into 64 bits", query),
    }
    Ok(())
}

fn show(value: Option<u64>) -> String {
    value.map_or_else(|| "overflow".to_string(), |v| v.to_string())
}

fn tree(out: &mut impl Write, n: usize, k: usize, step: Option<usize>, max_n: usize) -> Result<()> {
    if n > max_n {
        anyhow::bail!(
            "refusing to build the call tree for n = {} (more than {}); raise --max-n to allow it",
            n,
            max_n
        );
    }
    let tree = CallTree::build(n, k).with_context(|| format!("S({}, {}) has no call tree: k > n", n, k))?;
    let mut cache = StirlingCache::new();

    match step {
        None => {
            for (id, node) in tree.nodes().iter().enumerate() {
                let value = show(cache.value(node.n as i64, node.k as i64));
                let mark = if node.is_base() { " (base)" } else { "" };
                writeln!(out, "{:>4} {}S({}, {}) = {}{}", id, "  ".repeat(node.depth), node.n, node.k, value, mark)?;
            }
        }
        Some(step) => {
            let info = tree.node_info(step, &mut cache);
            writeln!(out, "call {} of {}", info.id, info.total_nodes)?;
            writeln!(out, "S({}, {}) = {}", info.n, info.k, show(info.value))?;
            match (info.left, info.right) {
                (Some(l), Some(r)) => {
                    writeln!(
                        out,
                        "  = {} * S({}, {}) + S({}, {}) = {} * {} + {}",
                        info.k, l.n, l.k, r.n, r.k, info.k, show(l.value), show(r.value)
                    )?;
                }
                _ => writeln!(out, "  base case")?,
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut out = BufWriter::new(io::stdout().lock());
    match cli.command {
        Commands::List { query, strategy, format, limit, max_n } => {
            list(&mut out, query.with_strategy(strategy), format, limit, max_n)?;
        }
        Commands::Count { query } => count(&mut out, query)?,
        Commands::Tree { n, k, step, max_n } => tree(&mut out, n, k, step, max_n)?,
    }
    out.flush().context("Failed to write to stdout")?;

    Ok(())
}
