//! What to enumerate: a set size, a constraint on the number of blocks and, for exact
//! block counts, the successor strategy.
//!
//! A `Query` can be written as text: `N` for all partitions of {1..N}, `N:K` for those with
//! exactly `K` blocks and `N:KMIN..=KMAX` for those with between `KMIN` and `KMAX` blocks.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::traits::Cursor;
use crate::{bell_number, stirling};
use crate::{AllPartitions, BlockLists, Encodings, ExactPartitions, RangePartitions, RepairedExactPartitions};

/// Largest set size the command-line front end enumerates without `--max-n`
pub const ENUMERATION_MAX_N: usize = 12;

/// Largest set size the command-line front end builds call trees for without `--max-n`
pub const RECURSION_TREE_MAX_N: usize = 8;

/// Constraint on the number of blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockCount
{
    /// Any number of blocks
    #[default]
    Any,
    /// Exactly this many blocks
    Exactly(usize),
    /// At least `min` and at most `max` blocks
    Between {
        /// Smallest allowed number of blocks
        min: usize,
        /// Largest allowed number of blocks
        max: usize
    }
}

/// How partitions with exactly `k` blocks are stepped through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum Strategy
{
    /// Search again when a step loses a block (`ExactPartitions`)
    #[default]
    Retry,
    /// Patch the end of the sequence instead (`RepairedExactPartitions`)
    Repair
}

/// A request for an enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Query
{
    /// Size of the set
    pub n: usize,
    /// Constraint on the number of blocks
    pub blocks: BlockCount,
    /// Successor strategy; only used with `BlockCount::Exactly`
    pub strategy: Strategy
}

impl Query {
    /// All partitions of {1..n}
    pub fn all(n: usize) -> Self {
        Query { n, blocks: BlockCount::Any, strategy: Strategy::default() }
    }

    /// Partitions of {1..n} into exactly `k` blocks
    pub fn exactly(n: usize, k: usize) -> Self {
        Query { n, blocks: BlockCount::Exactly(k), strategy: Strategy::default() }
    }

    /// Partitions of {1..n} into between `min` and `max` blocks
    pub fn between(n: usize, min: usize, max: usize) -> Self {
        Query { n, blocks: BlockCount::Between { min, max }, strategy: Strategy::default() }
    }

    /// Replaces the successor strategy
    pub fn with_strategy(self, strategy: Strategy) -> Self {
        Query { strategy, ..self }
    }

    /// Builds a query from a signed set size, as read from user input
    pub fn from_signed(n: i64, blocks: BlockCount) -> Result<Self> {
        let n = usize::try_from(n).map_err(|_| Error::NegativeSize(n))?;
        Ok(Query { n, blocks, strategy: Strategy::default() })
    }

    /// Number of partitions the query yields, or `None` if it does not fit into `u64`
    pub fn count(&self) -> Option<u64> {
        match self.blocks {
            BlockCount::Any => bell_number(self.n),
            BlockCount::Exactly(k) => stirling::stirling2(self.n, k),
            BlockCount::Between { min, max } if min > max || max > self.n => Some(0),
            BlockCount::Between { min, max } => stirling::partitions_between(self.n, min, max),
        }
    }

    /// Starts the enumeration, or returns `None` if the query yields nothing
    pub fn cursor(&self) -> Option<AnyPartitions> {
        tracing::debug!(query = %self, strategy = ?self.strategy, "starting enumeration");
        let n = self.n;
        match (self.blocks, self.strategy) {
            (BlockCount::Any, _) => Some(AnyPartitions::All(AllPartitions::first(n))),
            (BlockCount::Exactly(k), Strategy::Retry) => ExactPartitions::first(n, k).map(AnyPartitions::Exact),
            (BlockCount::Exactly(k), Strategy::Repair) => {
                RepairedExactPartitions::first(n, k).map(AnyPartitions::Repaired)
            }
            (BlockCount::Between { min, max }, _) => RangePartitions::first(n, min, max).map(AnyPartitions::Range),
        }
    }

    /// The partitions as encodings
    pub fn encodings(&self) -> Encodings<AnyPartitions> {
        Encodings::new(self.cursor())
    }

    /// The partitions as lists of blocks
    pub fn block_lists(&self) -> BlockLists<AnyPartitions> {
        self.encodings().blocks()
    }
}

fn invalid(query: &str, why: &str) -> Error {
    Error::InvalidQuery(format!("{:?}: {}", query, why))
}

fn parse_count(text: &str, query: &str) -> Result<usize> {
    text.trim().parse().map_err(|_| invalid(query, "block counts must be non-negative integers"))
}

impl FromStr for Query {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (size, blocks) = match s.split_once(':') {
            Some((size, blocks)) => (size, Some(blocks)),
            None => (s, None)
        };
        let n: i64 = size.trim().parse().map_err(|_| invalid(s, "the set size must be an integer"))?;
        let blocks = match blocks {
            None => BlockCount::Any,
            Some(blocks) => match blocks.split_once("..=") {
                Some((min, max)) => BlockCount::Between { min: parse_count(min, s)?, max: parse_count(max, s)? },
                None => BlockCount::Exactly(parse_count(blocks, s)?),
            }
        };
        Query::from_signed(n, blocks)
    }
}

// the strategy is not part of the text form
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.blocks {
            BlockCount::Any => write!(f, "{}", self.n),
            BlockCount::Exactly(k) => write!(f, "{}:{}", self.n, k),
            BlockCount::Between { min, max } => write!(f, "{}:{}..={}", self.n, min, max),
        }
    }
}

/// Any of the enumerators, with `usize` labels in a `Vec`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyPartitions
{
    /// All partitions
    All(AllPartitions),
    /// Exactly `k` blocks, retrying
    Exact(ExactPartitions),
    /// Exactly `k` blocks, repairing
    Repaired(RepairedExactPartitions),
    /// Between `kmin` and `kmax` blocks
    Range(RangePartitions)
}

impl Cursor for AnyPartitions {
    type Label = usize;

    fn get(&self) -> &[usize] {
        match self {
            AnyPartitions::All(c) => c.get(),
            AnyPartitions::Exact(c) => c.get(),
            AnyPartitions::Repaired(c) => c.get(),
            AnyPartitions::Range(c) => c.get(),
        }
    }

    fn advance(&mut self) -> bool {
        match self {
            AnyPartitions::All(c) => c.increment(),
            AnyPartitions::Exact(c) => c.increment(),
            AnyPartitions::Repaired(c) => c.increment(),
            AnyPartitions::Range(c) => c.increment(),
        }
    }
}
