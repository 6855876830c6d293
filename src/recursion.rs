//! Call tree of the recurrence `S(n, k) = k * S(n - 1, k) + S(n - 1, k - 1)`.
//!
//! Every call is a node; a call which is not a base case has the left child `(n - 1, k)`
//! and the right child `(n - 1, k - 1)`. Nodes live in an arena indexed by their preorder
//! position, so a step counter walking `0..len()` visits the calls in the order they are made.

use crate::stirling::{is_base_case, StirlingCache};

/// A call in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallNode
{
    /// Size of the set
    pub n: usize,
    /// Number of blocks
    pub k: usize,
    /// Distance from the root
    pub depth: usize,
    /// Id of the `(n - 1, k)` call
    pub left: Option<usize>,
    /// Id of the `(n - 1, k - 1)` call
    pub right: Option<usize>,
    /// Position of the node in an in-order walk, for horizontal layout
    pub column: usize
}

impl CallNode {
    /// Checks if this call returns without recursing
    pub fn is_base(&self) -> bool {
        self.left.is_none()
    }
}

/// Call tree of `S(n, k)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallTree
{
    nodes: Vec<CallNode>
}

/// `(n, k)` and value of a child call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildInfo
{
    /// Size of the set
    pub n: usize,
    /// Number of blocks
    pub k: usize,
    /// `S(n, k)`, `None` on overflow
    pub value: Option<u64>
}

/// Summary of one call, as shown when stepping through the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeInfo
{
    /// Preorder id of the call
    pub id: usize,
    /// Size of the set
    pub n: usize,
    /// Number of blocks
    pub k: usize,
    /// `S(n, k)`, `None` on overflow
    pub value: Option<u64>,
    /// Whether the call is a base case
    pub is_base: bool,
    /// The `(n - 1, k)` call
    pub left: Option<ChildInfo>,
    /// The `(n - 1, k - 1)` call
    pub right: Option<ChildInfo>,
    /// Number of calls in the whole tree
    pub total_nodes: usize
}

impl CallTree {
    /// Builds the call tree of `S(n, k)`, or returns `None` if `k > n`.
    ///
    /// The tree has one node per call, which grows quickly with `n`.
    pub fn build(n: usize, k: usize) -> Option<Self> {
        if k > n {
            tracing::debug!(n, k, "no call tree");
            return None;
        }
        let mut tree = CallTree { nodes: Vec::new() };
        let mut column = 0;
        tree.grow(n, k, 0, &mut column);
        tracing::debug!(n, k, nodes = tree.nodes.len(), "built call tree");
        Some(tree)
    }

    fn grow(&mut self, n: usize, k: usize, depth: usize, column: &mut usize) -> usize {
        let id = self.nodes.len();
        self.nodes.push(CallNode { n, k, depth, left: None, right: None, column: 0 });

        // k <= n holds for every call reached from a valid root, and k == n is a base case,
        // so both children are well defined here
        if is_base_case(n as i64, k as i64) {
            self.nodes[id].column = *column;
            *column += 1;
        } else {
            let left = self.grow(n - 1, k, depth + 1, column);
            self.nodes[id].left = Some(left);
            self.nodes[id].column = *column;
            *column += 1;
            let right = self.grow(n - 1, k - 1, depth + 1, column);
            self.nodes[id].right = Some(right);
        }
        id
    }

    /// Number of calls
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: there is at least the root call
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The initial call
    pub fn root(&self) -> &CallNode {
        &self.nodes[0]
    }

    /// Returns the call with preorder id `id`
    pub fn node(&self, id: usize) -> Option<&CallNode> {
        self.nodes.get(id)
    }

    /// All calls, in preorder
    pub fn nodes(&self) -> &[CallNode] {
        &self.nodes
    }

    /// Ids of the calls which are base cases
    pub fn leaves(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes.iter().enumerate().filter(|(_, node)| node.is_base()).map(|(id, _)| id)
    }

    /// Largest depth of a call
    pub fn height(&self) -> usize {
        self.nodes.iter().map(|node| node.depth).max().unwrap_or(0)
    }

    /// Describes the call with preorder id `step`, clamped to `0..len()`
    pub fn node_info(&self, step: usize, cache: &mut StirlingCache) -> NodeInfo {
        let id = step.min(self.nodes.len() - 1);
        let node = self.nodes[id];
        let mut child = |child: Option<usize>| {
            child.map(|c| {
                let c = self.nodes[c];
                ChildInfo { n: c.n, k: c.k, value: cache.value(c.n as i64, c.k as i64) }
            })
        };
        let left = child(node.left);
        let right = child(node.right);
        NodeInfo {
            id,
            n: node.n,
            k: node.k,
            value: cache.value(node.n as i64, node.k as i64),
            is_base: is_base_case(node.n as i64, node.k as i64),
            left,
            right,
            total_nodes: self.nodes.len()
        }
    }
}
