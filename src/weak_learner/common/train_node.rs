//! Defines the work-list tree induction shared by every tree.
//!
//! A tree is grown in an arena of `TrainNode`s.
//! Each pending node holds the indices of its rows in the root view,
//! the per-row working arrays live in `PseudoResponse` and are
//! shared by every node of the tree.
//! The rows of a node are dropped as soon as the node is decided,
//! and the arena is assembled into a [`Node`] at the end.
use log::debug;

use crate::{DatasetView, FeatureValue};
use super::node::Node;
use super::split_rule::*;


/// The per-row working arrays of one tree.
/// `response[i]` and `hessian[i]` belong to the `i`-th row of the root view.
#[derive(Debug, Clone, Default)]
pub struct PseudoResponse {
    pub(crate) response: Vec<f64>,
    pub(crate) hessian: Option<Vec<f64>>,
}


impl PseudoResponse {
    /// Construct working arrays from a pseudo-response.
    pub fn new(response: Vec<f64>) -> Self {
        Self { response, hessian: None }
    }


    /// Construct working arrays with second-order weights.
    pub fn with_hessian(response: Vec<f64>, hessian: Vec<f64>) -> Self {
        Self { response, hessian: Some(hessian) }
    }


    /// The pseudo-response.
    pub fn response(&self) -> &[f64] {
        &self.response[..]
    }


    /// The second-order weights, if any.
    pub fn hessian(&self) -> Option<&[f64]> {
        self.hessian.as_deref()
    }


    /// Number of rows.
    pub fn len(&self) -> usize {
        self.response.len()
    }


    /// Returns `true` if there is no row.
    pub fn is_empty(&self) -> bool {
        self.response.is_empty()
    }
}


/// Read access to the rows of the node being grown.
pub(crate) struct NodeContext<'v, 'a> {
    view: &'v DatasetView<'a>,
    work: &'v PseudoResponse,
    rows: &'v [usize],
}


impl<'v, 'a> NodeContext<'v, 'a> {
    pub(crate) fn new(
        view: &'v DatasetView<'a>,
        work: &'v PseudoResponse,
        rows: &'v [usize],
    ) -> Self
    {
        Self { view, work, rows }
    }


    /// The same node restricted to `rows`.
    #[inline]
    pub(crate) fn with_rows<'r>(&self, rows: &'r [usize]) -> NodeContext<'r, 'a>
        where 'v: 'r
    {
        NodeContext { view: self.view, work: self.work, rows }
    }


    #[inline]
    pub(crate) fn view(&self) -> &'v DatasetView<'a> {
        self.view
    }


    /// Indices of the rows on this node.
    #[inline]
    pub(crate) fn rows(&self) -> &'v [usize] {
        self.rows
    }


    #[inline]
    pub(crate) fn x(&self, row: usize, feature: usize) -> FeatureValue {
        self.view.get(row).x[feature]
    }


    #[inline]
    pub(crate) fn weight(&self, row: usize) -> f64 {
        self.view.get(row).weight
    }


    #[inline]
    pub(crate) fn response(&self, row: usize) -> f64 {
        self.work.response[row]
    }


    /// Second-order weight of `row`, `0.0` if there is none.
    #[inline]
    pub(crate) fn hessian(&self, row: usize) -> f64 {
        self.work.hessian
            .as_ref()
            .map_or(0.0, |h| h[row])
    }


    /// Split the rows of this node by `rule`.
    pub(crate) fn partition(&self, rule: &Splitter)
        -> (Vec<usize>, Vec<usize>)
    {
        let mut lrows = Vec::new();
        let mut rrows = Vec::new();
        for &row in self.rows {
            match rule.split(&self.view.get(row).x[..]) {
                LR::Left  => { lrows.push(row); },
                LR::Right => { rrows.push(row); },
            }
        }
        (lrows, rrows)
    }
}


/// The result of a split search on one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitInfo {
    /// The chosen rule.
    pub rule: Splitter,
    /// The value reported for the left side.
    pub left_value: f64,
    /// The value reported for the right side.
    pub right_value: f64,
    /// The decrease of the node loss, or the information gain.
    pub gain: f64,
}


/// Limits shared by every tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TreeLimits {
    pub(crate) max_level: usize,
    pub(crate) max_leaf_number: usize,
    pub(crate) min_values_in_leaf: usize,
}


/// The per-tree behavior plugged into [`grow`].
pub(crate) trait GrowthRule {
    /// Returns `true` if the node must become a leaf
    /// regardless of the common limits.
    fn is_pure(&self, _ctx: &NodeContext<'_, '_>) -> bool {
        false
    }


    /// Find the best split of the node.
    /// `None` makes the node a leaf.
    fn best_split(&self, ctx: &NodeContext<'_, '_>) -> Option<SplitInfo>;


    /// The value of the node as a leaf.
    fn leaf_value(&self, ctx: &NodeContext<'_, '_>) -> f64;


    /// Multiplier applied to a fresh leaf value.
    fn shrinkage(&self) -> Option<f64> {
        None
    }
}


/// States of a node while the tree grows.
enum TrainNode {
    // Taken out of the arena while being decided.
    Unborn,
    Fitting {
        level: usize,
        rows: Vec<usize>,
    },
    Leaf {
        value: f64,
    },
    Internal {
        rule: Splitter,
        left: usize,
        right: usize,
        gain: f64,
    },
}


impl TrainNode {
    fn take(&mut self) -> Self {
        std::mem::replace(self, TrainNode::Unborn)
    }
}


/// Grow a tree over all rows of `view`.
///
/// A node becomes a leaf when its level reaches `max_level`,
/// when `max_leaf_number` leaves are already emitted,
/// when it holds at most `min_values_in_leaf` rows,
/// or when the rule reports it as pure.
/// The right child is decided before the left one.
pub(crate) fn grow<R>(
    rule: &R,
    limits: &TreeLimits,
    view: &DatasetView<'_>,
    work: &PseudoResponse,
) -> Node
    where R: GrowthRule
{
    let root = TrainNode::Fitting {
        level: 0,
        rows: (0..view.len()).collect(),
    };
    let mut arena = vec![root];
    let mut stack = vec![0_usize];
    let mut leaves = 0_usize;


    while let Some(id) = stack.pop() {
        let TrainNode::Fitting { level, rows } = arena[id].take() else {
            continue;
        };
        let ctx = NodeContext::new(view, work, &rows[..]);


        let stop = level >= limits.max_level
            || leaves >= limits.max_leaf_number
            || rows.len() <= limits.min_values_in_leaf
            || rule.is_pure(&ctx);
        let split = if stop { None } else { rule.best_split(&ctx) };


        match split {
            None => {
                let mut value = rule.leaf_value(&ctx);
                if let Some(rate) = rule.shrinkage() {
                    if rate < 1.0 { value *= rate; }
                }
                arena[id] = TrainNode::Leaf { value };
                leaves += 1;
            },
            Some(info) => {
                debug!(
                    "level {level}: split x[{}] at {} \
                     (gain {:.6}, left {:.6}, right {:.6}, rows {})",
                    info.rule.feature,
                    info.rule.threshold,
                    info.gain,
                    info.left_value,
                    info.right_value,
                    rows.len(),
                );
                let (lrows, rrows) = ctx.partition(&info.rule);

                let left = arena.len();
                let right = left + 1;
                arena.push(TrainNode::Fitting { level: level + 1, rows: lrows });
                arena.push(TrainNode::Fitting { level: level + 1, rows: rrows });

                arena[id] = TrainNode::Internal {
                    rule: info.rule,
                    left,
                    right,
                    gain: info.gain,
                };
                stack.push(left);
                stack.push(right);
            },
        }
    }

    assemble(&mut arena[..], 0)
}


fn assemble(arena: &mut [TrainNode], id: usize) -> Node {
    match arena[id].take() {
        TrainNode::Internal { rule, left, right, gain } => {
            let left = assemble(arena, left);
            let right = assemble(arena, right);
            Node::branch(rule, left, right, Some(gain))
        },
        TrainNode::Leaf { value } => Node::leaf(value),
        TrainNode::Fitting { .. } | TrainNode::Unborn => Node::leaf(0.0),
    }
}
