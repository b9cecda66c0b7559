//! Defines the inner representation
//! of the trained trees.
use crate::FeatureValue;
use super::split_rule::*;


/// Enumeration of `BranchNode` and `LeafNode`.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A node that have two childrens.
    Branch(BranchNode),


    /// A node that have no child.
    Leaf(LeafNode),
}


/// Represents the branch nodes of a tree.
/// Each `BranchNode` must have two childrens
#[derive(Debug, Clone, PartialEq)]
pub struct BranchNode {
    pub(crate) rule: Splitter,
    pub(crate) left: Box<Node>,
    pub(crate) right: Box<Node>,
    // Decrease of the loss by this split.
    // `None` for a tree loaded from a model file.
    pub(crate) gain: Option<f64>,
}


impl BranchNode {
    /// The split rule of this node.
    pub fn rule(&self) -> &Splitter {
        &self.rule
    }


    /// The left child.
    pub fn left(&self) -> &Node {
        &self.left
    }


    /// The right child.
    pub fn right(&self) -> &Node {
        &self.right
    }


    /// The loss decrease (or information gain) of this split,
    /// if it was recorded.
    pub fn gain(&self) -> Option<f64> {
        self.gain
    }
}


/// Represents the leaf nodes of a tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafNode {
    pub(crate) value: f64,
}


impl LeafNode {
    /// The predicted value of this leaf.
    pub fn value(&self) -> f64 {
        self.value
    }
}


impl Node {
    #[inline]
    pub(crate) fn leaf(value: f64) -> Self {
        Node::Leaf(LeafNode { value })
    }


    #[inline]
    pub(crate) fn branch(
        rule: Splitter,
        left: Node,
        right: Node,
        gain: Option<f64>,
    ) -> Self
    {
        let left = Box::new(left);
        let right = Box::new(right);
        Node::Branch(BranchNode { rule, left, right, gain })
    }


    /// Route `x` down to a leaf and return its value.
    #[inline]
    pub fn predict(&self, x: &[FeatureValue]) -> f64 {
        let mut node = self;
        loop {
            match node {
                Node::Leaf(leaf) => return leaf.value,
                Node::Branch(branch) => {
                    node = match branch.rule.split(x) {
                        LR::Left => &branch.left,
                        LR::Right => &branch.right,
                    };
                },
            }
        }
    }


    /// Returns the number of leaves of this sub-tree.
    pub fn leaves(&self) -> usize {
        match self {
            Node::Branch(b) => b.left.leaves() + b.right.leaves(),
            Node::Leaf(_) => 1,
        }
    }


    /// Returns the depth of this sub-tree.
    /// A single leaf has depth `0`.
    pub fn depth(&self) -> usize {
        match self {
            Node::Branch(b) => 1 + b.left.depth().max(b.right.depth()),
            Node::Leaf(_) => 0,
        }
    }


    /// Adds the recorded split gains to `importance[feature]`.
    /// Returns `false` if some branch has no recorded gain.
    pub(crate) fn accumulate_gain(&self, importance: &mut [f64]) -> bool {
        let mut complete = true;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let Node::Branch(b) = node {
                match b.gain {
                    Some(gain) => { importance[b.rule.feature] += gain; },
                    None => { complete = false; },
                }
                stack.push(&b.left);
                stack.push(&b.right);
            }
        }
        complete
    }


    pub(crate) fn to_dot_info(&self, id: usize) -> (Vec<String>, usize) {
        match self {
            Node::Branch(b) => {
                let op = match b.rule.threshold {
                    FeatureValue::Numerical(_) => "<=",
                    FeatureValue::Category(_) => "==",
                };
                let b_info = format!(
                    "\tnode_{id} [ label = \"x[{feat}] {op} {thr} ?\" ];\n",
                    feat = b.rule.feature,
                    thr = b.rule.threshold,
                );

                let (l_info, next_id) = b.left.to_dot_info(id + 1);
                let (mut r_info, ret_id) = b.right.to_dot_info(next_id);

                let mut info = l_info;
                info.push(b_info);
                info.append(&mut r_info);

                let l_edge = format!(
                    "\tnode_{id} -- node_{l_id} [ label = \"Yes\" ];\n",
                    l_id = id + 1
                );
                let r_edge = format!(
                    "\tnode_{id} -- node_{r_id} [ label = \"No\" ];\n",
                    r_id = next_id
                );

                info.push(l_edge);
                info.push(r_edge);

                (info, ret_id)
            },
            Node::Leaf(l) => {
                let info = format!(
                    "\tnode_{id} [ \
                     label = \"{p:.4}\", \
                     shape = box, \
                     ];\n",
                    p = l.value
                );

                (vec![info], id + 1)
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn stump() -> Node {
        let rule = Splitter::new(0, FeatureValue::Numerical(1.5));
        Node::branch(rule, Node::leaf(-1.0), Node::leaf(1.0), Some(0.5))
    }


    #[test]
    fn predict_routes_to_leaf() {
        let tree = stump();
        assert_eq!(tree.predict(&[FeatureValue::Numerical(1.0)]), -1.0);
        assert_eq!(tree.predict(&[FeatureValue::Numerical(2.0)]), 1.0);
        assert_eq!(tree.leaves(), 2);
        assert_eq!(tree.depth(), 1);
    }


    #[test]
    fn gains_are_accumulated_per_feature() {
        let mut importance = vec![0.0; 2];
        assert!(stump().accumulate_gain(&mut importance));
        assert_eq!(importance, vec![0.5, 0.0]);
    }
}
