//! Defines the decision tree classifier.
use crate::{Classifier, FeatureValue};
use crate::error::Result;
use crate::weak_learner::common::node::Node;

use std::path::Path;
use std::fs::File;
use std::io::{BufWriter, prelude::*};


/// Decision tree classifier.
/// This struct is just a wrapper of `Node`.
/// The leaves hold the weighted fraction of positive samples.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTreeClassifier {
    root: Node
}


impl From<Node> for DecisionTreeClassifier {
    #[inline]
    fn from(root: Node) -> Self {
        Self { root }
    }
}


impl Classifier for DecisionTreeClassifier {
    fn confidence(&self, x: &[FeatureValue]) -> f64 {
        self.root.predict(x)
    }
}


impl DecisionTreeClassifier {
    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }


    /// Write the current decision tree to dot file.
    #[inline]
    pub fn to_dot_file<P>(&self, path: P) -> Result<()>
        where P: AsRef<Path>
    {
        let mut f = BufWriter::new(File::create(path)?);
        f.write_all(b"graph DecisionTree {\n")?;

        let info = self.root.to_dot_info(0).0;
        for row in info {
            f.write_all(row.as_bytes())?;
        }

        f.write_all(b"}\n")?;
        f.flush()?;

        Ok(())
    }
}
