//! JSON persistence of [`Ensemble`].
//!
//! ```text
//! {
//!   "spec": ["numerical", "category", ...],
//!   "y0": 0.5,
//!   "trees": [
//!     {"split_index": 0, "split_type": "numerical", "split_value": 1.5,
//!      "left": {"value": -0.1}, "right": {"value": 0.2}},
//!     ...
//!   ]
//! }
//! ```
use serde_json::{json, Map, Value};

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::{FeatureSpec, FeatureType, FeatureValue};
use crate::error::{GbdtError, Result};
use crate::weak_learner::{Node, RegressionTreeRegressor, Splitter};
use super::ensemble::Ensemble;


const SPLIT_KEYS: [&str; 5] = [
    "split_index", "split_type", "split_value", "left", "right",
];


impl Ensemble {
    /// Convert this model into a JSON value.
    pub fn to_json(&self) -> Value {
        let trees = self.trees.iter()
            .map(|tree| node_to_json(tree.root()))
            .collect::<Vec<_>>();
        json!({
            "spec": self.spec.types()
                .iter()
                .map(|ty| ty.as_str())
                .collect::<Vec<_>>(),
            "y0": self.y0,
            "trees": trees,
        })
    }


    /// Read a model from a JSON value.
    /// Fails as a whole if any tree is malformed.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value.as_object()
            .ok_or_else(|| GbdtError::model("the model is not a JSON object"))?;

        let y0 = object.get("y0")
            .ok_or_else(|| GbdtError::model("missing key `y0`"))?
            .as_f64()
            .ok_or_else(|| GbdtError::model("`y0` is not a number"))?;

        let trees = object.get("trees")
            .ok_or_else(|| GbdtError::model("missing key `trees`"))?
            .as_array()
            .ok_or_else(|| GbdtError::model("`trees` is not an array"))?
            .iter()
            .enumerate()
            .map(|(k, tree)| {
                node_from_json(tree)
                    .map(RegressionTreeRegressor::from)
                    .map_err(|e| match e {
                        GbdtError::MalformedModel(m) => {
                            GbdtError::model(format!("tree {k}: {m}"))
                        },
                        other => other,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let spec = match object.get("spec") {
            Some(spec) => serde_json::from_value::<FeatureSpec>(spec.clone())
                .map_err(|e| GbdtError::model(format!("bad `spec`: {e}")))?,
            None => infer_spec(&trees[..]),
        };
        check_splits(&spec, &trees[..])?;

        Ok(Self { spec, y0, trees })
    }


    /// Serialize this model into a JSON string.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_json())?)
    }


    /// Read a model from a JSON string.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json(&value)
    }


    /// Write this model to `writer`.
    pub fn save_json<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = BufWriter::new(writer);
        serde_json::to_writer_pretty(&mut writer, &self.to_json())?;
        writer.flush()?;
        Ok(())
    }


    /// Read a model from `reader`.
    pub fn load_json<R: Read>(reader: R) -> Result<Self> {
        let value: Value = serde_json::from_reader(BufReader::new(reader))?;
        Self::from_json(&value)
    }


    /// Write this model to the file at `path`.
    pub fn save_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.save_json(File::create(path)?)
    }


    /// Read a model from the file at `path`.
    pub fn load_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_json(File::open(path)?)
    }
}


fn node_to_json(node: &Node) -> Value {
    match node {
        Node::Leaf(leaf) => json!({ "value": leaf.value() }),
        Node::Branch(branch) => {
            let rule = branch.rule();
            let value = match rule.threshold() {
                FeatureValue::Numerical(x) => json!(x),
                FeatureValue::Category(c) => json!(c),
            };
            json!({
                "split_index": rule.feature(),
                "split_type": rule.feature_type().as_str(),
                "split_value": value,
                "left": node_to_json(branch.left()),
                "right": node_to_json(branch.right()),
            })
        },
    }
}


fn node_from_json(value: &Value) -> Result<Node> {
    let object = value.as_object()
        .ok_or_else(|| GbdtError::model("a node is not a JSON object"))?;

    let is_branch = SPLIT_KEYS.iter().any(|key| object.contains_key(*key));
    if !is_branch {
        let value = object.get("value")
            .ok_or_else(|| GbdtError::model("a leaf has no `value`"))?
            .as_f64()
            .ok_or_else(|| GbdtError::model("a leaf `value` is not a number"))?;
        return Ok(Node::leaf(value));
    }

    if let Some(key) = SPLIT_KEYS.iter().find(|key| !object.contains_key(**key)) {
        return Err(GbdtError::model(format!("a branch misses `{key}`")));
    }

    let rule = splitter_from_json(object)?;
    let left = node_from_json(&object["left"])?;
    let right = node_from_json(&object["right"])?;
    Ok(Node::branch(rule, left, right, None))
}


fn splitter_from_json(object: &Map<String, Value>) -> Result<Splitter> {
    let feature = object["split_index"].as_u64()
        .and_then(|k| usize::try_from(k).ok())
        .ok_or_else(|| GbdtError::model("`split_index` is not an index"))?;

    let tag = object["split_type"].as_str()
        .ok_or_else(|| GbdtError::model("`split_type` is not a string"))?;
    let feature_type = FeatureType::from_tag(tag)
        .ok_or_else(|| GbdtError::model(format!("unknown `split_type` `{tag}`")))?;

    let raw = &object["split_value"];
    let threshold = match feature_type {
        FeatureType::Numerical => raw.as_f64()
            .map(FeatureValue::Numerical),
        FeatureType::Category => raw.as_i64()
            .and_then(|c| i32::try_from(c).ok())
            .map(FeatureValue::Category),
    };
    let threshold = threshold.ok_or_else(|| {
        GbdtError::model(format!("`split_value` {raw} is not a {feature_type} value"))
    })?;

    Ok(Splitter::new(feature, threshold))
}


// Without a stored spec, every tested feature takes the type of its splits
// and the untested ones are numerical.
fn infer_spec(trees: &[RegressionTreeRegressor]) -> FeatureSpec {
    let mut types: Vec<FeatureType> = Vec::new();
    for tree in trees {
        let mut stack = vec![tree.root()];
        while let Some(node) = stack.pop() {
            if let Node::Branch(b) = node {
                let k = b.rule().feature();
                if types.len() <= k {
                    types.resize(k + 1, FeatureType::Numerical);
                }
                types[k] = b.rule().feature_type();
                stack.push(b.left());
                stack.push(b.right());
            }
        }
    }
    FeatureSpec::new(types)
}


fn check_splits(spec: &FeatureSpec, trees: &[RegressionTreeRegressor])
    -> Result<()>
{
    for (t, tree) in trees.iter().enumerate() {
        let mut stack = vec![tree.root()];
        while let Some(node) = stack.pop() {
            if let Node::Branch(b) = node {
                let k = b.rule().feature();
                match spec.get(k) {
                    Some(ty) if ty == b.rule().feature_type() => {},
                    Some(ty) => {
                        return Err(GbdtError::model(format!(
                            "tree {t}: feature {k} is {ty}, \
                             but split as {}", b.rule().feature_type()
                        )));
                    },
                    None => {
                        return Err(GbdtError::model(format!(
                            "tree {t}: `split_index` {k} is out of the feature spec"
                        )));
                    },
                }
                stack.push(b.left());
                stack.push(b.right());
            }
        }
    }
    Ok(())
}
