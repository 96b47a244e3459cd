use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, TreemapError};

/// Dataset node as it appears in the fetched JSON.
///
/// Groups carry `children`, leaves carry `category` and `value`. The value may
/// be a JSON number or a string holding one.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawNode {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RawNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl RawNode {
    pub fn group(name: &str, children: Vec<RawNode>) -> Self {
        RawNode {
            name: name.to_string(),
            children: Some(children),
            ..Default::default()
        }
    }

    pub fn leaf(name: &str, category: &str, value: f64) -> Self {
        RawNode {
            name: name.to_string(),
            category: Some(category.to_string()),
            value: Some(Value::from(value)),
            ..Default::default()
        }
    }
}

/// Index of a node inside a [`Hierarchy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Group,
    Leaf { category: String, value: f64 },
}

#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    /// Sum of all leaf values below this node (own value for a leaf).
    pub aggregate_value: f64,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub depth: usize,
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    pub fn category(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Leaf { category, .. } => Some(category),
            NodeKind::Group => None,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self.kind {
            NodeKind::Leaf { value, .. } => Some(value),
            NodeKind::Group => None,
        }
    }
}

/// Weighted tree built once per render. Nodes are stored in pre-order, so the
/// root is always `NodeId(0)` and a parent always precedes its children.
#[derive(Clone, Debug)]
pub struct Hierarchy {
    nodes: Vec<Node>,
}

impl Hierarchy {
    pub fn build(raw: &RawNode) -> Result<Hierarchy> {
        let mut nodes = Vec::new();
        push_node(&mut nodes, raw, None, 0)?;
        // Pre-order storage: walking backwards visits children before parents.
        for idx in (0..nodes.len()).rev() {
            if let NodeKind::Leaf { value, .. } = nodes[idx].kind {
                nodes[idx].aggregate_value = value;
            }
            if let Some(NodeId(p)) = nodes[idx].parent {
                let v = nodes[idx].aggregate_value;
                nodes[p].aggregate_value += v;
                if !nodes[p].aggregate_value.is_finite() {
                    return Err(TreemapError::AggregateOverflow {
                        name: nodes[p].name.clone(),
                    });
                }
            }
        }
        let h = Hierarchy { nodes };
        debug!(
            nodes = h.len(),
            leaves = h.leaves().count(),
            total = h.total(),
            "built hierarchy '{}'",
            h.node(h.root()).name
        );
        Ok(h)
    }

    pub fn from_json(text: &str) -> Result<Hierarchy> {
        let raw: RawNode = serde_json::from_str(text)?;
        Hierarchy::build(&raw)
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.nodes[0].aggregate_value
    }

    /// All node ids in pre-order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Leaves in pre-order (left to right as they appear in the dataset).
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ids().filter(|id| self.node(*id).is_leaf())
    }

    /// Distinct leaf categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for id in self.leaves() {
            if let Some(c) = self.node(id).category()
                && !out.iter().any(|seen| seen == c)
            {
                out.push(c.to_string());
            }
        }
        out
    }
}

fn push_node(
    nodes: &mut Vec<Node>,
    raw: &RawNode,
    parent: Option<NodeId>,
    depth: usize,
) -> Result<()> {
    let kind = match &raw.children {
        Some(_) => NodeKind::Group,
        None => {
            let category = raw
                .category
                .clone()
                .ok_or_else(|| TreemapError::MissingCategory {
                    name: raw.name.clone(),
                })?;
            let value = leaf_value(&raw.name, raw.value.as_ref())?;
            NodeKind::Leaf { category, value }
        }
    };
    let id = NodeId(nodes.len());
    nodes.push(Node {
        name: raw.name.clone(),
        kind,
        aggregate_value: 0.0,
        parent,
        children: Vec::new(),
        depth,
    });
    if let Some(p) = parent {
        nodes[p.0].children.push(id);
    }
    if let Some(children) = &raw.children {
        for child in children {
            push_node(nodes, child, Some(id), depth + 1)?;
        }
    }
    Ok(())
}

fn leaf_value(name: &str, raw: Option<&Value>) -> Result<f64> {
    let v = match raw {
        None | Some(Value::Null) => {
            return Err(TreemapError::MissingValue {
                name: name.to_string(),
            });
        }
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    let v = v.ok_or_else(|| TreemapError::NonNumericValue {
        name: name.to_string(),
        raw: raw.map(|r| r.to_string()).unwrap_or_default(),
    })?;
    if !v.is_finite() {
        return Err(TreemapError::NonFiniteValue {
            name: name.to_string(),
        });
    }
    if v < 0.0 {
        return Err(TreemapError::NegativeValue {
            name: name.to_string(),
            value: v,
        });
    }
    Ok(v)
}
