use crate::node::{ExecutionNode, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FlowGraphError {
    #[error("duplicate node id '{id}'")]
    DuplicateNode { id: NodeId },
    #[error("node '{node}' references unknown parent '{parent}'")]
    UnknownParent { node: NodeId, parent: NodeId },
    #[error("head '{id}' is not a node in the graph")]
    UnknownHead { id: NodeId },
}

/// Immutable snapshot of a run's execution graph at one observation instant.
///
/// Nodes are keyed by id; edges are the parent references each node carries.
/// `heads` are the nodes execution most recently touched, several when
/// parallel branches are live. Construction goes through [`GraphBuilder`],
/// which validates the id space, so a snapshot never dangles.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionGraph {
    nodes: BTreeMap<NodeId, ExecutionNode>,
    heads: Vec<NodeId>,
}

impl ExecutionGraph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    pub fn get(&self, id: &str) -> Option<&ExecutionNode> {
        self.nodes.get(id)
    }

    pub fn heads(&self) -> &[NodeId] {
        &self.heads
    }

    /// All nodes in id order, regardless of reachability.
    pub fn nodes(&self) -> impl Iterator<Item = &ExecutionNode> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walks every node reachable from the heads exactly once, most recent
    /// activity first: each head, then its ancestry depth-first along parent
    /// references. Nodes shared by several branches come out once.
    pub fn walk(&self) -> Walk<'_> {
        let mut stack: Vec<&NodeId> = self.heads.iter().collect();
        stack.reverse();
        Walk {
            graph: self,
            stack,
            seen: HashSet::new(),
        }
    }
}

pub struct Walk<'a> {
    graph: &'a ExecutionGraph,
    stack: Vec<&'a NodeId>,
    seen: HashSet<&'a NodeId>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a ExecutionNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if !self.seen.insert(id) {
                continue;
            }
            let Some(node) = self.graph.nodes.get(id) else {
                continue;
            };
            for parent in node.parent_ids.iter().rev() {
                self.stack.push(parent);
            }
            return Some(node);
        }
        None
    }
}

/// Collects nodes and head declarations, then validates them into an
/// [`ExecutionGraph`]. When no head is declared the builder infers the head
/// set as every node no other node lists as a parent.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<ExecutionNode>,
    heads: Vec<NodeId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(mut self, node: ExecutionNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn head(mut self, id: impl Into<NodeId>) -> Self {
        self.heads.push(id.into());
        self
    }

    pub fn build(self) -> Result<ExecutionGraph, FlowGraphError> {
        let mut nodes = BTreeMap::new();
        for node in self.nodes {
            if nodes.contains_key(&node.id) {
                return Err(FlowGraphError::DuplicateNode { id: node.id });
            }
            nodes.insert(node.id.clone(), node);
        }

        for node in nodes.values() {
            for parent in &node.parent_ids {
                if !nodes.contains_key(parent) {
                    return Err(FlowGraphError::UnknownParent {
                        node: node.id.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }

        let heads = if self.heads.is_empty() {
            infer_heads(&nodes)
        } else {
            for head in &self.heads {
                if !nodes.contains_key(head) {
                    return Err(FlowGraphError::UnknownHead { id: head.clone() });
                }
            }
            self.heads
        };

        Ok(ExecutionGraph { nodes, heads })
    }
}

fn infer_heads(nodes: &BTreeMap<NodeId, ExecutionNode>) -> Vec<NodeId> {
    let referenced: HashSet<&NodeId> = nodes
        .values()
        .flat_map(|node| node.parent_ids.iter())
        .collect();
    nodes
        .values()
        .filter(|node| !referenced.contains(&node.id))
        .map(|node| node.id.clone())
        .collect()
}
