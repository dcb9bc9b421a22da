//! Task nodes and their input bindings.

use crate::ids::NodeId;
use crate::operation::Operation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Reference to a named output slot of another task node.
///
/// Resolved by the execution service at run time; locally it is only a
/// lookup key checked during graph validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRef {
    /// Node that produces the output.
    pub node: NodeId,
    /// Name of the output slot.
    pub slot: String,
}

impl fmt::Display for OutputRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.node, self.slot)
    }
}

/// Value bound to an input slot of a task node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Input {
    /// Literal external value, e.g. an image location.
    Literal(String),
    /// Output of another node in the same graph.
    Reference(OutputRef),
}

impl Input {
    /// Bind a literal external value.
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// Bind the named output of another node.
    pub fn reference(node: NodeId, slot: impl Into<String>) -> Self {
        Self::Reference(OutputRef {
            node,
            slot: slot.into(),
        })
    }
}

/// A declared unit of remote computation: an operation plus the values
/// bound to its input slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskNode {
    /// Unique node identifier within the graph.
    pub id: NodeId,

    /// Remote operation this node invokes.
    pub operation: Operation,

    /// Execution domain the node is pinned to, if any.
    pub domain: Option<String>,

    /// Input slot bindings. Kept ordered for stable serialization.
    pub inputs: BTreeMap<String, Input>,
}

impl TaskNode {
    /// Create a new node for an operation with a generated id.
    pub fn new(operation: Operation) -> Self {
        Self {
            id: NodeId::for_operation(operation.remote_name()),
            operation,
            domain: None,
            inputs: BTreeMap::new(),
        }
    }

    /// Builder method to bind an input slot.
    pub fn with_input(mut self, slot: impl Into<String>, value: Input) -> Self {
        self.inputs.insert(slot.into(), value);
        self
    }

    /// Builder method to pin the node to an execution domain.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Builder method to set a specific id (useful for testing).
    pub fn with_id(mut self, id: NodeId) -> Self {
        self.id = id;
        self
    }

    /// Reference one of this node's output slots.
    pub fn output(&self, slot: impl Into<String>) -> Input {
        Input::reference(self.id.clone(), slot)
    }

    /// Reference one of this node's output slots as a bare `OutputRef`,
    /// for use in save directives.
    pub fn output_ref(&self, slot: impl Into<String>) -> OutputRef {
        OutputRef {
            node: self.id.clone(),
            slot: slot.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_builder() {
        let node = TaskNode::new(Operation::CdReady)
            .with_input("raster", Input::literal("s3://bucket/post"))
            .with_input("slave", Input::literal("s3://bucket/pre"));

        assert_eq!(node.operation, Operation::CdReady);
        assert_eq!(
            node.inputs.get("raster"),
            Some(&Input::Literal("s3://bucket/post".to_string()))
        );
        assert!(node.domain.is_none());
    }

    #[test]
    fn test_output_reference_points_at_node() {
        let node = TaskNode::new(Operation::WaterExtract).with_id(NodeId::new("water"));
        match node.output("data") {
            Input::Reference(r) => {
                assert_eq!(r.node, NodeId::new("water"));
                assert_eq!(r.slot, "data");
            }
            Input::Literal(_) => panic!("expected a reference"),
        }
    }

    #[test]
    fn test_domain_pinning() {
        let node = TaskNode::new(Operation::LulcMask).with_domain("raid");
        assert_eq!(node.domain.as_deref(), Some("raid"));
    }
}
