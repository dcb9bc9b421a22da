//! Graph validation errors.

use thiserror::Error;

/// Errors raised while validating a workflow graph, before anything is
/// sent to the execution service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An input slot was bound that the operation does not declare.
    #[error("node '{node}': operation {operation} has no input slot '{slot}'")]
    UnknownInputSlot {
        node: String,
        operation: String,
        slot: String,
    },

    /// A declared input slot was left unbound.
    #[error("node '{node}': input slot '{slot}' is not bound")]
    UnboundInputSlot { node: String, slot: String },

    /// An input or save directive references a node not in the graph.
    #[error("reference to unknown node '{node}'")]
    UnknownNode { node: String },

    /// A reference names an output slot the target operation does not
    /// produce.
    #[error("node '{node}' has no output slot '{slot}'")]
    UnknownOutputSlot { node: String, slot: String },

    /// A node references the output of a node declared at the same or a
    /// later position.
    #[error("node '{node}' references '{target}' which is not declared earlier")]
    ForwardReference { node: String, target: String },

    /// The dependency graph does not topologically sort.
    #[error("workflow graph contains a cycle involving node '{node}'")]
    CycleDetected { node: String },

    /// Two node ids collide.
    #[error("duplicate node id '{node}'")]
    DuplicateNode { node: String },

    /// Two save directives share a destination path.
    #[error("duplicate save destination '{destination}'")]
    DuplicateSaveDestination { destination: String },
}
