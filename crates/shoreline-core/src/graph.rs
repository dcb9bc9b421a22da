//! Workflow graphs: ordered task nodes plus save directives.

use crate::error::GraphError;
use crate::ids::NodeId;
use crate::node::{Input, OutputRef, TaskNode};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Instruction to persist a node's output to a destination path once the
/// workflow has run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveDirective {
    /// Output to persist.
    pub source: OutputRef,
    /// Destination path, interpreted by the execution service.
    pub destination: String,
}

/// A workflow graph: the ordered collection of task nodes and the save
/// directives submitted with them as one execution request.
///
/// Built once, validated, submitted once. All job state after submission
/// lives in the execution service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowGraph {
    /// Human-readable workflow name.
    pub name: String,

    /// Task nodes in declaration order.
    pub nodes: Vec<TaskNode>,

    /// Outputs to persist and where.
    pub saves: Vec<SaveDirective>,
}

impl WorkflowGraph {
    /// Create an empty workflow graph.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            saves: Vec::new(),
        }
    }

    /// Add a task node, returning its id for wiring downstream nodes.
    pub fn add(&mut self, node: TaskNode) -> NodeId {
        let id = node.id.clone();
        self.nodes.push(node);
        id
    }

    /// Add a save directive for a node output.
    pub fn save(&mut self, source: OutputRef, destination: impl Into<String>) {
        self.saves.push(SaveDirective {
            source,
            destination: destination.into(),
        });
    }

    /// Look up a node by id.
    pub fn node(&self, id: &NodeId) -> Option<&TaskNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Validate the graph before submission.
    ///
    /// Checks, in order:
    /// - node ids are unique;
    /// - every bound input slot is declared by its operation, and every
    ///   declared input slot is bound;
    /// - every reference names an existing node and one of its declared
    ///   output slots;
    /// - the dependency graph is acyclic;
    /// - references only point at nodes declared strictly earlier;
    /// - save directives reference valid outputs and have distinct
    ///   destinations.
    pub fn validate(&self) -> Result<(), GraphError> {
        let positions = self.positions()?;
        self.check_slots(&positions)?;
        self.check_acyclic(&positions)?;
        self.check_declaration_order(&positions)?;
        self.check_saves(&positions)?;
        Ok(())
    }

    /// Map node ids to their declaration index, rejecting duplicates.
    fn positions(&self) -> Result<HashMap<&NodeId, usize>, GraphError> {
        let mut positions = HashMap::with_capacity(self.nodes.len());
        for (index, node) in self.nodes.iter().enumerate() {
            if positions.insert(&node.id, index).is_some() {
                return Err(GraphError::DuplicateNode {
                    node: node.id.to_string(),
                });
            }
        }
        Ok(positions)
    }

    fn check_slots(&self, positions: &HashMap<&NodeId, usize>) -> Result<(), GraphError> {
        for node in &self.nodes {
            for slot in node.inputs.keys() {
                if !node.operation.has_input_slot(slot) {
                    return Err(GraphError::UnknownInputSlot {
                        node: node.id.to_string(),
                        operation: node.operation.to_string(),
                        slot: slot.clone(),
                    });
                }
            }
            for slot in node.operation.input_slots() {
                if !node.inputs.contains_key(*slot) {
                    return Err(GraphError::UnboundInputSlot {
                        node: node.id.to_string(),
                        slot: (*slot).to_string(),
                    });
                }
            }
            for input in node.inputs.values() {
                if let Input::Reference(r) = input {
                    self.check_output_ref(r, positions)?;
                }
            }
        }
        Ok(())
    }

    /// Check that a reference names an existing node and a declared
    /// output slot of its operation.
    fn check_output_ref(
        &self,
        r: &OutputRef,
        positions: &HashMap<&NodeId, usize>,
    ) -> Result<(), GraphError> {
        let index = *positions.get(&r.node).ok_or_else(|| GraphError::UnknownNode {
            node: r.node.to_string(),
        })?;
        let target = &self.nodes[index];
        if !target.operation.has_output_slot(&r.slot) {
            return Err(GraphError::UnknownOutputSlot {
                node: r.node.to_string(),
                slot: r.slot.clone(),
            });
        }
        Ok(())
    }

    /// Kahn's algorithm over the reference edges. All references are
    /// known to resolve when this runs.
    fn check_acyclic(&self, positions: &HashMap<&NodeId, usize>) -> Result<(), GraphError> {
        let n = self.nodes.len();
        let mut indegree = vec![0usize; n];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];

        for (index, node) in self.nodes.iter().enumerate() {
            for input in node.inputs.values() {
                if let Input::Reference(r) = input {
                    let dep = positions[&r.node];
                    dependents[dep].push(index);
                    indegree[index] += 1;
                }
            }
        }

        let mut ready: VecDeque<usize> = (0..n).filter(|&i| indegree[i] == 0).collect();
        let mut processed = 0usize;
        while let Some(index) = ready.pop_front() {
            processed += 1;
            for &dependent in &dependents[index] {
                indegree[dependent] -= 1;
                if indegree[dependent] == 0 {
                    ready.push_back(dependent);
                }
            }
        }

        if processed < n {
            // Every node on a cycle keeps a positive indegree; report the
            // first one in declaration order.
            let stuck = indegree.iter().position(|&d| d > 0).unwrap_or(0);
            return Err(GraphError::CycleDetected {
                node: self.nodes[stuck].id.to_string(),
            });
        }
        Ok(())
    }

    /// References may only point at nodes declared strictly earlier.
    fn check_declaration_order(
        &self,
        positions: &HashMap<&NodeId, usize>,
    ) -> Result<(), GraphError> {
        for (index, node) in self.nodes.iter().enumerate() {
            for input in node.inputs.values() {
                if let Input::Reference(r) = input {
                    if positions[&r.node] >= index {
                        return Err(GraphError::ForwardReference {
                            node: node.id.to_string(),
                            target: r.node.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn check_saves(&self, positions: &HashMap<&NodeId, usize>) -> Result<(), GraphError> {
        for (index, save) in self.saves.iter().enumerate() {
            self.check_output_ref(&save.source, positions)?;
            if self.saves[..index]
                .iter()
                .any(|s| s.destination == save.destination)
            {
                return Err(GraphError::DuplicateSaveDestination {
                    destination: save.destination.clone(),
                });
            }
        }
        Ok(())
    }
}
