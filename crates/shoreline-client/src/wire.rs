//! Wire format of the execution service's workflow API.
//!
//! Kept separate from the domain types in `shoreline-core`; conversion is
//! explicit and one-way (the service never returns a graph).

use serde::{Deserialize, Serialize};
use shoreline_core::{Input, JobStatus, TaskNode, WorkflowGraph};

/// Body of `POST /workflows`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRequest {
    pub name: String,
    pub tasks: Vec<TaskDef>,
    pub saves: Vec<SaveDef>,
}

/// One task in the submission payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDef {
    pub name: String,
    pub task_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    pub inputs: Vec<InputDef>,
    pub outputs: Vec<OutputDef>,
}

/// An input binding: either a literal `value` or a `source` reference of
/// the form `<node>:<slot>`. Exactly one of the two is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputDef {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// A declared output slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputDef {
    pub name: String,
}

/// One save directive in the submission payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveDef {
    pub source: String,
    pub destination: String,
}

/// Response to a successful submission.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    pub id: String,
}

/// Response to a status query.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub id: String,
    pub state: String,
    #[serde(default)]
    pub event: String,
}

impl From<StatusResponse> for JobStatus {
    fn from(r: StatusResponse) -> Self {
        Self {
            state: r.state,
            event: r.event,
        }
    }
}

impl From<&TaskNode> for TaskDef {
    fn from(node: &TaskNode) -> Self {
        let inputs = node
            .inputs
            .iter()
            .map(|(slot, input)| match input {
                Input::Literal(value) => InputDef {
                    name: slot.clone(),
                    value: Some(value.clone()),
                    source: None,
                },
                Input::Reference(r) => InputDef {
                    name: slot.clone(),
                    value: None,
                    source: Some(r.to_string()),
                },
            })
            .collect();
        let outputs = node
            .operation
            .output_slots()
            .iter()
            .map(|slot| OutputDef {
                name: (*slot).to_string(),
            })
            .collect();
        Self {
            name: node.id.to_string(),
            task_type: node.operation.remote_name().to_string(),
            domain: node.domain.clone(),
            inputs,
            outputs,
        }
    }
}

impl From<&WorkflowGraph> for WorkflowRequest {
    fn from(graph: &WorkflowGraph) -> Self {
        Self {
            name: graph.name.clone(),
            tasks: graph.nodes.iter().map(TaskDef::from).collect(),
            saves: graph
                .saves
                .iter()
                .map(|s| SaveDef {
                    source: s.source.to_string(),
                    destination: s.destination.clone(),
                })
                .collect(),
        }
    }
}
