//! The fixed coastal change detection pipeline.
//!
//! Nine task nodes: change-readiness alignment, per-epoch water layers,
//! a land-use exclusion mask, three binary change classifiers, and two
//! distance transforms over the gain and loss layers.

use crate::error::GraphError;
use crate::graph::WorkflowGraph;
use crate::node::{Input, TaskNode};
use crate::operation::Operation;
use rand::Rng;

/// Prefix under the customer bucket where trial run outputs land.
const TRIAL_RUNS_PREFIX: &str = "platform-stories/trial-runs";

/// Length of the random path segment isolating one trial run from the
/// next.
const RUN_SEGMENT_LEN: usize = 20;

/// Inputs to the coastal change detection pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoastalChangeRequest {
    /// Location of the post-event image, e.g. an s3 url.
    pub post_image: String,
    /// Location of the pre-event image.
    pub pre_image: String,
    /// Customer bucket prefix outputs are saved under (no trailing '/').
    pub bucket_prefix: String,
}

/// Build the nine-node coastal change detection graph and its eight save
/// directives. The returned graph has already been validated.
pub fn build_coastal_change_graph(
    request: &CoastalChangeRequest,
) -> Result<WorkflowGraph, GraphError> {
    let mut graph = WorkflowGraph::new("coastal-change-detection");

    // Align the post raster against the pre raster. `data` is the
    // aligned post epoch, `slave` the aligned pre epoch.
    let ready = TaskNode::new(Operation::CdReady)
        .with_input("raster", Input::literal(&request.post_image))
        .with_input("slave", Input::literal(&request.pre_image));

    let water_pre =
        TaskNode::new(Operation::WaterExtract).with_input("raster", ready.output("slave"));
    let water_post =
        TaskNode::new(Operation::WaterExtract).with_input("raster", ready.output("data"));

    // The LULC task only runs on the raid domain.
    let exclusion_mask = TaskNode::new(Operation::LulcMask)
        .with_domain("raid")
        .with_input("raster", ready.output("data"))
        .with_input("slave", ready.output("slave"));

    let cd_tristate = TaskNode::new(Operation::BinaryTristate)
        .with_input("raster", water_post.output("data"))
        .with_input("slave", water_pre.output("data"))
        .with_input("mask", exclusion_mask.output("data"));

    let cd_gain = TaskNode::new(Operation::BinaryGain)
        .with_input("raster", water_post.output("data"))
        .with_input("slave", water_pre.output("data"))
        .with_input("mask", exclusion_mask.output("data"));

    let cd_loss = TaskNode::new(Operation::BinaryLoss)
        .with_input("raster", water_post.output("data"))
        .with_input("slave", water_pre.output("data"))
        .with_input("mask", exclusion_mask.output("data"));

    let ddt_gain = TaskNode::new(Operation::GainDistance)
        .with_input("raster", water_post.output("data"))
        .with_input("slave", cd_gain.output("data"));

    let ddt_loss = TaskNode::new(Operation::LossDistance)
        .with_input("raster", water_post.output("data"))
        .with_input("slave", cd_loss.output("data"));

    let location = output_location(&request.bucket_prefix);
    let outputs = [
        (&water_pre, "water_pre"),
        (&water_post, "water_post"),
        (&exclusion_mask, "exclusion_mask"),
        (&cd_tristate, "cd_tristate"),
        (&cd_gain, "cd_bin_gain"),
        (&cd_loss, "cd_bin_loss"),
        (&ddt_gain, "ddt_gain"),
        (&ddt_loss, "ddt_loss"),
    ];
    for (node, name) in outputs {
        graph.save(node.output_ref("data"), format!("{}/{}", location, name));
    }

    graph.add(ready);
    graph.add(water_pre);
    graph.add(water_post);
    graph.add(exclusion_mask);
    graph.add(cd_tristate);
    graph.add(cd_gain);
    graph.add(cd_loss);
    graph.add(ddt_gain);
    graph.add(ddt_loss);

    graph.validate()?;
    Ok(graph)
}

/// Destination prefix for one trial run: the bucket prefix, the fixed
/// trial-runs path, and a fresh random segment.
fn output_location(bucket_prefix: &str) -> String {
    format!(
        "{}/{}/{}",
        bucket_prefix.trim_end_matches('/'),
        TRIAL_RUNS_PREFIX,
        run_segment()
    )
}

/// Random run segment: uppercase ASCII letters and digits.
fn run_segment() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = rand::thread_rng();
    (0..RUN_SEGMENT_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Input;

    fn request() -> CoastalChangeRequest {
        CoastalChangeRequest {
            post_image: "s3://bucket/post".to_string(),
            pre_image: "s3://bucket/pre".to_string(),
            bucket_prefix: "platform_stories/coastal_change".to_string(),
        }
    }

    #[test]
    fn test_nine_nodes_in_dependency_order() {
        let graph = build_coastal_change_graph(&request()).unwrap();
        let operations: Vec<Operation> = graph.nodes.iter().map(|n| n.operation).collect();
        assert_eq!(
            operations,
            vec![
                Operation::CdReady,
                Operation::WaterExtract,
                Operation::WaterExtract,
                Operation::LulcMask,
                Operation::BinaryTristate,
                Operation::BinaryGain,
                Operation::BinaryLoss,
                Operation::GainDistance,
                Operation::LossDistance,
            ]
        );
    }

    #[test]
    fn test_external_arguments_reach_first_node() {
        let graph = build_coastal_change_graph(&request()).unwrap();
        let ready = &graph.nodes[0];
        assert_eq!(
            ready.inputs.get("raster"),
            Some(&Input::Literal("s3://bucket/post".to_string()))
        );
        assert_eq!(
            ready.inputs.get("slave"),
            Some(&Input::Literal("s3://bucket/pre".to_string()))
        );
    }

    #[test]
    fn test_exclusion_mask_consumes_aligned_pair() {
        let graph = build_coastal_change_graph(&request()).unwrap();
        let ready_id = graph.nodes[0].id.clone();
        let mask = &graph.nodes[3];
        assert_eq!(mask.operation, Operation::LulcMask);
        assert_eq!(mask.domain.as_deref(), Some("raid"));
        assert_eq!(
            mask.inputs.get("raster"),
            Some(&Input::reference(ready_id.clone(), "data"))
        );
        assert_eq!(
            mask.inputs.get("slave"),
            Some(&Input::reference(ready_id, "slave"))
        );
    }

    #[test]
    fn test_water_layers_split_epochs() {
        let graph = build_coastal_change_graph(&request()).unwrap();
        let ready_id = graph.nodes[0].id.clone();
        assert_eq!(
            graph.nodes[1].inputs.get("raster"),
            Some(&Input::reference(ready_id.clone(), "slave"))
        );
        assert_eq!(
            graph.nodes[2].inputs.get("raster"),
            Some(&Input::reference(ready_id, "data"))
        );
    }

    #[test]
    fn test_distance_transforms_consume_classifiers() {
        let graph = build_coastal_change_graph(&request()).unwrap();
        let water_post_id = graph.nodes[2].id.clone();
        let gain_id = graph.nodes[5].id.clone();
        let loss_id = graph.nodes[6].id.clone();

        let ddt_gain = &graph.nodes[7];
        assert_eq!(
            ddt_gain.inputs.get("raster"),
            Some(&Input::reference(water_post_id.clone(), "data"))
        );
        assert_eq!(
            ddt_gain.inputs.get("slave"),
            Some(&Input::reference(gain_id, "data"))
        );

        let ddt_loss = &graph.nodes[8];
        assert_eq!(
            ddt_loss.inputs.get("raster"),
            Some(&Input::reference(water_post_id, "data"))
        );
        assert_eq!(
            ddt_loss.inputs.get("slave"),
            Some(&Input::reference(loss_id, "data"))
        );
    }

    #[test]
    fn test_references_only_point_backwards() {
        let graph = build_coastal_change_graph(&request()).unwrap();
        for (index, node) in graph.nodes.iter().enumerate() {
            for input in node.inputs.values() {
                if let Input::Reference(r) = input {
                    let target = graph
                        .nodes
                        .iter()
                        .position(|n| n.id == r.node)
                        .expect("reference resolves");
                    assert!(target < index, "node {} references {}", index, target);
                }
            }
        }
    }

    #[test]
    fn test_eight_saves_share_one_run_segment() {
        let graph = build_coastal_change_graph(&request()).unwrap();
        assert_eq!(graph.saves.len(), 8);

        let prefix = "platform_stories/coastal_change/platform-stories/trial-runs/";
        let first = &graph.saves[0].destination;
        assert!(first.starts_with(prefix), "unexpected destination {}", first);
        let segment = first[prefix.len()..]
            .split('/')
            .next()
            .expect("run segment present")
            .to_string();
        assert_eq!(segment.len(), RUN_SEGMENT_LEN);
        assert!(segment
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));

        let names: Vec<&str> = graph
            .saves
            .iter()
            .map(|s| {
                let rest = s
                    .destination
                    .strip_prefix(&format!("{}{}", prefix, segment))
                    .expect("all saves share the run segment");
                rest.trim_start_matches('/')
            })
            .collect();
        assert_eq!(
            names,
            vec![
                "water_pre",
                "water_post",
                "exclusion_mask",
                "cd_tristate",
                "cd_bin_gain",
                "cd_bin_loss",
                "ddt_gain",
                "ddt_loss",
            ]
        );
    }

    #[test]
    fn test_two_builds_use_distinct_segments() {
        let a = build_coastal_change_graph(&request()).unwrap();
        let b = build_coastal_change_graph(&request()).unwrap();
        assert_ne!(a.saves[0].destination, b.saves[0].destination);
    }
}
