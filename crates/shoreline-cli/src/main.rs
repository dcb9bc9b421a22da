//! Shoreline CLI - submits the coastal change detection workflow.
//!
//! Declares the fixed nine-node task graph, validates it, submits it to
//! the execution service, and prints the job identifier and its initial
//! status. All further job state lives in the service.

use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use shoreline_client::{Config, WorkflowClient};
use shoreline_core::{build_coastal_change_graph, CoastalChangeRequest};

/// Submit the coastal change detection workflow
#[derive(Debug, Parser)]
#[command(name = "shoreline")]
#[command(about = "Submit the coastal change detection workflow", long_about = None)]
struct Cli {
    /// Location of the post-event image, e.g. s3://bucket/prefix/images/post
    post_image: String,

    /// Location of the pre-event image
    pre_image: String,

    /// Customer bucket prefix outputs are saved under (no trailing '/')
    bucket_prefix: String,

    /// Execution service API url (overrides SHORELINE_API_URL)
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = Config::from_env();
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }

    let request = CoastalChangeRequest {
        post_image: cli.post_image,
        pre_image: cli.pre_image,
        bucket_prefix: cli.bucket_prefix,
    };

    let graph = build_coastal_change_graph(&request)?;
    info!(
        workflow = %graph.name,
        tasks = graph.nodes.len(),
        saves = graph.saves.len(),
        "Workflow graph built"
    );

    let client = WorkflowClient::new(&config)?;
    let job_id = client.submit(&graph).await?;
    info!(job_id = %job_id, "Workflow submitted");

    let status = client.status(&job_id).await?;

    println!("Coastal Change Detection Workflow:");
    println!("  Job ID:  {}", job_id);
    println!("  Status:  {}", status);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_exactly_three_arguments_parse() {
        let cli = Cli::try_parse_from([
            "shoreline",
            "s3://bucket/post",
            "s3://bucket/pre",
            "platform_stories/coastal_change",
        ])
        .unwrap();
        assert_eq!(cli.post_image, "s3://bucket/post");
        assert_eq!(cli.pre_image, "s3://bucket/pre");
        assert_eq!(cli.bucket_prefix, "platform_stories/coastal_change");
    }

    #[test]
    fn test_missing_argument_is_a_usage_error() {
        let err = Cli::try_parse_from(["shoreline", "s3://bucket/post", "s3://bucket/pre"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_extra_argument_is_a_usage_error() {
        let err = Cli::try_parse_from([
            "shoreline",
            "s3://bucket/post",
            "s3://bucket/pre",
            "platform_stories/coastal_change",
            "extra",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }
}
