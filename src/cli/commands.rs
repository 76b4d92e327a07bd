//! CLI commands and argument parsing

use crate::batch::{
    DescribeComputeEnvironmentsFilter, DescribeJobDefinitionsFilter, DescribeJobQueuesFilter,
    JobStatus, KeyValuesPair, ListJobsFilter, ListServiceJobsFilter, ServiceJobStatus,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Paginated AWS Batch listings
#[derive(Parser, Debug)]
#[command(name = "batch-pager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Service endpoint, overriding the regional one
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// AWS region
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Maximum number of items to retrieve across all pages
    #[arg(long, global = true)]
    pub max_items: Option<u64>,

    /// Continuation token to start from
    #[arg(long, global = true)]
    pub starting_token: Option<String>,

    /// Fetch a single page and stop
    #[arg(long, global = true)]
    pub no_auto_iteration: bool,

    /// Emit whole pages, including their continuation token
    #[arg(long, global = true)]
    pub raw_pages: bool,

    /// Checkpoint file used to resume where the last run stopped
    #[arg(long, global = true)]
    pub checkpoint: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List jobs in a queue, or the children of an array or multi-node job
    ListJobs(ListJobsArgs),

    /// List service jobs
    ListServiceJobs(ListServiceJobsArgs),

    /// Describe job definitions
    DescribeJobDefinitions(DescribeJobDefinitionsArgs),

    /// Describe compute environments
    DescribeComputeEnvironments(DescribeComputeEnvironmentsArgs),

    /// Describe job queues
    DescribeJobQueues(DescribeJobQueuesArgs),

    /// List scheduling policies
    ListSchedulingPolicies,

    /// List supported operations and their page-size ranges
    Operations,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one document per line)
    Json,
    /// Human-readable output
    Pretty,
}

// ============================================================================
// Operation Arguments
// ============================================================================

/// Arguments for `list-jobs`
#[derive(Args, Debug, Clone, Default)]
pub struct ListJobsArgs {
    /// Job queue name or ARN
    #[arg(long)]
    pub job_queue: Option<String>,

    /// Parent array job ID
    #[arg(long)]
    pub array_job_id: Option<String>,

    /// Parent multi-node parallel job ID
    #[arg(long)]
    pub multi_node_job_id: Option<String>,

    /// Job status
    #[arg(long)]
    pub job_status: Option<JobStatus>,

    /// Filter as NAME=VALUE[,VALUE...], repeatable
    #[arg(long = "filter", value_parser = parse_key_values)]
    pub filters: Vec<KeyValuesPair>,
}

impl ListJobsArgs {
    /// Request filter
    pub fn filter(&self) -> ListJobsFilter {
        ListJobsFilter {
            job_queue: self.job_queue.clone(),
            array_job_id: self.array_job_id.clone(),
            multi_node_job_id: self.multi_node_job_id.clone(),
            job_status: self.job_status,
            filters: non_empty(&self.filters),
        }
    }
}

/// Arguments for `list-service-jobs`
#[derive(Args, Debug, Clone, Default)]
pub struct ListServiceJobsArgs {
    /// Job queue name or ARN
    #[arg(long)]
    pub job_queue: Option<String>,

    /// Job status
    #[arg(long)]
    pub job_status: Option<ServiceJobStatus>,

    /// Filter as NAME=VALUE[,VALUE...], repeatable
    #[arg(long = "filter", value_parser = parse_key_values)]
    pub filters: Vec<KeyValuesPair>,
}

impl ListServiceJobsArgs {
    /// Request filter
    pub fn filter(&self) -> ListServiceJobsFilter {
        ListServiceJobsFilter {
            job_queue: self.job_queue.clone(),
            job_status: self.job_status,
            filters: non_empty(&self.filters),
        }
    }
}

/// Arguments for `describe-job-definitions`
#[derive(Args, Debug, Clone, Default)]
pub struct DescribeJobDefinitionsArgs {
    /// Job definition name:revision or ARN, repeatable
    #[arg(long = "job-definition")]
    pub job_definitions: Vec<String>,

    /// Job definition name
    #[arg(long)]
    pub job_definition_name: Option<String>,

    /// ACTIVE or INACTIVE
    #[arg(long)]
    pub status: Option<String>,
}

impl DescribeJobDefinitionsArgs {
    /// Request filter
    pub fn filter(&self) -> DescribeJobDefinitionsFilter {
        DescribeJobDefinitionsFilter {
            job_definitions: non_empty(&self.job_definitions),
            job_definition_name: self.job_definition_name.clone(),
            status: self.status.clone(),
        }
    }
}

/// Arguments for `describe-compute-environments`
#[derive(Args, Debug, Clone, Default)]
pub struct DescribeComputeEnvironmentsArgs {
    /// Compute environment name or ARN, repeatable
    #[arg(long = "compute-environment")]
    pub compute_environments: Vec<String>,
}

impl DescribeComputeEnvironmentsArgs {
    /// Request filter
    pub fn filter(&self) -> DescribeComputeEnvironmentsFilter {
        DescribeComputeEnvironmentsFilter {
            compute_environments: non_empty(&self.compute_environments),
        }
    }
}

/// Arguments for `describe-job-queues`
#[derive(Args, Debug, Clone, Default)]
pub struct DescribeJobQueuesArgs {
    /// Job queue name or ARN, repeatable
    #[arg(long = "job-queue")]
    pub job_queues: Vec<String>,
}

impl DescribeJobQueuesArgs {
    /// Request filter
    pub fn filter(&self) -> DescribeJobQueuesFilter {
        DescribeJobQueuesFilter {
            job_queues: non_empty(&self.job_queues),
        }
    }
}

/// A flag that was never given is left out of the request
fn non_empty<T: Clone>(values: &[T]) -> Option<Vec<T>> {
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}

/// Parse `NAME=VALUE[,VALUE...]`
pub fn parse_key_values(raw: &str) -> std::result::Result<KeyValuesPair, String> {
    let (name, values) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("filter name is empty in '{raw}'"));
    }

    let values = values
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
        .collect();

    Ok(KeyValuesPair::new(name, values))
}
