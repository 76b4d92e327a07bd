//! CLI module
//!
//! Command-line interface for paginated AWS Batch listings.
//!
//! # Commands
//!
//! - `list-jobs`, `list-service-jobs` - job listings
//! - `describe-job-definitions`, `describe-compute-environments`,
//!   `describe-job-queues` - resource listings
//! - `list-scheduling-policies` - scheduling policy ARNs
//! - `operations` - supported operations and their page-size ranges

mod commands;
mod runner;

pub use commands::{
    parse_key_values, Cli, Commands, DescribeComputeEnvironmentsArgs, DescribeJobDefinitionsArgs,
    DescribeJobQueuesArgs, ListJobsArgs, ListServiceJobsArgs, OutputFormat,
};
pub use runner::Runner;
