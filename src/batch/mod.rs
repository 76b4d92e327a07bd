//! AWS Batch list operations
//!
//! Binds the generic pagination driver to the AWS Batch REST-JSON API:
//!
//! - `operations` - one marker type per paginated operation
//! - `models` - request filters and typed response items
//! - `client` - `BatchClient` and the per-operation page fetcher

mod client;
mod models;
mod operations;

pub use client::{parse_page, request_body, BatchClient, OperationFetcher};
pub use models::{
    ComputeEnvironmentDetail, DescribeComputeEnvironmentsFilter, DescribeJobDefinitionsFilter,
    DescribeJobQueuesFilter, JobDefinition, JobQueueDetail, JobStatus, JobSummary,
    KeyValuesPair, ListJobsFilter, ListSchedulingPoliciesFilter, ListServiceJobsFilter,
    SchedulingPolicyListing, ServiceJobStatus, ServiceJobSummary,
};
pub use operations::{
    find_operation, supported_operations, BatchListOperation, DescribeComputeEnvironments,
    DescribeJobDefinitions, DescribeJobQueues, ListJobs, ListSchedulingPolicies,
    ListServiceJobs, OperationInfo,
};
