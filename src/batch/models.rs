//! AWS Batch request filters and response items
//!
//! Filters only serialize the fields that were set. An unset field is left
//! out of the request body entirely, so the service applies its own
//! default; an explicitly empty list is still sent.

use crate::types::JsonObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Enums
// ============================================================================

/// Job status filter and value
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Submitted,
    Pending,
    Runnable,
    Starting,
    Running,
    Succeeded,
    Failed,
    /// A status this client does not know yet
    #[serde(other)]
    #[value(skip)]
    Unknown,
}

/// Service job status filter and value
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceJobStatus {
    Submitted,
    Pending,
    Runnable,
    Scheduled,
    Starting,
    Running,
    Succeeded,
    Failed,
    /// A status this client does not know yet
    #[serde(other)]
    #[value(skip)]
    Unknown,
}

/// Name/values filter used by the job listing operations
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyValuesPair {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

impl KeyValuesPair {
    /// Create a filter on `name` matching any of `values`
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: Some(name.into()),
            values: Some(values),
        }
    }
}

// ============================================================================
// Filters
// ============================================================================

/// Selector fields for `ListJobs`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListJobsFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_queue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_node_job_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_status: Option<JobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<KeyValuesPair>>,
}

impl ListJobsFilter {
    /// Jobs in a queue
    pub fn queue(job_queue: impl Into<String>) -> Self {
        Self {
            job_queue: Some(job_queue.into()),
            ..Self::default()
        }
    }

    /// Restrict to one status
    #[must_use]
    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.job_status = Some(status);
        self
    }
}

/// Selector fields for `ListServiceJobs`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListServiceJobsFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_queue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_status: Option<ServiceJobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<KeyValuesPair>>,
}

/// Selector fields for `DescribeJobDefinitions`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeJobDefinitionsFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_definitions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_definition_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Selector fields for `DescribeComputeEnvironments`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeComputeEnvironmentsFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute_environments: Option<Vec<String>>,
}

/// Selector fields for `DescribeJobQueues`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeJobQueuesFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_queues: Option<Vec<String>>,
}

/// `ListSchedulingPolicies` takes no selector fields
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ListSchedulingPoliciesFilter {}

// ============================================================================
// Items
// ============================================================================

/// Entry of `jobSummaryList` from `ListJobs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub job_id: String,
    pub job_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_definition: Option<String>,
    /// Epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stopped_at: Option<i64>,
    /// Remaining fields, passed through unchanged
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl JobSummary {
    /// Creation time
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at.and_then(DateTime::from_timestamp_millis)
    }

    /// Time the job stopped, if it has
    pub fn stopped_at(&self) -> Option<DateTime<Utc>> {
        self.stopped_at.and_then(DateTime::from_timestamp_millis)
    }
}

/// Entry of `jobSummaryList` from `ListServiceJobs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceJobSummary {
    pub job_id: String,
    pub job_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_job_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ServiceJobStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Entry of `jobDefinitions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDefinition {
    pub job_definition_name: String,
    pub job_definition_arn: String,
    pub revision: i64,
    #[serde(rename = "type")]
    pub job_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Entry of `computeEnvironments`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeEnvironmentDetail {
    pub compute_environment_name: String,
    pub compute_environment_arn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub environment_type: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Entry of `jobQueues`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobQueueDetail {
    pub job_queue_name: String,
    pub job_queue_arn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Entry of `schedulingPolicies`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingPolicyListing {
    pub arn: String,
}
