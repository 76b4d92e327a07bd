//! Paginated AWS Batch list operations
//!
//! Each operation is a marker type naming its REST path, the response key
//! holding the item list, its selector filter and its page-size range.

use super::models::{
    ComputeEnvironmentDetail, DescribeComputeEnvironmentsFilter, DescribeJobDefinitionsFilter,
    DescribeJobQueuesFilter, JobDefinition, JobQueueDetail, JobSummary, ListJobsFilter,
    ListSchedulingPoliciesFilter, ListServiceJobsFilter, SchedulingPolicyListing,
    ServiceJobSummary,
};
use crate::pagination::PageSizeRange;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// A paginated AWS Batch operation
pub trait BatchListOperation: Send + Sync + 'static {
    /// Service operation name
    const NAME: &'static str;
    /// REST path the request is posted to
    const PATH: &'static str;
    /// Response field holding the page's items
    const ITEMS_KEY: &'static str;
    /// Largest `maxResults` the service accepts
    const MAX_PAGE_SIZE: u32;

    /// Selector fields sent with every page request
    type Filter: Serialize + Clone + Debug + Send + Sync;
    /// One entry of the item list
    type Item: DeserializeOwned + Serialize + Send;

    /// Accepted page sizes
    fn page_size_range() -> PageSizeRange {
        PageSizeRange::up_to(Self::MAX_PAGE_SIZE)
    }

    /// Static description of the operation
    fn info() -> OperationInfo {
        OperationInfo {
            name: Self::NAME,
            path: Self::PATH,
            items_key: Self::ITEMS_KEY,
            page_size: Self::page_size_range(),
        }
    }
}

/// Description of an operation, for listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationInfo {
    pub name: &'static str,
    pub path: &'static str,
    pub items_key: &'static str,
    #[serde(serialize_with = "serialize_range")]
    pub page_size: PageSizeRange,
}

fn serialize_range<S: serde::Serializer>(
    range: &PageSizeRange,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(range)
}

// ============================================================================
// Operations
// ============================================================================

/// `ListJobs`
#[derive(Debug, Clone, Copy)]
pub struct ListJobs;

impl BatchListOperation for ListJobs {
    const NAME: &'static str = "ListJobs";
    const PATH: &'static str = "/v1/listjobs";
    const ITEMS_KEY: &'static str = "jobSummaryList";
    const MAX_PAGE_SIZE: u32 = 1000;
    type Filter = ListJobsFilter;
    type Item = JobSummary;
}

/// `ListServiceJobs`
#[derive(Debug, Clone, Copy)]
pub struct ListServiceJobs;

impl BatchListOperation for ListServiceJobs {
    const NAME: &'static str = "ListServiceJobs";
    const PATH: &'static str = "/v1/listservicejobs";
    const ITEMS_KEY: &'static str = "jobSummaryList";
    const MAX_PAGE_SIZE: u32 = 100;
    type Filter = ListServiceJobsFilter;
    type Item = ServiceJobSummary;
}

/// `DescribeJobDefinitions`
#[derive(Debug, Clone, Copy)]
pub struct DescribeJobDefinitions;

impl BatchListOperation for DescribeJobDefinitions {
    const NAME: &'static str = "DescribeJobDefinitions";
    const PATH: &'static str = "/v1/describejobdefinitions";
    const ITEMS_KEY: &'static str = "jobDefinitions";
    const MAX_PAGE_SIZE: u32 = 100;
    type Filter = DescribeJobDefinitionsFilter;
    type Item = JobDefinition;
}

/// `DescribeComputeEnvironments`
#[derive(Debug, Clone, Copy)]
pub struct DescribeComputeEnvironments;

impl BatchListOperation for DescribeComputeEnvironments {
    const NAME: &'static str = "DescribeComputeEnvironments";
    const PATH: &'static str = "/v1/describecomputeenvironments";
    const ITEMS_KEY: &'static str = "computeEnvironments";
    const MAX_PAGE_SIZE: u32 = 100;
    type Filter = DescribeComputeEnvironmentsFilter;
    type Item = ComputeEnvironmentDetail;
}

/// `DescribeJobQueues`
#[derive(Debug, Clone, Copy)]
pub struct DescribeJobQueues;

impl BatchListOperation for DescribeJobQueues {
    const NAME: &'static str = "DescribeJobQueues";
    const PATH: &'static str = "/v1/describejobqueues";
    const ITEMS_KEY: &'static str = "jobQueues";
    const MAX_PAGE_SIZE: u32 = 100;
    type Filter = DescribeJobQueuesFilter;
    type Item = JobQueueDetail;
}

/// `ListSchedulingPolicies`
#[derive(Debug, Clone, Copy)]
pub struct ListSchedulingPolicies;

impl BatchListOperation for ListSchedulingPolicies {
    const NAME: &'static str = "ListSchedulingPolicies";
    const PATH: &'static str = "/v1/listschedulingpolicies";
    const ITEMS_KEY: &'static str = "schedulingPolicies";
    const MAX_PAGE_SIZE: u32 = 100;
    type Filter = ListSchedulingPoliciesFilter;
    type Item = SchedulingPolicyListing;
}

/// Every supported operation
pub fn supported_operations() -> Vec<OperationInfo> {
    vec![
        ListJobs::info(),
        ListServiceJobs::info(),
        DescribeJobDefinitions::info(),
        DescribeComputeEnvironments::info(),
        DescribeJobQueues::info(),
        ListSchedulingPolicies::info(),
    ]
}

/// Look up an operation by service name, ignoring case
pub fn find_operation(name: &str) -> Option<OperationInfo> {
    supported_operations()
        .into_iter()
        .find(|info| info.name.eq_ignore_ascii_case(name))
}
