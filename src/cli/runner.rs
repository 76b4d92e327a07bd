//! CLI runner - executes commands

use crate::batch::{
    supported_operations, BatchClient, BatchListOperation, DescribeComputeEnvironments,
    DescribeJobDefinitions, DescribeJobQueues, ListJobs, ListSchedulingPolicies,
    ListSchedulingPoliciesFilter, ListServiceJobs,
};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::Settings;
use crate::error::Result;
use crate::pagination::{
    CancelSignal, DriveSummary, EmitMode, JsonLinesSink, PaginationOptions, StopReason,
};
use crate::state::CheckpointStore;
use serde::Serialize;
use std::io::{self, BufWriter, Write};
use tracing::{debug, info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
    cancel: CancelSignal,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            cancel: CancelSignal::new(),
        }
    }

    /// Signal that cancels the running listing; Ctrl-C fires it too
    pub fn cancel_signal(&self) -> CancelSignal {
        self.cancel.clone()
    }

    /// Run the CLI command, writing results to stdout
    pub async fn run(&self) -> Result<()> {
        let mut out = BufWriter::new(io::stdout());
        self.run_to(&mut out).await?;
        out.flush()?;
        Ok(())
    }

    /// Run the CLI command, writing results to `out`
    pub async fn run_to<W: Write>(&self, out: &mut W) -> Result<()> {
        match &self.cli.command {
            Commands::ListJobs(args) => self.paginate::<ListJobs, W>(args.filter(), out).await,
            Commands::ListServiceJobs(args) => {
                self.paginate::<ListServiceJobs, W>(args.filter(), out)
                    .await
            }
            Commands::DescribeJobDefinitions(args) => {
                self.paginate::<DescribeJobDefinitions, W>(args.filter(), out)
                    .await
            }
            Commands::DescribeComputeEnvironments(args) => {
                self.paginate::<DescribeComputeEnvironments, W>(args.filter(), out)
                    .await
            }
            Commands::DescribeJobQueues(args) => {
                self.paginate::<DescribeJobQueues, W>(args.filter(), out)
                    .await
            }
            Commands::ListSchedulingPolicies => {
                self.paginate::<ListSchedulingPolicies, W>(ListSchedulingPoliciesFilter {}, out)
                    .await
            }
            Commands::Operations => self.list_operations(out),
        }
    }

    /// Load settings and apply command-line overrides
    pub fn settings(&self) -> Result<Settings> {
        let settings = match &self.cli.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        let settings = settings
            .with_endpoint(self.cli.endpoint.clone())
            .with_region(self.cli.region.clone());
        settings.validate()?;
        Ok(settings)
    }

    /// Pagination options for this run
    ///
    /// An explicit `--starting-token` wins over a checkpointed one. The
    /// budget comes from `--max-items`, else the settings default.
    pub fn pagination_options(
        &self,
        settings: &Settings,
        checkpoint_token: Option<String>,
    ) -> PaginationOptions {
        let mut options = PaginationOptions::new();

        if let Some(token) = self.cli.starting_token.clone().or(checkpoint_token) {
            options = options.starting_token(token);
        }
        if let Some(max) = self
            .cli
            .max_items
            .or(settings.pagination.default_max_items)
        {
            options = options.max_items(max);
        }
        if self.cli.no_auto_iteration {
            options = options.single_page();
        }
        options
    }

    /// Run one paginated operation, streaming its output
    async fn paginate<O, W>(&self, filter: O::Filter, out: &mut W) -> Result<()>
    where
        O: BatchListOperation,
        W: Write,
    {
        let settings = self.settings()?;
        let client = BatchClient::with_config(settings.http_client_config()?)?;
        debug!(
            operation = O::NAME,
            endpoint = %settings.effective_endpoint(),
            "starting listing"
        );

        let checkpoints = match &self.cli.checkpoint {
            Some(path) => Some(CheckpointStore::open(path).await?),
            None => None,
        };
        let checkpoint_token = match &checkpoints {
            Some(store) if self.cli.starting_token.is_none() => {
                store.resume_token(O::NAME).await
            }
            _ => None,
        };
        if let Some(token) = &checkpoint_token {
            info!(operation = O::NAME, token = %token, "resuming from checkpoint");
        }

        let options = self.pagination_options(&settings, checkpoint_token);

        let interrupt = {
            let cancel = self.cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("interrupt received, cancelling");
                    cancel.cancel();
                }
            })
        };

        let mode = if self.cli.raw_pages {
            EmitMode::Pages
        } else {
            EmitMode::Items
        };
        let mut sink = JsonLinesSink::new(&mut *out, mode)
            .pretty(self.cli.format == OutputFormat::Pretty);

        let (summary, outcome) = client
            .paginate::<O>(filter, options)
            .with_cancel(self.cancel.clone())
            .drive_with_summary(&mut sink)
            .await;
        interrupt.abort();

        if let Err(err) = outcome {
            // Keep the last token whose page was not delivered. With no
            // token there is nothing to resume and the old entry stays.
            if let (Some(store), Some(_)) = (&checkpoints, &summary.next_token) {
                store.record(O::NAME, &summary).await?;
                warn!(
                    operation = O::NAME,
                    items = summary.items,
                    "listing failed; checkpoint kept for resume"
                );
            }
            return Err(err);
        }

        if let Some(store) = &checkpoints {
            store.record(O::NAME, &summary).await?;
        }
        report(O::NAME, &summary);
        Ok(())
    }

    /// Print the supported operations
    fn list_operations<W: Write>(&self, out: &mut W) -> Result<()> {
        for info in supported_operations() {
            self.output_message(out, &info)?;
        }
        Ok(())
    }

    /// Output a JSON message in the selected format
    fn output_message<W: Write, T: Serialize>(&self, out: &mut W, msg: &T) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => serde_json::to_writer(&mut *out, msg)?,
            OutputFormat::Pretty => serde_json::to_writer_pretty(&mut *out, msg)?,
        }
        out.write_all(b"\n")?;
        Ok(())
    }
}

/// Tell the user how to continue a run that stopped early
fn report(operation: &str, summary: &DriveSummary) {
    match (&summary.next_token, summary.stop_reason) {
        (Some(token), StopReason::PartialResultOnError) => warn!(
            operation,
            items = summary.items,
            next_token = %token,
            "listing stopped after a failed page; resume with --starting-token"
        ),
        (Some(token), _) => info!(
            operation,
            items = summary.items,
            next_token = %token,
            "more results available; resume with --starting-token"
        ),
        (None, _) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn runner(args: &[&str]) -> Runner {
        let mut argv = vec!["batch-pager"];
        argv.extend_from_slice(args);
        Runner::new(Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_options_from_flags() {
        let runner = runner(&[
            "--max-items",
            "10",
            "--starting-token",
            "abc",
            "--no-auto-iteration",
            "list-scheduling-policies",
        ]);
        let options = runner.pagination_options(&Settings::default(), Some("saved".into()));

        assert_eq!(options.max_items, Some(10));
        assert_eq!(options.starting_token.as_deref(), Some("abc"));
        assert!(options.user_controlling);
    }

    #[test]
    fn test_options_fall_back_to_settings_and_checkpoint() {
        let runner = runner(&["list-scheduling-policies"]);
        let mut settings = Settings::default();
        settings.pagination.default_max_items = Some(300);

        let options = runner.pagination_options(&settings, Some("saved".into()));
        assert_eq!(options.max_items, Some(300));
        assert_eq!(options.starting_token.as_deref(), Some("saved"));
        assert!(!options.user_controlling);
    }

    #[test]
    fn test_settings_overrides() {
        let runner = runner(&[
            "--region",
            "eu-central-1",
            "describe-job-queues",
        ]);
        let settings = runner.settings().unwrap();
        assert_eq!(
            settings.effective_endpoint(),
            "https://batch.eu-central-1.amazonaws.com"
        );

        let runner = runner_with_endpoint("http://localhost:4566");
        let settings = runner.settings().unwrap();
        assert_eq!(settings.effective_endpoint(), "http://localhost:4566");
    }

    fn runner_with_endpoint(endpoint: &str) -> Runner {
        runner(&["--endpoint", endpoint, "operations"])
    }

    #[tokio::test]
    async fn test_operations_output() {
        let runner = runner(&["operations"]);
        let mut out = Vec::new();
        runner.run_to(&mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0]["name"], "ListJobs");
        assert_eq!(lines[0]["pageSize"], "1..=1000");
    }
}
