use crate::branch::numeric_order;
use crate::errors::StoreError;
use crate::report::Report;
use crate::storage::store::Store;
use chrono::NaiveDateTime;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// One ingestion invocation: target branch, build identity, parsed report.
#[derive(Debug)]
pub struct IngestRequest<'a> {
    pub branch: &'a str,
    pub version: &'a str,
    pub recorded_at: NaiveDateTime,
    pub report: &'a Report,
}

/// Why an ingestion wrote nothing. Both are policy outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The branch exists but was archived; archived is terminal.
    Inactive,
    /// The branch is unknown and numerically older than the oldest branch
    /// still accepting results.
    Stale { oldest_active: String },
}

#[derive(Debug)]
pub enum IngestOutcome {
    Recorded {
        run_id: i64,
        results: usize,
        /// Branch archived to make room for a newly created one, if any.
        archived: Option<String>,
    },
    Rejected(Rejection),
}

/// Records one report against `req.branch`, applying the acceptance policy:
/// a known active branch takes results directly; a known inactive branch
/// rejects them; an unknown branch first retires the oldest active branch —
/// unless that branch is numerically newer than the incoming one, in which
/// case the whole ingestion is rejected and nothing is written.
pub fn ingest(store: &Store, req: &IngestRequest<'_>) -> Result<IngestOutcome, StoreError> {
    let mut archived = None;

    let branch_id = match store.lookup_branch(req.branch)? {
        Some(id) => {
            if !store.is_active(req.branch)? {
                info!(branch = req.branch, "branch is inactive, not recording results");
                return Ok(IngestOutcome::Rejected(Rejection::Inactive));
            }
            id
        }
        None => {
            let order = numeric_order(req.branch).ok_or_else(|| {
                StoreError::InvalidArgument(format!(
                    "branch name {:?} carries no numeric token",
                    req.branch
                ))
            })?;
            if let Some((_, oldest)) = store.oldest_active_branch()? {
                // oldest_active_branch only yields orderable names.
                let oldest_order = numeric_order(&oldest).unwrap_or(u64::MAX);
                if oldest_order > order {
                    info!(
                        branch = req.branch,
                        oldest_active = oldest.as_str(),
                        "branch is older than the active window, not recording results"
                    );
                    return Ok(IngestOutcome::Rejected(Rejection::Stale {
                        oldest_active: oldest,
                    }));
                }
                store.archive_branch(&oldest)?;
                archived = Some(oldest);
            }
            store.create_branch(req.branch)?
        }
    };

    let run_id = store.start_run(branch_id, req.version, req.recorded_at)?;
    if req.report.results.is_empty() {
        warn!(branch = req.branch, run_id, "report contains no results");
    }

    let known = store.all_tests()?;
    let mut seen = HashSet::new();
    let mut recorded = 0usize;
    for result in &req.report.results {
        if !seen.insert(result.test_name.as_str()) {
            // First reported outcome wins; later duplicates are dropped.
            debug!(
                test = result.test_name.as_str(),
                "duplicate test name in report, keeping first outcome"
            );
            continue;
        }
        let test_id = match known.get(&result.test_name) {
            Some(id) => *id,
            None => store.resolve_or_create_test(&result.test_name)?,
        };
        store.record_outcome(run_id, test_id, &result.outcome, result.error_message.as_deref())?;
        recorded += 1;
    }

    info!(
        branch = req.branch,
        run_id,
        results = recorded,
        "recorded test run"
    );
    Ok(IngestOutcome::Recorded {
        run_id,
        results: recorded,
        archived,
    })
}
