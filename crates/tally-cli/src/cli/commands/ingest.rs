use super::exit_codes;
use crate::cli::args::IngestArgs;
use anyhow::Result;
use chrono::NaiveDateTime;
use tally_core::branch::numeric_order;
use tally_core::config::resolve_db_path;
use tally_core::errors::StoreError;
use tally_core::ingest::{ingest, IngestOutcome, IngestRequest, Rejection};
use tally_core::report::trx;
use tally_core::storage::store::Store;

/// Wire format of the timestamp argument, as stamped by the build pipeline.
pub const TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H%M";

pub fn cmd_ingest(args: IngestArgs) -> Result<i32> {
    let recorded_at = match NaiveDateTime::parse_from_str(&args.timestamp, TIMESTAMP_FORMAT) {
        Ok(t) => t,
        Err(e) => {
            eprintln!(
                "unparseable timestamp {:?} (expected yyyy_MM_dd_HHmm): {e}",
                args.timestamp
            );
            return Ok(exit_codes::BAD_INPUT);
        }
    };

    if numeric_order(&args.branch).is_none() {
        eprintln!(
            "branch name {:?} carries no numeric token and cannot be ordered",
            args.branch
        );
        return Ok(exit_codes::BAD_INPUT);
    }

    if !args.report.exists() {
        eprintln!("report file does not exist: {}", args.report.display());
        return Ok(exit_codes::MISSING_REPORT);
    }
    let report = match trx::parse_file(&args.report) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("failed to parse report: {e:#}");
            return Ok(exit_codes::BAD_INPUT);
        }
    };

    let db_path = match resolve_db_path(args.db.clone(), args.config.as_deref()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{e}");
            return Ok(exit_codes::BAD_INPUT);
        }
    };
    let store = match Store::open(&db_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            return Ok(exit_codes::STORE_ERROR);
        }
    };
    if let Err(e) = store.ensure_schema(&args.branch) {
        eprintln!("{e}");
        return Ok(exit_codes::STORE_ERROR);
    }

    let request = IngestRequest {
        branch: &args.branch,
        version: &args.version,
        recorded_at,
        report: &report,
    };

    match ingest(&store, &request) {
        Ok(IngestOutcome::Recorded {
            run_id,
            results,
            archived,
        }) => {
            if let Some(old) = archived {
                println!("archived branch {old}");
            }
            println!(
                "recorded run {run_id} for branch {} ({results} results)",
                args.branch
            );
            Ok(exit_codes::OK)
        }
        Ok(IngestOutcome::Rejected(Rejection::Inactive)) => {
            eprintln!(
                "branch {} is not active, results were not recorded",
                args.branch
            );
            Ok(exit_codes::REJECTED)
        }
        Ok(IngestOutcome::Rejected(Rejection::Stale { oldest_active })) => {
            eprintln!(
                "branch {} is older than the oldest active branch {oldest_active}, results were not recorded",
                args.branch
            );
            Ok(exit_codes::REJECTED)
        }
        Err(e @ (StoreError::InvalidArgument(_) | StoreError::InvalidOutcome(_))) => {
            eprintln!("{e}");
            Ok(exit_codes::BAD_INPUT)
        }
        Err(e) => {
            eprintln!("{e}");
            Ok(exit_codes::STORE_ERROR)
        }
    }
}
