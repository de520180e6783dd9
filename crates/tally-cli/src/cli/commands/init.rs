use super::exit_codes;
use crate::cli::args::InitArgs;
use anyhow::Result;
use tally_core::branch::numeric_order;
use tally_core::config::resolve_db_path;
use tally_core::storage::store::Store;

pub fn cmd_init(args: InitArgs) -> Result<i32> {
    if numeric_order(&args.branch).is_none() {
        eprintln!(
            "branch name {:?} carries no numeric token and cannot be ordered",
            args.branch
        );
        return Ok(exit_codes::BAD_INPUT);
    }

    let db_path = match resolve_db_path(args.db, args.config.as_deref()) {
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

    match store.ensure_schema(&args.branch) {
        Ok(true) => {
            println!(
                "created base tables in {}, seeded branch {}",
                db_path.display(),
                args.branch
            );
            Ok(exit_codes::OK)
        }
        Ok(false) => {
            println!("store {} is already initialized", db_path.display());
            Ok(exit_codes::OK)
        }
        Err(e) => {
            eprintln!("{e}");
            Ok(exit_codes::STORE_ERROR)
        }
    }
}
