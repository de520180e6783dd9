pub mod ingest;
pub mod init;

use crate::cli::args::{Cli, Command};
use anyhow::Result;

pub mod exit_codes {
    pub const OK: i32 = 0;
    /// Unusable input: bad timestamp, digitless branch name, malformed
    /// config or report.
    pub const BAD_INPUT: i32 = 2;
    pub const MISSING_REPORT: i32 = 3;
    pub const STORE_ERROR: i32 = 4;
    /// The store refused the results (branch inactive or stale); nothing
    /// was written.
    pub const REJECTED: i32 = 5;
}

pub fn dispatch(cli: Cli) -> Result<i32> {
    match cli.cmd {
        Command::Ingest(args) => ingest::cmd_ingest(args),
        Command::Init(args) => init::cmd_init(args),
        Command::Version => {
            println!("tally {}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::OK)
        }
    }
}
