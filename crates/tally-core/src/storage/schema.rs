use super::store::Store;
use crate::errors::StoreError;
use tracing::info;

/// Bootstrap runs when fewer user tables than this are present.
pub const EXPECTED_MIN_NUM_TABLES: i64 = 4;

pub const DDL: &str = "
BEGIN;
CREATE TABLE IF NOT EXISTS branches (
    id INTEGER PRIMARY KEY,
    branch TEXT NOT NULL UNIQUE,
    status INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_branches_name ON branches(branch);

CREATE TABLE IF NOT EXISTS test_runs (
    id INTEGER PRIMARY KEY,
    branch_id INTEGER NOT NULL REFERENCES branches(id) ON DELETE CASCADE,
    version TEXT NOT NULL,
    recorded_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_test_runs_branch_id ON test_runs(branch_id);

CREATE TABLE IF NOT EXISTS tests (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    description TEXT
);

CREATE TABLE IF NOT EXISTS results (
    id INTEGER PRIMARY KEY,
    test_run_id INTEGER NOT NULL REFERENCES test_runs(id) ON DELETE CASCADE,
    test_id INTEGER NOT NULL REFERENCES tests(id) ON DELETE CASCADE,
    result TEXT NOT NULL CHECK (result IN ('Passed', 'Failed', 'Timeout')),
    error_message TEXT
);
CREATE INDEX IF NOT EXISTS idx_results_test_run_id ON results(test_run_id);
COMMIT;
";

impl Store {
    /// Idempotent bootstrap: creates the base table set if the store looks
    /// empty and seeds the first branch from the invocation's branch
    /// argument. Returns whether bootstrap actually ran.
    pub fn ensure_schema(&self, seed_branch: &str) -> Result<bool, StoreError> {
        if self.tables_present()? {
            return Ok(false);
        }

        {
            let conn = self.conn.lock().unwrap();
            conn.execute_batch(DDL)
                .map_err(StoreError::TransactionFailed)?;
        }

        self.create_branch(seed_branch)?;
        info!(branch = seed_branch, "created base tables, seeded first branch");
        Ok(true)
    }

    fn tables_present(&self) -> Result<bool, StoreError> {
        let conn = self.conn.lock().unwrap();
        let n: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
            [],
            |r| r.get(0),
        )?;
        Ok(n >= EXPECTED_MIN_NUM_TABLES)
    }
}
