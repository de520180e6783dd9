use super::store::Store;
use crate::branch::archive_table_name;
use crate::errors::StoreError;
use rusqlite::params;
use tracing::info;

impl Store {
    /// Moves every result reachable through `branch`'s runs into a snapshot
    /// table and deactivates the branch. The caller guarantees the branch
    /// exists and is currently active; deactivation is terminal.
    ///
    /// All four steps (create table, copy, delete, deactivate) commit as one
    /// transaction. A failure at any point leaves the live tables untouched;
    /// there is no state where the snapshot and the live rows coexist.
    pub fn archive_branch(&self, branch: &str) -> Result<(), StoreError> {
        if branch.trim().is_empty() {
            return Err(StoreError::InvalidArgument("branch name is empty".into()));
        }
        let table = archive_table_name(branch)?;

        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction().map_err(StoreError::TransactionFailed)?;

        tx.execute_batch(&format!(
            "CREATE TABLE {table} (
                id INTEGER PRIMARY KEY,
                version TEXT NOT NULL,
                recorded_at TEXT NOT NULL,
                test_name TEXT NOT NULL,
                result TEXT NOT NULL CHECK (result IN ('Passed', 'Failed', 'Timeout')),
                error_message TEXT
            )"
        ))?;

        let copied = tx.execute(
            &format!(
                "INSERT INTO {table} (version, recorded_at, test_name, result, error_message)
                 SELECT tr.version, tr.recorded_at, t.name, r.result, r.error_message
                 FROM results r
                 JOIN test_runs tr ON r.test_run_id = tr.id
                 JOIN branches b ON tr.branch_id = b.id
                 JOIN tests t ON r.test_id = t.id
                 WHERE b.branch = ?1"
            ),
            params![branch],
        )?;

        tx.execute(
            "DELETE FROM results
             WHERE test_run_id IN (
                 SELECT tr.id
                 FROM test_runs tr
                 JOIN branches b ON tr.branch_id = b.id
                 WHERE b.branch = ?1
             )",
            params![branch],
        )?;

        tx.execute(
            "UPDATE branches SET status = 0 WHERE branch = ?1",
            params![branch],
        )?;

        tx.commit().map_err(StoreError::TransactionFailed)?;
        info!(branch, table = %table, results = copied, "archived branch");
        Ok(())
    }
}
