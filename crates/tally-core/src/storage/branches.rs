use super::store::Store;
use crate::branch::numeric_order;
use crate::errors::StoreError;
use rusqlite::{params, OptionalExtension};
use tracing::info;

impl Store {
    /// Exact-match lookup by branch name.
    pub fn lookup_branch(&self, name: &str) -> Result<Option<i64>, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::InvalidArgument("branch name is empty".into()));
        }
        let conn = self.conn.lock().unwrap();
        let id = conn
            .query_row(
                "SELECT id FROM branches WHERE branch = ?1",
                params![name],
                |r| r.get(0),
            )
            .optional()?;
        Ok(id)
    }

    /// A missing branch is an error, not `false`: callers are expected to
    /// have checked existence first, so a miss here marks a caller bug.
    pub fn is_active(&self, name: &str) -> Result<bool, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::InvalidArgument("branch name is empty".into()));
        }
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT status FROM branches WHERE branch = ?1",
            params![name],
            |r| r.get::<_, bool>(0),
        )
        .optional()?
        .ok_or_else(|| StoreError::BranchNotFound(name.to_string()))
    }

    /// Smallest active branch by the numeric order of its name.
    ///
    /// Ordering is computed here rather than in SQL: SQLite has no
    /// REGEXP_REPLACE to strip the non-digit characters server-side. Active
    /// branches whose names carry no digits have no defined order and are
    /// skipped; ties keep the lowest-id row.
    pub fn oldest_active_branch(&self) -> Result<Option<(i64, String)>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT id, branch FROM branches WHERE status = 1 ORDER BY id")?;
        let rows = stmt.query_map([], |r| Ok((r.get::<_, i64>(0)?, r.get::<_, String>(1)?)))?;

        let mut oldest: Option<(i64, String, u64)> = None;
        for row in rows {
            let (id, name) = row?;
            let Some(order) = numeric_order(&name) else {
                continue;
            };
            match &oldest {
                Some((_, _, best)) if *best <= order => {}
                _ => oldest = Some((id, name, order)),
            }
        }
        Ok(oldest.map(|(id, name, _)| (id, name)))
    }

    /// Inserts a new branch in the active state.
    ///
    /// Conditional insert rather than look-then-insert, so a concurrent
    /// creation of the same name surfaces as `DuplicateBranch` instead of a
    /// second row.
    pub fn create_branch(&self, name: &str) -> Result<i64, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::InvalidArgument("branch name is empty".into()));
        }
        let conn = self.conn.lock().unwrap();
        let inserted = conn.execute(
            "INSERT INTO branches(branch, status) VALUES (?1, 1) ON CONFLICT(branch) DO NOTHING",
            params![name],
        )?;
        if inserted == 0 {
            return Err(StoreError::DuplicateBranch(name.to_string()));
        }
        info!(branch = name, "created branch");
        Ok(conn.last_insert_rowid())
    }
}
