use crate::errors::StoreError;

/// Numeric ordering token of a branch name.
///
/// Branch names carry a product prefix and an optional suffix around a digit
/// run (`nano165`, `abc045xyz`), so the order cannot be read from a sortable
/// column: every non-digit character is stripped from the whole name and the
/// remaining digit string is parsed as an unsigned integer. A name with no
/// digits has no defined order.
pub fn numeric_order(name: &str) -> Option<u64> {
    let digits: String = name.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Snapshot table name for an archived branch.
///
/// Table names cannot be bound as SQL parameters, so the branch name is
/// reduced to a `[A-Za-z0-9_]` whitelist before it is spliced into DDL.
pub fn archive_table_name(branch: &str) -> Result<String, StoreError> {
    let safe: String = branch
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if safe.is_empty() {
        return Err(StoreError::InvalidArgument(format!(
            "branch name {branch:?} has no identifier-safe characters"
        )));
    }
    Ok(format!("archived_{safe}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_strips_prefix_and_suffix() {
        assert_eq!(numeric_order("abc045xyz"), Some(45));
        assert_eq!(numeric_order("nano165"), Some(165));
        assert_eq!(numeric_order("165"), Some(165));
    }

    #[test]
    fn order_joins_separated_digit_runs() {
        // All non-digits go, including ones between digit runs.
        assert_eq!(numeric_order("v1.2"), Some(12));
    }

    #[test]
    fn order_undefined_without_digits() {
        assert_eq!(numeric_order("trunk"), None);
        assert_eq!(numeric_order(""), None);
    }

    #[test]
    fn table_name_keeps_safe_chars_only() {
        assert_eq!(archive_table_name("nano165").unwrap(), "archived_nano165");
        assert_eq!(
            archive_table_name("nano165'; DROP TABLE results;--").unwrap(),
            "archived_nano165DROPTABLEresults"
        );
    }

    #[test]
    fn table_name_rejects_fully_unsafe_names() {
        assert!(matches!(
            archive_table_name("'\"--"),
            Err(StoreError::InvalidArgument(_))
        ));
    }
}
