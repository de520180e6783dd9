pub mod trx;

/// Flattened view of a parsed report, in document order.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub results: Vec<ReportedResult>,
}

#[derive(Debug, Clone)]
pub struct ReportedResult {
    pub test_name: String,
    /// Raw outcome string from the document. Only the result recorder
    /// validates it against the fixed enum.
    pub outcome: String,
    pub error_message: Option<String>,
}
