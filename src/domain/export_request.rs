use super::{ListId, PageSize};

use secrecy::Secret;

/// A fully validated export request.
pub struct ExportRequest {
    pub list_id: ListId,
    pub page_size: PageSize,
    /// Forwarded to Moosend verbatim, never inspected or logged here. An
    /// invalid key is for the upstream to reject.
    pub api_key: Secret<String>,
}
