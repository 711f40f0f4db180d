#[derive(Debug, thiserror::Error)]
pub enum ListIdValidationError {
    #[error("listid is required")]
    Missing,
}

/// Identifier of the Moosend mailing list to export, exactly as the caller
/// supplied it.
#[derive(Debug)]
pub struct ListId(String);

impl ListId {
    /// An absent query parameter arrives here as an empty string, so both
    /// cases are rejected by the same check.
    pub fn parse(s: String) -> Result<Self, ListIdValidationError> {
        if s.is_empty() {
            Err(ListIdValidationError::Missing)
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for ListId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ListId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
