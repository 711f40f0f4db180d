#[derive(Debug, thiserror::Error)]
pub enum PageSizeValidationError {
    #[error("Invalid pagesize")]
    NotAPositiveInteger,
}

/// How many subscribers to request per upstream page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(u32);

impl PageSize {
    /// Strict base-10 parse. Zero, negatives, fractions, and surrounding
    /// whitespace are all rejected.
    pub fn parse(s: String) -> Result<Self, PageSizeValidationError> {
        match s.parse::<u32>() {
            Ok(n) if n >= 1 => Ok(Self(n)),
            _ => Err(PageSizeValidationError::NotAPositiveInteger),
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(50)
    }
}

impl std::fmt::Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
