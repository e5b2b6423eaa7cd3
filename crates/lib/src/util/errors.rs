//! Error types for the helper utilities.

use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum UtilError {
    /// The operating-system random number generator failed
    #[error("Random source failed: {reason}")]
    Random { reason: String },
}

impl UtilError {
    pub fn is_random_error(&self) -> bool {
        matches!(self, UtilError::Random { .. })
    }
}

// Conversion from UtilError to the main Error type
impl From<UtilError> for crate::Error {
    fn from(err: UtilError) -> Self {
        crate::Error::Util(err)
    }
}
