#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Switches of a normalization pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NormalizerConfig {
    /// Drop character data between tags that only contains whitespace.
    pub omit_whitespace: bool,
    /// Drop comments.
    pub omit_comments: bool,
}

impl NormalizerConfig {
    pub fn with_omit_whitespace(mut self, omit_whitespace: bool) -> Self {
        self.omit_whitespace = omit_whitespace;
        self
    }

    pub fn with_omit_comments(mut self, omit_comments: bool) -> Self {
        self.omit_comments = omit_comments;
        self
    }
}
