//! Construction-time options for an [`crate::aig::Aig`].

/// Parsing policy for a new [`crate::aig::Aig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AigOptions {
    /// Enforce exact AIGER whitespace and canonical literal positions.
    /// When `false`, any run of ASCII whitespace is accepted between
    /// tokens and canonical-position deviations are tolerated.
    pub strict: bool,
    /// Parse the whole file up front instead of on first access.
    pub eager: bool,
}

impl Default for AigOptions {
    fn default() -> Self {
        AigOptions {
            strict: true,
            eager: false,
        }
    }
}

impl AigOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn eager(mut self, eager: bool) -> Self {
        self.eager = eager;
        self
    }
}
