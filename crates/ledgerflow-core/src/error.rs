use thiserror::Error;

/// Whole-graph build failures surfaced to the caller.
///
/// Per-record anomalies (bad values, dangling links, duplicate ids) are
/// recovered locally inside the pipeline and never appear here; a caller that
/// gets `Ok` may still have seen records coerced or links dropped. Only these
/// three conditions abort a build.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The raw collection itself is malformed (e.g. not a JSON array).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Every raw record failed classification; there is nothing to draw.
    #[error("no valid nodes after classification")]
    NoValidNodes,

    /// Nodes classified fine but zero edges survived validation. A layered
    /// layout on zero edges is degenerate, so callers must handle this
    /// (nodes-only rendering or an empty state) rather than attempt layout.
    #[error("no valid links after validation")]
    NoValidLinks,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_distinguishable() {
        let a = BuildError::InvalidInput("nodes is not an array".to_string()).to_string();
        let b = BuildError::NoValidNodes.to_string();
        let c = BuildError::NoValidLinks.to_string();
        assert!(a.contains("not an array"));
        assert_ne!(b, c);
    }
}
