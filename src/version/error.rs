use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagError {
    /// A calendar-versioned tag carried a non-numeric segment. Tags past
    /// the threshold are assumed well-formed, so this aborts the run
    /// instead of defaulting.
    #[error("malformed release tag '{tag}': segment '{segment}' is not numeric")]
    MalformedSegment { tag: String, segment: String },
}
