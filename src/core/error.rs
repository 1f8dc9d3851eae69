use thiserror::Error;

/// Fatal failures of the resolution pipeline. Missing course fields are
/// not errors; they surface as null fields on the output row.
#[derive(Debug, Error)]
pub enum MineError {
    /// The document does not match the fixed transcript template.
    /// Raised by the validation gate before any resolution runs.
    #[error("document does not match the transcript template: {0}")]
    Validation(String),

    /// A cardinality or pairing invariant is violated. Fatal for the
    /// affected section or semester; a pairing is never truncated.
    #[error("structural mismatch: {0}")]
    StructuralMismatch(#[from] StructuralMismatch),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructuralMismatch {
    #[error("{label}: expected {expected}, found {actual} (page {page})")]
    LabelCount {
        label: &'static str,
        page: u32,
        expected: usize,
        actual: usize,
    },

    #[error(
        "course id column pairs {depts} department token(s) with {seqs} sequence token(s) (page {page})"
    )]
    CourseIdPairing { page: u32, depts: usize, seqs: usize },

    #[error("label {text:?} on page {page} matched {matches} college section(s)")]
    SectionAssignment {
        text: String,
        page: u32,
        matches: usize,
    },
}
