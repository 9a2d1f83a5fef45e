use serde::{Deserialize, Serialize};

/// A numbered preparation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// One-indexed, dense over the steps that were kept
    pub number: u32,
    pub instruction: String,
}

/// Byte range of a `<digits>.` marker inside the preparation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Boundary {
    pub start: usize,
    pub end: usize,
}
