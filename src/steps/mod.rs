//! Preparation text segmentation.
//!
//! Catalogs store the preparation as a single string with inline step
//! markers: `"1. Mix well. 2. Bake 20 min."`. A marker is a run of ASCII
//! digits followed by a dot, where
//! - the digits are not glued to a preceding letter or digit (`step2.`)
//! - the dot is not followed by another digit (`1.5 cups`)
//!
//! Any number that ends a sentence also reads as a marker, so
//! `"Preheat to 180. 2. Bake."` splits after `180.` and the number itself
//! is consumed.
//!
//! Text before the first marker is ignored. Steps that are empty after
//! trimming are dropped and the remaining ones are numbered 1..N.

use crate::Recipe;

mod model;

use model::Boundary;
pub use model::Step;

/// Splits preparation text into numbered steps.
///
/// Returns an empty list when the text has no step markers.
///
/// # Examples
///
/// ```
/// use recipe_planner::segment;
///
/// let steps = segment("1. Mix well. 2. Bake 20 min.");
/// assert_eq!(steps.len(), 2);
/// assert_eq!(steps[1].number, 2);
/// assert_eq!(steps[1].instruction, "Bake 20 min.");
/// ```
pub fn segment(text: &str) -> Vec<Step> {
    let boundaries = find_boundaries(text);
    let mut steps = Vec::with_capacity(boundaries.len());

    for (idx, boundary) in boundaries.iter().enumerate() {
        let end = boundaries
            .get(idx + 1)
            .map(|next| next.start)
            .unwrap_or(text.len());
        let instruction = text[boundary.end..end].trim();
        if instruction.is_empty() {
            continue;
        }
        steps.push(Step {
            number: steps.len() as u32 + 1,
            instruction: instruction.to_string(),
        });
    }

    steps
}

impl Recipe {
    /// Returns the recipe's preparation split into steps.
    ///
    /// Recipes without preparation text have no steps.
    pub fn steps(&self) -> Vec<Step> {
        self.instructions.as_deref().map(segment).unwrap_or_default()
    }
}

fn find_boundaries(text: &str) -> Vec<Boundary> {
    let bytes = text.as_bytes();
    let mut boundaries = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }

        // `start` and `i` sit on ASCII bytes, so both are char boundaries
        let glued = text[..start]
            .chars()
            .next_back()
            .is_some_and(char::is_alphanumeric);
        let dotted = bytes.get(i) == Some(&b'.');
        let decimal = bytes.get(i + 1).is_some_and(u8::is_ascii_digit);

        if !glued && dotted && !decimal {
            i += 1;
            boundaries.push(Boundary { start, end: i });
        }
    }

    boundaries
}
