// Record Sources
//
// Scan sources are either pre-built tuples or structured records. A
// structured record exposes its fields under whatever names the source
// system labels them with; the scan builds tuples under canonical
// lower-snake-case names.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::executor::result::{FieldValue, Tuple};

static MATCH_FIRST_CAP: Lazy<Regex> = Lazy::new(|| {
    Regex::new("(.)([A-Z][a-z]+)").expect("static pattern")
});
static MATCH_ALL_CAP: Lazy<Regex> = Lazy::new(|| {
    Regex::new("([a-z0-9])([A-Z])").expect("static pattern")
});

/// Normalize a field name to lower-snake-case.
///
/// Pure function; names already in canonical form pass through unchanged.
pub fn to_snake_case(name: &str) -> String {
    let snake = MATCH_FIRST_CAP.replace_all(name, "${1}_${2}");
    let snake = MATCH_ALL_CAP.replace_all(&snake, "${1}_${2}");
    snake.to_lowercase()
}

/// A source element convertible into a tuple.
pub trait Record {
    /// Field name / value pairs as labeled by the source.
    fn fields(&self) -> Vec<(String, FieldValue)>;

    /// Build a tuple keyed by canonical field names.
    fn to_tuple(&self) -> Tuple {
        self.fields()
            .into_iter()
            .map(|(name, value)| (to_snake_case(&name), value))
            .collect()
    }
}

impl Record for Tuple {
    fn fields(&self) -> Vec<(String, FieldValue)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    // Already keyed; no renaming on the identity path.
    fn to_tuple(&self) -> Tuple {
        self.clone()
    }
}
