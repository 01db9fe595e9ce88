// Projection
//
// Field selection and renaming applied to tuples by the scan and aggregate
// operators.

use crate::executor::result::Tuple;

/// A single projected column: a source field name and an optional output
/// alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionColumn {
    pub name: String,
    pub alias: Option<String>,
}

impl ProjectionColumn {
    pub fn new(name: impl Into<String>) -> Self {
        ProjectionColumn {
            name: name.into(),
            alias: None,
        }
    }

    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        ProjectionColumn {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }
}

/// An ordered list of projected columns. The empty projection is the
/// identity transform.
#[derive(Debug, Clone, Default)]
pub struct Projection {
    columns: Vec<ProjectionColumn>,
}

impl Projection {
    pub fn new(columns: Vec<ProjectionColumn>) -> Self {
        Projection { columns }
    }

    /// The identity projection.
    pub fn identity() -> Self {
        Projection::default()
    }

    /// Projection keeping the named fields, without renaming.
    pub fn of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Projection {
            columns: names.into_iter().map(ProjectionColumn::new).collect(),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.columns.is_empty()
    }

    /// Apply the projection to a tuple.
    ///
    /// Each column reads the source field and writes it under its alias, or
    /// under the source name when no alias is set. A missing source field
    /// leaves the target key absent; it is not an error.
    pub fn apply(&self, tuple: &Tuple) -> Tuple {
        if self.columns.is_empty() {
            return tuple.clone();
        }

        let mut out = Tuple::new();
        for column in &self.columns {
            if let Some(value) = tuple.get(&column.name) {
                let key = column.alias.as_deref().unwrap_or(&column.name);
                out.set(key.to_string(), value.clone());
            }
        }
        out
    }
}
