// Sort Operator
//
// This operator materializes its child's entire output, total-orders it on
// one field, and serves the sorted tuples one at a time. It is fully
// blocking: the first `next` call drains the child to exhaustion.

use std::cmp::Ordering;
use std::mem;

use crate::executor::operators::Operator;
use crate::executor::result::{FieldValue, QueryError, QueryResult, Tuple};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Materialization state: the one-time drain-and-sort transition is
/// explicit so the streaming path stays trivial.
enum SortState {
    Pending,
    Ready { rows: Vec<Tuple>, cursor: usize },
}

pub struct SortOperator {
    child: Box<dyn Operator>,
    field: String,
    direction: SortDirection,
    state: SortState,
}

impl SortOperator {
    pub fn new(
        child: Box<dyn Operator>,
        field: impl Into<String>,
        direction: SortDirection,
    ) -> Self {
        SortOperator {
            child,
            field: field.into(),
            direction,
            state: SortState::Pending,
        }
    }

    /// Drain the child and sort the buffer once.
    ///
    /// The sort field must carry one consistent runtime kind across the
    /// whole buffer; a mixed-kind or absent field is a configuration error
    /// and fails closed rather than miscomparing.
    fn materialize(&mut self) -> QueryResult<Vec<Tuple>> {
        let mut rows = Vec::new();
        while let Some(tuple) = self.child.next()? {
            rows.push(tuple);
        }

        if rows.is_empty() {
            return Ok(rows);
        }

        let field = self.field.as_str();
        let first = rows[0]
            .get(field)
            .ok_or_else(|| QueryError::FieldNotFound(field.to_string()))?;
        let kind = mem::discriminant(first);
        let kind_name = first.kind_name();

        for row in &rows[1..] {
            let value = row
                .get(field)
                .ok_or_else(|| QueryError::FieldNotFound(field.to_string()))?;
            if mem::discriminant(value) != kind {
                return Err(QueryError::TypeError(format!(
                    "sort field '{}' mixes {} and {} values",
                    field,
                    kind_name,
                    value.kind_name()
                )));
            }
        }

        let direction = self.direction;
        rows.sort_by(|a, b| {
            let ord = match (a.get(field), b.get(field)) {
                (Some(FieldValue::Integer(x)), Some(FieldValue::Integer(y))) => x.cmp(y),
                (Some(FieldValue::Float(x)), Some(FieldValue::Float(y))) => x.total_cmp(y),
                (Some(FieldValue::Text(x)), Some(FieldValue::Text(y))) => x.cmp(y),
                // Excluded by the validation pass above
                _ => Ordering::Equal,
            };
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });

        Ok(rows)
    }
}

impl Operator for SortOperator {
    fn next(&mut self) -> QueryResult<Option<Tuple>> {
        if let SortState::Pending = self.state {
            let rows = self.materialize()?;
            self.state = SortState::Ready { rows, cursor: 0 };
        }

        if let SortState::Ready { rows, cursor } = &mut self.state {
            if *cursor < rows.len() {
                let tuple = rows[*cursor].clone();
                *cursor += 1;
                return Ok(Some(tuple));
            }
        }

        Ok(None)
    }
}

/// Create a sort operator
pub fn create_sort(
    child: Box<dyn Operator>,
    field: impl Into<String>,
    direction: SortDirection,
) -> Box<dyn Operator> {
    Box::new(SortOperator::new(child, field, direction))
}
