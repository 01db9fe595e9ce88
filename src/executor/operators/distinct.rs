// Distinct Operator
//
// This operator streams tuples from its child, suppressing repeats of a
// key field. First-occurrence order is preserved.

use std::collections::HashSet;

use crate::executor::operators::Operator;
use crate::executor::result::{QueryResult, Tuple};

// Dedup key for tuples missing the field entirely; such tuples all
// collapse onto the first one seen.
const ABSENT_KEY: &str = "<absent>";

pub struct DistinctOperator {
    child: Box<dyn Operator>,
    field: String,
    seen: HashSet<String>,
}

impl DistinctOperator {
    pub fn new(child: Box<dyn Operator>, field: impl Into<String>) -> Self {
        DistinctOperator {
            child,
            field: field.into(),
            seen: HashSet::new(),
        }
    }
}

impl Operator for DistinctOperator {
    fn next(&mut self) -> QueryResult<Option<Tuple>> {
        while let Some(tuple) = self.child.next()? {
            let key = match tuple.get(&self.field) {
                Some(value) => value.to_string(),
                None => ABSENT_KEY.to_string(),
            };
            if self.seen.insert(key) {
                return Ok(Some(tuple));
            }
        }

        Ok(None)
    }
}

/// Create a distinct operator
pub fn create_distinct(child: Box<dyn Operator>, field: impl Into<String>) -> Box<dyn Operator> {
    Box::new(DistinctOperator::new(child, field))
}
