// Aggregate Operator
//
// This operator materializes its child's entire output and emits exactly
// one summary tuple: a typed sum or a row count over one field.

use log::warn;

use crate::executor::operators::Operator;
use crate::executor::projection::Projection;
use crate::executor::record::to_snake_case;
use crate::executor::result::{FieldValue, QueryResult, Tuple};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateKind {
    Sum,
    Count,
}

/// Running sum whose numeric kind is fixed by the first numeric value
/// encountered. Values of the other kind are never coerced into it.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SumState {
    Empty,
    Integer(i64),
    Float(f64),
}

pub struct AggregateOperator {
    child: Box<dyn Operator>,
    kind: AggregateKind,
    field: String,
    projection: Projection,
    sum: SumState,
    count: i64,
    done: bool,
}

impl AggregateOperator {
    pub fn new(
        child: Box<dyn Operator>,
        kind: AggregateKind,
        field: impl Into<String>,
        projection: Projection,
    ) -> Self {
        AggregateOperator {
            child,
            kind,
            field: field.into(),
            projection,
            sum: SumState::Empty,
            count: 0,
            done: false,
        }
    }

    fn accumulate(&mut self, tuple: &Tuple) {
        self.count += 1;

        match tuple.get(&self.field) {
            Some(FieldValue::Integer(v)) => match self.sum {
                SumState::Empty => self.sum = SumState::Integer(*v),
                SumState::Integer(acc) => self.sum = SumState::Integer(acc + v),
                SumState::Float(_) => {
                    warn!(
                        "aggregate field '{}' is accumulating floats; skipping integer value {}",
                        self.field, v
                    );
                }
            },
            Some(FieldValue::Float(v)) => match self.sum {
                SumState::Empty => self.sum = SumState::Float(*v),
                SumState::Float(acc) => self.sum = SumState::Float(acc + v),
                SumState::Integer(_) => {
                    warn!(
                        "aggregate field '{}' is accumulating integers; skipping float value {}",
                        self.field, v
                    );
                }
            },
            // Text values and absent fields contribute to the count only
            _ => {}
        }
    }
}

impl Operator for AggregateOperator {
    fn next(&mut self) -> QueryResult<Option<Tuple>> {
        if self.done {
            return Ok(None);
        }

        while let Some(tuple) = self.child.next()? {
            self.accumulate(&tuple);
        }
        self.done = true;

        let name = to_snake_case(&self.field);
        let mut out = Tuple::new();
        match self.kind {
            AggregateKind::Sum => {
                let value = match self.sum {
                    SumState::Empty => FieldValue::Integer(0),
                    SumState::Integer(sum) => FieldValue::Integer(sum),
                    SumState::Float(sum) => FieldValue::Float(sum),
                };
                out.set(format!("sum({})", name), value);
            }
            AggregateKind::Count => {
                out.set(format!("count({})", name), FieldValue::Integer(self.count));
            }
        }

        Ok(Some(self.projection.apply(&out)))
    }
}

/// Create an aggregate operator
pub fn create_aggregate(
    child: Box<dyn Operator>,
    kind: AggregateKind,
    field: impl Into<String>,
    projection: Projection,
) -> Box<dyn Operator> {
    Box::new(AggregateOperator::new(child, kind, field, projection))
}
