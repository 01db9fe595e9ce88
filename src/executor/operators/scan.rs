// Memory Scan Operator
//
// This operator produces tuples from a resident in-memory source sequence,
// applying an optional predicate and a projection.

use crate::executor::expression::Expression;
use crate::executor::operators::Operator;
use crate::executor::projection::Projection;
use crate::executor::record::Record;
use crate::executor::result::{QueryResult, Tuple};

/// Scan over a fully resident source collection.
///
/// The source is assumed total and type-stable; scanning never fails.
pub struct MemScanOperator<R: Record> {
    src: Vec<R>,
    predicate: Option<Expression>,
    projection: Projection,
    cursor: usize,
}

impl<R: Record> MemScanOperator<R> {
    pub fn new(src: Vec<R>) -> Self {
        MemScanOperator {
            src,
            predicate: None,
            projection: Projection::identity(),
            cursor: 0,
        }
    }

    pub fn with_predicate(mut self, predicate: Expression) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }
}

impl<R: Record + Send> Operator for MemScanOperator<R> {
    fn next(&mut self) -> QueryResult<Option<Tuple>> {
        while self.cursor < self.src.len() {
            let tuple = self.src[self.cursor].to_tuple();
            self.cursor += 1;

            if let Some(predicate) = &self.predicate {
                if !predicate.eval(&tuple) {
                    continue;
                }
            }

            return Ok(Some(self.projection.apply(&tuple)));
        }

        Ok(None)
    }
}

/// Create a memory scan operator
pub fn create_mem_scan<R>(
    src: Vec<R>,
    predicate: Option<Expression>,
    projection: Projection,
) -> Box<dyn Operator>
where
    R: Record + Send + 'static,
{
    let mut scan = MemScanOperator::new(src).with_projection(projection);
    if let Some(predicate) = predicate {
        scan = scan.with_predicate(predicate);
    }
    Box::new(scan)
}
