// Limit Operator
//
// This operator caps the number of tuples drawn from its child.

use crate::executor::operators::Operator;
use crate::executor::result::{QueryResult, Tuple};

/// Limit operator that returns at most `limit` tuples from its child, in
/// the child's emission order.
pub struct LimitOperator {
    child: Box<dyn Operator>,
    limit: usize,
    returned: usize,
}

impl LimitOperator {
    pub fn new(child: Box<dyn Operator>, limit: usize) -> Self {
        LimitOperator {
            child,
            limit,
            returned: 0,
        }
    }
}

impl Operator for LimitOperator {
    fn next(&mut self) -> QueryResult<Option<Tuple>> {
        // A limit of 0 ends the stream without ever pulling the child.
        if self.returned == self.limit {
            return Ok(None);
        }

        match self.child.next()? {
            None => Ok(None),
            Some(tuple) => {
                self.returned += 1;
                Ok(Some(tuple))
            }
        }
    }
}

/// Create a limit operator
pub fn create_limit(child: Box<dyn Operator>, limit: usize) -> Box<dyn Operator> {
    Box::new(LimitOperator::new(child, limit))
}
