// Query Operators Module
//
// This module defines the operators used for query execution in the
// iterator-based execution model.

// Re-export public components
pub mod agg;
pub mod distinct;
pub mod limit;
pub mod scan;
pub mod sort;

use crate::executor::expression::Expression;
use crate::executor::projection::Projection;
use crate::executor::record::Record;
use crate::executor::result::{QueryResult, Tuple};

pub use self::agg::AggregateKind;
pub use self::sort::SortDirection;

/// The Operator trait defines the interface for all query execution
/// operators in the iterator-based execution model. Each call to `next`
/// pulls the operator's next output tuple; `None` signals end-of-stream,
/// and once an operator has signalled it, every later call does too.
///
/// Operators form a single-use tree: each non-leaf operator exclusively
/// owns its child and is solely responsible for driving it.
pub trait Operator: Send {
    /// Get the next tuple from this operator
    fn next(&mut self) -> QueryResult<Option<Tuple>>;
}

// Factory functions for creating operators
pub fn create_mem_scan<R>(
    src: Vec<R>,
    predicate: Option<Expression>,
    projection: Projection,
) -> Box<dyn Operator>
where
    R: Record + Send + 'static,
{
    scan::create_mem_scan(src, predicate, projection)
}

pub fn create_limit(child: Box<dyn Operator>, limit: usize) -> Box<dyn Operator> {
    limit::create_limit(child, limit)
}

pub fn create_sort(
    child: Box<dyn Operator>,
    field: impl Into<String>,
    direction: SortDirection,
) -> Box<dyn Operator> {
    sort::create_sort(child, field, direction)
}

pub fn create_distinct(child: Box<dyn Operator>, field: impl Into<String>) -> Box<dyn Operator> {
    distinct::create_distinct(child, field)
}

pub fn create_aggregate(
    child: Box<dyn Operator>,
    kind: AggregateKind,
    field: impl Into<String>,
    projection: Projection,
) -> Box<dyn Operator> {
    agg::create_aggregate(child, kind, field, projection)
}
