// Query Executor Module
//
// This module implements the iterator-based execution model: a tree of
// pull-based operators over an in-memory record collection, and the driver
// that streams result tuples to a consumer channel.

// Re-export public components
pub mod driver;
pub mod expression;
pub mod operators;
pub mod projection;
pub mod record;
pub mod result;

// Export key types
pub use self::driver::{QueryDescriptor, run};
pub use self::operators::Operator;
pub use self::result::{FieldValue, QueryResult, Tuple};
