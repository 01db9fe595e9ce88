// Rowmill Query Execution Engine

pub mod executor;

// Re-export key items for convenient access
pub use executor::driver::{QueryDescriptor, output_channel, run, run_until};
pub use executor::expression::{ExprKind, Expression, QualKind, Qualifier};
pub use executor::operators::Operator;
pub use executor::projection::{Projection, ProjectionColumn};
pub use executor::record::{Record, to_snake_case};
pub use executor::result::{FieldValue, QueryError, QueryResult, Tuple};
