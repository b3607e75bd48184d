pub mod allocator;
pub mod errors;
pub mod report;

pub use allocator::StateRefAllocator;
pub use errors::{MigrationError, RowKind};
pub use report::MigrationReport;
