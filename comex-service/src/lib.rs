//! The seams the presentational layer calls into: aggregate writes,
//! category code reservation, duplication, and plain read/delete
//! accessors. Everything here talks to the store through the traits
//! in comex-core, with every call bounded by a deadline.

pub mod aggregate;
pub mod codes;
mod deadline;
mod dimension;
pub mod duplicate;
pub mod reads;

pub use aggregate::AggregateWriter;
pub use codes::CodeGenerator;
pub use duplicate::DuplicationService;
pub use reads::CatalogReader;
