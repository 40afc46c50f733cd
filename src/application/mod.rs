// Application layer: validation, cross-component coordination, and the
// structured results the CLI renders.

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
