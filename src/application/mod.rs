pub mod booking;
pub mod dependencies;
pub mod errors;
pub mod item;
mod lookups;

pub use dependencies::{BookingPolicy, ServiceDependencies};
pub use errors::{ApplicationError, ErrorKind, Result};
