//! Native implementations of the domain's logger and clock abstractions.

pub mod services;

pub use services::*;
