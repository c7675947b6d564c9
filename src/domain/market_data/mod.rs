//! Market data aggregate: quote snapshots and their cache keys.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
