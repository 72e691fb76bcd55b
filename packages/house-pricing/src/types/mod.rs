//! Data types for the pricing pipeline.

pub mod record;
pub mod schema;
pub mod vector;
