//! Text generator implementations.

pub mod gemini;
