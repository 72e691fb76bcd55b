//! Trait seams for the two external collaborators: the language model and
//! the fitted regression models.

pub mod generator;
pub mod model;
