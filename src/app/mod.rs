// Presentation layer: the terminal dashboard that calls into the core operations.

pub mod dashboard;
pub mod render;
