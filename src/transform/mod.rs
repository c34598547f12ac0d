//! Cell-level text transformations used by the normalizer.

pub mod rules;
pub mod string_ops;
