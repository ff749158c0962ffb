//! Output formatting for size reports and run plans.

pub mod json;
pub mod text;
