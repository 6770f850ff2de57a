//! Use cases — one per gateway operation

pub mod explain_code;
pub mod visualize_code;
