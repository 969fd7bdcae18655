//! Output format implementations
//!
//! This module contains the formats a converted graph can be written in.

pub mod cypher;
pub mod json;
pub mod summary;

pub use cypher::CypherFormat;
pub use json::JsonFormat;
pub use summary::{GraphSummary, SummaryFormat};
