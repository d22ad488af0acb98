//! # persona-graph
//!
//! Turns positive verdicts into an undirected record graph, reads profiles
//! off its connected components, and scores them against ground truth.

pub mod builder;
pub mod cluster;
pub mod error;
pub mod evaluate;

pub use builder::{GraphBuilder, ProfileGraph};
pub use cluster::extract_profiles;
pub use error::GraphError;
pub use evaluate::{ProfileScores, evaluate_profiles};
