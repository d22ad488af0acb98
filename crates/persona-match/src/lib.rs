//! # persona-match
//!
//! Candidate pair generation and similarity features.
//!
//! - [`schema`]: the fixed, ordered feature schema
//! - [`similarity`] and [`geo`]: pure per-metric functions
//! - [`extract`]: one feature vector per ordered record pair
//! - [`pairs`]: enumeration with deterministic negative subsampling
//! - [`export`]: flat JSON rows for inspection

pub mod error;
pub mod export;
pub mod extract;
pub mod geo;
pub mod pairs;
pub mod schema;
pub mod similarity;

pub use error::{FeatureFault, MatchError};
pub use extract::{Extraction, FeatureExtractor};
pub use pairs::{GenerationReport, PairGenerator, PairMode, PairTable, SamplingStrategy};
pub use schema::{FEATURES, FeatureDescriptor, feature_names, resolve_selection};
