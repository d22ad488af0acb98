//! # persona-model
//!
//! The [`Classifier`] seam between pair features and profile graphs, a seeded
//! [`RandomForest`] implementation, stratified folds, and the precision /
//! recall / F1 measures used for cross-validation and reporting.

pub mod classifier;
pub mod error;
pub mod folds;
pub mod forest;
pub mod metrics;

pub use classifier::{Classifier, FeatureImportance, FoldMetrics, mean_f1};
pub use error::ModelError;
pub use folds::stratified_folds;
pub use forest::{ForestModel, ForestParams, RandomForest};
pub use metrics::{ClassScores, ClassificationReport, binary_scores, macro_report};
