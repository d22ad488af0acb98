//! # persona-core
//!
//! Core types and error types shared by every persona crate.
//!
//! This crate provides:
//! - Normalized contribution records and their name/list field accessors
//! - Candidate pairs and classifier verdicts
//! - Entity profiles (one hypothesized identity each)
//! - The feature matrix handed to classifiers
//! - Run diagnostics (dropped pairs, defaulted features)
//! - Cross-cutting error types

pub mod diagnostics;
pub mod errors;
pub mod matrix;
pub mod pair;
pub mod profile;
pub mod record;

pub use diagnostics::Diagnostics;
pub use errors::CoreError;
pub use matrix::FeatureMatrix;
pub use pair::{CandidatePair, Verdict};
pub use profile::EntityProfile;
pub use record::{ContributionRecord, GeoPoint, ListField, NameField};
