//! Grade Match - Explainable matching between students and job postings
//!
//! This library provides the scoring and ranking engine that pairs student
//! academic profiles with job postings declaring per-subject grade requirements.
//! Every score comes with the matched and missing subjects behind it and a
//! human-readable reason.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{aggregate, Matcher, MatchAnalytics};
pub use error::MatchError;
pub use models::{JobProfile, MatchResult, ScoringWeights, Student, StudentProfile, SubjectRequirement};
