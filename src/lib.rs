//! Care Match - patient/provider matching and waitlist ranking
//!
//! This library provides the compatibility scorer and the waitlist ranker
//! used when booking mental-health appointments. Both are pure functions over
//! in-memory profiles; storage, auth and notifications live with the caller.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{rank_providers, rank_waitlist, score, MatchError, Ranker};
pub use models::{
    MatchFactor, MatchReason, MatchResult, MatchWeights, PatientProfile, ProviderProfile,
    RankedCandidate,
};
