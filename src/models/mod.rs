// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    GenderPreference, MatchFactor, MatchReason, MatchResult, MatchWeights, Modality,
    PatientProfile, ProviderProfile, RankedCandidate, TieBreakKey,
};
pub use requests::{RankProvidersRequest, RankWaitlistRequest, ScoreRequest};
pub use responses::{ErrorResponse, HealthResponse, RankingResponse};
