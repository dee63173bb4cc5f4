use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{MatchWeights, PatientProfile, ProviderProfile};

/// Request to score one patient against one provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub patient: PatientProfile,
    pub provider: ProviderProfile,
    #[serde(default)]
    pub weights: Option<MatchWeights>,
}

/// Request to rank providers for a patient
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankProvidersRequest {
    pub patient: PatientProfile,
    pub providers: Vec<ProviderProfile>,
    #[serde(default)]
    pub weights: Option<MatchWeights>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to rank waiting patients for an opened slot
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankWaitlistRequest {
    pub provider: ProviderProfile,
    pub patients: Vec<PatientProfile>,
    #[serde(default)]
    pub weights: Option<MatchWeights>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}
