use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::core::{
    error::{EntityKind, MatchError},
    filters::{has_capacity, is_eligible, require_identity},
    scoring::calculate_match_result,
};
use crate::models::{
    MatchResult, MatchWeights, PatientProfile, ProviderProfile, RankedCandidate, TieBreakKey,
};

/// Ranking orchestrator for both directions of the waitlist
///
/// # Providers for a patient
/// 1. Capacity gate (full providers dropped)
/// 2. Scoring with the ranker's weights
/// 3. Order: score desc, reason count desc, input order
///
/// # Patients for an opened slot
/// 1. Eligibility gate
/// 2. Scoring with the ranker's weights
/// 3. Order: urgency desc, score desc, join sequence asc, input order
///
/// Neither direction truncates or deduplicates.
#[derive(Debug, Clone)]
pub struct Ranker {
    weights: MatchWeights,
}

struct Scored {
    id: String,
    result: MatchResult,
    key: TieBreakKey,
}

impl Ranker {
    pub fn new(weights: MatchWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: MatchWeights::default(),
        }
    }

    pub fn weights(&self) -> &MatchWeights {
        &self.weights
    }

    /// Rank providers for a patient
    ///
    /// Every provider id is checked, including providers that are then
    /// dropped for capacity. The first blank id aborts the call.
    pub fn rank_providers(
        &self,
        patient: &PatientProfile,
        providers: &[ProviderProfile],
    ) -> Result<Vec<RankedCandidate>, MatchError> {
        require_identity(EntityKind::Patient, &patient.id)?;

        let mut scored = Vec::with_capacity(providers.len());
        for (index, provider) in providers.iter().enumerate() {
            require_identity(EntityKind::Provider, &provider.id).map_err(|e| e.at_index(index))?;

            if !has_capacity(provider) {
                trace!("Provider {} at capacity ({}), skipping", provider.id, provider.capacity);
                continue;
            }

            let result = calculate_match_result(provider, patient, &self.weights);
            let key = TieBreakKey {
                urgency: None,
                score: result.score,
                reason_count: result.reasons.len(),
                join_sequence: None,
                input_index: index,
            };
            scored.push(Scored {
                id: provider.id.clone(),
                result,
                key,
            });
        }

        debug!(
            "Ranking {} of {} providers for patient {}",
            scored.len(),
            providers.len(),
            patient.id
        );

        scored.sort_by(|a, b| compare_for_patient(&a.key, &b.key));
        Ok(assign_ranks(scored))
    }

    /// Rank waiting patients for an opened slot with `provider`
    pub fn rank_waitlist(
        &self,
        patients: &[PatientProfile],
        provider: &ProviderProfile,
    ) -> Result<Vec<RankedCandidate>, MatchError> {
        require_identity(EntityKind::Provider, &provider.id)?;

        let mut scored = Vec::with_capacity(patients.len());
        for (index, patient) in patients.iter().enumerate() {
            require_identity(EntityKind::Patient, &patient.id).map_err(|e| e.at_index(index))?;

            if !is_eligible(patient) {
                trace!("Patient {} not eligible for provider {}", patient.id, provider.id);
                continue;
            }

            let result = calculate_match_result(provider, patient, &self.weights);
            let key = TieBreakKey {
                urgency: Some(patient.urgency),
                score: result.score,
                reason_count: result.reasons.len(),
                join_sequence: patient.join_sequence,
                input_index: index,
            };
            scored.push(Scored {
                id: patient.id.clone(),
                result,
                key,
            });
        }

        debug!(
            "Ranking {} of {} waitlisted patients for provider {}",
            scored.len(),
            patients.len(),
            provider.id
        );

        scored.sort_by(|a, b| compare_for_slot(&a.key, &b.key));
        Ok(assign_ranks(scored))
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Rank providers for a patient; `weights` applies to every provider
pub fn rank_providers(
    patient: &PatientProfile,
    providers: &[ProviderProfile],
    weights: Option<&MatchWeights>,
) -> Result<Vec<RankedCandidate>, MatchError> {
    Ranker::new(weights.copied().unwrap_or_default()).rank_providers(patient, providers)
}

/// Rank waiting patients for an opened slot; `weights` applies to every patient
pub fn rank_waitlist(
    patients: &[PatientProfile],
    provider: &ProviderProfile,
    weights: Option<&MatchWeights>,
) -> Result<Vec<RankedCandidate>, MatchError> {
    Ranker::new(weights.copied().unwrap_or_default()).rank_waitlist(patients, provider)
}

fn compare_for_patient(a: &TieBreakKey, b: &TieBreakKey) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| b.reason_count.cmp(&a.reason_count))
        .then_with(|| a.input_index.cmp(&b.input_index))
}

fn compare_for_slot(a: &TieBreakKey, b: &TieBreakKey) -> Ordering {
    b.urgency
        .cmp(&a.urgency)
        .then_with(|| b.score.cmp(&a.score))
        .then_with(|| compare_join_sequence(a.join_sequence, b.join_sequence))
        .then_with(|| a.input_index.cmp(&b.input_index))
}

/// Earlier joins first; patients without a sequence go after those with one
fn compare_join_sequence(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn assign_ranks(scored: Vec<Scored>) -> Vec<RankedCandidate> {
    scored
        .into_iter()
        .enumerate()
        .map(|(position, s)| RankedCandidate {
            id: s.id,
            rank: position + 1,
            result: s.result,
            tie_break: s.key,
        })
        .collect()
}
