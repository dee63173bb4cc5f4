use crate::core::error::{EntityKind, MatchError};
use crate::models::{PatientProfile, ProviderProfile};

/// Providers at zero or negative capacity cannot take new patients
#[inline]
pub fn has_capacity(provider: &ProviderProfile) -> bool {
    provider.capacity > 0
}

/// Caller-supplied slot eligibility, absent means eligible
#[inline]
pub fn is_eligible(patient: &PatientProfile) -> bool {
    patient.eligible.unwrap_or(true)
}

/// A record is attributable only with a non-blank id
pub fn require_identity(entity: EntityKind, id: &str) -> Result<(), MatchError> {
    if id.trim().is_empty() {
        return Err(MatchError::missing_identity(entity, None));
    }
    Ok(())
}
