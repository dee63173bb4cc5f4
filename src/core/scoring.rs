use crate::core::{
    error::{EntityKind, MatchError},
    filters::require_identity,
    text::{contains_either, eq_ignore_case, non_empty, shares_significant_word},
};
use crate::models::{
    GenderPreference, MatchFactor, MatchReason, MatchResult, MatchWeights, Modality,
    PatientProfile, ProviderProfile,
};

/// Fit for a related but non-identical specialty
pub const PARTIAL_SPECIALTY_FIT: f64 = 0.5;

/// Insurance values that mean the patient pays directly
const SELF_PAY_TERMS: &[&str] = &["self-pay", "self pay", "selfpay", "none", "uninsured", "cash"];

/// Score a provider for a patient (0-100) with the reasons behind it
///
/// Scoring formula:
/// score = clamp(
///     specialty_fit * w.specialty +    # exact 1.0, related 0.5
///     insurance_fit * w.insurance +    # accepted or self-pay
///     modality_fit  * w.modality +
///     location_fit  * w.location +
///     gender_fit    * w.gender,
///     0, 100)
///
/// `weights` falls back to [`MatchWeights::default`]. A blank patient or
/// provider id is the only failure; missing attributes score zero.
pub fn score(
    provider: &ProviderProfile,
    patient: &PatientProfile,
    weights: Option<&MatchWeights>,
) -> Result<MatchResult, MatchError> {
    require_identity(EntityKind::Provider, &provider.id)?;
    require_identity(EntityKind::Patient, &patient.id)?;

    let weights = weights.copied().unwrap_or_default();
    Ok(calculate_match_result(provider, patient, &weights))
}

/// Weighted factor sum without the identity checks
pub fn calculate_match_result(
    provider: &ProviderProfile,
    patient: &PatientProfile,
    weights: &MatchWeights,
) -> MatchResult {
    let mut total: f64 = 0.0;
    let mut reasons = Vec::new();

    for factor in MatchFactor::ALL {
        let weight = weights.for_factor(factor);
        if weight <= 0.0 {
            continue;
        }

        if let Some((fit, detail)) = score_factor(factor, provider, patient) {
            let points = weight * fit;
            if points > 0.0 {
                total += points;
                reasons.push(MatchReason {
                    factor,
                    detail,
                    points,
                });
            }
        }
    }

    MatchResult {
        score: total.clamp(0.0, 100.0).round() as u8,
        reasons,
    }
}

/// Fit (0-1] and wording for a single factor, `None` when it contributes nothing
pub fn score_factor(
    factor: MatchFactor,
    provider: &ProviderProfile,
    patient: &PatientProfile,
) -> Option<(f64, String)> {
    match factor {
        MatchFactor::Specialty => specialty_fit(provider, patient),
        MatchFactor::Insurance => insurance_fit(provider, patient),
        MatchFactor::Modality => modality_fit(provider, patient),
        MatchFactor::Location => location_fit(provider, patient),
        MatchFactor::Gender => gender_fit(provider, patient),
    }
}

/// Absent, blank, or an explicit self-pay term
pub fn is_self_pay(insurance: Option<&str>) -> bool {
    match non_empty(insurance) {
        None => true,
        Some(value) => SELF_PAY_TERMS.iter().any(|term| eq_ignore_case(value, term)),
    }
}

fn specialty_fit(provider: &ProviderProfile, patient: &PatientProfile) -> Option<(f64, String)> {
    let diagnosis = non_empty(patient.diagnosis.as_deref())?;
    let specialties = || provider.specialties.iter().filter_map(|s| non_empty(Some(s.as_str())));

    if let Some(exact) = specialties().find(|s| eq_ignore_case(s, diagnosis)) {
        return Some((1.0, format!("Specializes in {}", exact)));
    }

    specialties()
        .find(|s| contains_either(s, diagnosis) || shares_significant_word(s, diagnosis))
        .map(|related| (PARTIAL_SPECIALTY_FIT, format!("Related specialty: {}", related)))
}

fn insurance_fit(provider: &ProviderProfile, patient: &PatientProfile) -> Option<(f64, String)> {
    if is_self_pay(patient.insurance.as_deref()) {
        return Some((1.0, "Self-pay accepted".to_string()));
    }

    let insurance = non_empty(patient.insurance.as_deref())?;
    provider
        .insurance_accepted
        .iter()
        .find(|carrier| eq_ignore_case(carrier, insurance))
        .map(|carrier| (1.0, format!("Accepts {}", carrier.trim())))
}

fn modality_fit(provider: &ProviderProfile, patient: &PatientProfile) -> Option<(f64, String)> {
    let offered = match (
        patient.preferred_modality,
        provider.in_person_available,
        provider.virtual_available,
    ) {
        (Modality::Either, true, true) => "Offers in-person and virtual sessions",
        (Modality::Either | Modality::InPerson, true, _) => "Offers in-person sessions",
        (Modality::Either | Modality::Virtual, _, true) => "Offers virtual sessions",
        _ => return None,
    };
    Some((1.0, offered.to_string()))
}

fn location_fit(provider: &ProviderProfile, patient: &PatientProfile) -> Option<(f64, String)> {
    let patient_location = non_empty(patient.location.as_deref())?;
    let provider_location = non_empty(provider.location.as_deref())?;

    contains_either(patient_location, provider_location)
        .then(|| (1.0, format!("Located in {}", provider_location)))
}

fn gender_fit(provider: &ProviderProfile, patient: &PatientProfile) -> Option<(f64, String)> {
    match patient.preferred_gender {
        GenderPreference::NoPreference => Some((1.0, "No gender preference".to_string())),
        preferred => {
            let gender = non_empty(provider.gender.as_deref())?;
            eq_ignore_case(gender, preferred.as_str())
                .then(|| (1.0, format!("Matches preferred gender: {}", preferred.as_str())))
        }
    }
}
