use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

/// Session format a patient asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Modality {
    #[serde(alias = "in_person", alias = "inPerson")]
    InPerson,
    Virtual,
    #[default]
    Either,
}

/// Provider gender a patient asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenderPreference {
    Male,
    Female,
    #[default]
    #[serde(alias = "no_preference", alias = "noPreference", alias = "any")]
    NoPreference,
}

impl GenderPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenderPreference::Male => "male",
            GenderPreference::Female => "female",
            GenderPreference::NoPreference => "no-preference",
        }
    }
}

/// Deserialize a profile attribute, falling back to its default when the
/// value is null or has the wrong shape
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_else(|e| {
        tracing::debug!("Ignoring malformed profile attribute: {}", e);
        T::default()
    }))
}

/// Patient attributes relevant to matching
///
/// Every optional field is treated as "no information" when absent, null
/// or malformed. Only `id` is strict.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    pub id: String,
    #[serde(default, deserialize_with = "lenient", alias = "primaryCondition")]
    pub diagnosis: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub insurance: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub preferred_modality: Modality,
    #[serde(default, deserialize_with = "lenient")]
    pub preferred_gender: GenderPreference,
    /// Waitlist priority, higher first. Only the ranker reads it.
    #[serde(default, deserialize_with = "lenient")]
    pub urgency: i64,
    /// Caller-supplied gate for a specific slot, absent means eligible
    #[serde(default, deserialize_with = "lenient")]
    pub eligible: Option<bool>,
    /// Waitlist join order, lower joined earlier
    #[serde(default, deserialize_with = "lenient")]
    pub join_sequence: Option<i64>,
}

/// Provider attributes relevant to matching
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderProfile {
    pub id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub specialties: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub insurance_accepted: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub virtual_available: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub in_person_available: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub gender: Option<String>,
    /// Remaining open slots; zero or negative means full
    #[serde(default, deserialize_with = "lenient")]
    pub capacity: i64,
}

/// Scoring factors, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchFactor {
    Specialty,
    Insurance,
    Modality,
    Location,
    Gender,
}

impl MatchFactor {
    pub const ALL: [MatchFactor; 5] = [
        MatchFactor::Specialty,
        MatchFactor::Insurance,
        MatchFactor::Modality,
        MatchFactor::Location,
        MatchFactor::Gender,
    ];
}

/// One contributing factor of a match score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReason {
    pub factor: MatchFactor,
    pub detail: String,
    /// Points this factor added before clamping
    pub points: f64,
}

/// Output of the compatibility scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: u8,
    pub reasons: Vec<MatchReason>,
}

impl MatchResult {
    pub fn has_factor(&self, factor: MatchFactor) -> bool {
        self.reasons.iter().any(|r| r.factor == factor)
    }
}

/// Every key the ranker ordered by, kept for audit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TieBreakKey {
    /// Present only for waitlist rankings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<i64>,
    pub score: u8,
    pub reason_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_sequence: Option<i64>,
    pub input_index: usize,
}

/// A provider or patient placed in a ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidate {
    pub id: String,
    /// 1-based position
    pub rank: usize,
    pub result: MatchResult,
    pub tie_break: TieBreakKey,
}

/// Per-factor weights, in points
///
/// Defaults sum to 100, but any sum is accepted: the total is clamped to
/// 0..=100 after weighting. Fields left out of a serialized override keep
/// their default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchWeights {
    pub specialty: f64,
    pub insurance: f64,
    pub modality: f64,
    pub location: f64,
    pub gender: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            specialty: 40.0,
            insurance: 25.0,
            modality: 15.0,
            location: 15.0,
            gender: 5.0,
        }
    }
}

impl MatchWeights {
    /// Weight for a factor; negative or non-finite weights count as zero
    pub fn for_factor(&self, factor: MatchFactor) -> f64 {
        let raw = match factor {
            MatchFactor::Specialty => self.specialty,
            MatchFactor::Insurance => self.insurance,
            MatchFactor::Modality => self.modality,
            MatchFactor::Location => self.location,
            MatchFactor::Gender => self.gender,
        };
        if raw.is_finite() {
            raw.max(0.0)
        } else {
            0.0
        }
    }

    pub fn total(&self) -> f64 {
        MatchFactor::ALL.iter().map(|f| self.for_factor(*f)).sum()
    }
}
