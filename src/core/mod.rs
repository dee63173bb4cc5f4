// Core algorithm exports
pub mod error;
pub mod filters;
pub mod ranker;
pub mod scoring;
pub mod text;

pub use error::{EntityKind, MatchError};
pub use filters::{has_capacity, is_eligible, require_identity};
pub use ranker::{rank_providers, rank_waitlist, Ranker};
pub use scoring::{calculate_match_result, is_self_pay, score, score_factor};
