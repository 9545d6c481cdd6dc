use thiserror::Error;

use crate::render::RenderError;
use crate::synergy::SynergyTier;
use crate::traits::ResolvedTraits;

/// Rejected weight list for a weighted table.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WeightError {
    #[error("weights slice is empty")]
    Empty,
    #[error("weights contain a negative value at index {index}: {value}")]
    Negative { index: usize, value: f64 },
    #[error("sum of weights is zero or not finite")]
    ZeroSum,
}

/// A static table that failed validation at load time.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error(transparent)]
    Weights(#[from] WeightError),

    #[error("synergy rule `{title}` is {tier:?} but pins {pinned} axes")]
    RuleArity {
        title: &'static str,
        tier: SynergyTier,
        pinned: usize,
    },

    #[error("synergy rule at index {index} has an empty title or story")]
    EmptyRuleText { index: usize },

    #[error("quad rules `{first}` and `{second}` pin the same traits")]
    DuplicateQuad {
        first: &'static str,
        second: &'static str,
    },

    #[error("{tier:?} rules {titles:?} all match {traits}")]
    AmbiguousMatch {
        tier: SynergyTier,
        titles: Vec<&'static str>,
        traits: ResolvedTraits,
    },

    #[error("more than one transform defined for {species} holding {equipment}")]
    DuplicateTransform {
        species: &'static str,
        equipment: &'static str,
    },

    #[error("transform for {species} maps {equipment} onto itself")]
    IdentityTransform {
        species: &'static str,
        equipment: &'static str,
    },

    #[error("legendary override for token #{token_id} is missing its {field}")]
    MalformedLegendary {
        token_id: u64,
        field: &'static str,
    },

    #[error("token #{token_id} has more than one legendary override")]
    DuplicateLegendary { token_id: u64 },
}

/// Failure at the public generation boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerateError {
    #[error("invalid token id `{input}`: {reason}")]
    InvalidTokenId { input: String, reason: &'static str },

    #[error("rendering unavailable for token #{token_id}")]
    RenderingUnavailable {
        token_id: u64,
        #[source]
        source: RenderError,
    },

    #[error("failed to encode metadata: {0}")]
    Encode(#[from] serde_json::Error),
}
