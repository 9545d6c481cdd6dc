use std::fmt;

use monstergen_macros::WeightedEnum;
use serde::{Deserialize, Serialize};

use crate::DropTable;
use crate::error::WeightError;
use crate::selector;
use crate::synergy::{SynergyKind, SynergyMatch};

/// Rarity tiers, lowest first.
///
/// The probabilities are the base roll for a token with no synergy; the upper
/// tiers are only reachable through a synergy floor or a legendary override.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, WeightedEnum,
)]
pub enum RarityTier {
    #[probability(75/100)]
    Common,
    #[probability(20/100)]
    Uncommon,
    #[probability(5/100)]
    Rare,
    #[probability(0)]
    Epic,
    #[probability(0)]
    Legendary,
    #[probability(0)]
    Mythic,
}

impl RarityTier {
    pub const TOP: RarityTier = RarityTier::Mythic;

    pub const fn name(self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
            Self::Mythic => "Mythic",
        }
    }

    /// Lowest tier a token with this kind of synergy may have.
    pub const fn floor_for(kind: SynergyKind) -> RarityTier {
        match kind {
            SynergyKind::Dual => Self::Epic,
            SynergyKind::Trinity | SynergyKind::DualCombo => Self::Legendary,
            SynergyKind::Quad => Self::Mythic,
        }
    }
}

impl fmt::Display for RarityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Seeded base roll plus synergy floor.
#[derive(Debug, Clone)]
pub struct RarityClassifier {
    base: DropTable<RarityTier>,
}

impl RarityClassifier {
    /// Classifier over the weights declared on [`RarityTier`].
    pub fn new() -> Result<Self, WeightError> {
        Ok(Self::with_table(RarityTier::droptable()?))
    }

    pub fn with_table(base: DropTable<RarityTier>) -> Self {
        Self { base }
    }

    /// Rarity from the seed alone.
    pub fn base_roll(&self, seed: i64) -> RarityTier {
        *self.base.seeded(seed, selector::offset::RARITY)
    }

    /// `max(base roll, synergy floor)`. The floor is never lowered by the roll.
    pub fn classify(&self, seed: i64, synergy: Option<&SynergyMatch<'_>>) -> RarityTier {
        let base = self.base_roll(seed);
        match synergy {
            Some(m) => base.max(RarityTier::floor_for(m.kind())),
            None => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WeightedEnum;
    use crate::synergy::SynergyCatalog;
    use crate::traits::ResolvedTraits;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn tiers_are_ordered() {
        assert!(RarityTier::Common < RarityTier::Uncommon);
        assert!(RarityTier::Epic < RarityTier::Legendary);
        assert_eq!(RarityTier::TOP, RarityTier::Mythic);
        assert_eq!(RarityTier::ENTRIES.len(), 6);
        assert_eq!(RarityTier::Legendary.to_string(), "Legendary");
    }

    #[test]
    fn base_roll_stays_low() {
        let c = RarityClassifier::new().unwrap();
        let draws = 50_000i64;
        let mut counts = [0usize; 6];
        for seed in 0..draws {
            counts[c.base_roll(seed) as usize] += 1;
        }
        assert_eq!(&counts[3..], &[0usize, 0, 0]);
        let low = (counts[0] + counts[1]) as f64 / draws as f64;
        assert!(low > 0.9, "common+uncommon share {low}");
        assert!(counts[2] > 0, "rare never rolled");
    }

    #[test]
    fn random_draws_match_declared_weights() {
        let table = RarityTier::droptable().unwrap();
        let mut rng = Pcg32::seed_from_u64(5);
        let draws = 20_000;
        let common = (0..draws)
            .filter(|_| *table.sample(&mut rng) == RarityTier::Common)
            .count();
        let emp = common as f64 / draws as f64;
        assert!((emp - 0.75).abs() < 0.03, "emp={emp}");
    }

    #[test]
    fn synergy_floor_never_lowered() {
        let c = RarityClassifier::new().unwrap();
        let cat = SynergyCatalog::standard().unwrap();
        let mut checked = 0;
        for (i, t) in ResolvedTraits::all().enumerate() {
            let Some(m) = cat.resolve(&t) else { continue };
            let seed = i as i64;
            let tier = c.classify(seed, Some(&m));
            assert!(tier >= RarityTier::floor_for(m.kind()));
            assert!(tier >= c.base_roll(seed));
            checked += 1;
        }
        assert!(checked > 0);
    }

    #[test]
    fn floors_by_kind() {
        assert_eq!(RarityTier::floor_for(SynergyKind::Dual), RarityTier::Epic);
        assert_eq!(RarityTier::floor_for(SynergyKind::Trinity), RarityTier::Legendary);
        assert_eq!(RarityTier::floor_for(SynergyKind::DualCombo), RarityTier::Legendary);
        assert_eq!(RarityTier::floor_for(SynergyKind::Quad), RarityTier::Mythic);
    }

    #[test]
    fn no_synergy_is_base_roll() {
        let c = RarityClassifier::new().unwrap();
        for seed in 0..500 {
            assert_eq!(c.classify(seed, None), c.base_roll(seed));
        }
    }
}
