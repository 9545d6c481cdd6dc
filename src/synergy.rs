//! Synergy rules and the resolver that picks the most specific one.
//!
//! Rules come in three tiers by how many axes they pin. Resolution checks
//! quads, then trinities, then duals; two duals matching together combine
//! into a dual-combo.

use std::borrow::Cow;
use std::fmt;

use crate::error::CatalogError;
use crate::traits::{Curse, Equipment, Realm, ResolvedTraits, Species};

/// Bumped whenever [`RULES`] changes meaning for an existing trait tuple.
pub const CATALOG_VERSION: u32 = 1;

/// Specificity of a rule: how many axes it pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SynergyTier {
    Dual,
    Trinity,
    Quad,
}

impl SynergyTier {
    pub const fn pinned(self) -> usize {
        match self {
            Self::Dual => 2,
            Self::Trinity => 3,
            Self::Quad => 4,
        }
    }
}

/// Partial constraint over the four axes; `None` is a wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pattern {
    pub species: Option<Species>,
    pub equipment: Option<Equipment>,
    pub realm: Option<Realm>,
    pub curse: Option<Curse>,
}

impl Pattern {
    pub const ANY: Pattern = Pattern {
        species: None,
        equipment: None,
        realm: None,
        curse: None,
    };

    pub const fn species(self, species: Species) -> Self {
        Self {
            species: Some(species),
            ..self
        }
    }

    pub const fn equipment(self, equipment: Equipment) -> Self {
        Self {
            equipment: Some(equipment),
            ..self
        }
    }

    pub const fn realm(self, realm: Realm) -> Self {
        Self {
            realm: Some(realm),
            ..self
        }
    }

    pub const fn curse(self, curse: Curse) -> Self {
        Self {
            curse: Some(curse),
            ..self
        }
    }

    pub fn pinned(&self) -> usize {
        usize::from(self.species.is_some())
            + usize::from(self.equipment.is_some())
            + usize::from(self.realm.is_some())
            + usize::from(self.curse.is_some())
    }

    pub fn matches(&self, t: &ResolvedTraits) -> bool {
        self.species.is_none_or(|s| s == t.species)
            && self.equipment.is_none_or(|e| e == t.equipment)
            && self.realm.is_none_or(|r| r == t.realm)
            && self.curse.is_none_or(|c| c == t.curse)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynergyRule {
    pub tier: SynergyTier,
    pub pattern: Pattern,
    pub title: &'static str,
    pub story: &'static str,
}

impl SynergyRule {
    const fn quad(
        species: Species,
        equipment: Equipment,
        realm: Realm,
        curse: Curse,
        title: &'static str,
        story: &'static str,
    ) -> Self {
        Self {
            tier: SynergyTier::Quad,
            pattern: Pattern::ANY
                .species(species)
                .equipment(equipment)
                .realm(realm)
                .curse(curse),
            title,
            story,
        }
    }

    const fn trinity(pattern: Pattern, title: &'static str, story: &'static str) -> Self {
        Self {
            tier: SynergyTier::Trinity,
            pattern,
            title,
            story,
        }
    }

    const fn dual(pattern: Pattern, title: &'static str, story: &'static str) -> Self {
        Self {
            tier: SynergyTier::Dual,
            pattern,
            title,
            story,
        }
    }
}

/// Type tag reported in metadata as "Synergy Type".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SynergyKind {
    Dual,
    Trinity,
    Quad,
    DualCombo,
}

impl SynergyKind {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Dual => "dual",
            Self::Trinity => "trinity",
            Self::Quad => "quad",
            Self::DualCombo => "dual-combo",
        }
    }
}

impl fmt::Display for SynergyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Outcome of a successful resolution. No match is `None` at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynergyMatch<'a> {
    Single(&'a SynergyRule),
    /// Exactly two dual rules matched at once.
    Combo(&'a SynergyRule, &'a SynergyRule),
}

impl<'a> SynergyMatch<'a> {
    pub fn kind(&self) -> SynergyKind {
        match self {
            Self::Single(rule) => match rule.tier {
                SynergyTier::Dual => SynergyKind::Dual,
                SynergyTier::Trinity => SynergyKind::Trinity,
                SynergyTier::Quad => SynergyKind::Quad,
            },
            Self::Combo(..) => SynergyKind::DualCombo,
        }
    }

    pub fn title(&self) -> Cow<'a, str> {
        match self {
            Self::Single(rule) => Cow::Borrowed(rule.title),
            Self::Combo(a, b) => Cow::Owned(format!("{} & {}", a.title, b.title)),
        }
    }

    pub fn story(&self) -> Cow<'a, str> {
        match self {
            Self::Single(rule) => Cow::Borrowed(rule.story),
            Self::Combo(a, b) => Cow::Owned(format!("{} {}", a.story, b.story)),
        }
    }

    pub fn rules(&self) -> impl Iterator<Item = &'a SynergyRule> {
        let (first, second) = match *self {
            Self::Single(rule) => (rule, None),
            Self::Combo(a, b) => (a, Some(b)),
        };
        std::iter::once(first).chain(second)
    }

    /// Whether any matched rule pins the equipment axis.
    pub fn pins_equipment(&self) -> bool {
        self.rules().any(|r| r.pattern.equipment.is_some())
    }
}

use Curse as C;
use Equipment as E;
use Realm as R;
use Species as S;

const ANY: Pattern = Pattern::ANY;

pub const RULES: &[SynergyRule] = &[
    // quad
    SynergyRule::quad(
        S::Dragon,
        E::Crown,
        R::Ragnarok,
        C::Meteor,
        "Cosmic Sovereign",
        "Crowned beneath a falling sky, it rules over the end of every world.",
    ),
    SynergyRule::quad(
        S::Vampire,
        E::Wine,
        R::Bloodmoon,
        C::Bats,
        "Eternal Count",
        "Under the red moon the Count raises a glass that is never empty.",
    ),
    SynergyRule::quad(
        S::HeadlessKnight,
        E::SeveredHead,
        R::Shadow,
        C::Spirits,
        "The Headless Horseman",
        "It rides through the dark with its own head in hand, hunting the spirits that took it.",
    ),
    SynergyRule::quad(
        S::Witch,
        E::Spellbook,
        R::Eclipse,
        C::Runes,
        "Grand Coven",
        "When the sun goes dark the runes answer her and no one else.",
    ),
    SynergyRule::quad(
        S::Mummy,
        E::Chains,
        R::Crypt,
        C::Plague,
        "Pharaoh's Wrath",
        "Chained and sealed in stone, the pharaoh still sends his plague beyond the tomb.",
    ),
    // trinity
    SynergyRule::trinity(
        ANY.species(S::Vampire).equipment(E::Wine).realm(R::Shadow),
        "Classic Nosferatu",
        "A vampire of the old school: a long shadow, a full goblet and no reflection.",
    ),
    SynergyRule::trinity(
        ANY.species(S::Werewolf).realm(R::Bloodmoon).curse(C::Ravens),
        "Moonlit Hunt",
        "The ravens circle wherever the wolf has fed under the red moon.",
    ),
    SynergyRule::trinity(
        ANY.species(S::Skeleton).equipment(E::BoneArm).realm(R::Crypt),
        "Bone Collector",
        "It wanders the crypt swinging a spare arm, looking for the rest of someone else.",
    ),
    SynergyRule::trinity(
        ANY.species(S::Ghost).equipment(E::Lantern).curse(C::Fog),
        "Will-o'-the-Wisp",
        "A pale light in the fog. Travelers who follow it are never found.",
    ),
    SynergyRule::trinity(
        ANY.equipment(E::Scythe).realm(R::Shadow).curse(C::Spirits),
        "Grim Harvest",
        "The blade passes through the shadows and the spirits follow it home.",
    ),
    SynergyRule::trinity(
        ANY.species(S::Zombie).realm(R::Swamp).curse(C::Plague),
        "Bog Shambler",
        "Risen from the mire, it spreads sickness with every step.",
    ),
    SynergyRule::trinity(
        ANY.species(S::Dragon).equipment(E::Sword).realm(R::Inferno),
        "Dragonslayer's Bane",
        "It keeps the sword of the last knight who tried, still glowing from the fire.",
    ),
    SynergyRule::trinity(
        ANY.species(S::HeadlessKnight).equipment(E::SeveredHead).curse(C::Ravens),
        "Rider of the Hollow",
        "Ravens pick at the head it carries; the knight does not seem to mind.",
    ),
    // dual
    SynergyRule::dual(
        ANY.species(S::Goblin).equipment(E::Sword),
        "Goblin Raider",
        "Small, loud and armed far beyond its station.",
    ),
    SynergyRule::dual(
        ANY.realm(R::Frost).curse(C::Blizzard),
        "Deep Freeze",
        "The cold here does not end.",
    ),
    SynergyRule::dual(
        ANY.species(S::Werewolf).curse(C::Lightning),
        "Storm Howler",
        "Its howl arrives just before the thunder.",
    ),
    SynergyRule::dual(
        ANY.equipment(E::Crown).realm(R::Abyss),
        "Abyssal Throne",
        "A crown worn at the bottom of the world.",
    ),
    SynergyRule::dual(
        ANY.species(S::Zombie).equipment(E::Bone),
        "Hungry Dead",
        "Still chewing.",
    ),
    SynergyRule::dual(
        ANY.realm(R::Inferno).curse(C::Flames),
        "Hellfire",
        "Everything burns, twice.",
    ),
    SynergyRule::dual(
        ANY.species(S::Witch).realm(R::Swamp),
        "Bog Hag",
        "She brews in the marsh where nothing else will grow.",
    ),
    SynergyRule::dual(
        ANY.species(S::Ghost).curse(C::Spirits),
        "Restless Soul",
        "It has company, and none of it is friendly.",
    ),
    SynergyRule::dual(
        ANY.equipment(E::Wine).curse(C::Bats),
        "Blood Feast",
        "The bats know what is really in the cup.",
    ),
    SynergyRule::dual(
        ANY.species(S::Mummy).curse(C::Plague),
        "Ancient Pestilence",
        "Three thousand years of sickness, unwrapped.",
    ),
];

/// Validated, read-only rule set split by tier, each in table order.
#[derive(Debug, Clone)]
pub struct SynergyCatalog {
    quads: Vec<SynergyRule>,
    trinities: Vec<SynergyRule>,
    duals: Vec<SynergyRule>,
}

impl SynergyCatalog {
    /// Build and validate a catalog.
    ///
    /// # Errors
    /// * [`CatalogError::EmptyRuleText`] for a rule without title or story.
    /// * [`CatalogError::RuleArity`] if a rule's pinned axes disagree with its tier.
    /// * [`CatalogError::DuplicateQuad`] if two quads pin identical traits.
    /// * [`CatalogError::AmbiguousMatch`] if any trait tuple matches two
    ///   trinities or more than two duals.
    ///
    /// # Complexity
    /// Sweeps all 10^4 trait tuples once.
    pub fn new<I>(rules: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = SynergyRule>,
    {
        let mut quads = Vec::new();
        let mut trinities = Vec::new();
        let mut duals = Vec::new();

        for (index, rule) in rules.into_iter().enumerate() {
            if rule.title.trim().is_empty() || rule.story.trim().is_empty() {
                return Err(CatalogError::EmptyRuleText { index });
            }
            let pinned = rule.pattern.pinned();
            if pinned != rule.tier.pinned() {
                return Err(CatalogError::RuleArity {
                    title: rule.title,
                    tier: rule.tier,
                    pinned,
                });
            }
            match rule.tier {
                SynergyTier::Quad => {
                    if let Some(prev) = quads.iter().find(|q: &&SynergyRule| q.pattern == rule.pattern) {
                        return Err(CatalogError::DuplicateQuad {
                            first: prev.title,
                            second: rule.title,
                        });
                    }
                    quads.push(rule);
                }
                SynergyTier::Trinity => trinities.push(rule),
                SynergyTier::Dual => duals.push(rule),
            }
        }

        let catalog = Self {
            quads,
            trinities,
            duals,
        };
        catalog.check_unambiguous()?;

        log::info!(
            "synergy catalog v{CATALOG_VERSION} validated: {} quad, {} trinity, {} dual",
            catalog.quads.len(),
            catalog.trinities.len(),
            catalog.duals.len()
        );
        Ok(catalog)
    }

    /// The built-in rule table.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::new(RULES.iter().copied())
    }

    fn check_unambiguous(&self) -> Result<(), CatalogError> {
        for traits in ResolvedTraits::all() {
            let trinities = matching(&self.trinities, &traits);
            if trinities.len() > 1 {
                return Err(CatalogError::AmbiguousMatch {
                    tier: SynergyTier::Trinity,
                    titles: trinities.iter().map(|r| r.title).collect(),
                    traits,
                });
            }
            let duals = matching(&self.duals, &traits);
            if duals.len() > 2 {
                return Err(CatalogError::AmbiguousMatch {
                    tier: SynergyTier::Dual,
                    titles: duals.iter().map(|r| r.title).collect(),
                    traits,
                });
            }
        }
        Ok(())
    }

    /// Highest-specificity match for `traits`, or `None`.
    ///
    /// Total over every trait tuple. Ambiguities that validation rules out are
    /// resolved in table order with a warning.
    pub fn resolve(&self, traits: &ResolvedTraits) -> Option<SynergyMatch<'_>> {
        if let Some(quad) = self.quads.iter().find(|r| r.pattern.matches(traits)) {
            return Some(SynergyMatch::Single(quad));
        }

        let trinities = matching(&self.trinities, traits);
        if let Some(&first) = trinities.first() {
            if trinities.len() > 1 {
                log::warn!(
                    "{} trinity rules match {traits}; using `{}`",
                    trinities.len(),
                    first.title
                );
            }
            return Some(SynergyMatch::Single(first));
        }

        let duals = matching(&self.duals, traits);
        match duals.as_slice() {
            [] => None,
            &[one] => Some(SynergyMatch::Single(one)),
            &[a, b] => Some(SynergyMatch::Combo(a, b)),
            &[a, b, ..] => {
                log::warn!(
                    "{} dual rules match {traits}; combining `{}` and `{}`",
                    duals.len(),
                    a.title,
                    b.title
                );
                Some(SynergyMatch::Combo(a, b))
            }
        }
    }

    pub fn rules(&self) -> impl Iterator<Item = &SynergyRule> {
        self.quads
            .iter()
            .chain(&self.trinities)
            .chain(&self.duals)
    }

    pub fn len(&self) -> usize {
        self.quads.len() + self.trinities.len() + self.duals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn matching<'a>(rules: &'a [SynergyRule], traits: &ResolvedTraits) -> Vec<&'a SynergyRule> {
    rules.iter().filter(|r| r.pattern.matches(traits)).collect()
}
