//! Hand-authored one-of-a-kind tokens.
//!
//! An override replaces the token's name and story, forces the top rarity,
//! and pins only the axes it lists. Unlisted axes keep their seeded value.

use std::collections::BTreeMap;

use crate::error::CatalogError;
use crate::rarity::RarityTier;
use crate::token::TokenId;
use crate::traits::{Curse, Equipment, Realm, ResolvedTraits, Species};

/// Per-axis substitutions; `None` leaves the seeded value in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisOverrides {
    pub species: Option<Species>,
    pub equipment: Option<Equipment>,
    pub realm: Option<Realm>,
    pub curse: Option<Curse>,
}

impl AxisOverrides {
    pub const NONE: AxisOverrides = AxisOverrides {
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

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }

    pub fn apply(&self, traits: ResolvedTraits) -> ResolvedTraits {
        ResolvedTraits {
            species: self.species.unwrap_or(traits.species),
            equipment: self.equipment.unwrap_or(traits.equipment),
            realm: self.realm.unwrap_or(traits.realm),
            curse: self.curse.unwrap_or(traits.curse),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendaryEntry {
    pub token_id: u64,
    pub title: &'static str,
    pub story: &'static str,
    pub overrides: AxisOverrides,
}

const NONE: AxisOverrides = AxisOverrides::NONE;

pub const LEGENDARIES: &[LegendaryEntry] = &[
    LegendaryEntry {
        token_id: 1,
        title: "Patient Zero",
        story: "The first to rise. Every curse in the crypt traces back to this one.",
        overrides: NONE.species(Species::Zombie).curse(Curse::Plague),
    },
    LegendaryEntry {
        token_id: 13,
        title: "The Unlucky One",
        story: "Nobody remembers what it was before the bad luck started. Nobody wants to.",
        overrides: NONE,
    },
    LegendaryEntry {
        token_id: 666,
        title: "The Beast",
        story: "It was here before the fires were lit, and it will be here after.",
        overrides: NONE
            .species(Species::Werewolf)
            .realm(Realm::Inferno)
            .curse(Curse::Flames),
    },
    LegendaryEntry {
        token_id: 1000,
        title: "The Thousand-Year King",
        story: "A thousand years in the tomb and he still expects to be bowed to.",
        overrides: NONE.species(Species::Mummy).equipment(Equipment::Crown),
    },
    LegendaryEntry {
        token_id: 10_001,
        title: "The Founder's Dragon",
        story: "Hatched from the first egg ever laid in these realms, beneath a sky already falling.",
        overrides: NONE
            .species(Species::Dragon)
            .equipment(Equipment::Crown)
            .realm(Realm::Ragnarok)
            .curse(Curse::Meteor),
    },
];

/// What a token is called and how rare it is, before and after an override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub traits: ResolvedTraits,
    pub rarity: RarityTier,
    pub name: String,
    /// `None` means the description is built from trait names.
    pub story: Option<String>,
}

/// Sparse, validated map from token ID to override.
#[derive(Debug, Clone, Default)]
pub struct LegendaryTable {
    entries: BTreeMap<u64, LegendaryEntry>,
}

impl LegendaryTable {
    /// # Errors
    /// * [`CatalogError::MalformedLegendary`] for a blank title or story.
    /// * [`CatalogError::DuplicateLegendary`] if a token ID appears twice.
    pub fn new<I>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = LegendaryEntry>,
    {
        let mut map = BTreeMap::new();
        for entry in entries {
            if entry.title.trim().is_empty() {
                return Err(CatalogError::MalformedLegendary {
                    token_id: entry.token_id,
                    field: "title",
                });
            }
            if entry.story.trim().is_empty() {
                return Err(CatalogError::MalformedLegendary {
                    token_id: entry.token_id,
                    field: "story",
                });
            }
            if map.insert(entry.token_id, entry).is_some() {
                return Err(CatalogError::DuplicateLegendary {
                    token_id: entry.token_id,
                });
            }
        }
        Ok(Self { entries: map })
    }

    pub fn standard() -> Result<Self, CatalogError> {
        Self::new(LEGENDARIES.iter().copied())
    }

    pub fn get(&self, token: TokenId) -> Option<&LegendaryEntry> {
        self.entries.get(&token.get())
    }

    /// Pass `p` through, or replace it with the override for `token`.
    pub fn apply(&self, token: TokenId, p: Presentation) -> Presentation {
        match self.get(token) {
            Some(entry) => Presentation {
                traits: entry.overrides.apply(p.traits),
                rarity: RarityTier::TOP,
                name: format!("{} #{}", entry.title, token),
                story: Some(entry.story.to_owned()),
            },
            None => p,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LegendaryEntry> {
        self.entries.values()
    }
}
