use crate::axis::{AttributeEntry, AxisValue};
use crate::error::CatalogError;
use crate::legendary::{LegendaryEntry, LegendaryTable, Presentation};
use crate::rarity::{RarityClassifier, RarityTier};
use crate::synergy::{SynergyCatalog, SynergyMatch};
use crate::token::TokenId;
use crate::traits::{AxisTables, Equipment, ResolvedTraits};
use crate::transform::TransformTable;

/// Every static table the resolver needs, validated once and read-only after.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub axes: AxisTables,
    pub transforms: TransformTable,
    pub synergies: SynergyCatalog,
    pub rarity: RarityClassifier,
    pub legendaries: LegendaryTable,
}

/// Everything known about a token before rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'a> {
    pub token: TokenId,
    /// Straight from the selector.
    pub seeded: ResolvedTraits,
    /// After legendary overrides. `equipment` is the stored form.
    pub traits: ResolvedTraits,
    /// Equipment as shown; differs from `traits.equipment` when transformed.
    pub displayed_equipment: Equipment,
    pub synergy: Option<SynergyMatch<'a>>,
    pub rarity: RarityTier,
    pub legendary: Option<&'a LegendaryEntry>,
    pub name: String,
    pub story: Option<String>,
}

impl Resolution<'_> {
    pub fn is_transformed(&self) -> bool {
        self.displayed_equipment != self.traits.equipment
    }

    pub fn equipment_entry(&self) -> &'static AttributeEntry<Equipment> {
        self.displayed_equipment.entry()
    }

    /// The story if there is one, otherwise a sentence built from trait names.
    pub fn description(&self) -> String {
        match &self.story {
            Some(story) => story.clone(),
            None => format!(
                "A {} from the {} realm, bearing the {} and the curse of {}.",
                self.traits.species, self.traits.realm, self.displayed_equipment, self.traits.curse
            ),
        }
    }
}

impl Catalog {
    pub fn new(
        axes: AxisTables,
        transforms: TransformTable,
        synergies: SynergyCatalog,
        rarity: RarityClassifier,
        legendaries: LegendaryTable,
    ) -> Self {
        Self {
            axes,
            transforms,
            synergies,
            rarity,
            legendaries,
        }
    }

    /// The built-in tables.
    pub fn standard() -> Result<Self, CatalogError> {
        Ok(Self::new(
            AxisTables::new()?,
            TransformTable::standard()?,
            SynergyCatalog::standard()?,
            RarityClassifier::new()?,
            LegendaryTable::standard()?,
        ))
    }

    /// Pick the equipment to display and the synergy it yields.
    ///
    /// A transformed form is only used when it takes part in a synergy;
    /// otherwise the stored equipment is kept for both display and matching.
    pub fn resolve_synergy(&self, traits: &ResolvedTraits) -> (Equipment, Option<SynergyMatch<'_>>) {
        if let Some(to) = self.transforms.transform(traits.species, traits.equipment) {
            let trial = traits.with_equipment(to);
            if let Some(m) = self.synergies.resolve(&trial) {
                if m.pins_equipment() {
                    log::debug!(
                        "{} transformed to {} for `{}`",
                        traits.equipment,
                        to,
                        m.title()
                    );
                    return (to, Some(m));
                }
            }
        }
        (traits.equipment, self.synergies.resolve(traits))
    }

    /// Run the full pipeline for `token`, short of rendering.
    pub fn resolve(&self, token: TokenId) -> Resolution<'_> {
        let seed = token.seed();
        let seeded = self.axes.resolve(seed);
        let (displayed, synergy) = self.resolve_synergy(&seeded);
        let rarity = self.rarity.classify(seed, synergy.as_ref());

        let (name, story) = match &synergy {
            Some(m) => {
                log::debug!("token #{token} matches {} synergy `{}`", m.kind(), m.title());
                (format!("{} #{}", m.title(), token), Some(m.story().into_owned()))
            }
            None => (
                format!("{} {} #{}", seeded.realm, seeded.species, token),
                None,
            ),
        };

        let legendary = self.legendaries.get(token);
        let Some(entry) = legendary else {
            return Resolution {
                token,
                seeded,
                traits: seeded,
                displayed_equipment: displayed,
                synergy,
                rarity,
                legendary: None,
                name,
                story,
            };
        };

        let p = self.legendaries.apply(
            token,
            Presentation {
                traits: seeded,
                rarity,
                name,
                story,
            },
        );
        log::debug!("token #{token} is legendary `{}`", entry.title);

        // Overridden axes can change which synergy holds; keep the shown
        // equipment and synergy consistent with the shown traits.
        let (displayed, synergy) = if p.traits == seeded {
            (displayed, synergy)
        } else {
            self.resolve_synergy(&p.traits)
        };

        Resolution {
            token,
            seeded,
            traits: p.traits,
            displayed_equipment: displayed,
            synergy,
            rarity: p.rarity,
            legendary: Some(entry),
            name: p.name,
            story: p.story,
        }
    }
}
