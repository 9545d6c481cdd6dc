//! Equipment transforms: some species wear an item in an alternate form.
//!
//! A transform only takes effect when the transformed item completes a
//! synergy that pins equipment; see [`crate::catalog::Catalog::resolve_synergy`].
//! The stored equipment is never rewritten.

use crate::axis::AxisValue;
use crate::error::CatalogError;
use crate::traits::{Equipment, Species};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquipmentTransform {
    pub species: Species,
    pub from: Equipment,
    pub to: Equipment,
}

impl EquipmentTransform {
    pub const fn new(species: Species, from: Equipment, to: Equipment) -> Self {
        Self { species, from, to }
    }
}

pub const TRANSFORMS: &[EquipmentTransform] = &[
    // Head variant
    EquipmentTransform::new(Species::HeadlessKnight, Equipment::Lantern, Equipment::SeveredHead),
    // Arm variant
    EquipmentTransform::new(Species::Skeleton, Equipment::Bone, Equipment::BoneArm),
];

/// Validated lookup from `(species, equipment)` to an alternate equipment form.
#[derive(Debug, Clone)]
pub struct TransformTable {
    rules: Vec<EquipmentTransform>,
}

impl TransformTable {
    /// # Errors
    /// * [`CatalogError::IdentityTransform`] if a rule maps an item onto itself.
    /// * [`CatalogError::DuplicateTransform`] if two rules share a key.
    pub fn new<I>(rules: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = EquipmentTransform>,
    {
        let mut out: Vec<EquipmentTransform> = Vec::new();
        for rule in rules {
            if rule.from == rule.to {
                return Err(CatalogError::IdentityTransform {
                    species: rule.species.display_name(),
                    equipment: rule.from.display_name(),
                });
            }
            if out
                .iter()
                .any(|r| r.species == rule.species && r.from == rule.from)
            {
                return Err(CatalogError::DuplicateTransform {
                    species: rule.species.display_name(),
                    equipment: rule.from.display_name(),
                });
            }
            out.push(rule);
        }
        Ok(Self { rules: out })
    }

    pub fn standard() -> Result<Self, CatalogError> {
        Self::new(TRANSFORMS.iter().copied())
    }

    /// The alternate form of `equipment` when held by `species`, if any.
    pub fn transform(&self, species: Species, equipment: Equipment) -> Option<Equipment> {
        self.rules
            .iter()
            .find(|r| r.species == species && r.from == equipment)
            .map(|r| r.to)
    }

    pub fn rules(&self) -> &[EquipmentTransform] {
        &self.rules
    }
}
