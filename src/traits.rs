//! The four attribute tables and the seeded trait bundle drawn from them.

use std::fmt;

use monstergen_macros::TraitAxis;

use crate::axis::{AxisTable, AxisValue};
use crate::error::WeightError;
use crate::sampler::UniformSampler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TraitAxis)]
#[axis(Species)]
pub enum Species {
    #[entry(name = "Skeleton", asset = "monsters/skeleton.svg")]
    Skeleton,
    #[entry(name = "Zombie", asset = "monsters/zombie.svg")]
    Zombie,
    #[entry(name = "Vampire", asset = "monsters/vampire.svg")]
    Vampire,
    #[entry(name = "Werewolf", asset = "monsters/werewolf.svg")]
    Werewolf,
    #[entry(name = "Mummy", asset = "monsters/mummy.svg")]
    Mummy,
    #[entry(name = "Goblin", asset = "monsters/goblin.svg")]
    Goblin,
    #[entry(name = "Ghost", asset = "monsters/ghost.svg")]
    Ghost,
    #[entry(name = "Dragon", asset = "monsters/dragon.svg")]
    Dragon,
    #[entry(name = "Witch", asset = "monsters/witch.svg")]
    Witch,
    #[entry(name = "Headless Knight", asset = "monsters/headless_knight.svg")]
    HeadlessKnight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TraitAxis)]
#[axis(Equipment)]
pub enum Equipment {
    #[entry(name = "Sword", asset = "items/sword.svg")]
    Sword,
    #[entry(name = "Crown", asset = "items/crown.svg")]
    Crown,
    #[entry(name = "Wine", asset = "items/wine.svg")]
    Wine,
    #[entry(name = "Scythe", asset = "items/scythe.svg")]
    Scythe,
    #[entry(name = "Lantern", asset = "items/lantern.svg")]
    Lantern,
    #[entry(name = "Spellbook", asset = "items/spellbook.svg")]
    Spellbook,
    #[entry(name = "Bone", asset = "items/bone.svg")]
    Bone,
    // Head and Arm variants; only reachable as a seeded draw or via a transform.
    #[entry(name = "Severed Head", asset = "items/severed_head.svg")]
    SeveredHead,
    #[entry(name = "Bone Arm", asset = "items/bone_arm.svg")]
    BoneArm,
    #[entry(name = "Chains", asset = "items/chains.svg")]
    Chains,
}

/// Realms are color schemes; each asset is an SVG filter fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TraitAxis)]
#[axis(Realm)]
pub enum Realm {
    #[entry(name = "Shadow", asset = "realms/shadow.svg")]
    Shadow,
    #[entry(name = "Frost", asset = "realms/frost.svg")]
    Frost,
    #[entry(name = "Inferno", asset = "realms/inferno.svg")]
    Inferno,
    #[entry(name = "Decay", asset = "realms/decay.svg")]
    Decay,
    #[entry(name = "Abyss", asset = "realms/abyss.svg")]
    Abyss,
    #[entry(name = "Ragnarok", asset = "realms/ragnarok.svg")]
    Ragnarok,
    #[entry(name = "Swamp", asset = "realms/swamp.svg")]
    Swamp,
    #[entry(name = "Crypt", asset = "realms/crypt.svg")]
    Crypt,
    #[entry(name = "Eclipse", asset = "realms/eclipse.svg")]
    Eclipse,
    #[entry(name = "Bloodmoon", asset = "realms/bloodmoon.svg")]
    Bloodmoon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TraitAxis)]
#[axis(Curse)]
pub enum Curse {
    #[entry(name = "Bats", asset = "curses/bats.svg")]
    Bats,
    #[entry(name = "Blizzard", asset = "curses/blizzard.svg")]
    Blizzard,
    #[entry(name = "Lightning", asset = "curses/lightning.svg")]
    Lightning,
    #[entry(name = "Meteor", asset = "curses/meteor.svg")]
    Meteor,
    #[entry(name = "Plague", asset = "curses/plague.svg")]
    Plague,
    #[entry(name = "Flames", asset = "curses/flames.svg")]
    Flames,
    #[entry(name = "Fog", asset = "curses/fog.svg")]
    Fog,
    #[entry(name = "Spirits", asset = "curses/spirits.svg")]
    Spirits,
    #[entry(name = "Ravens", asset = "curses/ravens.svg")]
    Ravens,
    #[entry(name = "Runes", asset = "curses/runes.svg")]
    Runes,
}

/// One value per axis, as drawn for a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedTraits {
    pub species: Species,
    pub equipment: Equipment,
    pub realm: Realm,
    pub curse: Curse,
}

impl ResolvedTraits {
    pub const fn new(species: Species, equipment: Equipment, realm: Realm, curse: Curse) -> Self {
        Self {
            species,
            equipment,
            realm,
            curse,
        }
    }

    pub const fn with_equipment(self, equipment: Equipment) -> Self {
        Self { equipment, ..self }
    }

    /// Ordinals in axis order: species, equipment, realm, curse.
    pub fn ordinals(&self) -> [u8; 4] {
        [
            self.species.ordinal(),
            self.equipment.ordinal(),
            self.realm.ordinal(),
            self.curse.ordinal(),
        ]
    }

    /// Every combination of the four axes (10^4 tuples), in ordinal order.
    pub fn all() -> impl Iterator<Item = ResolvedTraits> {
        Species::ENTRIES.iter().flat_map(|s| {
            Equipment::ENTRIES.iter().flat_map(move |e| {
                Realm::ENTRIES.iter().flat_map(move |r| {
                    Curse::ENTRIES
                        .iter()
                        .map(move |c| ResolvedTraits::new(s.value, e.value, r.value, c.value))
                })
            })
        })
    }
}

impl fmt::Display for ResolvedTraits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.species, self.equipment, self.realm, self.curse
        )
    }
}

/// The four seeded attribute tables, built once and shared.
#[derive(Debug, Clone, Copy)]
pub struct AxisTables {
    pub species: AxisTable<UniformSampler, Species>,
    pub equipment: AxisTable<UniformSampler, Equipment>,
    pub realm: AxisTable<UniformSampler, Realm>,
    pub curse: AxisTable<UniformSampler, Curse>,
}

impl AxisTables {
    pub fn new() -> Result<Self, WeightError> {
        Ok(Self {
            species: Species::table()?,
            equipment: Equipment::table()?,
            realm: Realm::table()?,
            curse: Curse::table()?,
        })
    }

    /// Draw every axis from `seed` with its frozen offset.
    pub fn resolve(&self, seed: i64) -> ResolvedTraits {
        ResolvedTraits {
            species: self.species.select(seed).value,
            equipment: self.equipment.select(seed).value,
            realm: self.realm.select(seed).value,
            curse: self.curse.select(seed).value,
        }
    }

    /// Unseeded draw, for previews.
    pub fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> ResolvedTraits {
        ResolvedTraits {
            species: self.species.sample(rng).value,
            equipment: self.equipment.sample(rng).value,
            realm: self.realm.sample(rng).value,
            curse: self.curse.sample(rng).value,
        }
    }
}
