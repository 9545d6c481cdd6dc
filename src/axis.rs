use std::fmt::Debug;

use rand::Rng;

use crate::error::WeightError;
use crate::sampler::UniformSampler;
use crate::{IndexSampler, selector};

/// One of the four independent trait categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TraitAxis {
    Species,
    Equipment,
    Realm,
    Curse,
}

impl TraitAxis {
    /// The `trait_type` string used in token metadata.
    pub const fn trait_type(self) -> &'static str {
        match self {
            Self::Species => "Species",
            Self::Equipment => "Equipment",
            Self::Realm => "Realm",
            Self::Curse => "Curse",
        }
    }

    /// Selector offset for this axis. Frozen: see [`selector::offset`].
    pub const fn offset(self) -> u32 {
        match self {
            Self::Species => selector::offset::SPECIES,
            Self::Equipment => selector::offset::EQUIPMENT,
            Self::Realm => selector::offset::REALM,
            Self::Curse => selector::offset::CURSE,
        }
    }
}

/// A row in an attribute table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeEntry<T> {
    pub value: T,
    pub ordinal: u8,
    pub display_name: &'static str,
    /// Reference handed to the renderer, e.g. `monsters/dragon.svg`.
    pub asset_ref: &'static str,
}

/// Implemented by the `TraitAxis` derive macro.
///
/// `ENTRIES` is indexed by ordinal and always has exactly ten rows.
pub trait AxisValue: Copy + Eq + Debug + 'static {
    const AXIS: TraitAxis;
    const ENTRIES: &'static [AttributeEntry<Self>];

    fn ordinal(self) -> u8;

    fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ENTRIES.get(usize::from(ordinal)).map(|e| e.value)
    }

    fn entry(self) -> &'static AttributeEntry<Self> {
        &Self::ENTRIES[usize::from(self.ordinal())]
    }

    fn display_name(self) -> &'static str {
        self.entry().display_name
    }

    fn asset_ref(self) -> &'static str {
        self.entry().asset_ref
    }

    /// Zero-alloc seeded table over the variants.
    fn table() -> Result<AxisTable<UniformSampler, Self>, WeightError> {
        let sampler = UniformSampler::new(Self::ENTRIES.len())?;
        Ok(AxisTable::new(sampler, Self::AXIS.offset(), Self::ENTRIES))
    }
}

/// Attribute table backed by an **index sampler** and a **static slice** of entries.
///
/// Seeded selection always uses the table's fixed offset, so two tables over
/// the same axis agree on every seed.
#[derive(Debug, Clone, Copy)]
pub struct AxisTable<S: IndexSampler, T: 'static> {
    sampler: S,
    offset: u32,
    items: &'static [AttributeEntry<T>],
}

impl<S: IndexSampler, T> AxisTable<S, T> {
    pub const fn new(sampler: S, offset: u32, items: &'static [AttributeEntry<T>]) -> Self {
        Self {
            sampler,
            offset,
            items,
        }
    }

    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.sampler.len()
    }

    /// Deterministic entry for `seed`.
    #[inline]
    pub fn select(&self, seed: i64) -> &'static AttributeEntry<T> {
        &self.items[self.sampler.seeded_index(seed, self.offset)]
    }

    /// Random entry, for previews that don't correspond to a token.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static AttributeEntry<T> {
        &self.items[self.sampler.sample_index(rng)]
    }

    #[inline]
    pub const fn entries(&self) -> &'static [AttributeEntry<T>] {
        self.items
    }
}
