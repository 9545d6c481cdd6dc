//! # monstergen
//!
//! Deterministic trait, synergy and rarity resolution for generative pixel
//! monsters.
//!
//! A token ID is the only input. From it the crate draws four traits
//! (species, equipment, realm, curse) with a seeded trigonometric hash, checks
//! them against a catalog of named synergies, classifies rarity, applies any
//! hand-authored legendary override, and assembles NFT-style metadata JSON.
//! The same ID always produces the same output, on any machine, forever.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use monstergen::{Catalog, Generator, MemoryAssets, SvgRenderer, TokenId};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::standard()?;
//! let renderer = SvgRenderer::new(MemoryAssets::new() /* .with(...) */);
//! let generator = Generator::new(catalog, renderer);
//!
//! let token: TokenId = "4242".parse()?;
//! let meta = generator.generate(token)?;
//! println!("{}", meta.to_json(true)?);
//! # Ok(()) }
//! ```
//!
//! ## Pipeline
//! 1. [`AxisTables::resolve`]: one seeded draw per axis, at frozen offsets.
//! 2. [`Catalog::resolve_synergy`]: equipment transforms are tried first and
//!    only kept when they complete a synergy; quad beats trinity beats dual,
//!    and two duals combine.
//! 3. [`RarityClassifier::classify`]: a weighted seeded roll, raised to the
//!    floor implied by the synergy.
//! 4. [`LegendaryTable::apply`]: fixed title, story and top rarity for a
//!    handful of IDs.
//! 5. [`Generator::generate`]: renders the image through a [`Renderer`] and
//!    assembles the attribute list.
//!
//! ## Tables
//! All catalogs are validated when built: synergy rules must pin as many
//! axes as their tier says and no trait tuple may be ambiguous (checked over
//! all 10^4 tuples). After that they are read-only and can be shared freely
//! between threads.
//!
//! ## Weighted enums
//! Rarity uses the same alias-method tables for its base roll that the
//! [`WeightedEnum`] derive builds for any enum:
//!
//! ```rust,ignore
//! #[derive(Copy, Clone, Debug, WeightedEnum)]
//! enum Loot {
//!     #[probability(60/100)] Common,
//!     #[probability(40/100)] Rare,
//! }
//! let table = Loot::droptable()?;
//! let seeded = table.seeded(seed, 9);      // reproducible
//! let random = table.sample(&mut rng);     // rand::Rng
//! ```

extern crate self as monstergen;

mod axis;
mod catalog;
mod config;
mod error;
mod legendary;
mod metadata;
mod rarity;
mod render;
mod sampler;
pub mod selector;
mod synergy;
mod token;
mod traits;
mod transform;
mod walker;

/// A minimal interface for “index samplers”.
/// Implemented by `WeightedSampler` (weighted) and `UniformSampler` (equal odds).
#[allow(clippy::len_without_is_empty)]
pub trait IndexSampler {
    fn len(&self) -> usize;
    fn sample_index<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> usize;
    /// Reproducible draw from the seeded selector.
    fn seeded_index(&self, seed: i64, offset: u32) -> usize;
}

pub use axis::{AttributeEntry, AxisTable, AxisValue, TraitAxis};
pub use catalog::{Catalog, Resolution};
pub use config::{ConfigError, GeneratorConfig};
pub use error::{CatalogError, GenerateError, WeightError};
pub use legendary::{AxisOverrides, LEGENDARIES, LegendaryEntry, LegendaryTable, Presentation};
pub use metadata::{Attribute, Generator, Metadata, trait_type};
pub use rarity::{RarityClassifier, RarityTier};
pub use render::{
    AssetSource, DirAssets, MemoryAssets, RenderError, RenderRequest, Renderer, SvgRenderer,
    svg_data_uri,
};
pub use sampler::UniformSampler;
pub use synergy::{
    CATALOG_VERSION, Pattern, RULES, SynergyCatalog, SynergyKind, SynergyMatch, SynergyRule,
    SynergyTier,
};
pub use token::TokenId;
pub use traits::{AxisTables, Curse, Equipment, Realm, ResolvedTraits, Species};
pub use transform::{EquipmentTransform, TRANSFORMS, TransformTable};
pub use walker::WeightedSampler;

use rand::Rng;

/// A generic “drop table”: associates items with weights and samples them
/// using an internal [`WeightedSampler`].
///
/// Build it from any iterator of `(item, weight)` where `weight >= 0`.
#[derive(Debug, Clone)]
pub struct DropTable<T> {
    alias: WeightedSampler,
    items: Vec<T>,
}

/// Derive macros imported from `monstergen_macros`.
pub use monstergen_macros::{TraitAxis, WeightedEnum};

/// Trait implemented by the `WeightedEnum` derive macro.
///
/// Each variant and its weight is exposed via [`WeightedEnum::ENTRIES`],
/// which enables building a ready-to-sample [`DropTable`].
pub trait WeightedEnum: Sized + 'static {
    /// All `(variant, weight)` pairs for the enum.
    const ENTRIES: &'static [(Self, f64)];

    /// Convenience constructor that builds a [`DropTable`] from the enum entries.
    ///
    /// # Errors
    /// See [`WeightedSampler::new`] and [`WeightError`]: zero length, negative weight,
    /// non-finite or zero total weight will error.
    fn droptable() -> Result<DropTable<Self>, WeightError>
    where
        Self: Copy,
    {
        DropTable::from_pairs(Self::ENTRIES.iter().copied())
    }
}

impl<T> DropTable<T> {
    /// Build from any `(item, weight)` iterator.
    ///
    /// # Errors
    /// * [`WeightError::Empty`] if there are no items.
    /// * [`WeightError::Negative`] if any weight is negative.
    /// * [`WeightError::ZeroSum`] if the sum of weights is zero or not finite.
    ///
    /// # Complexity
    /// O(n) time / O(n) space.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, WeightError>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        let mut items = Vec::new();
        let mut weights = Vec::new();
        for (t, w) in pairs {
            items.push(t);
            weights.push(w);
        }
        let alias = WeightedSampler::new(&weights)?;
        Ok(Self { alias, items })
    }

    /// Sample an item **by reference** (no `Clone` bound).
    pub fn sample<'a, R: Rng + ?Sized>(&'a self, rng: &mut R) -> &'a T {
        let idx = self.alias.sample_index(rng);
        &self.items[idx]
    }

    /// Reproducible pick for `(seed, offset)`; consumes offsets `offset` and
    /// `offset + 1`.
    pub fn seeded(&self, seed: i64, offset: u32) -> &T {
        &self.items[self.alias.seeded_index(seed, offset)]
    }

    /// Number of items in the table.
    pub fn len(&self) -> usize {
        self.alias.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.alias.is_empty()
    }
}
