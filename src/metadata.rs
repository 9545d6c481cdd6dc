//! Token metadata in the common NFT JSON shape, and the generator that
//! produces it.

use base64::Engine;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::axis::AxisValue;
use crate::catalog::{Catalog, Resolution};
use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::render::{RenderRequest, Renderer};
use crate::token::TokenId;

/// `trait_type` strings. Indexers match on these exactly.
pub mod trait_type {
    pub const SPECIES: &str = "Species";
    pub const EQUIPMENT: &str = "Equipment";
    /// Carries the original (stored) item; `EQUIPMENT` shows the transformed one.
    pub const TRANSFORMED_EQUIPMENT: &str = "Transformed Equipment";
    pub const REALM: &str = "Realm";
    pub const CURSE: &str = "Curse";
    pub const RARITY: &str = "Rarity";
    pub const SYNERGY_TYPE: &str = "Synergy Type";
    pub const SYNERGY: &str = "Synergy";
    pub const LEGENDARY_ID: &str = "Legendary ID";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: String,
}

impl Attribute {
    fn new(trait_type: &str, value: impl Into<String>) -> Self {
        Self {
            trait_type: trait_type.to_owned(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub name: String,
    pub description: String,
    pub image: String,
    pub external_url: String,
    pub attributes: Vec<Attribute>,
}

impl Metadata {
    /// Build the attribute list for a resolved token.
    ///
    /// Always: Species, Equipment (as displayed), Realm, Curse, Rarity.
    /// When present: Transformed Equipment (the stored item), Synergy Type and
    /// Synergy, Legendary ID.
    pub fn assemble(resolution: &Resolution<'_>, image: String, external_url: String) -> Self {
        let traits = &resolution.traits;
        let mut attributes = Vec::with_capacity(9);

        attributes.push(Attribute::new(trait_type::SPECIES, traits.species.display_name()));
        attributes.push(Attribute::new(
            trait_type::EQUIPMENT,
            resolution.displayed_equipment.display_name(),
        ));
        if resolution.is_transformed() {
            attributes.push(Attribute::new(
                trait_type::TRANSFORMED_EQUIPMENT,
                traits.equipment.display_name(),
            ));
        }
        attributes.push(Attribute::new(trait_type::REALM, traits.realm.display_name()));
        attributes.push(Attribute::new(trait_type::CURSE, traits.curse.display_name()));
        attributes.push(Attribute::new(trait_type::RARITY, resolution.rarity.name()));
        if let Some(m) = &resolution.synergy {
            attributes.push(Attribute::new(trait_type::SYNERGY_TYPE, m.kind().tag()));
            attributes.push(Attribute::new(trait_type::SYNERGY, m.title()));
        }
        if resolution.legendary.is_some() {
            attributes.push(Attribute::new(trait_type::LEGENDARY_ID, "True"));
        }

        Self {
            name: resolution.name.clone(),
            description: resolution.description(),
            image,
            external_url,
            attributes,
        }
    }

    /// Value of the first attribute with this `trait_type`.
    pub fn attribute(&self, trait_type: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.trait_type == trait_type)
            .map(|a| a.value.as_str())
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }

    /// `data:application/json;base64,...`, as returned by an on-chain `tokenURI`.
    pub fn token_uri(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(self)?;
        Ok(format!(
            "data:application/json;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(json.as_bytes())
        ))
    }
}

/// Resolves tokens against a [`Catalog`] and renders them with `R`.
///
/// Holds no mutable state; share it across threads freely.
#[derive(Debug, Clone)]
pub struct Generator<R> {
    catalog: Catalog,
    renderer: R,
    config: GeneratorConfig,
}

impl<R: Renderer> Generator<R> {
    pub fn new(catalog: Catalog, renderer: R) -> Self {
        Self {
            catalog,
            renderer,
            config: GeneratorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn resolve(&self, token: TokenId) -> Resolution<'_> {
        self.catalog.resolve(token)
    }

    /// Full metadata for `token`.
    ///
    /// # Errors
    /// [`GenerateError::RenderingUnavailable`] if the renderer fails. No
    /// placeholder image is ever substituted.
    pub fn generate(&self, token: TokenId) -> Result<Metadata, GenerateError> {
        let resolution = self.catalog.resolve(token);
        let request = RenderRequest {
            token,
            species: resolution.traits.species.entry(),
            equipment: resolution.equipment_entry(),
            realm: resolution.traits.realm.entry(),
            curse: resolution.traits.curse.entry(),
        };
        let image = self
            .renderer
            .render(&request)
            .map_err(|source| GenerateError::RenderingUnavailable {
                token_id: token.get(),
                source,
            })?;
        Ok(Metadata::assemble(
            &resolution,
            image,
            self.config.external_url(token),
        ))
    }

    /// Metadata JSON for `token`, formatted per config.
    pub fn generate_json(&self, token: TokenId) -> Result<String, GenerateError> {
        Ok(self.generate(token)?.to_json(self.config.pretty_json)?)
    }

    /// Generate many tokens in parallel. Results keep the input order.
    pub fn generate_many(&self, tokens: &[TokenId]) -> Vec<Result<Metadata, GenerateError>> {
        tokens.par_iter().map(|&t| self.generate(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderError;
    use crate::traits::{Curse, Equipment, Realm, ResolvedTraits, Species};

    struct FixedImage;

    impl Renderer for FixedImage {
        fn render(&self, request: &RenderRequest) -> Result<String, RenderError> {
            Ok(format!("data:test,{}", request.equipment.display_name))
        }
    }

    struct Broken;

    impl Renderer for Broken {
        fn render(&self, request: &RenderRequest) -> Result<String, RenderError> {
            Err(RenderError::MissingAsset {
                asset_ref: request.species.asset_ref.to_owned(),
            })
        }
    }

    fn generator() -> Generator<FixedImage> {
        Generator::new(Catalog::standard().unwrap(), FixedImage)
    }

    fn id(n: u64) -> TokenId {
        TokenId::new(n).unwrap()
    }

    fn types(m: &Metadata) -> Vec<&str> {
        m.attributes.iter().map(|a| a.trait_type.as_str()).collect()
    }

    /// First token in `range` whose seeded traits satisfy `pred`.
    fn find_token(g: &Generator<FixedImage>, pred: impl Fn(&ResolvedTraits) -> bool) -> TokenId {
        (2..200_000)
            .map(id)
            .find(|&t| g.catalog().legendaries.get(t).is_none() && pred(&g.resolve(t).seeded))
            .expect("no token with the requested traits")
    }

    #[test]
    fn plain_token_has_base_attributes_only() {
        let g = generator();
        let t = (2..10_000)
            .map(id)
            .find(|&t| {
                let r = g.resolve(t);
                r.synergy.is_none() && r.legendary.is_none()
            })
            .unwrap();
        let m = g.generate(t).unwrap();
        assert_eq!(
            types(&m),
            ["Species", "Equipment", "Realm", "Curse", "Rarity"]
        );
        assert_eq!(m.external_url, format!("https://example.com/token/{t}"));
        assert!(m.name.ends_with(&format!(" #{t}")));
    }

    #[test]
    fn synergy_token_lists_synergy() {
        let g = generator();
        let t = find_token(&g, |s| {
            s.species == Species::Goblin
                && s.equipment == Equipment::Sword
                && s.realm == Realm::Frost
                && s.curse == Curse::Blizzard
        });
        let m = g.generate(t).unwrap();
        assert_eq!(m.attribute("Synergy Type"), Some("dual-combo"));
        assert_eq!(m.attribute("Synergy"), Some("Goblin Raider & Deep Freeze"));
        assert_eq!(m.attribute("Rarity"), Some("Legendary"));
        assert_eq!(m.name, format!("Goblin Raider & Deep Freeze #{t}"));
    }

    #[test]
    fn transformed_equipment_is_reported() {
        let g = generator();
        let t = find_token(&g, |s| {
            s.species == Species::Skeleton && s.equipment == Equipment::Bone && s.realm == Realm::Crypt
        });
        let m = g.generate(t).unwrap();
        assert_eq!(m.attribute("Equipment"), Some("Bone Arm"));
        assert_eq!(m.attribute("Transformed Equipment"), Some("Bone"));
        assert_eq!(m.attribute("Synergy"), Some("Bone Collector"));
        assert_eq!(m.image, "data:test,Bone Arm");
        assert_eq!(types(&m)[2], "Transformed Equipment");
    }

    #[test]
    fn untransformed_when_no_synergy() {
        let g = generator();
        let t = find_token(&g, |s| {
            s.species == Species::HeadlessKnight
                && s.equipment == Equipment::Lantern
                && g.catalog()
                    .synergies
                    .resolve(&s.with_equipment(Equipment::SeveredHead))
                    .is_none()
        });
        let m = g.generate(t).unwrap();
        assert_eq!(m.attribute("Equipment"), Some("Lantern"));
        assert_eq!(m.attribute("Transformed Equipment"), None);
    }

    #[test]
    fn legendary_token() {
        let g = generator();
        let m = g.generate(id(13)).unwrap();
        assert_eq!(m.name, "The Unlucky One #13");
        assert_eq!(m.attribute("Rarity"), Some("Mythic"));
        assert_eq!(m.attribute("Legendary ID"), Some("True"));
        assert_eq!(types(&m).last(), Some(&"Legendary ID"));
    }

    #[test]
    fn render_failure_is_typed() {
        let g = Generator::new(Catalog::standard().unwrap(), Broken);
        let err = g.generate(id(5)).unwrap_err();
        assert!(matches!(err, GenerateError::RenderingUnavailable { token_id: 5, .. }));
    }

    #[test]
    fn json_shape_and_token_uri() {
        let g = generator();
        let m = g.generate(id(42)).unwrap();
        let v: serde_json::Value = serde_json::from_str(&m.to_json(false).unwrap()).unwrap();
        for key in ["name", "description", "image", "external_url", "attributes"] {
            assert!(v.get(key).is_some(), "missing {key}");
        }
        assert!(v["attributes"][0].get("trait_type").is_some());

        let uri = m.token_uri().unwrap();
        let b64 = uri.strip_prefix("data:application/json;base64,").unwrap();
        let bytes = base64::engine::general_purpose::STANDARD.decode(b64).unwrap();
        let back: Metadata = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn batch_matches_sequential() {
        let g = generator();
        let tokens: Vec<_> = (0..64).map(id).collect();
        let batch = g.generate_many(&tokens);
        for (t, got) in tokens.iter().zip(batch) {
            assert_eq!(got.unwrap(), g.generate(*t).unwrap());
        }
    }

    #[test]
    fn config_controls_url_and_format() {
        let config = GeneratorConfig {
            external_url_base: "ipfs://meta/".into(),
            pretty_json: false,
            ..GeneratorConfig::default()
        };
        let g = generator().with_config(config);
        let json = g.generate_json(id(8)).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"external_url\":\"ipfs://meta/8\""));
    }
}
