//! Image composition.
//!
//! The generator hands a [`Renderer`] the resolved attribute entries and gets
//! back an image URI. [`SvgRenderer`] layers SVG fragments loaded from an
//! [`AssetSource`]; any other compositor can be plugged in instead.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::Engine;
use thiserror::Error;

use crate::axis::AttributeEntry;
use crate::token::TokenId;
use crate::traits::{Curse, Equipment, Realm, Species};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    #[error("asset `{asset_ref}` not found")]
    MissingAsset { asset_ref: String },
    #[error("failed to read asset `{asset_ref}`")]
    Io {
        asset_ref: String,
        #[source]
        source: io::Error,
    },
    #[error("asset reference `{asset_ref}` escapes the asset root")]
    UnsafePath { asset_ref: String },
}

/// Entries to draw for one token. Equipment is the displayed form.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest {
    pub token: TokenId,
    pub species: &'static AttributeEntry<Species>,
    pub equipment: &'static AttributeEntry<Equipment>,
    pub realm: &'static AttributeEntry<Realm>,
    pub curse: &'static AttributeEntry<Curse>,
}

pub trait Renderer: Send + Sync {
    /// Produce an image URI for `request`.
    fn render(&self, request: &RenderRequest) -> Result<String, RenderError>;
}

/// Where SVG fragments come from.
pub trait AssetSource: Send + Sync {
    fn load(&self, asset_ref: &str) -> Result<String, RenderError>;
}

/// In-memory fragments keyed by asset reference.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    assets: HashMap<String, String>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, asset_ref: impl Into<String>, svg: impl Into<String>) {
        self.assets.insert(asset_ref.into(), svg.into());
    }

    pub fn with(mut self, asset_ref: impl Into<String>, svg: impl Into<String>) -> Self {
        self.insert(asset_ref, svg);
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryAssets {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            assets: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl AssetSource for MemoryAssets {
    fn load(&self, asset_ref: &str) -> Result<String, RenderError> {
        self.assets
            .get(asset_ref)
            .cloned()
            .ok_or_else(|| RenderError::MissingAsset {
                asset_ref: asset_ref.to_owned(),
            })
    }
}

/// Fragments read from files under a root directory.
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirAssets {
    fn load(&self, asset_ref: &str) -> Result<String, RenderError> {
        let rel = Path::new(asset_ref);
        if rel.is_absolute()
            || rel
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(RenderError::UnsafePath {
                asset_ref: asset_ref.to_owned(),
            });
        }
        fs::read_to_string(self.root.join(rel)).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                RenderError::MissingAsset {
                    asset_ref: asset_ref.to_owned(),
                }
            } else {
                RenderError::Io {
                    asset_ref: asset_ref.to_owned(),
                    source,
                }
            }
        })
    }
}

/// Layers monster, item and curse fragments under the realm's color filter.
///
/// Realm fragments are expected to define `<filter id="realm">`.
#[derive(Debug, Clone)]
pub struct SvgRenderer<A> {
    assets: A,
    size: u32,
}

impl<A: AssetSource> SvgRenderer<A> {
    pub const DEFAULT_SIZE: u32 = 320;

    pub fn new(assets: A) -> Self {
        Self {
            assets,
            size: Self::DEFAULT_SIZE,
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// The raw SVG document, before encoding.
    pub fn compose(&self, request: &RenderRequest) -> Result<String, RenderError> {
        let realm = self.assets.load(request.realm.asset_ref)?;
        let monster = self.assets.load(request.species.asset_ref)?;
        let item = self.assets.load(request.equipment.asset_ref)?;
        let curse = self.assets.load(request.curse.asset_ref)?;
        let size = self.size;

        Ok(format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" "#,
                r#"viewBox="0 0 32 32" shape-rendering="crispEdges">"#,
                "<defs>{realm}</defs>",
                r#"<g filter="url(#realm)">{monster}{item}</g>"#,
                "{curse}</svg>"
            ),
            size = size,
            realm = realm,
            monster = monster,
            item = item,
            curse = curse,
        ))
    }
}

impl<A: AssetSource> Renderer for SvgRenderer<A> {
    fn render(&self, request: &RenderRequest) -> Result<String, RenderError> {
        let svg = self.compose(request)?;
        log::debug!("rendered token #{} ({} bytes)", request.token, svg.len());
        Ok(svg_data_uri(&svg))
    }
}

/// `data:image/svg+xml;base64,...`
pub fn svg_data_uri(svg: &str) -> String {
    format!(
        "data:image/svg+xml;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(svg.as_bytes())
    )
}
