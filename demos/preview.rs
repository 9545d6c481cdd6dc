//! Print metadata JSON for token IDs, rendering art from an asset directory.
//!
//! ```text
//! cargo run --example preview -- [--config monstergen.toml] [ID ...]
//! ```
//!
//! With no IDs, five random trait combinations are drawn and checked against
//! the synergy catalog instead.

use monstergen::{Catalog, DirAssets, Generator, GeneratorConfig, RarityTier, SvgRenderer, TokenId};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1).peekable();
    let config = if args.peek().map(String::as_str) == Some("--config") {
        args.next();
        let path = args.next().ok_or("--config needs a path")?;
        GeneratorConfig::load(path)?
    } else {
        GeneratorConfig::default()
    };

    let tokens = args
        .map(|a| a.parse::<TokenId>())
        .collect::<Result<Vec<_>, _>>()?;
    if tokens.is_empty() {
        let catalog = Catalog::standard()?;
        let mut rng = rand::rng();
        for _ in 0..5 {
            let traits = catalog.axes.sample(&mut rng);
            let (shown, synergy) = catalog.resolve_synergy(&traits);
            match synergy {
                Some(m) => println!(
                    "{traits} (shows {shown}): {} `{}`, at least {}",
                    m.kind(),
                    m.title(),
                    RarityTier::floor_for(m.kind())
                ),
                None => println!("{traits}: no synergy"),
            }
        }
        return Ok(());
    }

    let assets = DirAssets::new(config.asset_dir.clone().unwrap_or_else(|| "assets".into()));
    let renderer = SvgRenderer::new(assets).with_size(config.image_size);
    let generator = Generator::new(Catalog::standard()?, renderer).with_config(config);

    for (token, result) in tokens.iter().zip(generator.generate_many(&tokens)) {
        match result {
            Ok(meta) => println!("{}", meta.to_json(generator.config().pretty_json)?),
            Err(e) => {
                // Show what would have been drawn even without art on disk.
                let r = generator.resolve(*token);
                eprintln!("#{token}: {e} ({} / {})", r.name, r.rarity);
            }
        }
    }
    Ok(())
}
