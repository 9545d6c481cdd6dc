use monstergen::{Catalog, RarityTier, SynergyKind, TokenId};
use std::collections::HashMap;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::standard()?;
    let mut rarity_hist: HashMap<RarityTier, u64> = HashMap::default();
    let mut synergy_hist: HashMap<SynergyKind, u64> = HashMap::default();

    let amt = 100_000u64;
    for id in 0..amt {
        let r = catalog.resolve(TokenId::new(id)?);
        *rarity_hist.entry(r.rarity).or_default() += 1;
        if let Some(m) = r.synergy {
            *synergy_hist.entry(m.kind()).or_default() += 1;
        }
        if r.rarity == RarityTier::Mythic {
            println!("{:>7} {}", id, r.name);
        }
    }

    println!("\nRarity ({amt} tokens):");
    let mut v: Vec<_> = rarity_hist.into_iter().collect();
    v.sort_by_key(|&(tier, _)| std::cmp::Reverse(tier));
    for (tier, c) in v {
        println!("{c:>7} {tier}");
    }

    println!("\nSynergies:");
    let mut v: Vec<_> = synergy_hist.into_iter().collect();
    v.sort_by(|a, b| b.1.cmp(&a.1));
    for (kind, c) in v {
        println!("{c:>7} {kind}");
    }

    Ok(())
}
