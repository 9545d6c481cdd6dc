use monstergen::{
    AxisValue, Catalog, Curse, Equipment, GenerateError, Generator, Metadata, RarityTier, Realm,
    RenderError, RenderRequest, Renderer, ResolvedTraits, Species, SynergyKind, TokenId,
    trait_type,
};
use proptest::prelude::*;
use std::sync::OnceLock;

/// Stand-in for the image compositor: deterministic, no I/O.
struct EchoRenderer;

impl Renderer for EchoRenderer {
    fn render(&self, r: &RenderRequest) -> Result<String, RenderError> {
        Ok(format!(
            "data:test,{}+{}+{}+{}",
            r.species.ordinal, r.equipment.ordinal, r.realm.ordinal, r.curse.ordinal
        ))
    }
}

fn fresh() -> Generator<EchoRenderer> {
    Generator::new(Catalog::standard().unwrap(), EchoRenderer)
}

fn generator() -> &'static Generator<EchoRenderer> {
    static SHARED: OnceLock<Generator<EchoRenderer>> = OnceLock::new();
    SHARED.get_or_init(fresh)
}

fn token() -> impl Strategy<Value = TokenId> {
    (0..=TokenId::MAX).prop_map(|n| TokenId::new(n).unwrap())
}

fn traits() -> impl Strategy<Value = ResolvedTraits> {
    (0u8..10, 0u8..10, 0u8..10, 0u8..10).prop_map(|(s, e, r, c)| {
        ResolvedTraits::new(
            Species::from_ordinal(s).unwrap(),
            Equipment::from_ordinal(e).unwrap(),
            Realm::from_ordinal(r).unwrap(),
            Curse::from_ordinal(c).unwrap(),
        )
    })
}

fn tier_of(m: &Metadata) -> RarityTier {
    match m.attribute(trait_type::RARITY).unwrap() {
        "Common" => RarityTier::Common,
        "Uncommon" => RarityTier::Uncommon,
        "Rare" => RarityTier::Rare,
        "Epic" => RarityTier::Epic,
        "Legendary" => RarityTier::Legendary,
        "Mythic" => RarityTier::Mythic,
        other => panic!("unknown rarity {other}"),
    }
}

proptest! {
    #[test]
    fn generation_is_deterministic(t in token()) {
        let g = generator();
        let a = g.generate(t).unwrap().to_json(false).unwrap();
        let b = g.generate(t).unwrap().to_json(false).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn attribute_order_is_stable(t in token()) {
        let m = generator().generate(t).unwrap();
        let kinds: Vec<&str> = m.attributes.iter().map(|a| a.trait_type.as_str()).collect();
        prop_assert_eq!(kinds[0], trait_type::SPECIES);
        prop_assert_eq!(kinds[1], trait_type::EQUIPMENT);
        let rest: Vec<&str> = kinds[2..]
            .iter()
            .copied()
            .filter(|k| *k != trait_type::TRANSFORMED_EQUIPMENT)
            .collect();
        prop_assert_eq!(&rest[..3], &[trait_type::REALM, trait_type::CURSE, trait_type::RARITY][..]);
        prop_assert_eq!(
            m.attribute(trait_type::SYNERGY).is_some(),
            m.attribute(trait_type::SYNERGY_TYPE).is_some()
        );
    }

    #[test]
    fn synergy_floor_holds(t in token()) {
        let g = generator();
        let r = g.resolve(t);
        if let Some(m) = r.synergy {
            prop_assert!(r.rarity >= RarityTier::floor_for(m.kind()));
        }
        if r.legendary.is_some() {
            prop_assert_eq!(r.rarity, RarityTier::TOP);
        }
    }

    #[test]
    fn transform_shown_only_with_equipment_synergy(t in token()) {
        let g = generator();
        let r = g.resolve(t);
        let m = g.generate(t).unwrap();
        prop_assert_eq!(r.is_transformed(), m.attribute(trait_type::TRANSFORMED_EQUIPMENT).is_some());
        if r.is_transformed() {
            prop_assert!(r.synergy.is_some_and(|s| s.pins_equipment()));
        }
    }

    #[test]
    fn resolver_prefers_specific_rules(t in traits()) {
        let catalog = generator().catalog();
        let Some(m) = catalog.synergies.resolve(&t) else { return Ok(()) };
        let matching = |tier| {
            catalog
                .synergies
                .rules()
                .filter(|r| r.tier == tier && r.pattern.matches(&t))
                .count()
        };
        match m.kind() {
            SynergyKind::Quad => prop_assert_eq!(matching(monstergen::SynergyTier::Quad), 1),
            SynergyKind::Trinity => {
                prop_assert_eq!(matching(monstergen::SynergyTier::Quad), 0);
                prop_assert_eq!(matching(monstergen::SynergyTier::Trinity), 1);
            }
            SynergyKind::Dual => {
                prop_assert_eq!(matching(monstergen::SynergyTier::Trinity), 0);
                prop_assert_eq!(matching(monstergen::SynergyTier::Dual), 1);
            }
            SynergyKind::DualCombo => {
                prop_assert_eq!(matching(monstergen::SynergyTier::Trinity), 0);
                prop_assert_eq!(matching(monstergen::SynergyTier::Dual), 2);
                prop_assert!(m.title().contains(" & "));
            }
        }
    }
}

#[test]
fn independent_generators_agree() {
    let (a, b) = (fresh(), fresh());
    for n in (0..100_000).step_by(997) {
        let t = TokenId::new(n).unwrap();
        assert_eq!(a.generate(t).unwrap(), b.generate(t).unwrap());
    }
}

#[test]
fn documented_examples() {
    let catalog = generator().catalog();
    let check = |t: ResolvedTraits| catalog.synergies.resolve(&t).map(|m| (m.title().into_owned(), m.kind()));

    assert_eq!(
        check(ResolvedTraits::new(Species::Dragon, Equipment::Crown, Realm::Ragnarok, Curse::Meteor)),
        Some(("Cosmic Sovereign".to_owned(), SynergyKind::Quad))
    );
    assert_eq!(
        check(ResolvedTraits::new(Species::Vampire, Equipment::Wine, Realm::Shadow, Curse::Bats)),
        Some(("Classic Nosferatu".to_owned(), SynergyKind::Trinity))
    );
    assert_eq!(
        check(ResolvedTraits::new(Species::Mummy, Equipment::Crown, Realm::Decay, Curse::Lightning)),
        None
    );
}

#[test]
fn every_legendary_is_mythic() {
    let g = generator();
    for entry in g.catalog().legendaries.iter() {
        let m = g.generate(TokenId::new(entry.token_id).unwrap()).unwrap();
        assert_eq!(tier_of(&m), RarityTier::Mythic, "token {}", entry.token_id);
        assert_eq!(m.attribute(trait_type::LEGENDARY_ID), Some("True"));
    }
}

#[test]
fn invalid_ids_never_reach_the_pipeline() {
    for bad in ["-3", "1e3", "0x10", "twelve"] {
        assert!(matches!(
            bad.parse::<TokenId>(),
            Err(GenerateError::InvalidTokenId { .. })
        ));
    }
}

#[test]
fn rarity_spread_over_first_ten_thousand() {
    let g = generator();
    let mut counts = [0usize; 6];
    for n in 0..10_000 {
        counts[g.resolve(TokenId::new(n).unwrap()).rarity as usize] += 1;
    }
    // Every tier is reachable, and the lowest tiers dominate.
    assert!(counts.iter().all(|&c| c > 0), "{counts:?}");
    assert!(counts[0] > counts[3] + counts[4] + counts[5], "{counts:?}");
}
