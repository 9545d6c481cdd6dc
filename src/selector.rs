//! Seeded selector: a trigonometric hash from `(seed, offset)` to `[0, 1)`.
//!
//! Every generated token depends on these exact constants. Changing the
//! multiplier or any offset reshuffles the traits of every token ever minted.

/// Scale applied to `sin(seed + offset)` before taking the fractional part.
pub const HASH_SCALE: f64 = 10_000.0;

/// Frozen per-draw offsets.
pub mod offset {
    pub const SPECIES: u32 = 1;
    pub const EQUIPMENT: u32 = 2;
    pub const REALM: u32 = 3;
    pub const CURSE: u32 = 4;
    /// Base rarity column; the coin flip uses `RARITY + 1`.
    pub const RARITY: u32 = 5;
}

/// Fractional part of `sin(seed + offset) * 10000`, always in `[0, 1)`.
#[inline]
pub fn unit(seed: i64, offset: u32) -> f64 {
    let x = (seed as f64 + f64::from(offset)).sin() * HASH_SCALE;
    let frac = x - x.floor();
    // `x - floor(x)` can round up to exactly 1.0 for tiny negative x.
    if frac >= 1.0 { 0.0 } else { frac }
}

/// Pick an index in `0..len` from `(seed, offset)`.
///
/// # Panics
/// If `len` is zero, or if the hash ever produces an index outside `0..len`
/// (impossible for finite input; treated as a broken invariant).
#[inline]
pub fn select_ordinal(seed: i64, offset: u32, len: usize) -> usize {
    assert!(len > 0, "select_ordinal over an empty range");
    let idx = (unit(seed, offset) * len as f64).floor() as usize;
    assert!(idx < len, "seeded selector produced {idx} for length {len}");
    idx
}
