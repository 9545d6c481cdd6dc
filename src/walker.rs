//! Walker's Alias Method for O(1) sampling from a discrete distribution.

use crate::error::WeightError;
use crate::selector;
use rand::Rng;

/// Alias table for discrete distribution sampling.
///
/// A draw needs two uniform numbers: one picks a column, the other decides
/// between the column and its alias. Those can come from a `rand::Rng` or from
/// the seeded selector, which is how rarity stays reproducible per token.
#[derive(Debug, Clone)]
pub struct WeightedSampler {
    prob: Vec<f64>,
    alias: Vec<usize>,
}

impl WeightedSampler {
    /// Construct an alias table from non-negative weights. O(n).
    pub fn new(weights: &[f64]) -> Result<Self, WeightError> {
        let n = weights.len();
        if n == 0 {
            return Err(WeightError::Empty);
        }

        let mut sum = 0.0f64;
        for (i, &w) in weights.iter().enumerate() {
            if w.is_sign_negative() {
                return Err(WeightError::Negative { index: i, value: w });
            }
            sum += w;
        }
        if !sum.is_finite() || sum == 0.0 {
            return Err(WeightError::ZeroSum);
        }

        // Scale so average is 1.
        let mut scaled: Vec<f64> = weights.iter().map(|&w| w * n as f64 / sum).collect();

        let mut prob = vec![0.0f64; n];
        let mut alias = (0..n).collect::<Vec<_>>();

        let mut small = Vec::with_capacity(n);
        let mut large = Vec::with_capacity(n);

        for (i, &p) in scaled.iter().enumerate() {
            if p < 1.0 {
                small.push(i);
            } else {
                large.push(i);
            }
        }

        while let (Some(s), Some(l)) = (small.pop(), large.pop()) {
            prob[s] = scaled[s]; // in [0,1)
            alias[s] = l;

            scaled[l] = (scaled[l] + scaled[s]) - 1.0;

            if scaled[l] < 1.0 - 1e-15 {
                small.push(l);
            } else {
                large.push(l);
            }
        }

        for i in small.into_iter().chain(large) {
            prob[i] = 1.0;
            alias[i] = i;
        }

        Ok(Self { prob, alias })
    }

    /// Resolve a draw from two units in `[0, 1)`.
    #[inline]
    pub fn index_from_units(&self, column: f64, coin: f64) -> usize {
        let n = self.prob.len();
        let i = ((column * n as f64) as usize).min(n - 1);
        if coin < self.prob[i] { i } else { self.alias[i] }
    }

    /// Draw a single sample in O(1).
    pub fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let i = rng.random_range(0..self.prob.len());
        let u: f64 = rng.random();
        if u < self.prob[i] { i } else { self.alias[i] }
    }

    /// Deterministic draw: column from `offset`, coin from `offset + 1`.
    pub fn seeded_index(&self, seed: i64, offset: u32) -> usize {
        self.index_from_units(
            selector::unit(seed, offset),
            selector::unit(seed, offset + 1),
        )
    }

    /// Draw k samples, returning counts per index (useful for checks).
    #[cfg(test)]
    pub fn sample_counts<R: Rng + ?Sized>(&self, rng: &mut R, draws: usize) -> Vec<usize> {
        let mut counts = vec![0usize; self.prob.len()];
        for _ in 0..draws {
            counts[self.sample_index(rng)] += 1;
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.prob.len()
    }
    pub fn is_empty(&self) -> bool {
        self.prob.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn rejects_bad_inputs() {
        assert!(matches!(WeightedSampler::new(&[]), Err(WeightError::Empty)));
        assert!(matches!(
            WeightedSampler::new(&[0.0, 0.0]),
            Err(WeightError::ZeroSum)
        ));
        assert!(matches!(
            WeightedSampler::new(&[-0.1, 0.2]),
            Err(WeightError::Negative { index: 0, .. })
        ));
        assert!(matches!(
            WeightedSampler::new(&[f64::INFINITY, 1.0]),
            Err(WeightError::ZeroSum)
        ));
    }

    #[test]
    fn roughly_matches_distribution() {
        let weights = [1.0, 2.0, 3.0, 4.0];
        let alias = WeightedSampler::new(&weights).unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let draws = 20_000usize;
        let counts = alias.sample_counts(&mut rng, draws);

        let sum_w: f64 = weights.iter().sum();
        for (i, &c) in counts.iter().enumerate() {
            let p = weights[i] / sum_w;
            let emp = c as f64 / draws as f64;
            assert!((emp - p).abs() < 0.05, "i={i} emp={emp} p={p}");
        }
    }

    #[test]
    fn seeded_draws_follow_weights() {
        let weights = [75.0, 20.0, 5.0, 0.0];
        let alias = WeightedSampler::new(&weights).unwrap();
        let draws = 20_000i64;
        let mut counts = [0usize; 4];
        for seed in 0..draws {
            counts[alias.seeded_index(seed, selector::offset::RARITY)] += 1;
        }
        assert_eq!(counts[3], 0, "zero-weight column was drawn");
        for (i, &c) in counts.iter().enumerate() {
            let p = weights[i] / 100.0;
            let emp = c as f64 / draws as f64;
            assert!((emp - p).abs() < 0.03, "i={i} emp={emp} p={p}");
        }
    }

    #[test]
    fn zero_weight_never_drawn_from_units() {
        let alias = WeightedSampler::new(&[0.0, 1.0]).unwrap();
        for k in 0..100 {
            let u = k as f64 / 100.0;
            assert_eq!(alias.index_from_units(u, u), 1);
            assert_eq!(alias.index_from_units(u, 1.0 - u / 2.0), 1);
        }
    }

    #[test]
    fn degenerate_singleton() {
        let alias = WeightedSampler::new(&[5.0]).unwrap();
        let mut rng = rand::rng();
        for _ in 0..1000 {
            assert_eq!(alias.sample_index(&mut rng), 0);
        }
    }
}
