use rand::Rng;

use crate::{IndexSampler, error::WeightError, selector, walker::WeightedSampler};

/// Uniform index sampler: picks an index in `0..n` with equal probability.
///
/// Seeded draws go through [`selector::select_ordinal`], so a trait axis built
/// on this sampler is a pure function of the token seed.
#[derive(Debug, Clone, Copy)]
pub struct UniformSampler {
    n: usize,
}

impl UniformSampler {
    pub fn new(n: usize) -> Result<Self, WeightError> {
        if n == 0 {
            return Err(WeightError::Empty);
        }
        Ok(Self { n })
    }
}

impl IndexSampler for UniformSampler {
    #[inline]
    fn len(&self) -> usize {
        self.n
    }
    #[inline]
    fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.random_range(0..self.n)
    }
    #[inline]
    fn seeded_index(&self, seed: i64, offset: u32) -> usize {
        selector::select_ordinal(seed, offset, self.n)
    }
}

/// `WeightedSampler` is the weighted sampler; wire it into the trait.
impl IndexSampler for WeightedSampler {
    #[inline]
    fn len(&self) -> usize {
        // call the inherent method explicitly to avoid trait-recursion
        WeightedSampler::len(self)
    }
    #[inline]
    fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        WeightedSampler::sample_index(self, rng)
    }
    #[inline]
    fn seeded_index(&self, seed: i64, offset: u32) -> usize {
        WeightedSampler::seeded_index(self, seed, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn rejects_empty() {
        assert!(matches!(UniformSampler::new(0), Err(WeightError::Empty)));
    }

    #[test]
    fn seeded_matches_selector() {
        let s = UniformSampler::new(10).unwrap();
        for seed in -50..50 {
            assert_eq!(s.seeded_index(seed, 2), selector::select_ordinal(seed, 2, 10));
        }
    }

    #[test]
    fn random_draws_stay_in_range() {
        let s = UniformSampler::new(7).unwrap();
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..1_000 {
            assert!(s.sample_index(&mut rng) < 7);
        }
    }
}
