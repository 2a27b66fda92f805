use super::fingerprint::Fingerprint;
use crate::consts::HASH_BITS;

/// Number of bit positions in which `a` and `b` differ, 0 to 64.
#[inline]
pub fn hamming_distance(a: Fingerprint, b: Fingerprint) -> u32 {
    (a.bits() ^ b.bits()).count_ones()
}

/// Similarity of two fingerprints of the same kind, in `[0.0, 1.0]`.
///
/// `1.0` for identical fingerprints, `0.0` for complementary ones.
pub fn compare(a: Fingerprint, b: Fingerprint) -> f64 {
    let distance = hamming_distance(a, b);
    f64::from(HASH_BITS - distance) / f64::from(HASH_BITS)
}

impl Fingerprint {
    pub fn hamming_distance(self, other: Fingerprint) -> u32 {
        hamming_distance(self, other)
    }

    pub fn similarity(self, other: Fingerprint) -> f64 {
        compare(self, other)
    }

    /// Whether the similarity to `other` reaches `threshold`.
    pub fn is_similar(self, other: Fingerprint, threshold: f64) -> bool {
        self.similarity(other) >= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::index::sample;
    use rand::Rng;

    #[test]
    fn test_reflexive() {
        for bits in [0, 1, u64::MAX, 0xDEAD_BEEF_0BAD_F00D] {
            let fingerprint = Fingerprint::new(bits);
            assert_eq!(compare(fingerprint, fingerprint), 1.0);
            assert_eq!(fingerprint.hamming_distance(fingerprint), 0);
        }
    }

    #[test]
    fn test_complement_scores_zero() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            let fingerprint = Fingerprint::new(rng.random());
            assert_eq!(fingerprint.hamming_distance(!fingerprint), 64);
            assert_eq!(compare(fingerprint, !fingerprint), 0.0);
        }
    }

    #[test]
    fn test_symmetric_and_bounded() {
        let mut rng = rand::rng();
        for _ in 0..1000 {
            let a = Fingerprint::new(rng.random());
            let b = Fingerprint::new(rng.random());
            let score = compare(a, b);
            assert_eq!(score, compare(b, a));
            assert!((0.0..=1.0).contains(&score));
        }
    }

    #[test]
    fn test_k_differing_bits_score_exactly() {
        let mut rng = rand::rng();
        for k in 0..=64usize {
            for _ in 0..20 {
                let mut mask = 0u64;
                for position in sample(&mut rng, 64, k).iter() {
                    mask |= 1 << position;
                }
                assert_eq!(mask.count_ones() as usize, k);

                let a = Fingerprint::new(rng.random());
                let b = Fingerprint::new(a.bits() ^ mask);
                assert_eq!(hamming_distance(a, b), k as u32);
                assert_eq!(compare(a, b), (64 - k) as f64 / 64.0);
            }
        }
    }

    #[test]
    fn test_is_similar_threshold_is_inclusive() {
        let a = Fingerprint::new(0);
        // 8 differing bits -> 56 / 64 = 0.875
        let b = Fingerprint::new(0xFF);
        assert!(a.is_similar(b, 0.875));
        assert!(!a.is_similar(b, 0.876));
    }
}
