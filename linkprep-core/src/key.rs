//! Scalar encoding of unordered node pairs.
//!
//! Edge membership, uniqueness, and difference are all computed on
//! [`EdgeKey`] values instead of pair comparisons, so edge sets are ordinary
//! hash sets and edge lists sort with a plain integer sort.

/// Largest node count whose identifiers fit the packed key representation.
///
/// Node ids occupy one 32-bit half of the key each, so graphs may hold at
/// most `u32::MAX + 1` nodes.
pub const MAX_NODE_COUNT: usize = (u32::MAX as usize) + 1;

/// A canonical unordered node pair packed into a single `u64`.
///
/// The smaller endpoint occupies the high half and the larger endpoint the
/// low half, so the derived `Ord` matches lexicographic ordering of the
/// canonical pairs and [`EdgeKey::decode`] exactly inverts
/// [`EdgeKey::encode`].
///
/// # Examples
/// ```
/// use linkprep_core::EdgeKey;
///
/// let key = EdgeKey::encode(7, 2);
/// assert_eq!(key.decode(), (2, 7));
/// assert_eq!(key, EdgeKey::encode(2, 7));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(u64);

impl EdgeKey {
    /// Encodes an unordered pair as its canonical key.
    ///
    /// Both endpoints must be below [`MAX_NODE_COUNT`]; graph construction
    /// enforces this before any key is produced.
    #[must_use]
    pub fn encode(u: usize, v: usize) -> Self {
        debug_assert!(u < MAX_NODE_COUNT && v < MAX_NODE_COUNT);
        let (lo, hi) = if u <= v { (u, v) } else { (v, u) };
        Self(((lo as u64) << 32) | hi as u64)
    }

    /// Recovers the canonical pair `(min, max)` the key was encoded from.
    #[must_use]
    pub fn decode(self) -> (usize, usize) {
        ((self.0 >> 32) as usize, (self.0 & 0xFFFF_FFFF) as usize)
    }

    /// Returns whether the key encodes a degenerate `u == u` pair.
    ///
    /// Self-pairs are representable so candidate batches can be encoded
    /// wholesale, but they are never valid edges.
    #[must_use]
    pub fn is_self_loop(self) -> bool {
        let (u, v) = self.decode();
        u == v
    }

    /// Returns the raw packed value.
    #[rustfmt::skip]
    #[must_use]
    pub fn get(self) -> u64 { self.0 }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::EdgeKey;

    #[rstest]
    #[case(0, 1)]
    #[case(1, 0)]
    #[case(0, 0)]
    #[case(41, 7)]
    #[case(u32::MAX as usize, 0)]
    fn round_trips_to_canonical_pair(#[case] u: usize, #[case] v: usize) {
        let (lo, hi) = (u.min(v), u.max(v));
        assert_eq!(EdgeKey::encode(u, v).decode(), (lo, hi));
    }

    #[test]
    fn orientation_does_not_matter() {
        assert_eq!(EdgeKey::encode(3, 9), EdgeKey::encode(9, 3));
    }

    #[test]
    fn order_matches_canonical_pair_order() {
        let mut keys = vec![
            EdgeKey::encode(2, 3),
            EdgeKey::encode(0, 5),
            EdgeKey::encode(0, 1),
            EdgeKey::encode(1, 4),
        ];
        keys.sort_unstable();
        let pairs: Vec<_> = keys.into_iter().map(EdgeKey::decode).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 5), (1, 4), (2, 3)]);
    }

    #[test]
    fn self_pairs_are_distinguishable_from_edges() {
        let loop_key = EdgeKey::encode(4, 4);
        assert!(loop_key.is_self_loop());
        assert!(!EdgeKey::encode(4, 5).is_self_loop());
        assert_ne!(loop_key, EdgeKey::encode(4, 5));
    }

    proptest! {
        #[test]
        fn encode_decode_round_trip(u in 0..u32::MAX as usize, v in 0..u32::MAX as usize) {
            let key = EdgeKey::encode(u, v);
            prop_assert_eq!(key.decode(), (u.min(v), u.max(v)));
        }

        #[test]
        fn injective_over_canonical_pairs(
            a in 0..10_000_usize,
            b in 0..10_000_usize,
            c in 0..10_000_usize,
            d in 0..10_000_usize,
        ) {
            let left = EdgeKey::encode(a, b);
            let right = EdgeKey::encode(c, d);
            let same_pair = (a.min(b), a.max(b)) == (c.min(d), c.max(d));
            prop_assert_eq!(left == right, same_pair);
        }
    }
}
