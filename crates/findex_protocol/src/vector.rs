//! Causal version vectors.

use crate::error::ProtocolResult;
use crate::wire::{Reader, Writer};
use crate::{Decode, Encode};

/// One device's counter within a [`Vector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    /// Short device id owning the counter.
    pub id: u64,
    /// Number of changes that device has made.
    pub value: u64,
}

/// Outcome of comparing two [`Vector`]s.
///
/// Two vectors with no causal relation are *concurrent*; the
/// `ConcurrentGreater`/`ConcurrentLesser` split is a deterministic
/// tie-break, so every device resolves the same conflict the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorOrdering {
    /// The vectors are identical.
    Equal,
    /// `a` causally dominates `b`.
    Greater,
    /// `b` causally dominates `a`.
    Lesser,
    /// Concurrent, with `a` winning the tie-break.
    ConcurrentGreater,
    /// Concurrent, with `b` winning the tie-break.
    ConcurrentLesser,
}

/// A version vector: the causal history marker of one file state.
///
/// Counters are kept sorted by device id, each id at most once. A missing
/// counter is equivalent to a zero counter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vector {
    counters: Vec<Counter>,
}

impl Vector {
    /// Creates an empty vector (causally before everything).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a vector from `(id, value)` pairs.
    ///
    /// Pairs are sorted by id; zero-valued pairs are dropped. Duplicate ids
    /// are a caller bug and keep only their last occurrence.
    #[must_use]
    pub fn from_pairs(pairs: &[(u64, u64)]) -> Self {
        let mut counters: Vec<Counter> = Vec::with_capacity(pairs.len());
        for &(id, value) in pairs {
            if value == 0 {
                continue;
            }
            match counters.iter_mut().find(|c| c.id == id) {
                Some(c) => c.value = value,
                None => counters.push(Counter { id, value }),
            }
        }
        counters.sort_by_key(|c| c.id);
        Self { counters }
    }

    /// Returns the counter value for `id`, zero if absent.
    #[must_use]
    pub fn counter(&self, id: u64) -> u64 {
        self.counters
            .iter()
            .find(|c| c.id == id)
            .map_or(0, |c| c.value)
    }

    /// Returns the counters in ascending id order.
    #[must_use]
    pub fn counters(&self) -> &[Counter] {
        &self.counters
    }

    /// Returns true if the vector has no counters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Returns this vector advanced by one change for `id`.
    ///
    /// The result causally dominates `self`.
    #[must_use]
    pub fn update(mut self, id: u64) -> Self {
        match self.counters.binary_search_by_key(&id, |c| c.id) {
            Ok(i) => self.counters[i].value += 1,
            Err(i) => self.counters.insert(i, Counter { id, value: 1 }),
        }
        self
    }

    /// Compares this vector against `other`.
    ///
    /// When the vectors are concurrent the tie-break looks at the lowest
    /// device id whose counters differ: the side ahead there wins. This is
    /// symmetric and depends only on the two vectors, so all devices agree
    /// on the winner.
    #[must_use]
    pub fn compare(&self, other: &Vector) -> VectorOrdering {
        let mut ai = 0;
        let mut bi = 0;
        let mut a_ahead = false;
        let mut b_ahead = false;
        let mut first_diff = std::cmp::Ordering::Equal;

        while ai < self.counters.len() || bi < other.counters.len() {
            let a = self.counters.get(ai);
            let b = other.counters.get(bi);

            let (av, bv) = match (a, b) {
                (Some(a), Some(b)) if a.id == b.id => {
                    ai += 1;
                    bi += 1;
                    (a.value, b.value)
                }
                (Some(a), Some(b)) if a.id < b.id => {
                    ai += 1;
                    (a.value, 0)
                }
                (Some(_), Some(b)) => {
                    bi += 1;
                    (0, b.value)
                }
                (Some(a), None) => {
                    ai += 1;
                    (a.value, 0)
                }
                (None, Some(b)) => {
                    bi += 1;
                    (0, b.value)
                }
                (None, None) => unreachable!(),
            };

            if av != bv && first_diff == std::cmp::Ordering::Equal {
                first_diff = av.cmp(&bv);
            }
            if av > bv {
                a_ahead = true;
            } else if av < bv {
                b_ahead = true;
            }
        }

        match (a_ahead, b_ahead) {
            (false, false) => VectorOrdering::Equal,
            (true, false) => VectorOrdering::Greater,
            (false, true) => VectorOrdering::Lesser,
            (true, true) => {
                if first_diff == std::cmp::Ordering::Greater {
                    VectorOrdering::ConcurrentGreater
                } else {
                    VectorOrdering::ConcurrentLesser
                }
            }
        }
    }

    /// Returns true if the vectors are identical.
    #[must_use]
    pub fn equal(&self, other: &Vector) -> bool {
        self.compare(other) == VectorOrdering::Equal
    }

    /// Returns true if this vector causally dominates or equals `other`.
    ///
    /// Concurrent vectors are neither greater nor equal, so this returns
    /// false for them regardless of the tie-break.
    #[must_use]
    pub fn greater_equal(&self, other: &Vector) -> bool {
        matches!(
            self.compare(other),
            VectorOrdering::Equal | VectorOrdering::Greater
        )
    }

    /// Returns true if the vectors are concurrent.
    #[must_use]
    pub fn concurrent(&self, other: &Vector) -> bool {
        matches!(
            self.compare(other),
            VectorOrdering::ConcurrentGreater | VectorOrdering::ConcurrentLesser
        )
    }
}

impl Encode for Vector {
    fn encode(&self) -> Vec<u8> {
        let mut w = Writer::with_capacity(4 + self.counters.len() * 16);
        encode_into(self, &mut w);
        w.into_bytes()
    }
}

impl Decode for Vector {
    fn decode(bytes: &[u8]) -> ProtocolResult<Self> {
        let mut r = Reader::new(bytes);
        let v = decode_from(&mut r)?;
        r.expect_end()?;
        Ok(v)
    }
}

/// Appends the vector to an in-progress [`Writer`].
pub(crate) fn encode_into(v: &Vector, w: &mut Writer) {
    w.put_u32(v.counters.len() as u32);
    for c in &v.counters {
        w.put_u64(c.id);
        w.put_u64(c.value);
    }
}

/// Reads a vector out of an in-progress [`Reader`].
pub(crate) fn decode_from(r: &mut Reader<'_>) -> ProtocolResult<Vector> {
    let count = r.u32()? as usize;
    let mut pairs = Vec::with_capacity(count.min(64));
    for _ in 0..count {
        let id = r.u64()?;
        let value = r.u64()?;
        pairs.push((id, value));
    }
    Ok(Vector::from_pairs(&pairs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn v(pairs: &[(u64, u64)]) -> Vector {
        Vector::from_pairs(pairs)
    }

    #[test]
    fn empty_vectors_are_equal() {
        assert_eq!(Vector::new().compare(&Vector::new()), VectorOrdering::Equal);
    }

    #[test]
    fn identical_vectors_are_equal() {
        let a = v(&[(1, 2), (2, 3)]);
        assert_eq!(a.compare(&a.clone()), VectorOrdering::Equal);
        assert!(a.equal(&a.clone()));
    }

    #[test]
    fn dominating_vector_is_greater() {
        let a = v(&[(1, 2), (2, 3)]);
        let b = v(&[(1, 2), (2, 2)]);
        assert_eq!(a.compare(&b), VectorOrdering::Greater);
        assert_eq!(b.compare(&a), VectorOrdering::Lesser);
        assert!(a.greater_equal(&b));
        assert!(!b.greater_equal(&a));
    }

    #[test]
    fn missing_counter_counts_as_zero() {
        let a = v(&[(1, 1), (2, 1)]);
        let b = v(&[(1, 1)]);
        assert_eq!(a.compare(&b), VectorOrdering::Greater);
        assert_eq!(b.compare(&a), VectorOrdering::Lesser);
    }

    #[test]
    fn concurrent_vectors_tie_break_on_lowest_id() {
        // a is ahead on id 1, b on id 2: a wins the tie-break.
        let a = v(&[(1, 2), (2, 1)]);
        let b = v(&[(1, 1), (2, 2)]);
        assert_eq!(a.compare(&b), VectorOrdering::ConcurrentGreater);
        assert_eq!(b.compare(&a), VectorOrdering::ConcurrentLesser);
        assert!(a.concurrent(&b));
        assert!(!a.greater_equal(&b));
        assert!(!b.greater_equal(&a));
    }

    #[test]
    fn update_dominates_original() {
        let a = v(&[(1, 1)]);
        let b = a.clone().update(2);
        assert_eq!(b.counter(2), 1);
        assert_eq!(b.compare(&a), VectorOrdering::Greater);

        let c = b.clone().update(2);
        assert_eq!(c.counter(2), 2);
        assert_eq!(c.compare(&b), VectorOrdering::Greater);
    }

    #[test]
    fn codec_round_trip() {
        let a = v(&[(1, 7), (9, 2), (u64::MAX, 1)]);
        let decoded = Vector::decode(&a.encode()).unwrap();
        assert_eq!(decoded, a);
    }

    #[test]
    fn decode_truncated_fails() {
        let mut bytes = v(&[(1, 1)]).encode();
        bytes.truncate(bytes.len() - 3);
        assert!(Vector::decode(&bytes).is_err());
    }

    proptest! {
        #[test]
        fn compare_is_antisymmetric(
            a in proptest::collection::vec((0u64..8, 1u64..5), 0..6),
            b in proptest::collection::vec((0u64..8, 1u64..5), 0..6),
        ) {
            let a = Vector::from_pairs(&a);
            let b = Vector::from_pairs(&b);
            let expected = match a.compare(&b) {
                VectorOrdering::Equal => VectorOrdering::Equal,
                VectorOrdering::Greater => VectorOrdering::Lesser,
                VectorOrdering::Lesser => VectorOrdering::Greater,
                VectorOrdering::ConcurrentGreater => VectorOrdering::ConcurrentLesser,
                VectorOrdering::ConcurrentLesser => VectorOrdering::ConcurrentGreater,
            };
            prop_assert_eq!(b.compare(&a), expected);
        }

        #[test]
        fn encode_decode_round_trips(
            pairs in proptest::collection::vec((any::<u64>(), 1u64..), 0..10),
        ) {
            let vector = Vector::from_pairs(&pairs);
            let decoded = Vector::decode(&vector.encode()).unwrap();
            prop_assert_eq!(decoded, vector);
        }
    }
}
