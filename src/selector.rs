//! Deterministic query-to-image selection.
//!
//! The same query string must resolve to the same catalog slot on every call,
//! across processes and platforms, so selection is keyed off a SHA-256 digest
//! of the query rather than any seeded RNG or hash table ordering.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 digest of a query string.
pub fn query_digest(query: &str) -> String {
    hex::encode(Sha256::digest(query.as_bytes()))
}

/// Maps a query string to a stable index in `[0, catalog_len)`.
///
/// The digest is interpreted as a 256-bit unsigned integer and reduced modulo
/// `catalog_len`. Callers must ensure `catalog_len` is non-zero; the empty
/// string is a valid query and hashes like any other.
pub fn select(query: &str, catalog_len: usize) -> usize {
    let digest = Sha256::digest(query.as_bytes());
    digest_mod(digest.as_slice(), catalog_len)
}

/// Big-endian reduction of the digest bytes modulo `modulus`.
fn digest_mod(digest: &[u8], modulus: usize) -> usize {
    let modulus = modulus as u128;
    let mut acc: u128 = 0;
    for byte in digest {
        acc = ((acc << 8) | u128::from(*byte)) % modulus;
    }
    acc as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_matches_known_vectors() {
        assert_eq!(
            query_digest("totoro"),
            "91f4be5bca5af627647ead95d1bec85396b1b6bfee792e7d1e90ebb8707a87a4"
        );
        assert_eq!(
            query_digest(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn totoro_selects_fixed_slot() {
        // sha256("totoro") interpreted as an integer, mod 5
        assert_eq!(select("totoro", 5), 3);
    }

    #[test]
    fn selection_is_stable_across_calls() {
        let first = select("spirited away", 7);
        for _ in 0..10 {
            assert_eq!(select("spirited away", 7), first);
        }
    }

    #[test]
    fn single_slot_catalog_always_selects_zero() {
        assert_eq!(select("anything", 1), 0);
        assert_eq!(select("", 1), 0);
    }

    #[test]
    fn distinct_queries_spread_across_slots() {
        let mut hit = [false; 8];
        for n in 0..256 {
            hit[select(&format!("query-{}", n), 8)] = true;
        }
        assert!(hit.iter().all(|slot| *slot));
    }
}
