//! Deterministic shard selection
//!
//! Routing keys are assigned to backend instances with a 32-bit FNV-1a
//! hash taken modulo the instance count. The assignment is a pure
//! function of `(key, instance_count)`: no stored routing table, no
//! consistent hashing. Changing the instance count reshuffles most
//! assignments, which is a documented limitation of the design.

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a over raw bytes
pub fn fnv1a(bytes: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for &byte in bytes {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Map a routing key to an instance index in `0..instance_count`.
///
/// `instance_count` must be non-zero; the registry guarantees this.
pub fn shard_index(key: &str, instance_count: usize) -> usize {
    debug_assert!(instance_count > 0);
    fnv1a(key.as_bytes()) as usize % instance_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv1a_known_vectors() {
        // Empty input hashes to the offset basis.
        assert_eq!(fnv1a(b""), 0x811c_9dc5);
        assert_eq!(fnv1a(b"a"), 0xe40c_292c);
        assert_eq!(fnv1a(b"hello"), 0x4f9f_2cab);
    }

    #[test]
    fn selection_is_deterministic() {
        for key in ["bucket1", "obj123", "x"] {
            let first = shard_index(key, 7);
            for _ in 0..100 {
                assert_eq!(shard_index(key, 7), first);
            }
        }
    }

    #[test]
    fn selection_stays_in_range() {
        let keys = ["a", "bb", "ccc", "obj123", "zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz"];
        for count in 1..=16 {
            for key in keys {
                assert!(shard_index(key, count) < count);
            }
        }
    }

    #[test]
    fn single_instance_always_selects_zero() {
        for key in ["", "a", "bucket", "obj123"] {
            assert_eq!(shard_index(key, 1), 0);
        }
    }

    #[test]
    fn different_counts_can_reassign() {
        // Not a guarantee, just documents that assignments are only as
        // stable as the instance count.
        let moved = (0..100)
            .map(|i| format!("key{}", i))
            .filter(|key| shard_index(key, 3) != shard_index(key, 4))
            .count();
        assert!(moved > 0);
    }
}
