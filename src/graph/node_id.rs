//! Internal handles for the Nodes of a Graph

/// The Type used to reference a Node in the Graph's arena
pub(crate) type NodeKey = usize;
use std::hash::{BuildHasherDefault, Hasher};

/// A specialized [`HashMap`](hashbrown::HashMap) for NodeKeys with a faster Hasher
pub(crate) type NodeKeyMap<V> = hashbrown::HashMap<NodeKey, V, BuildHasherDefault<NodeKeyHasher>>;
/// A specialized [`HashSet`](hashbrown::HashSet) for NodeKeys with a faster Hasher
pub(crate) type NodeKeySet = hashbrown::HashSet<NodeKey, BuildHasherDefault<NodeKeyHasher>>;

/// A [`Hasher`](Hasher) specialized on NodeKeys
///
/// Slab keys are small and dense, so they are spread with a single multiplication
/// (Fibonacci hashing) to keep the high bits that hashbrown groups by populated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) struct NodeKeyHasher(u64);

impl Hasher for NodeKeyHasher {
    /// panics, since only NodeKeys are supposed to be used
    fn write(&mut self, _: &[u8]) {
        unreachable!("This Hasher only works with NodeKeys")
    }
    /// Writes a single NodeKey into this hasher.
    fn write_usize(&mut self, key: NodeKey) {
        self.0 = (key as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
    fn finish(&self) -> u64 {
        self.0
    }
}

#[test]
fn distinct_keys_hash_apart() {
    use std::hash::{BuildHasher, Hash};

    let build = BuildHasherDefault::<NodeKeyHasher>::default();
    let hash = |key: NodeKey| {
        let mut hasher = build.build_hasher();
        key.hash(&mut hasher);
        hasher.finish()
    };
    assert_ne!(hash(1), hash(2));
    assert_ne!(hash(1) >> 57, hash(2) >> 57);
}
