//! 64-bit FNV-style string hashing.
//!
//! Each byte is XORed into the state, which is then multiplied by the FNV
//! prime. The hash is deterministic and unkeyed; it makes no attempt at
//! resisting crafted collisions.

use core::hash::{BuildHasher, Hasher};

pub const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
pub const PRIME: u64 = 0x100000001b3;

/// Hash a byte string in one shot.
#[inline]
pub fn hash_bytes(bytes: &[u8]) -> u64 {
    let mut h = FnvHasher::default();
    h.write(bytes);
    h.finish()
}

/// Hash a table key with a fresh hasher from `build`.
///
/// Not `BuildHasher::hash_one`: `str: Hash` also writes a trailing `0xff`.
#[inline]
pub(crate) fn hash_key<S: BuildHasher>(build: &S, key: &str) -> u64 {
    let mut h = build.build_hasher();
    h.write(key.as_bytes());
    h.finish()
}

/// Streaming form of [`hash_bytes`]. Successive `write` calls are
/// equivalent to one call over the concatenated bytes.
#[derive(Copy, Clone, Debug)]
pub struct FnvHasher(u64);

impl Default for FnvHasher {
    fn default() -> Self {
        FnvHasher(OFFSET_BASIS)
    }
}

impl Hasher for FnvHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(PRIME);
        }
        self.0 = h;
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }
}

/// Default hasher factory for [`HashTable`](crate::HashTable).
#[derive(Copy, Clone, Debug, Default)]
pub struct FnvBuildHasher;

impl BuildHasher for FnvBuildHasher {
    type Hasher = FnvHasher;
    fn build_hasher(&self) -> FnvHasher {
        FnvHasher::default()
    }
}
