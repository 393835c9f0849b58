//! Hashing building blocks for the dense hash table.
//!
//! Two pieces live here:
//!
//! - [`WyHash`] / [`WyHashBuilder`]: a stripped-down wyhash with hardcoded
//!   secrets, used as the default hasher. It reads native-endian, so hashes
//!   differ across endianness; that is fine because the table index is never
//!   persisted.
//! - [`MixedHasher`]: the `BuildHasher` extension through which the table
//!   obtains its working hashes. The provided method finalizes every hash
//!   with a multiply-xor mix so that the *high* bits — which address buckets —
//!   are well distributed even for hashers that only mix the low bits.
//!   Builders whose output already avalanches override it to pass hashes
//!   through verbatim.

use core::hash::BuildHasher;
use core::hash::Hash;
use core::hash::Hasher;

use cfg_if::cfg_if;

/// 2^64 / phi. Multiplying by this constant spreads low-entropy input across
/// the full word.
const GOLDEN_RATIO: u64 = 0x9E37_79B9_7F4A_7C15;

/// Secrets for the wyhash rounds.
const WY_SECRET: [u64; 4] = [
    0xa076_1d64_78bd_642f,
    0xe703_7ed1_a0b4_28db,
    0x8ebc_6af0_9c88_c6e3,
    0x5899_65cc_7537_4cc3,
];

cfg_if! {
    if #[cfg(target_pointer_width = "64")] {
        #[inline]
        fn mum(a: u64, b: u64) -> (u64, u64) {
            let r = u128::from(a) * u128::from(b);
            (r as u64, (r >> 64) as u64)
        }
    } else {
        // 32x32 limb products; avoids the slow u128 path on 32-bit targets.
        #[inline]
        fn mum(a: u64, b: u64) -> (u64, u64) {
            let ha = a >> 32;
            let hb = b >> 32;
            let la = a & 0xFFFF_FFFF;
            let lb = b & 0xFFFF_FFFF;
            let rh = ha * hb;
            let rm0 = ha * lb;
            let rm1 = hb * la;
            let rl = la * lb;
            let t = rl.wrapping_add(rm0 << 32);
            let mut carry = u64::from(t < rl);
            let lo = t.wrapping_add(rm1 << 32);
            carry += u64::from(lo < t);
            let hi = rh
                .wrapping_add(rm0 >> 32)
                .wrapping_add(rm1 >> 32)
                .wrapping_add(carry);
            (lo, hi)
        }
    }
}

/// Multiply-xor mix: the XOR of both halves of the 128-bit product.
#[inline]
pub(crate) fn mix(a: u64, b: u64) -> u64 {
    let (lo, hi) = mum(a, b);
    lo ^ hi
}

#[inline]
fn read8(data: &[u8], offset: usize) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&data[offset..offset + 8]);
    u64::from_ne_bytes(word)
}

#[inline]
fn read4(data: &[u8], offset: usize) -> u64 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&data[offset..offset + 4]);
    u64::from(u32::from_ne_bytes(word))
}

/// Reads 1 to 3 bytes into a word without branching on the exact length.
#[inline]
fn read123(data: &[u8]) -> u64 {
    let len = data.len();
    (u64::from(data[0]) << 16) | (u64::from(data[len >> 1]) << 8) | u64::from(data[len - 1])
}

/// Hashes a byte sequence with the given seed, wyhash-style.
///
/// Inputs up to 16 bytes are consumed with two overlapping word reads; longer
/// inputs run a three-lane multiply-xor chain over 48-byte stripes before the
/// final mix folds in the length.
pub fn hash_bytes(data: &[u8], seed: u64) -> u64 {
    let len = data.len();
    let mut seed = seed;
    let a;
    let b;
    if len <= 16 {
        if len >= 4 {
            a = (read4(data, 0) << 32) | read4(data, (len >> 3) << 2);
            b = (read4(data, len - 4) << 32) | read4(data, len - 4 - ((len >> 3) << 2));
        } else if len > 0 {
            a = read123(data);
            b = 0;
        } else {
            a = 0;
            b = 0;
        }
    } else {
        let mut i = len;
        let mut p = 0;
        if i > 48 {
            let mut see1 = seed;
            let mut see2 = seed;
            while i > 48 {
                seed = mix(read8(data, p) ^ WY_SECRET[1], read8(data, p + 8) ^ seed);
                see1 = mix(read8(data, p + 16) ^ WY_SECRET[2], read8(data, p + 24) ^ see1);
                see2 = mix(read8(data, p + 32) ^ WY_SECRET[3], read8(data, p + 40) ^ see2);
                p += 48;
                i -= 48;
            }
            seed ^= see1 ^ see2;
        }
        while i > 16 {
            seed = mix(read8(data, p) ^ WY_SECRET[1], read8(data, p + 8) ^ seed);
            i -= 16;
            p += 16;
        }
        a = read8(data, p + i - 16);
        b = read8(data, p + i - 8);
    }

    mix(WY_SECRET[1] ^ len as u64, mix(a ^ WY_SECRET[1], b ^ seed))
}

/// `BuildHasher` extension supplying the table's working hashes.
///
/// The provided [`mixed_hash`] pushes the hash through a multiply-xor
/// finalizer. Implementations whose hashes already avalanche — flipping any
/// input bit flips about half of the output bits — should override it to
/// return `hash_one` verbatim; the override is the zero-cost, type-level
/// avalanche marker.
///
/// [`mixed_hash`]: MixedHasher::mixed_hash
///
/// # Examples
///
/// ```rust
/// use std::hash::BuildHasherDefault;
/// use std::hash::DefaultHasher;
///
/// use dense_hash::HashMap;
/// use dense_hash::MixedHasher;
///
/// #[derive(Default, Clone)]
/// struct MyBuilder(BuildHasherDefault<DefaultHasher>);
///
/// impl std::hash::BuildHasher for MyBuilder {
///     type Hasher = DefaultHasher;
///
///     fn build_hasher(&self) -> DefaultHasher {
///         self.0.build_hasher()
///     }
/// }
///
/// // The default `mixed_hash` finalizer is kept: hashes are re-mixed.
/// impl MixedHasher for MyBuilder {}
///
/// let mut map = HashMap::with_hasher(MyBuilder::default());
/// map.insert(1, "one");
/// assert_eq!(map.get(&1), Some(&"one"));
/// ```
pub trait MixedHasher: BuildHasher {
    /// Returns the working hash for `value`.
    #[inline]
    fn mixed_hash<T: Hash + ?Sized>(&self, value: &T) -> u64
    where
        Self: Sized,
    {
        mix(self.hash_one(value), GOLDEN_RATIO)
    }
}

/// A streaming hasher over the wyhash primitives.
///
/// Byte blocks are folded with [`hash_bytes`]; integer writes take a direct
/// multiply-xor round. State chains across writes, so multi-part keys hash
/// consistently.
#[derive(Clone, Debug, Default)]
pub struct WyHash {
    state: u64,
}

impl WyHash {
    /// Creates a hasher with the fixed default seed.
    pub const fn new() -> Self {
        Self { state: 0 }
    }
}

impl Hasher for WyHash {
    #[inline]
    fn finish(&self) -> u64 {
        self.state
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.state = hash_bytes(bytes, self.state ^ WY_SECRET[0]);
    }

    #[inline]
    fn write_u8(&mut self, i: u8) {
        self.write_u64(u64::from(i));
    }

    #[inline]
    fn write_u16(&mut self, i: u16) {
        self.write_u64(u64::from(i));
    }

    #[inline]
    fn write_u32(&mut self, i: u32) {
        self.write_u64(u64::from(i));
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.state = mix(i ^ WY_SECRET[1], self.state ^ WY_SECRET[0]);
    }

    #[inline]
    fn write_u128(&mut self, i: u128) {
        self.write_u64(i as u64);
        self.write_u64((i >> 64) as u64);
    }

    #[inline]
    fn write_usize(&mut self, i: usize) {
        self.write_u64(i as u64);
    }
}

/// Builds [`WyHash`] hashers.
///
/// The secrets are hardcoded, so hashes are deterministic across runs and
/// processes of the same endianness. This is the default builder for
/// [`HashMap`](crate::HashMap) and [`HashSet`](crate::HashSet).
#[derive(Clone, Copy, Debug, Default)]
pub struct WyHashBuilder;

impl BuildHasher for WyHashBuilder {
    type Hasher = WyHash;

    #[inline]
    fn build_hasher(&self) -> WyHash {
        WyHash::new()
    }
}

impl MixedHasher for WyHashBuilder {
    // wyhash output avalanches; skip the finalizer.
    #[inline]
    fn mixed_hash<T: Hash + ?Sized>(&self, value: &T) -> u64 {
        self.hash_one(value)
    }
}

// SipHash avalanches; its output is used verbatim.
#[cfg(feature = "std")]
impl MixedHasher for std::collections::hash_map::RandomState {
    #[inline]
    fn mixed_hash<T: Hash + ?Sized>(&self, value: &T) -> u64 {
        self.hash_one(value)
    }
}

/// The default hasher builder for the map and set types.
pub type DefaultHashBuilder = WyHashBuilder;
