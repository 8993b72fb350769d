// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! 32-bit MurmurHash3 (x86_32 variant).

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;

/// Computes the 32-bit MurmurHash3 of `bytes` with the given `seed`.
///
/// Output matches the reference `MurmurHash3_x86_32` on every platform.
pub fn murmurhash3_x86_32(bytes: &[u8], seed: u32) -> u32 {
    let mut h1 = seed;

    let mut blocks = bytes.chunks_exact(4);
    for block in &mut blocks {
        let k1 = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
        h1 ^= mix_k1(k1);
        h1 = h1.rotate_left(13);
        h1 = h1.wrapping_mul(5).wrapping_add(0xe654_6b64);
    }

    let tail = blocks.remainder();
    if !tail.is_empty() {
        let mut k1 = 0u32;
        for (i, byte) in tail.iter().enumerate() {
            k1 |= (*byte as u32) << (8 * i);
        }
        h1 ^= mix_k1(k1);
    }

    // the length is mixed in modulo 2^32, as the reference does
    h1 ^= bytes.len() as u32;
    fmix32(h1)
}

#[inline(always)]
fn mix_k1(k1: u32) -> u32 {
    k1.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2)
}

#[inline(always)]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_vectors() {
        assert_eq!(murmurhash3_x86_32(b"", 0), 0);
        assert_eq!(murmurhash3_x86_32(b"", 1), 0x514e_28b7);
        assert_eq!(murmurhash3_x86_32(b"", 0xffff_ffff), 0x81f1_6f39);
        assert_eq!(murmurhash3_x86_32(b"hello", 0), 0x248b_fa47);
        assert_eq!(murmurhash3_x86_32(b"Hello, world!", 1234), 0xfaf6_cdb3);
        assert_eq!(
            murmurhash3_x86_32(b"The quick brown fox jumps over the lazy dog", 0),
            0x2e4f_f723
        );
    }

    #[test]
    fn test_tail_lengths() {
        // one, three and four byte inputs exercise each tail path
        assert_eq!(murmurhash3_x86_32(b"a", 0x9747_b28c), 0x7fa0_9ea6);
        assert_eq!(murmurhash3_x86_32(b"abc", 0), 0xb3dd_93fa);
        assert_eq!(murmurhash3_x86_32(b"abcd", 0x9747_b28c), 0xf047_8627);
    }

    #[test]
    fn test_seed_changes_output() {
        let a = murmurhash3_x86_32(b"foo", 11);
        let b = murmurhash3_x86_32(b"foo", 22);
        assert_ne!(a, b);
        assert_eq!(a, murmurhash3_x86_32(b"foo", 11));
    }
}
