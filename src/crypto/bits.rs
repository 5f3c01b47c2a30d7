//! 11-bit word index packing
//!
//! A mnemonic is a bitstream of `entropy ‖ checksum` read in 11-bit groups.
//! These helpers move between byte buffers and those groups; they do no
//! validation beyond what the arithmetic needs, callers check lengths.

/// Bits per wordlist index
pub const WORD_BITS: u32 = 11;

/// Mask with the top `bits` bits of a byte set
pub fn upper_mask(bits: u32) -> u8 {
    debug_assert!(bits <= 8);
    (((1u16 << bits) - 1) << (8 - bits)) as u8
}

/// Split `entropy` followed by the top `checksum_bits` bits of `checksum`
/// into 11-bit word indices.
///
/// For the valid entropy lengths (16, 20, 24, 28, 32 bytes) the total bit
/// count is an exact multiple of 11, so no bits are dropped.
pub fn pack_indices(entropy: &[u8], checksum: u8, checksum_bits: u32) -> Vec<u16> {
    let total_bits = entropy.len() as u32 * 8 + checksum_bits;
    debug_assert_eq!(total_bits % WORD_BITS, 0);

    let mut indices = Vec::with_capacity((total_bits / WORD_BITS) as usize);
    let mut acc: u32 = 0;
    let mut acc_bits: u32 = 0;

    let mut push = |value: u32, bits: u32, indices: &mut Vec<u16>| {
        acc = (acc << bits) | value;
        acc_bits += bits;
        while acc_bits >= WORD_BITS {
            acc_bits -= WORD_BITS;
            indices.push(((acc >> acc_bits) & 0x7ff) as u16);
        }
        acc &= (1 << acc_bits) - 1;
    };

    for &byte in entropy {
        push(byte as u32, 8, &mut indices);
    }
    if checksum_bits > 0 {
        push((checksum >> (8 - checksum_bits)) as u32, checksum_bits, &mut indices);
    }

    indices
}

/// Concatenate 11-bit indices into a byte buffer, most significant bit first.
///
/// The result holds `ceil(11 * n / 8)` bytes; a trailing partial byte is
/// left-aligned and zero-padded. For a mnemonic the last `n / 3` bits of the
/// stream are the checksum, not entropy.
pub fn unpack_indices(indices: &[u16]) -> Vec<u8> {
    let total_bits = indices.len() * WORD_BITS as usize;
    let mut bytes = Vec::with_capacity(total_bits.div_ceil(8));
    let mut acc: u32 = 0;
    let mut acc_bits: u32 = 0;

    for &index in indices {
        acc = (acc << WORD_BITS) | (index as u32 & 0x7ff);
        acc_bits += WORD_BITS;
        while acc_bits >= 8 {
            acc_bits -= 8;
            bytes.push((acc >> acc_bits) as u8);
        }
        acc &= (1 << acc_bits) - 1;
    }
    if acc_bits > 0 {
        bytes.push((acc << (8 - acc_bits)) as u8);
    }

    bytes
}
