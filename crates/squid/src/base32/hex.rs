use crate::Base32Error;

/// The base32hex alphabet (RFC 4648, section 7) in lower case.
///
/// Symbol order matches symbol value, so comparing two encodings of equal
/// length character by character gives the same answer as comparing the
/// encoded bytes.
pub const ALPHABET: &[u8; 32] = b"0123456789abcdefghijklmnopqrstuv";

const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: usize = 5;
const MASK: u16 = 0x1F;

/// Lookup table for base32hex decoding. Upper case is rejected.
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 32 {
        lut[ALPHABET[i as usize] as usize] = i;
        i += 1;
    }
    lut
};

/// Number of characters produced when encoding `bytes` bytes without padding.
#[must_use]
pub const fn encoded_len(bytes: usize) -> usize {
    (bytes * 8).div_ceil(BITS_PER_CHAR)
}

/// Number of bytes that `chars` characters of unpadded base32 decode to, or
/// `None` if no byte sequence encodes to that many characters.
#[must_use]
pub const fn decoded_len(chars: usize) -> Option<usize> {
    let full = chars / 8 * 5;
    match chars % 8 {
        0 => Some(full),
        2 => Some(full + 1),
        4 => Some(full + 2),
        5 => Some(full + 3),
        7 => Some(full + 4),
        _ => None,
    }
}

/// Encodes `input` as unpadded base32hex into `out`, most significant bit
/// first.
///
/// # Panics
///
/// Panics if `out` is not exactly [`encoded_len`]`(input.len())` bytes long.
pub fn encode_base32(input: &[u8], out: &mut [u8]) {
    assert_eq!(
        out.len(),
        encoded_len(input.len()),
        "output buffer does not match encoded length"
    );

    let mut acc = 0_u16;
    let mut bits = 0;
    let mut pos = 0;
    for &b in input {
        acc = (acc << 8) | u16::from(b);
        bits += 8;
        while bits >= BITS_PER_CHAR {
            bits -= BITS_PER_CHAR;
            out[pos] = ALPHABET[((acc >> bits) & MASK) as usize];
            pos += 1;
        }
    }
    if bits > 0 {
        // left-align the remaining bits, zero fill
        out[pos] = ALPHABET[((acc << (BITS_PER_CHAR - bits)) & MASK) as usize];
    }
}

/// Checks that `encoded` is canonical unpadded base32hex and returns the
/// number of bytes it decodes to.
///
/// # Errors
///
/// - [`Base32Error::InvalidAscii`] if a byte is outside the alphabet
/// - [`Base32Error::InvalidLen`] if the character count is impossible for
///   unpadded base32
/// - [`Base32Error::NonCanonical`] if the final character has padding bits set
pub fn validate_base32(encoded: &str) -> Result<usize, Base32Error> {
    let input = encoded.as_bytes();
    for (index, &byte) in input.iter().enumerate() {
        if LOOKUP[byte as usize] == NO_VALUE {
            return Err(Base32Error::InvalidAscii { byte, index });
        }
    }

    let len = decoded_len(input.len()).ok_or(Base32Error::InvalidLen { len: input.len() })?;

    let pad_bits = input.len() * BITS_PER_CHAR - len * 8;
    if let Some(&byte) = input.last() {
        let pad_mask = (1_u8 << pad_bits) - 1;
        if LOOKUP[byte as usize] & pad_mask != 0 {
            return Err(Base32Error::NonCanonical {
                byte,
                index: input.len() - 1,
            });
        }
    }

    Ok(len)
}

/// Decodes canonical unpadded base32hex into `out`, returning the number of
/// bytes written.
///
/// # Errors
///
/// See [`validate_base32`].
///
/// # Panics
///
/// Panics if `out` is shorter than the decoded length.
pub fn decode_base32(encoded: &str, out: &mut [u8]) -> Result<usize, Base32Error> {
    let len = validate_base32(encoded)?;
    assert!(out.len() >= len, "output buffer too small for decoded bytes");
    decode_validated(encoded.as_bytes(), &mut out[..len]);
    Ok(len)
}

/// Decodes input already accepted by [`validate_base32`].
pub(crate) fn decode_validated(input: &[u8], out: &mut [u8]) {
    let mut acc = 0_u16;
    let mut bits = 0;
    let mut pos = 0;
    for &b in input {
        acc = (acc << BITS_PER_CHAR) | u16::from(LOOKUP[b as usize]);
        bits += BITS_PER_CHAR;
        if bits >= 8 {
            bits -= 8;
            out[pos] = (acc >> bits) as u8;
            pos += 1;
        }
    }
    debug_assert_eq!(pos, out.len());
}
