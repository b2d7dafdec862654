//! String literals as 32-bit words.
//!
//! A literal string is stored as its UTF-8 bytes followed by a NUL, packed
//! four bytes per word with byte 0 in the least significant position, and
//! zero-padded to a whole word. The encoding of an `n`-byte string is always
//! `n / 4 + 1` words, so an empty string is the single word `0`.

use crate::ir::Operand;

/// Number of words needed for a string of `len` bytes (terminator included).
pub fn word_count(len: usize) -> usize {
    len / 4 + 1
}

/// Encodes `bytes` as NUL-terminated, zero-padded little-endian words.
///
/// `bytes` must not contain a NUL byte.
pub fn encode_string(bytes: &[u8]) -> Vec<u32> {
    debug_assert!(!bytes.contains(&0), "string literal contains an embedded NUL");
    let mut words = vec![0u32; word_count(bytes.len())];
    for (i, &b) in bytes.iter().enumerate() {
        words[i / 4] |= u32::from(b) << ((i % 4) * 8);
    }
    words
}

/// Encodes `text` as a run of immediate operands.
pub fn string_operands(text: &str) -> Vec<Operand> {
    encode_string(text.as_bytes())
        .into_iter()
        .map(Operand::Imm)
        .collect()
}

/// Decodes the raw bytes of a string starting at `start`.
///
/// Stops at the first zero byte (not included) or at the first operand that
/// is not an immediate, so a string may be followed directly by register
/// operands without any explicit length.
pub fn decode_bytes(operands: &[Operand], start: usize) -> Vec<u8> {
    decode_prefix(operands, start).0
}

/// Like `decode_bytes`, also returning how many operands the string
/// occupies: up to and including the word holding the terminator, or every
/// immediate before the first register when there is no terminator.
pub fn decode_prefix(operands: &[Operand], start: usize) -> (Vec<u8>, usize) {
    let mut bytes = Vec::new();
    let mut words = 0;
    for op in operands.iter().skip(start) {
        let Operand::Imm(word) = op else {
            break;
        };
        words += 1;
        for shift in [0, 8, 16, 24] {
            let b = (word >> shift) as u8;
            if b == 0 {
                return (bytes, words);
            }
            bytes.push(b);
        }
    }
    (bytes, words)
}

/// Decodes a string starting at `start`. Invalid UTF-8 is replaced lossily.
pub fn decode_string(operands: &[Operand], start: usize) -> String {
    String::from_utf8_lossy(&decode_bytes(operands, start)).into_owned()
}

/// Decodes a string from bare words (e.g. a binary stream).
pub fn decode_words(words: &[u32]) -> Vec<u8> {
    let mut bytes = Vec::new();
    'outer: for word in words {
        for b in word.to_le_bytes() {
            if b == 0 {
                break 'outer;
            }
            bytes.push(b);
        }
    }
    bytes
}
