//! 8-bit value <-> 10-bit protected word.
//!
//! Each protected word is `[!odd, odd, b7..b0]` where `odd` is the parity of
//! the byte's population count. Decoding drops the two protection bits
//! without checking them.

use super::layout;
use crate::bits::{BitError, BitWriter};

/// Protect one byte.
///
/// # Examples
/// ```
/// use st291_core::anc::word::encode_byte;
///
/// assert_eq!(encode_byte(0x00), 0b10_0000_0000);
/// assert_eq!(encode_byte(0x01), 0b01_0000_0001);
/// ```
pub fn encode_byte(byte: u8) -> u16 {
    let odd = (byte.count_ones() & 1) as u16;
    ((odd ^ 1) << 9) | (odd << 8) | u16::from(byte)
}

/// Strip the protection bits from a 10-bit word.
pub fn decode_word(word: u16) -> u8 {
    (word & 0xFF) as u8
}

/// Write every byte as a protected 10-bit word.
pub fn write_bytes(writer: &mut BitWriter, bytes: &[u8]) -> Result<(), BitError> {
    for &byte in bytes {
        writer.write(u64::from(encode_byte(byte)), layout::PROTECTED_WORD_BITS)?;
    }
    Ok(())
}
