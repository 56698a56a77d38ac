//! User data words: raw-integer vs delegated payload.
//!
//! The payload kind is fixed once at decode time from DID/SDID. Raw payloads
//! are `word_count * 10` unprotected bits; delegated payloads are
//! `word_count` protected bytes, the first two being a descriptor and the rest
//! handed to the `PayloadCodec`.

use log::debug;
use serde::Serialize;

use super::error::AncError;
use super::header::Header;
use super::layout;
use super::reader::AncReader;
use super::word;
use crate::bits::{BitWriter, hex};
use crate::delegate::PayloadCodec;

/// Unprotected payload of arbitrary width.
///
/// `bytes` is right-aligned big-endian; `bit_width` is the wire width.
/// Equality compares the numeric value, so leading zero bytes do not matter.
#[derive(Debug, Clone, Serialize)]
pub struct RawWords {
    bytes: Vec<u8>,
    bit_width: usize,
}

impl RawWords {
    pub fn new(bytes: Vec<u8>, bit_width: usize) -> Self {
        Self { bytes, bit_width }
    }

    /// Raw value sized for `word_count` user data words.
    ///
    /// ```
    /// use st291_core::RawWords;
    ///
    /// let raw = RawWords::from_u64(0x2AB, 1);
    /// assert_eq!(raw.bit_width(), 10);
    /// assert_eq!(raw.as_u64(), Some(0x2AB));
    /// ```
    pub fn from_u64(value: u64, word_count: u8) -> Self {
        Self {
            bytes: value.to_be_bytes().to_vec(),
            bit_width: usize::from(word_count) * layout::UDW_WORD_BITS,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn bit_width(&self) -> usize {
        self.bit_width
    }

    /// The value as an integer, when it fits in 64 bits.
    pub fn as_u64(&self) -> Option<u64> {
        let significant = self.significant_bytes();
        if significant.len() > 8 {
            return None;
        }
        Some(
            significant
                .iter()
                .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte)),
        )
    }

    /// Minimal lowercase hex with a `0x` prefix (`0x0` for zero).
    pub fn to_hex(&self) -> String {
        let digits = hex::encode(self.significant_bytes());
        let digits = digits.trim_start_matches('0');
        if digits.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{digits}")
        }
    }

    fn significant_bytes(&self) -> &[u8] {
        let start = self
            .bytes
            .iter()
            .position(|&byte| byte != 0)
            .unwrap_or(self.bytes.len());
        &self.bytes[start..]
    }
}

impl PartialEq for RawWords {
    fn eq(&self, other: &Self) -> bool {
        self.bit_width == other.bit_width && self.significant_bytes() == other.significant_bytes()
    }
}

impl Eq for RawWords {}

/// Packet payload, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum UserDataWords<M> {
    Raw(RawWords),
    Delegated { descriptor: [u8; 2], inner: M },
}

impl<M> UserDataWords<M> {
    pub fn is_delegated(&self) -> bool {
        matches!(self, UserDataWords::Delegated { .. })
    }
}

pub fn decode_udw<P: PayloadCodec>(
    reader: &mut AncReader<'_, '_>,
    header: &Header,
    codec: &P,
) -> Result<UserDataWords<P::Model>, AncError> {
    if !header.is_delegated() {
        let width = usize::from(header.word_count) * layout::UDW_WORD_BITS;
        let bytes = reader.read_raw(width)?;
        return Ok(UserDataWords::Raw(RawWords::new(bytes, width)));
    }

    let count = usize::from(header.word_count);
    if count < layout::DESCRIPTOR_LEN {
        return Err(AncError::ShortDescriptor {
            needed: layout::DESCRIPTOR_LEN,
            word_count: header.word_count,
        });
    }
    let bytes = reader.read_protected_bytes(count)?;
    let descriptor = [bytes[0], bytes[1]];
    let inner = codec.decode(&bytes[layout::DESCRIPTOR_LEN..])?;
    debug!(
        "delegated payload: descriptor {:02x}{:02x}, {} body bytes",
        descriptor[0],
        descriptor[1],
        count - layout::DESCRIPTOR_LEN
    );
    Ok(UserDataWords::Delegated { descriptor, inner })
}

/// Payload ready to be written, with the word count the header must carry.
#[derive(Debug)]
pub enum PreparedUdw<'p> {
    Raw { raw: &'p RawWords, word_count: u8 },
    Delegated { bytes: Vec<u8>, word_count: u8 },
}

impl PreparedUdw<'_> {
    pub fn word_count(&self) -> u8 {
        match self {
            PreparedUdw::Raw { word_count, .. } | PreparedUdw::Delegated { word_count, .. } => {
                *word_count
            }
        }
    }

    pub fn write(&self, writer: &mut BitWriter) -> Result<(), AncError> {
        match self {
            PreparedUdw::Raw { raw, .. } => writer.write_be(raw.bytes(), raw.bit_width())?,
            PreparedUdw::Delegated { bytes, .. } => word::write_bytes(writer, bytes)?,
        }
        Ok(())
    }
}

/// Serialize the payload and settle the effective word count.
///
/// Raw payloads keep the stored count and must be exactly `word_count * 10`
/// bits wide. Delegated payloads recompute the count as the serialized byte
/// length (descriptor included) divided by two.
pub fn prepare_udw<'p, P: PayloadCodec>(
    udw: &'p UserDataWords<P::Model>,
    word_count: u8,
    codec: &P,
) -> Result<PreparedUdw<'p>, AncError> {
    match udw {
        UserDataWords::Raw(raw) => {
            let expected = usize::from(word_count) * layout::UDW_WORD_BITS;
            if raw.bit_width() != expected {
                return Err(AncError::InconsistentWordCount {
                    word_count,
                    expected,
                    actual: raw.bit_width(),
                });
            }
            Ok(PreparedUdw::Raw { raw, word_count })
        }
        UserDataWords::Delegated { descriptor, inner } => {
            let body = codec.encode(inner)?;
            let mut bytes = Vec::with_capacity(layout::DESCRIPTOR_LEN + body.len());
            bytes.extend_from_slice(descriptor);
            bytes.extend_from_slice(&body);

            let byte_len = bytes.len();
            let word_count = u8::try_from(byte_len / 2)
                .map_err(|_| AncError::WordCountOverflow { byte_len })?;
            debug!(
                "delegated payload re-encoded: {} bytes, word count {}",
                byte_len, word_count
            );
            Ok(PreparedUdw::Delegated { bytes, word_count })
        }
    }
}
