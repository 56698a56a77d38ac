use serde::Serialize;

use super::error::AncError;
use super::layout;
use super::reader::AncReader;
use super::word;
use crate::bits::BitWriter;

/// Line and horizontal offset written by `encode`.
///
/// Decoded positions are never round-tripped; encoders emit these values
/// instead. The default is the pair of "unspecified position" markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub line_number: u16,
    pub horizontal_offset: u16,
}

impl Placement {
    pub const UNSPECIFIED: Placement = Placement {
        line_number: layout::LINE_NUMBER_UNSPECIFIED,
        horizontal_offset: layout::HORIZONTAL_OFFSET_UNSPECIFIED,
    };
}

impl Default for Placement {
    fn default() -> Self {
        Self::UNSPECIFIED
    }
}

/// Positional and identification fields of one packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    /// C: 0 for luma, 1 for color-difference.
    pub continuation: u8,
    pub line_number: u16,
    pub horizontal_offset: u16,
    /// S: whether `stream_number` is meaningful.
    pub field_flag: u8,
    pub stream_number: u8,
    pub did: u8,
    pub sdid: u8,
    /// Declared number of 10-bit user data words.
    pub word_count: u8,
}

impl Header {
    pub fn decode(reader: &mut AncReader<'_, '_>) -> Result<Self, AncError> {
        reader.require_bits(layout::HEADER_BITS)?;

        let continuation = reader.read_u8(layout::CONTINUATION_BITS)?;
        let line_number = reader.read_u16(layout::LINE_NUMBER_BITS)?;
        let horizontal_offset = reader.read_u16(layout::HORIZONTAL_OFFSET_BITS)?;
        let field_flag = reader.read_u8(layout::FIELD_FLAG_BITS)?;
        let stream_number = reader.read_u8(layout::STREAM_NUMBER_BITS)?;
        let did = reader.read_protected_byte()?;
        let sdid = reader.read_protected_byte()?;
        let word_count = reader.read_protected_byte()?;

        Ok(Self {
            continuation,
            line_number,
            horizontal_offset,
            field_flag,
            stream_number,
            did,
            sdid,
            word_count,
        })
    }

    /// Emit the header with `placement` in place of the stored position and
    /// `word_count` in place of the stored count.
    pub fn encode(
        &self,
        writer: &mut BitWriter,
        placement: Placement,
        word_count: u8,
    ) -> Result<(), AncError> {
        writer.write(u64::from(self.continuation), layout::CONTINUATION_BITS)?;
        writer.write(u64::from(placement.line_number), layout::LINE_NUMBER_BITS)?;
        writer.write(
            u64::from(placement.horizontal_offset),
            layout::HORIZONTAL_OFFSET_BITS,
        )?;
        writer.write(u64::from(self.field_flag), layout::FIELD_FLAG_BITS)?;
        writer.write(u64::from(self.stream_number), layout::STREAM_NUMBER_BITS)?;
        word::write_bytes(writer, &[self.did, self.sdid, word_count])?;
        Ok(())
    }

    pub fn is_delegated(&self) -> bool {
        is_delegated(self.did, self.sdid)
    }
}

/// Whether a DID/SDID pair carries the delegated (splice event) payload.
///
/// ```
/// use st291_core::is_delegated;
///
/// assert!(is_delegated(0x41, 0x07));
/// assert!(!is_delegated(0x41, 0x00));
/// ```
pub fn is_delegated(did: u8, sdid: u8) -> bool {
    did == layout::DELEGATED_DID && sdid == layout::DELEGATED_SDID
}
