use std::fmt;

use log::debug;
use serde::Serialize;

use super::error::AncError;
use super::header::{Header, Placement};
use super::layout;
use super::payload::{UserDataWords, decode_udw, prepare_udw};
use super::reader::AncReader;
use super::view::{self, View};
use crate::bits::{BitCursor, BitWriter, hex};
use crate::delegate::PayloadCodec;
use crate::tables::{DescriptionTable, packet_info};

/// One decoded ST 291 ancillary packet.
///
/// `M` is the structured model of the delegated payload codec (raw bytes for
/// `OpaquePayload`). Packets are plain values: encoding never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AncPacket<M = Vec<u8>> {
    pub header: Header,
    pub user_data_words: UserDataWords<M>,
    /// 9-bit checksum as found on the wire (not recomputed).
    pub checksum_word: u16,
    /// Description resolved from DID/SDID at decode time; empty when unknown.
    pub packet_info: String,
}

impl<M: Clone + fmt::Debug> AncPacket<M> {
    /// Decode one packet starting at the cursor position.
    ///
    /// The cursor only advances when the whole packet decodes; on error it is
    /// left where it was and no partial packet is produced.
    ///
    /// # Errors
    /// `AncError::TruncatedInput` when the buffer ends inside the packet,
    /// `AncError::ShortDescriptor` or `AncError::Payload` on the delegated path.
    pub fn decode<P, T>(cursor: &mut BitCursor<'_>, codec: &P, table: &T) -> Result<Self, AncError>
    where
        P: PayloadCodec<Model = M>,
        T: DescriptionTable + ?Sized,
    {
        let start = cursor.position();
        let mut scratch = *cursor;
        let mut reader = AncReader::new(&mut scratch);

        let header = Header::decode(&mut reader)?;
        let user_data_words = decode_udw(&mut reader, &header, codec)?;
        let checksum_word = reader.read_checksum()?;
        let packet_info = packet_info(table, header.did, header.sdid);

        debug!(
            "decoded ANC packet did={:#04x} sdid={:#04x} dc={} ({} bits from {})",
            header.did,
            header.sdid,
            header.word_count,
            scratch.position() - start,
            start
        );
        *cursor = scratch;

        Ok(Self {
            header,
            user_data_words,
            checksum_word,
            packet_info,
        })
    }

    /// Re-serialize the packet with `placement` as its position.
    ///
    /// The checksum word is carried over unchanged. Delegated payloads have
    /// their word count recomputed; the effective count is reported in the
    /// result and drives the trailing padding.
    pub fn encode<P>(&self, codec: &P, placement: Placement) -> Result<EncodedPacket, AncError>
    where
        P: PayloadCodec<Model = M>,
    {
        let udw = prepare_udw(&self.user_data_words, self.header.word_count, codec)?;
        let word_count = udw.word_count();
        if word_count != self.header.word_count {
            debug!(
                "word count rewritten on encode: {} -> {} (did={:#04x} sdid={:#04x})",
                self.header.word_count, word_count, self.header.did, self.header.sdid
            );
        }

        let mut writer = BitWriter::new();
        self.header.encode(&mut writer, placement, word_count)?;
        udw.write(&mut writer)?;
        write_checksum(&mut writer, self.checksum_word)?;
        writer.pad_zeros(layout::padding_bits(word_count));

        let (bytes, bit_len) = writer.finish();
        debug!("encoded ANC packet: {} bits", bit_len);
        Ok(EncodedPacket {
            bytes,
            bit_len,
            word_count,
        })
    }

    pub fn is_delegated(&self) -> bool {
        self.user_data_words.is_delegated()
    }

    pub fn plain_view<P>(&self, codec: &P) -> View
    where
        P: PayloadCodec<Model = M>,
    {
        view::plain_view(self, codec)
    }

    pub fn display_view<P, T>(&self, codec: &P, table: &T) -> View
    where
        P: PayloadCodec<Model = M>,
        T: DescriptionTable + ?Sized,
    {
        view::display_view(self, codec, table)
    }
}

/// Inverse-parity bit (complement of the checksum MSB) followed by the
/// 9-bit checksum.
fn write_checksum(writer: &mut BitWriter, checksum_word: u16) -> Result<(), AncError> {
    let parity = u64::from(checksum_word & layout::CHECKSUM_MSB == 0);
    writer.write(parity, layout::CHECKSUM_PARITY_BITS)?;
    writer.write(u64::from(checksum_word), layout::CHECKSUM_BITS)?;
    Ok(())
}

/// Bit sequence produced by `AncPacket::encode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPacket {
    /// Encoded bits, MSB first; the last byte is zero-filled past `bit_len`.
    pub bytes: Vec<u8>,
    pub bit_len: usize,
    /// Word count written into the header.
    pub word_count: u8,
}

impl EncodedPacket {
    pub fn cursor(&self) -> BitCursor<'_> {
        BitCursor::with_bit_len(&self.bytes, self.bit_len)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}
