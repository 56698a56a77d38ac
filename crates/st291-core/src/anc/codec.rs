use super::error::AncError;
use super::header::Placement;
use super::packet::{AncPacket, EncodedPacket};
use super::view::View;
use crate::bits::BitCursor;
use crate::delegate::{OpaquePayload, PayloadCodec};
use crate::tables::{DescriptionTable, StaticTable};

/// A payload codec and a description table bundled for repeated use.
///
/// # Examples
/// ```
/// use st291_core::{AncCodec, BitCursor};
///
/// let data = [
///     0x00, 0x90, 0x00, 0x00, 0x90, 0x60, 0x58, 0x02, 0xAB, 0x00, 0x00, 0x00,
/// ];
/// let codec = AncCodec::new();
/// let packet = codec.decode(&mut BitCursor::new(&data)).unwrap();
/// assert_eq!(packet.header.did, 0x41);
/// assert_eq!(packet.packet_info, "Bar data / AFD (ST 2016-3)");
///
/// let encoded = codec.encode(&packet).unwrap();
/// assert_eq!(encoded.bit_len % 32, 0);
/// ```
#[derive(Debug, Clone)]
pub struct AncCodec<P = OpaquePayload, T = StaticTable> {
    payload: P,
    table: T,
}

impl AncCodec {
    /// Pass-through payload codec with the built-in description table.
    pub fn new() -> Self {
        Self::with_parts(OpaquePayload, StaticTable::builtin())
    }
}

impl Default for AncCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PayloadCodec, T: DescriptionTable> AncCodec<P, T> {
    pub fn with_parts(payload: P, table: T) -> Self {
        Self { payload, table }
    }

    pub fn payload_codec(&self) -> &P {
        &self.payload
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    pub fn decode(&self, cursor: &mut BitCursor<'_>) -> Result<AncPacket<P::Model>, AncError> {
        AncPacket::decode(cursor, &self.payload, &self.table)
    }

    /// Decode one packet from the start of `data`.
    pub fn decode_bytes(&self, data: &[u8]) -> Result<AncPacket<P::Model>, AncError> {
        self.decode(&mut BitCursor::new(data))
    }

    /// Encode with the "unspecified position" placement.
    pub fn encode(&self, packet: &AncPacket<P::Model>) -> Result<EncodedPacket, AncError> {
        self.encode_with(packet, Placement::UNSPECIFIED)
    }

    pub fn encode_with(
        &self,
        packet: &AncPacket<P::Model>,
        placement: Placement,
    ) -> Result<EncodedPacket, AncError> {
        packet.encode(&self.payload, placement)
    }

    pub fn plain_view(&self, packet: &AncPacket<P::Model>) -> View {
        packet.plain_view(&self.payload)
    }

    pub fn display_view(&self, packet: &AncPacket<P::Model>) -> View {
        packet.display_view(&self.payload, &self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::AncCodec;
    use crate::anc::error::AncError;
    use crate::delegate::{PayloadCodec, PayloadError};
    use crate::tables::StaticTable;
    use serde_json::{Value, json};

    /// Splice-event stand-in: a big-endian opID followed by opaque bytes.
    #[derive(Debug, Clone, PartialEq)]
    struct SpliceStub {
        op_id: u16,
        rest: Vec<u8>,
    }

    struct SpliceStubCodec;

    impl PayloadCodec for SpliceStubCodec {
        type Model = SpliceStub;

        fn decode(&self, body: &[u8]) -> Result<SpliceStub, PayloadError> {
            if body.len() < 2 {
                return Err(PayloadError::Malformed("missing opID".to_string()));
            }
            Ok(SpliceStub {
                op_id: u16::from_be_bytes([body[0], body[1]]),
                rest: body[2..].to_vec(),
            })
        }

        fn encode(&self, model: &SpliceStub) -> Result<Vec<u8>, PayloadError> {
            let mut bytes = model.op_id.to_be_bytes().to_vec();
            bytes.extend_from_slice(&model.rest);
            Ok(bytes)
        }

        fn to_view(&self, model: &SpliceStub, human_readable: bool) -> Value {
            if human_readable {
                json!({ "opID": format!("{:#06x}", model.op_id) })
            } else {
                json!({ "opID": model.op_id })
            }
        }
    }

    fn delegated_bytes(body: &[u8]) -> Vec<u8> {
        let mut writer = crate::bits::BitWriter::new();
        writer.write(0, 1).unwrap();
        writer.write(9, 11).unwrap();
        writer.write(0, 12).unwrap();
        writer.write(0, 1).unwrap();
        writer.write(0, 7).unwrap();
        let mut payload = vec![0xFF, 0xFF];
        payload.extend_from_slice(body);
        crate::anc::word::write_bytes(&mut writer, &[0x41, 0x07, payload.len() as u8]).unwrap();
        crate::anc::word::write_bytes(&mut writer, &payload).unwrap();
        writer.write(1, 1).unwrap();
        writer.write(0x0AA, 9).unwrap();
        writer.finish().0
    }

    #[test]
    fn delegated_payload_goes_through_codec() {
        let codec = AncCodec::with_parts(
            SpliceStubCodec,
            StaticTable::new().with_sdid(0x41, 0x07, "SCTE-104"),
        );
        let data = delegated_bytes(&[0x00, 0x01, 0xAA]);
        let packet = codec.decode_bytes(&data).unwrap();
        assert!(packet.is_delegated());
        assert_eq!(packet.packet_info, "SCTE-104");
        assert_eq!(packet.checksum_word, 0x0AA);

        let plain = codec.plain_view(&packet);
        let display = codec.display_view(&packet);
        assert_eq!(plain["UDW"], json!({ "opID": 1 }));
        assert_eq!(display["UDW"], json!({ "opID": "0x0001" }));
    }

    #[test]
    fn delegated_encode_halves_word_count() {
        let codec = AncCodec::with_parts(SpliceStubCodec, StaticTable::new());
        let data = delegated_bytes(&[0x00, 0x01, 0xAA, 0xBB]);
        let packet = codec.decode_bytes(&data).unwrap();
        assert_eq!(packet.header.word_count, 6);

        let encoded = codec.encode(&packet).unwrap();
        assert_eq!(encoded.word_count, 3);
        // 62 header + 6 protected bytes + 10 checksum + padding for dc=3
        assert_eq!(encoded.bit_len, 62 + 60 + 10 + (32 - (30 + 8) % 32));
    }

    #[test]
    fn payload_codec_errors_propagate() {
        let codec = AncCodec::with_parts(SpliceStubCodec, StaticTable::new());
        let data = delegated_bytes(&[0x00]);
        let err = codec.decode_bytes(&data).unwrap_err();
        assert!(matches!(err, AncError::Payload(PayloadError::Malformed(_))));
    }
}
