//! Field-name -> value projections of a packet.
//!
//! Views are owned `serde_json` maps in wire order; building one never
//! touches the packet. The display view renders identifiers in hex and
//! annotates values known to the description table.

use serde_json::{Map, Value};

use super::packet::AncPacket;
use super::payload::{RawWords, UserDataWords};
use crate::delegate::PayloadCodec;
use crate::tables::DescriptionTable;

pub type View = Map<String, Value>;

/// View field names.
pub mod fields {
    pub const CONTINUATION: &str = "C";
    pub const LINE_NUMBER: &str = "Line Number";
    pub const HORIZONTAL_OFFSET: &str = "Horizontal Offset";
    pub const FIELD_FLAG: &str = "S";
    pub const STREAM_NUMBER: &str = "StreamNum";
    pub const CHECKSUM_WORD: &str = "Checksum Word";
    pub const PACKET_INFO: &str = "Packet Info";
    pub const DID: &str = "DID";
    pub const SDID: &str = "SDID";
    pub const DATA_COUNT: &str = "Data Count";
    pub const UDW: &str = "UDW";
}

pub fn plain_view<P: PayloadCodec>(packet: &AncPacket<P::Model>, codec: &P) -> View {
    let mut view = base_view(packet);
    view.insert(fields::DID.into(), packet.header.did.into());
    view.insert(fields::SDID.into(), packet.header.sdid.into());
    view.insert(fields::DATA_COUNT.into(), packet.header.word_count.into());
    view.insert(
        fields::UDW.into(),
        udw_view(&packet.user_data_words, codec, false),
    );
    view
}

/// Human-oriented view.
///
/// # Examples
/// ```
/// use st291_core::{AncCodec, BitCursor};
///
/// // C=0, line 9, offset 0, S=0, stream 0, DID 0x41, SDID 0x05, DC 0
/// let data = [
///     0x00, 0x90, 0x00, 0x00, 0x90, 0x60, 0x58, 0x02, 0xAB, 0x00, 0x00, 0x00,
/// ];
/// let codec = AncCodec::new();
/// let packet = codec.decode(&mut BitCursor::new(&data)).unwrap();
/// let view = codec.display_view(&packet);
/// assert_eq!(view["DID"], "0x41");
/// assert_eq!(view["Checksum Word"], "0xab");
/// ```
pub fn display_view<P, T>(packet: &AncPacket<P::Model>, codec: &P, table: &T) -> View
where
    P: PayloadCodec,
    T: DescriptionTable + ?Sized,
{
    let mut view = base_view(packet);
    view.insert(
        fields::CHECKSUM_WORD.into(),
        format!("{:#x}", packet.checksum_word).into(),
    );
    view.insert(fields::DID.into(), format!("{:#x}", packet.header.did).into());
    view.insert(
        fields::SDID.into(),
        format!("{:#x}", packet.header.sdid).into(),
    );
    view.insert(fields::DATA_COUNT.into(), packet.header.word_count.into());

    for (field, value) in view.iter_mut() {
        let Some(raw) = value.as_u64() else {
            continue;
        };
        if let Some(description) = table.lookup_value(field, raw) {
            *value = Value::String(format!("({raw}) {description}"));
        }
    }

    view.insert(
        fields::UDW.into(),
        udw_view(&packet.user_data_words, codec, true),
    );
    view
}

fn base_view<M>(packet: &AncPacket<M>) -> View {
    let header = &packet.header;
    let mut view = View::new();
    view.insert(fields::CONTINUATION.into(), header.continuation.into());
    view.insert(fields::LINE_NUMBER.into(), header.line_number.into());
    view.insert(
        fields::HORIZONTAL_OFFSET.into(),
        header.horizontal_offset.into(),
    );
    view.insert(fields::FIELD_FLAG.into(), header.field_flag.into());
    view.insert(fields::STREAM_NUMBER.into(), header.stream_number.into());
    view.insert(fields::CHECKSUM_WORD.into(), packet.checksum_word.into());
    view.insert(
        fields::PACKET_INFO.into(),
        packet.packet_info.clone().into(),
    );
    view
}

fn udw_view<P: PayloadCodec>(
    udw: &UserDataWords<P::Model>,
    codec: &P,
    human_readable: bool,
) -> Value {
    match udw {
        UserDataWords::Raw(raw) => raw_view(raw),
        UserDataWords::Delegated { inner, .. } => codec.to_view(inner, human_readable),
    }
}

/// Numbers up to 64 bits, `0x` hex beyond.
fn raw_view(raw: &RawWords) -> Value {
    match raw.as_u64() {
        Some(value) => value.into(),
        None => raw.to_hex().into(),
    }
}

#[cfg(test)]
mod tests {
    use super::{display_view, fields, plain_view};
    use crate::anc::header::Header;
    use crate::anc::packet::AncPacket;
    use crate::anc::payload::{RawWords, UserDataWords};
    use crate::delegate::OpaquePayload;
    use crate::tables::StaticTable;
    use serde_json::json;

    fn packet(did: u8, sdid: u8, udw: UserDataWords<Vec<u8>>) -> AncPacket {
        AncPacket {
            header: Header {
                continuation: 1,
                line_number: 0x7FF,
                horizontal_offset: 0x20,
                field_flag: 0,
                stream_number: 2,
                did,
                sdid,
                word_count: 1,
            },
            user_data_words: udw,
            checksum_word: 0x1AB,
            packet_info: "CEA-708".to_string(),
        }
    }

    fn raw(value: u64) -> UserDataWords<Vec<u8>> {
        UserDataWords::Raw(RawWords::from_u64(value, 1))
    }

    #[test]
    fn plain_view_keeps_numbers_in_wire_order() {
        let view = plain_view(&packet(0x61, 0x01, raw(0x155)), &OpaquePayload);
        let keys: Vec<&str> = view.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                fields::CONTINUATION,
                fields::LINE_NUMBER,
                fields::HORIZONTAL_OFFSET,
                fields::FIELD_FLAG,
                fields::STREAM_NUMBER,
                fields::CHECKSUM_WORD,
                fields::PACKET_INFO,
                fields::DID,
                fields::SDID,
                fields::DATA_COUNT,
                fields::UDW,
            ]
        );
        assert_eq!(view[fields::DID], json!(0x61));
        assert_eq!(view[fields::CHECKSUM_WORD], json!(0x1AB));
        assert_eq!(view[fields::UDW], json!(0x155));
    }

    #[test]
    fn display_view_hex_and_annotations() {
        let table = StaticTable::new()
            .with_value(fields::LINE_NUMBER, 0x7FF, "Without specific line location")
            .with_value(fields::CONTINUATION, 1, "Color-difference");
        let view = display_view(&packet(0x41, 0x05, raw(3)), &OpaquePayload, &table);

        assert_eq!(view[fields::DID], json!("0x41"));
        assert_eq!(view[fields::SDID], json!("0x5"));
        assert_eq!(view[fields::CHECKSUM_WORD], json!("0x1ab"));
        assert_eq!(
            view[fields::LINE_NUMBER],
            json!("(2047) Without specific line location")
        );
        assert_eq!(view[fields::CONTINUATION], json!("(1) Color-difference"));
        assert_eq!(view[fields::HORIZONTAL_OFFSET], json!(0x20));
        assert_eq!(view[fields::PACKET_INFO], json!("CEA-708"));
    }

    #[test]
    fn delegated_views_ask_for_readable_rendering() {
        let udw = UserDataWords::Delegated {
            descriptor: [0xFF, 0xFF],
            inner: vec![0x00, 0x10],
        };
        let pkt = packet(0x41, 0x07, udw);
        let plain = plain_view(&pkt, &OpaquePayload);
        let display = display_view(&pkt, &OpaquePayload, &StaticTable::new());
        assert_eq!(plain[fields::UDW], json!([0, 16]));
        assert_eq!(display[fields::UDW], json!("0010"));
    }

    #[test]
    fn wide_raw_payload_renders_as_hex() {
        let mut bytes = vec![0x0F];
        bytes.extend_from_slice(&[0xFF; 8]);
        let mut pkt = packet(0x62, 0x01, UserDataWords::Raw(RawWords::new(bytes, 70)));
        pkt.header.word_count = 7;
        let view = plain_view(&pkt, &OpaquePayload);
        assert_eq!(view[fields::UDW], json!("0xfffffffffffffffff"));
    }

    #[test]
    fn views_do_not_touch_packet() {
        let pkt = packet(0x61, 0x01, raw(1));
        let before = pkt.clone();
        let _ = plain_view(&pkt, &OpaquePayload);
        let _ = display_view(&pkt, &OpaquePayload, &StaticTable::builtin());
        assert_eq!(pkt, before);
    }
}
