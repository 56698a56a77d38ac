use super::StaticTable;
use crate::anc::view::fields;

const SDID_ENTRIES: &[(u8, u8, &str)] = &[
    (0x41, 0x01, "Payload identification (ST 352)"),
    (0x41, 0x05, "Bar data / AFD (ST 2016-3)"),
    (0x41, 0x06, "Pan-scan data (ST 2016-4)"),
    (0x41, 0x07, "ANSI/SCTE 104 messages"),
    (0x41, 0x08, "DVB/SCTE VBI data (ST 2031)"),
    (0x43, 0x01, "Inter-station control data (ITU-R BT.1685)"),
    (0x43, 0x02, "Subtitling distribution packet (RDD 8)"),
    (0x43, 0x03, "ANC multipacket (RDD 8)"),
    (0x45, 0x01, "Compressed audio metadata (ST 2020-1)"),
    (0x50, 0x01, "WSS data (RDD 8)"),
    (0x51, 0x01, "Film transfer and restoration data (RP 215)"),
    (0x5F, 0xDF, "ARIB STD-B37 HD captions"),
    (0x60, 0x60, "Ancillary time code (ST 12-2)"),
    (0x61, 0x01, "CEA-708 data (ST 334-1)"),
    (0x61, 0x02, "CEA-608 data (ST 334-1)"),
    (0x62, 0x01, "Program description (RP 207)"),
    (0x62, 0x02, "Data broadcast (ST 334-1)"),
    (0x62, 0x03, "VBI data (RP 208)"),
    (0x64, 0x64, "Time code, LTC (RP 196)"),
    (0x64, 0x7F, "Time code, VITC (RP 196)"),
];

const DID_ENTRIES: &[(u8, &str)] = &[
    (0x80, "Packet marked for deletion"),
    (0x84, "End marker (ST 291)"),
    (0x88, "Start marker (ST 291)"),
];

const VALUE_ENTRIES: &[(&str, u64, &str)] = &[
    (fields::CONTINUATION, 0, "Luma (Y) data stream"),
    (fields::CONTINUATION, 1, "Color-difference data stream"),
    (fields::LINE_NUMBER, 0x7FE, "Any line after the switching point"),
    (fields::LINE_NUMBER, 0x7FF, "Without specific line location"),
    (fields::HORIZONTAL_OFFSET, 0xFFD, "Between SAV and EAV"),
    (fields::HORIZONTAL_OFFSET, 0xFFE, "Within HANC data space"),
    (fields::HORIZONTAL_OFFSET, 0xFFF, "Without specific horizontal location"),
    (fields::FIELD_FLAG, 0, "StreamNum not in use"),
    (fields::FIELD_FLAG, 1, "StreamNum identifies the source stream"),
];

pub(super) fn table() -> StaticTable {
    let table = SDID_ENTRIES
        .iter()
        .fold(StaticTable::new(), |table, &(did, sdid, text)| {
            table.with_sdid(did, sdid, text)
        });
    let table = DID_ENTRIES
        .iter()
        .fold(table, |table, &(did, text)| table.with_did(did, text));
    VALUE_ENTRIES
        .iter()
        .fold(table, |table, &(field, raw, text)| {
            table.with_value(field, raw, text)
        })
}
