//! st291 core library: bit-exact codec for SMPTE ST 291 ancillary packets.
//!
//! A single ANC packet is decoded from a bit cursor into an `AncPacket`,
//! projected into plain or display views, and re-encoded into a padded bit
//! sequence. The layers mirror the wire: `bits` (cursor/writer), `anc`
//! (layout/reader/word/header/payload/packet), plus the injected
//! collaborators `delegate::PayloadCodec` and `tables::DescriptionTable`.
//! Decoding and encoding are synchronous, allocation-light and free of I/O.
//!
//! Invariants:
//! - The payload kind is delegated iff DID/SDID is 0x41/0x07.
//! - Encoding never mutates a packet and always writes the given placement
//!   (0x7FF/0xFFF by default) instead of the decoded position.
//! - A truncated buffer fails the whole decode; no partial packet exists.
//!
//! Version française (résumé):
//! Cette crate décode et réencode un paquet ANC ST 291 au bit près :
//! curseur de bits -> en-tête -> mots utilisateur (bruts ou délégués) ->
//! vues. Les tables de description et le codec SCTE-104 sont injectés.
//!
//! # Examples
//! ```
//! use st291_core::{AncCodec, BitCursor, Placement};
//!
//! let data = [
//!     0x00, 0x90, 0x00, 0x00, 0x90, 0x60, 0x58, 0x02, 0xAB, 0x00, 0x00, 0x00,
//! ];
//! let codec = AncCodec::new();
//! let packet = codec.decode(&mut BitCursor::new(&data))?;
//! assert_eq!(packet.header.line_number, 9);
//!
//! let encoded = codec.encode_with(&packet, Placement::UNSPECIFIED)?;
//! let again = codec.decode(&mut encoded.cursor())?;
//! assert_eq!(again.header.line_number, 0x7FF);
//! # Ok::<(), st291_core::AncError>(())
//! ```

pub mod anc;
pub mod bits;
pub mod delegate;
pub mod tables;

pub use anc::{
    AncCodec, AncError, AncPacket, EncodedPacket, Header, Placement, RawWords, UserDataWords,
    View, is_delegated,
};
pub use bits::{BitCursor, BitError, BitWriter};
pub use delegate::{OpaquePayload, PayloadCodec, PayloadError};
pub use tables::{DescriptionTable, DidEntry, StaticTable, packet_info};
