//! SMPTE ST 291 ancillary packet decoding and encoding.
//!
//! A packet is a 32-bit position header (C, line, horizontal offset, S,
//! stream number), three protected identification words (DID, SDID, data
//! count), the user data words, a checksum word behind one inverse-parity
//! bit, and zero padding toward a 32-bit boundary.
//!
//! The payload path is chosen once from DID/SDID: 0x41/0x07 (SCTE-104) is
//! delegated to a `PayloadCodec` as protected bytes; everything else is an
//! unprotected `word_count * 10`-bit integer. Encoding is pure: positions are
//! replaced by a `Placement` (the "unspecified" markers by default), the
//! checksum word is carried over as decoded, and delegated payloads get their
//! word count recomputed as serialized bytes / 2.
//!
//! Widths and constants live in `layout`, bit conventions in `reader` and
//! `word`, orchestration in `packet`.
//!
//! Version française (résumé):
//! Décodage/encodage bit à bit d'un paquet ANC ST 291. Les champs de
//! position ne sont pas conservés à l'encodage (0x7FF/0xFFF), la somme de
//! contrôle est recopiée telle quelle, et la charge SCTE-104 est déléguée à
//! un `PayloadCodec`.

pub mod codec;
pub mod error;
pub mod header;
pub mod layout;
pub mod packet;
pub mod payload;
pub mod reader;
pub mod view;
pub mod word;

pub use codec::AncCodec;
pub use error::AncError;
pub use header::{Header, Placement, is_delegated};
pub use packet::{AncPacket, EncodedPacket};
pub use payload::{RawWords, UserDataWords};
pub use view::View;
