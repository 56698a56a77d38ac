//! Bit-level access to packed wire data.
//!
//! `BitCursor` reads MSB-first fields of arbitrary width from a borrowed
//! buffer; `BitWriter` is its encode-side counterpart. Neither knows about
//! ancillary packets: protocol conventions (protection bits, checksum parity)
//! live in `anc::reader` and `anc::word`.
//!
//! ```
//! use st291_core::{BitCursor, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write(0b101, 3).unwrap();
//! writer.write_be(&[0x03, 0xFF], 10).unwrap();
//! let (bytes, bit_len) = writer.finish();
//! assert_eq!(bit_len, 13);
//!
//! let mut cursor = BitCursor::with_bit_len(&bytes, bit_len);
//! assert_eq!(cursor.read(3).unwrap(), 0b101);
//! assert_eq!(cursor.read_be(10).unwrap(), vec![0x03, 0xFF]);
//! assert!(cursor.read(1).is_err());
//! ```

pub mod cursor;
pub mod error;
pub mod hex;
pub mod writer;

pub use cursor::BitCursor;
pub use error::BitError;
pub use writer::BitWriter;
