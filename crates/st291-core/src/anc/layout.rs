//! ST 291 packet field widths and wire constants (source of truth).

pub const CONTINUATION_BITS: usize = 1;
pub const LINE_NUMBER_BITS: usize = 11;
pub const HORIZONTAL_OFFSET_BITS: usize = 12;
pub const FIELD_FLAG_BITS: usize = 1;
pub const STREAM_NUMBER_BITS: usize = 7;

pub const PROTECTION_BITS: usize = 2;
pub const PROTECTED_VALUE_BITS: usize = 8;
pub const PROTECTED_WORD_BITS: usize = PROTECTION_BITS + PROTECTED_VALUE_BITS;

pub const UDW_WORD_BITS: usize = 10;

pub const CHECKSUM_PARITY_BITS: usize = 1;
pub const CHECKSUM_BITS: usize = 9;
pub const CHECKSUM_MSB: u16 = 1 << (CHECKSUM_BITS - 1);

pub const POSITION_BITS: usize = CONTINUATION_BITS
    + LINE_NUMBER_BITS
    + HORIZONTAL_OFFSET_BITS
    + FIELD_FLAG_BITS
    + STREAM_NUMBER_BITS;
pub const HEADER_BITS: usize = POSITION_BITS + 3 * PROTECTED_WORD_BITS;

pub const ALIGNMENT_BITS: usize = 32;

// "Without specific line/horizontal location" markers.
pub const LINE_NUMBER_UNSPECIFIED: u16 = 0x7FF;
pub const HORIZONTAL_OFFSET_UNSPECIFIED: u16 = 0xFFF;

pub const DELEGATED_DID: u8 = 0x41;
pub const DELEGATED_SDID: u8 = 0x07;
pub const DESCRIPTOR_LEN: usize = 2;

// An already aligned DID..checksum run still gets a full 32-bit pad word.
pub fn padding_bits(word_count: u8) -> usize {
    let udw_bits = usize::from(word_count) * UDW_WORD_BITS;
    ALIGNMENT_BITS - ((udw_bits + PROTECTED_WORD_BITS - PROTECTION_BITS) % ALIGNMENT_BITS)
}

#[cfg(test)]
mod tests {
    use super::{HEADER_BITS, POSITION_BITS, padding_bits};

    #[test]
    fn header_is_62_bits() {
        assert_eq!(POSITION_BITS, 32);
        assert_eq!(HEADER_BITS, 62);
    }

    #[test]
    fn padding_for_single_word() {
        assert_eq!(padding_bits(1), 14);
    }

    #[test]
    fn padding_for_aligned_lengths_is_a_full_word() {
        // 16 * 10 + 8 = 168, 168 % 32 = 8
        assert_eq!(padding_bits(16), 24);
        // 12 * 10 + 8 = 128
        assert_eq!(padding_bits(12), 32);
    }

    #[test]
    fn padding_for_empty_payload() {
        assert_eq!(padding_bits(0), 24);
    }
}
