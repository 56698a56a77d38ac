use super::error::AncError;
use super::layout;
use crate::bits::BitCursor;

pub struct AncReader<'c, 'a> {
    cursor: &'c mut BitCursor<'a>,
}

impl<'c, 'a> AncReader<'c, 'a> {
    pub fn new(cursor: &'c mut BitCursor<'a>) -> Self {
        Self { cursor }
    }

    pub fn require_bits(&self, needed: usize) -> Result<(), AncError> {
        let remaining = self.cursor.remaining();
        if remaining < needed {
            return Err(AncError::TruncatedInput {
                requested: needed,
                remaining,
            });
        }
        Ok(())
    }

    pub fn read_field(&mut self, width: usize) -> Result<u64, AncError> {
        Ok(self.cursor.read(width)?)
    }

    pub fn read_u8(&mut self, width: usize) -> Result<u8, AncError> {
        Ok(self.read_field(width)? as u8)
    }

    pub fn read_u16(&mut self, width: usize) -> Result<u16, AncError> {
        Ok(self.read_field(width)? as u16)
    }

    pub fn read_protected_byte(&mut self) -> Result<u8, AncError> {
        self.cursor.skip(layout::PROTECTION_BITS)?;
        self.read_u8(layout::PROTECTED_VALUE_BITS)
    }

    pub fn read_protected_bytes(&mut self, count: usize) -> Result<Vec<u8>, AncError> {
        self.require_bits(count * layout::PROTECTED_WORD_BITS)?;
        (0..count).map(|_| self.read_protected_byte()).collect()
    }

    pub fn read_raw(&mut self, width: usize) -> Result<Vec<u8>, AncError> {
        Ok(self.cursor.read_be(width)?)
    }

    pub fn skip_checksum_parity(&mut self) -> Result<(), AncError> {
        Ok(self.cursor.skip(layout::CHECKSUM_PARITY_BITS)?)
    }

    pub fn read_checksum(&mut self) -> Result<u16, AncError> {
        self.skip_checksum_parity()?;
        self.read_u16(layout::CHECKSUM_BITS)
    }
}
