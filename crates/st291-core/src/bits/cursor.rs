use super::error::BitError;

#[derive(Debug, Clone, Copy)]
pub struct BitCursor<'a> {
    data: &'a [u8],
    bit_len: usize,
    position: usize,
}

impl<'a> BitCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_len: data.len() * 8,
            position: 0,
        }
    }

    pub fn with_bit_len(data: &'a [u8], bit_len: usize) -> Self {
        Self {
            data,
            bit_len: bit_len.min(data.len() * 8),
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.bit_len - self.position
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    // Position is left untouched on failure.
    pub fn read(&mut self, count: usize) -> Result<u64, BitError> {
        if count == 0 || count > 64 {
            return Err(BitError::InvalidCount { count });
        }
        self.require(count)?;

        let mut value = 0u64;
        let mut remaining = count;
        while remaining > 0 {
            let byte = self.data[self.position / 8];
            let bit_offset = self.position % 8;
            let available = 8 - bit_offset;
            let take = remaining.min(available);
            let mask = ((1u16 << take) - 1) as u8;
            let bits = (byte >> (available - take)) & mask;

            value = (value << take) | u64::from(bits);
            self.position += take;
            remaining -= take;
        }
        Ok(value)
    }

    pub fn skip(&mut self, count: usize) -> Result<(), BitError> {
        self.require(count)?;
        self.position += count;
        Ok(())
    }

    pub fn read_be(&mut self, count: usize) -> Result<Vec<u8>, BitError> {
        self.require(count)?;

        let mut bytes = Vec::with_capacity(count.div_ceil(8));
        let lead = count % 8;
        if lead > 0 {
            bytes.push(self.read(lead)? as u8);
        }
        for _ in 0..count / 8 {
            bytes.push(self.read(8)? as u8);
        }
        Ok(bytes)
    }

    fn require(&self, count: usize) -> Result<(), BitError> {
        if count > self.remaining() {
            return Err(BitError::Truncated {
                requested: count,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }
}
