use super::error::BitError;

#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn write(&mut self, value: u64, width: usize) -> Result<(), BitError> {
        if width > 64 {
            return Err(BitError::InvalidCount { count: width });
        }
        if width < 64 && value >> width != 0 {
            return Err(BitError::ValueTooWide { value, width });
        }
        for shift in (0..width).rev() {
            self.push_bit((value >> shift) & 1 == 1);
        }
        Ok(())
    }

    pub fn write_be(&mut self, bytes: &[u8], width: usize) -> Result<(), BitError> {
        let total = bytes.len() * 8;
        let start = total.saturating_sub(width);
        if let Some(first_set) = (0..start).find(|&index| bit_at(bytes, index)) {
            return Err(BitError::FieldTooWide {
                significant: total - first_set,
                width,
            });
        }
        self.pad_zeros(width.saturating_sub(total));
        for index in start..total {
            self.push_bit(bit_at(bytes, index));
        }
        Ok(())
    }

    pub fn pad_zeros(&mut self, count: usize) {
        for _ in 0..count {
            self.push_bit(false);
        }
    }

    pub fn finish(self) -> (Vec<u8>, usize) {
        (self.bytes, self.bit_len)
    }

    fn push_bit(&mut self, bit: bool) {
        let offset = self.bit_len % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 0x80 >> offset;
            }
        }
        self.bit_len += 1;
    }
}

fn bit_at(bytes: &[u8], index: usize) -> bool {
    (bytes[index / 8] >> (7 - index % 8)) & 1 == 1
}
