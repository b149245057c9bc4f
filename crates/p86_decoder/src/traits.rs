use crate::{DecodeError, DecodeOptions, ModRegRM, Result};
use p86_instruction::{Immediate, OperandSize};

pub trait OpCodeExt {
    fn operand_size(self) -> OperandSize;
}

impl OpCodeExt for u8 {
    fn operand_size(self) -> OperandSize {
        if self & 1 == 0 {
            OperandSize::Byte
        } else {
            OperandSize::Word
        }
    }
}

pub trait ReadExt {
    fn read_u8(&mut self) -> Result<u8>;

    fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes([self.read_u8()?, self.read_u8()?]))
    }

    fn read_mrrm(&mut self, options: DecodeOptions) -> Result<ModRegRM>;

    fn read_immediate(&mut self, operand_size: OperandSize) -> Result<Immediate>;

    fn read_sign_extended(&mut self) -> Result<Immediate>;

    fn read_displacement(&mut self, operand_size: OperandSize) -> Result<i16>;
}

impl<T: Iterator<Item = u8>> ReadExt for T {
    fn read_u8(&mut self) -> Result<u8> {
        self.next().ok_or(DecodeError::MalformedStream)
    }

    fn read_mrrm(&mut self, options: DecodeOptions) -> Result<ModRegRM> {
        let mrrm_byte = self.read_u8()?;
        ModRegRM::try_from_byte(mrrm_byte, self, options)
    }

    fn read_immediate(&mut self, operand_size: OperandSize) -> Result<Immediate> {
        Ok(match operand_size {
            OperandSize::Byte => Immediate::Byte(self.read_u8()?),
            OperandSize::Word => Immediate::Word(self.read_u16()?),
        })
    }

    fn read_sign_extended(&mut self) -> Result<Immediate> {
        Ok(Immediate::SignExtended(self.read_u8()? as i8))
    }

    fn read_displacement(&mut self, operand_size: OperandSize) -> Result<i16> {
        Ok(match operand_size {
            OperandSize::Byte => self.read_u8()? as i8 as i16,
            OperandSize::Word => self.read_u16()? as i16,
        })
    }
}

/// Counts the bytes pulled from the wrapped iterator, so the size of an instruction is always
/// the number of bytes actually read while decoding it.
pub(crate) struct ByteCounter<I> {
    inner: I,
    consumed: usize,
}

impl<I: Iterator<Item = u8>> ByteCounter<I> {
    pub fn new(inner: I) -> Self {
        Self { inner, consumed: 0 }
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl<I: Iterator<Item = u8>> Iterator for ByteCounter<I> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        let byte = self.inner.next()?;
        self.consumed += 1;
        Some(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_are_little_endian() {
        let mut it = [0x34, 0x12].into_iter();
        assert_eq!(it.read_u16(), Ok(0x1234));
        assert_eq!(it.read_u8(), Err(DecodeError::MalformedStream));
    }

    #[test]
    fn short_word_read_is_malformed() {
        let mut it = [0x34].into_iter();
        assert_eq!(it.read_u16(), Err(DecodeError::MalformedStream));
    }

    #[test]
    fn displacements_are_signed() {
        let mut it = [0xFF, 0x00, 0x80].into_iter();
        assert_eq!(it.read_displacement(OperandSize::Byte), Ok(-1));
        assert_eq!(it.read_displacement(OperandSize::Word), Ok(-32768));
    }

    #[test]
    fn immediates() {
        let mut it = [0xFF, 0xFF, 0xFF, 0xFF].into_iter();
        assert_eq!(it.read_immediate(OperandSize::Byte), Ok(Immediate::Byte(255)));
        assert_eq!(
            it.read_immediate(OperandSize::Word),
            Ok(Immediate::Word(0xFFFF))
        );
        assert_eq!(it.read_sign_extended(), Ok(Immediate::SignExtended(-1)));
    }

    #[test]
    fn counter_counts_successful_reads_only() {
        let mut it = ByteCounter::new([1, 2, 3].into_iter());
        assert_eq!(it.read_u16(), Ok(0x0201));
        assert_eq!(it.read_u16(), Err(DecodeError::MalformedStream));
        assert_eq!(it.consumed(), 3);
    }
}
