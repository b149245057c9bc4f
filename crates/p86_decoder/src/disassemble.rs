use crate::{decode_instruction_with, DecodeOptions, Decoded, DisassemblyError};

/// An instruction decoded by a [Disassembler], with its location in the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Disassembled<'a> {
    pub offset: usize,
    /// The bytes the instruction was decoded from.
    pub bytes: &'a [u8],
    pub decoded: Decoded,
}

/// Walks a buffer one instruction at a time. The first error ends the walk.
pub struct Disassembler<'a> {
    data: &'a [u8],
    position: usize,
    options: DecodeOptions,
    failed: bool,
}

pub fn disassemble(data: &[u8], options: DecodeOptions) -> Disassembler<'_> {
    Disassembler {
        data,
        position: 0,
        options,
        failed: false,
    }
}

impl<'a> Disassembler<'a> {
    /// Offset of the next byte to be decoded.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl<'a> Iterator for Disassembler<'a> {
    type Item = Result<Disassembled<'a>, DisassemblyError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.position >= self.data.len() {
            return None;
        }

        let offset = self.position;
        let window = &self.data[offset..];

        match decode_instruction_with(&mut window.iter().copied(), self.options) {
            Ok(decoded) => {
                self.position += decoded.length;
                Some(Ok(Disassembled {
                    offset,
                    bytes: &window[..decoded.length],
                    decoded,
                }))
            }
            Err(source) => {
                self.failed = true;
                Some(Err(DisassemblyError {
                    offset,
                    byte: window[0],
                    source,
                }))
            }
        }
    }
}

impl std::iter::FusedIterator for Disassembler<'_> {}
