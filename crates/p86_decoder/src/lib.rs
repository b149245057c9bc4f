//! Decoder for the `mov`, `add` and `sub` encodings of the 8086 instruction set.

mod common;
mod decode;
mod disassemble;
mod errors;
mod family;
mod mod_reg_rm;
mod traits;

pub use decode::{decode_instruction, decode_instruction_with, DecodeOptions, Decoded};
pub use disassemble::{disassemble, Disassembled, Disassembler};
pub use errors::{DecodeError, DisassemblyError, Result};
pub use family::Family;
pub use mod_reg_rm::{ModRegRM, RegisterOrMemory};

use p86_instruction::{AddressingMode, Register};

/// Maps a bit field extracted from an instruction onto the type it encodes.
trait TryFromEncoding<T> {
    fn try_from_encoding(encoding: u8) -> Result<T>;
}

impl TryFromEncoding<Self> for Register {
    fn try_from_encoding(encoding: u8) -> Result<Self> {
        match encoding {
            0b000 => Ok(Self::AlAx),
            0b001 => Ok(Self::ClCx),
            0b010 => Ok(Self::DlDx),
            0b011 => Ok(Self::BlBx),
            0b100 => Ok(Self::AhSp),
            0b101 => Ok(Self::ChBp),
            0b110 => Ok(Self::DhSi),
            0b111 => Ok(Self::BhDi),
            _ => Err(DecodeError::UnsupportedAddressingMode(encoding)),
        }
    }
}

impl TryFromEncoding<Self> for AddressingMode {
    fn try_from_encoding(encoding: u8) -> Result<Self> {
        match encoding {
            0b000 => Ok(Self::BxSi),
            0b001 => Ok(Self::BxDi),
            0b010 => Ok(Self::BpSi),
            0b011 => Ok(Self::BpDi),
            0b100 => Ok(Self::Si),
            0b101 => Ok(Self::Di),
            0b110 => Ok(Self::Bp),
            0b111 => Ok(Self::Bx),
            _ => Err(DecodeError::UnsupportedAddressingMode(encoding)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_encodings() {
        for encoding in 0..8 {
            let register = Register::try_from_encoding(encoding).unwrap();
            assert_eq!(register.encoding(), encoding);
        }

        assert_eq!(
            Register::try_from_encoding(8),
            Err(DecodeError::UnsupportedAddressingMode(8))
        );
    }

    #[test]
    fn addressing_mode_encodings() {
        for encoding in 0..8 {
            let mode = AddressingMode::try_from_encoding(encoding).unwrap();
            assert_eq!(mode.encoding(), encoding);
        }

        assert_eq!(
            AddressingMode::try_from_encoding(77),
            Err(DecodeError::UnsupportedAddressingMode(77))
        );
    }
}
