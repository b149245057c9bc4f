use crate::errors::Result;
use crate::traits::ReadExt;
use crate::{DecodeError, DecodeOptions, TryFromEncoding};
use p86_instruction::{AddressingMode, Memory, Operand, OperandSize, Register, SizedRegister};
use tracing::debug;

/// The operand selected by the `mod` and `r/m` fields of a mod reg r/m byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterOrMemory {
    Direct(u16),
    Indirect(AddressingMode),
    DisplacementByte(AddressingMode, i8),
    DisplacementWord(AddressingMode, i16),
    Register(Register),
}

impl RegisterOrMemory {
    /// Decode the `mod` and `r/m` fields of `mod_rm_byte`, pulling any displacement bytes the
    /// mode requires from `it`.
    pub fn try_from_modrm(
        mod_rm_byte: u8,
        it: &mut impl Iterator<Item = u8>,
        options: DecodeOptions,
    ) -> Result<Self> {
        let mode = mod_rm_byte >> 6;
        let rm = mod_rm_byte & 0b111;

        match mode {
            0b00 => match rm {
                0b110 if options.direct_address => {
                    Ok(RegisterOrMemory::Direct(it.read_u16()?))
                }
                _ => {
                    if rm == 0b110 {
                        debug!(
                            "mod=00 r/m=110 ({:#04x}) decoded as [BP] without reading a direct address",
                            mod_rm_byte
                        );
                    }
                    Ok(RegisterOrMemory::Indirect(
                        AddressingMode::try_from_encoding(rm)?,
                    ))
                }
            },

            0b01 => Ok(RegisterOrMemory::DisplacementByte(
                AddressingMode::try_from_encoding(rm)?,
                it.read_displacement(OperandSize::Byte)? as i8,
            )),

            0b10 => Ok(RegisterOrMemory::DisplacementWord(
                AddressingMode::try_from_encoding(rm)?,
                it.read_displacement(OperandSize::Word)?,
            )),

            0b11 => Ok(RegisterOrMemory::Register(Register::try_from_encoding(rm)?)),

            _ => Err(DecodeError::UnsupportedAddressingMode(mod_rm_byte)),
        }
    }

    pub fn into_operand(self, operand_size: OperandSize) -> Operand {
        match self {
            RegisterOrMemory::Direct(address) => Memory::direct(address).into(),
            RegisterOrMemory::Indirect(base) => Memory::based(base, 0).into(),
            RegisterOrMemory::DisplacementByte(base, displacement) => {
                Memory::based(base, displacement as i16).into()
            }
            RegisterOrMemory::DisplacementWord(base, displacement) => {
                Memory::based(base, displacement).into()
            }
            RegisterOrMemory::Register(register) => SizedRegister(register, operand_size).into(),
        }
    }

    /// Same as [RegisterOrMemory::into_operand], but memory operands carry a size qualifier,
    /// because the other operand (an immediate) does not give away the width.
    pub fn into_sized_operand(self, operand_size: OperandSize) -> Operand {
        match self.into_operand(operand_size) {
            Operand::Memory(memory) => Operand::Memory(memory.with_size(operand_size)),
            operand => operand,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModRegRM {
    pub register: Register,
    pub register_or_memory: RegisterOrMemory,
}

impl ModRegRM {
    pub fn new(register: Register, register_or_memory: RegisterOrMemory) -> Self {
        Self {
            register,
            register_or_memory,
        }
    }

    pub fn try_from_byte(
        mod_rm_byte: u8,
        it: &mut impl Iterator<Item = u8>,
        options: DecodeOptions,
    ) -> Result<Self> {
        let register = Register::try_from_encoding(mod_rm_byte >> 3 & 0b111)?;
        let register_or_memory = RegisterOrMemory::try_from_modrm(mod_rm_byte, it, options)?;

        Ok(ModRegRM {
            register,
            register_or_memory,
        })
    }
}
