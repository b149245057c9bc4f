use crate::common::{
    immediate_to_accumulator, immediate_to_register, immediate_to_register_or_memory,
    register_or_memory_and_register, SignExtension,
};
use crate::errors::Result;
use crate::traits::{ByteCounter, ReadExt};
use crate::{DecodeError, Family};
use p86_instruction::{Instruction, Operation};
use tracing::debug;

/// Switches that change how ambiguous encodings are decoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Decode `mod=00, r/m=110` as a 16-bit direct address, like the 8086 does. When off, it is
    /// decoded as `[BP]` and no address bytes are read.
    pub direct_address: bool,
}

/// An [Instruction] along with the number of bytes it was decoded from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded {
    pub instruction: Instruction,
    pub length: usize,
}

impl std::fmt::Display for Decoded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.instruction)
    }
}

/// Decode a single instruction from the front of `it` using the default [DecodeOptions].
pub fn decode_instruction(it: &mut impl Iterator<Item = u8>) -> Result<Decoded> {
    decode_instruction_with(it, DecodeOptions::default())
}

/// Decode a single instruction from the front of `it`. Exactly `length` bytes of the returned
/// [Decoded] are consumed from `it`.
pub fn decode_instruction_with(
    it: &mut impl Iterator<Item = u8>,
    options: DecodeOptions,
) -> Result<Decoded> {
    let mut it = ByteCounter::new(it);

    let op_code = it.read_u8().map_err(|err| match err {
        DecodeError::MalformedStream => DecodeError::EndOfInput,
        err => err,
    })?;

    let family = Family::classify(op_code);
    debug!("{:#04x} classified as {:?}", op_code, family);

    let instruction = decode_family(family, op_code, &mut it, options)?;

    Ok(Decoded {
        instruction,
        length: it.consumed(),
    })
}

pub(crate) fn decode_family(
    family: Family,
    op_code: u8,
    it: &mut impl Iterator<Item = u8>,
    options: DecodeOptions,
) -> Result<Instruction> {
    match family {
        Family::MovRegMem => register_or_memory_and_register(Operation::MOV, op_code, it, options),
        Family::MovImmRegMem => immediate_to_register_or_memory(
            Operation::MOV,
            SignExtension::NotEncoded,
            op_code,
            it,
            options,
        ),
        Family::MovImmReg => immediate_to_register(Operation::MOV, op_code, it),

        Family::AddRegMem => register_or_memory_and_register(Operation::ADD, op_code, it, options),
        Family::AddImmRegMem => immediate_to_register_or_memory(
            Operation::ADD,
            SignExtension::FromOpCode,
            op_code,
            it,
            options,
        ),
        Family::AddImmAcc => immediate_to_accumulator(Operation::ADD, op_code, it),

        Family::SubRegMem => register_or_memory_and_register(Operation::SUB, op_code, it, options),
        Family::SubImmRegMem => immediate_to_register_or_memory(
            Operation::SUB,
            SignExtension::FromOpCode,
            op_code,
            it,
            options,
        ),
        Family::SubImmAcc => immediate_to_accumulator(Operation::SUB, op_code, it),

        Family::Unrecognized => Err(DecodeError::UnrecognizedOpcode(op_code)),
    }
}

#[cfg(test)]
#[path = "_tests/decode.rs"]
mod tests;
