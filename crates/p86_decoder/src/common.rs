use crate::errors::Result;
use crate::traits::{OpCodeExt, ReadExt};
use crate::{DecodeOptions, TryFromEncoding};
use p86_instruction::{Instruction, Operand, OperandSize, Operation, Register, SizedRegister};

/// Whether the op code of an immediate family carries an `s` (sign extend) bit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum SignExtension {
    FromOpCode,
    NotEncoded,
}

// x x x x x x d w | mod reg r/m | disp-lo | disp-hi
pub(crate) fn register_or_memory_and_register(
    operation: Operation,
    op_code: u8,
    it: &mut impl Iterator<Item = u8>,
    options: DecodeOptions,
) -> Result<Instruction> {
    let reg_first = (op_code >> 1) & 1 == 1;
    let operand_size = op_code.operand_size();

    let mrrm = it.read_mrrm(options)?;

    let reg = Operand::Register(SizedRegister(mrrm.register, operand_size));
    let reg_mem = mrrm.register_or_memory.into_operand(operand_size);

    Ok(if reg_first {
        Instruction::new(operation, reg, reg_mem)
    } else {
        Instruction::new(operation, reg_mem, reg)
    })
}

// x x x x x x s w | mod x x x r/m | disp-lo | disp-hi | data | data if s w = 0 1
pub(crate) fn immediate_to_register_or_memory(
    operation: Operation,
    sign_extension: SignExtension,
    op_code: u8,
    it: &mut impl Iterator<Item = u8>,
    options: DecodeOptions,
) -> Result<Instruction> {
    let operand_size = op_code.operand_size();
    let sign_extend = match sign_extension {
        SignExtension::FromOpCode => (op_code >> 1) & 1 == 1,
        SignExtension::NotEncoded => false,
    };

    let mrrm = it.read_mrrm(options)?;
    let destination = mrrm.register_or_memory.into_sized_operand(operand_size);

    // The s bit only means something for word destinations.
    let source = match operand_size {
        OperandSize::Word if sign_extend => it.read_sign_extended()?,
        _ => it.read_immediate(operand_size)?,
    };

    Ok(Instruction::new(operation, destination, source.into()))
}

// x x x x x x x w | data | data if w = 1
pub(crate) fn immediate_to_accumulator(
    operation: Operation,
    op_code: u8,
    it: &mut impl Iterator<Item = u8>,
) -> Result<Instruction> {
    let operand_size = op_code.operand_size();

    Ok(Instruction::new(
        operation,
        SizedRegister(Register::AlAx, operand_size).into(),
        it.read_immediate(operand_size)?.into(),
    ))
}

// x x x x w reg | data | data if w = 1
pub(crate) fn immediate_to_register(
    operation: Operation,
    op_code: u8,
    it: &mut impl Iterator<Item = u8>,
) -> Result<Instruction> {
    // The w bit sits in bit 3 for this form.
    let operand_size = (op_code >> 3).operand_size();
    let register = Register::try_from_encoding(op_code & 0b111)?;

    Ok(Instruction::new(
        operation,
        SizedRegister(register, operand_size).into(),
        it.read_immediate(operand_size)?.into(),
    ))
}
