use crate::{Operand, Operation};
use std::fmt::{Display, Formatter};

/// Representation of a decoded 8086 instruction.
///
/// ```rust
/// use p86_instruction::*;
///
/// // mov [BX + SI + 8], AX
/// let i = Instruction::new(
///     Operation::MOV,
///     Operand::Memory(Memory::based(AddressingMode::BxSi, 8)),
///     Operand::Register(SizedRegister(Register::AlAx, OperandSize::Word)),
/// );
/// assert_eq!(i.to_string(), "mov [BX + SI + 8], AX");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub operation: Operation,
    pub destination: Operand,
    pub source: Operand,
}

impl Instruction {
    /// Create a new instruction with the given [Operation] and operands.
    pub fn new(operation: Operation, destination: Operand, source: Operand) -> Self {
        Self {
            operation,
            destination,
            source,
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}, {}", self.operation, self.destination, self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Immediate, OperandSize, Register, SizedRegister};

    #[test]
    fn display() {
        let i = Instruction::new(
            Operation::SUB,
            SizedRegister(Register::AlAx, OperandSize::Byte).into(),
            Immediate::Byte(9).into(),
        );
        assert_eq!(i.to_string(), "sub AL, 9");
    }
}
