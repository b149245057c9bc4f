//! This crate holds the structs and tables used to represent a decoded `mov`, `add` or `sub`
//! instruction for the 8086 microprocessor, along with the text rendering of each part.

mod instruction;
mod operand;
mod operation;
mod register;

pub use instruction::Instruction;
pub use operand::{AddressingMode, Immediate, Memory, Operand, OperandSize};
pub use operation::Operation;
pub use register::{Register, SizedRegister};
