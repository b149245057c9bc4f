use crate::SizedRegister;
use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandSize {
    Byte,
    Word,
}

/// Base register combinations for memory operands, indexed by the `r/m` field.
const MEMORY_BASES: [&str; 8] = [
    "BX + SI", "BX + DI", "BP + SI", "BP + DI", "SI", "DI", "BP", "BX",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    BxSi,
    BxDi,
    BpSi,
    BpDi,
    Si,
    Di,
    Bp,
    Bx,
}

impl AddressingMode {
    /// The value of the `r/m` field selecting this base.
    pub fn encoding(self) -> u8 {
        self as u8
    }

    pub fn expression(self) -> &'static str {
        MEMORY_BASES[self.encoding() as usize]
    }
}

impl Display for AddressingMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.expression())
    }
}

/// A memory operand. Without a base the displacement is a direct address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Memory {
    pub base: Option<AddressingMode>,
    pub displacement: i16,
    /// Set when the operand needs a `byte`/`word` qualifier to make the width unambiguous.
    pub size: Option<OperandSize>,
}

impl Memory {
    pub fn based(base: AddressingMode, displacement: i16) -> Self {
        Self {
            base: Some(base),
            displacement,
            size: None,
        }
    }

    pub fn direct(address: u16) -> Self {
        Self {
            base: None,
            displacement: address as i16,
            size: None,
        }
    }

    pub fn is_direct(&self) -> bool {
        self.base.is_none()
    }

    pub fn with_size(self, size: OperandSize) -> Self {
        Self {
            size: Some(size),
            ..self
        }
    }
}

impl Display for Memory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.size {
            Some(OperandSize::Byte) => f.write_str("byte ")?,
            Some(OperandSize::Word) => f.write_str("word ")?,
            None => {}
        }

        match self.base {
            None => write!(f, "[{}]", self.displacement as u16),
            Some(base) => {
                write!(f, "[{}", base)?;
                match self.displacement {
                    0 => {}
                    d if d > 0 => write!(f, " + {}", d)?,
                    d => write!(f, " - {}", d.unsigned_abs())?,
                }
                f.write_str("]")
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Immediate {
    Byte(u8),
    Word(u16),
    /// A single byte widened to a word by replicating its sign bit.
    SignExtended(i8),
}

impl Immediate {
    /// The 16-bit value the immediate stands for.
    pub fn value(&self) -> u16 {
        match *self {
            Immediate::Byte(value) => value as u16,
            Immediate::Word(value) => value,
            Immediate::SignExtended(value) => value as i16 as u16,
        }
    }
}

impl Display for Immediate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Immediate::Byte(value) => write!(f, "{}", value),
            Immediate::Word(value) => write!(f, "{}", value),
            Immediate::SignExtended(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    Register(SizedRegister),
    Memory(Memory),
    Immediate(Immediate),
}

impl From<SizedRegister> for Operand {
    fn from(value: SizedRegister) -> Self {
        Operand::Register(value)
    }
}

impl From<Memory> for Operand {
    fn from(value: Memory) -> Self {
        Operand::Memory(value)
    }
}

impl From<Immediate> for Operand {
    fn from(value: Immediate) -> Self {
        Operand::Immediate(value)
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Register(register) => register.fmt(f),
            Operand::Memory(memory) => memory.fmt(f),
            Operand::Immediate(immediate) => immediate.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Register;

    #[test]
    fn memory_bases() {
        use AddressingMode::*;

        let expected = [
            (BxSi, "BX + SI"),
            (BxDi, "BX + DI"),
            (BpSi, "BP + SI"),
            (BpDi, "BP + DI"),
            (Si, "SI"),
            (Di, "DI"),
            (Bp, "BP"),
            (Bx, "BX"),
        ];

        for (encoding, (mode, text)) in expected.into_iter().enumerate() {
            assert_eq!(mode.encoding() as usize, encoding);
            assert_eq!(mode.to_string(), text);
        }
    }

    #[test]
    fn zero_displacement_is_omitted() {
        let memory = Memory::based(AddressingMode::BpDi, 0);
        assert_eq!(memory.to_string(), "[BP + DI]");
    }

    #[test]
    fn displacement_has_explicit_sign() {
        assert_eq!(
            Memory::based(AddressingMode::Si, 4).to_string(),
            "[SI + 4]"
        );
        assert_eq!(
            Memory::based(AddressingMode::BxSi, -37).to_string(),
            "[BX + SI - 37]"
        );
        assert_eq!(
            Memory::based(AddressingMode::Bx, i16::MIN).to_string(),
            "[BX - 32768]"
        );
    }

    #[test]
    fn direct_address() {
        let memory = Memory::direct(0xFFFE);
        assert!(memory.is_direct());
        assert_eq!(memory.to_string(), "[65534]");
    }

    #[test]
    fn size_qualifier() {
        assert_eq!(
            Memory::based(AddressingMode::Bx, 0)
                .with_size(OperandSize::Byte)
                .to_string(),
            "byte [BX]"
        );
        assert_eq!(
            Memory::based(AddressingMode::Di, 1000)
                .with_size(OperandSize::Word)
                .to_string(),
            "word [DI + 1000]"
        );
    }

    #[test]
    fn immediates() {
        assert_eq!(Immediate::Byte(0xFF).to_string(), "255");
        assert_eq!(Immediate::Word(0xFFFF).to_string(), "65535");
        assert_eq!(Immediate::SignExtended(-1).to_string(), "-1");
        assert_eq!(Immediate::SignExtended(-1).value(), 0xFFFF);
    }

    #[test]
    fn operands() {
        let register: Operand = SizedRegister(Register::DhSi, OperandSize::Word).into();
        assert_eq!(register.to_string(), "SI");

        let immediate: Operand = Immediate::Word(12).into();
        assert_eq!(immediate.to_string(), "12");
    }
}
