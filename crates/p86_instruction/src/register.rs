use crate::OperandSize;

/// Names of the general purpose registers, indexed by `[w][reg]`.
const REGISTER_NAMES: [[&str; 8]; 2] = [
    ["AL", "CL", "DL", "BL", "AH", "CH", "DH", "BH"],
    ["AX", "CX", "DX", "BX", "SP", "BP", "SI", "DI"],
];

/// A 3-bit register encoding. Which register it names depends on the [OperandSize] it is paired
/// with, see [SizedRegister].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Register {
    AlAx,
    ClCx,
    DlDx,
    BlBx,
    AhSp,
    ChBp,
    DhSi,
    BhDi,
}

impl Register {
    /// The value of the register in the `reg` or `r/m` field.
    pub fn encoding(self) -> u8 {
        self as u8
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizedRegister(pub Register, pub OperandSize);

impl SizedRegister {
    pub fn name(&self) -> &'static str {
        let w = match self.1 {
            OperandSize::Byte => 0,
            OperandSize::Word => 1,
        };
        REGISTER_NAMES[w][self.0.encoding() as usize]
    }
}

impl std::fmt::Display for SizedRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_and_word_names() {
        use Register::*;

        let tests = [
            (AlAx, "AL", "AX"),
            (ClCx, "CL", "CX"),
            (DlDx, "DL", "DX"),
            (BlBx, "BL", "BX"),
            (AhSp, "AH", "SP"),
            (ChBp, "CH", "BP"),
            (DhSi, "DH", "SI"),
            (BhDi, "BH", "DI"),
        ];

        for (register, byte, word) in tests {
            assert_eq!(SizedRegister(register, OperandSize::Byte).to_string(), byte);
            assert_eq!(SizedRegister(register, OperandSize::Word).to_string(), word);
        }
    }

    #[test]
    fn encoding_follows_declaration_order() {
        assert_eq!(Register::AlAx.encoding(), 0b000);
        assert_eq!(Register::BlBx.encoding(), 0b011);
        assert_eq!(Register::BhDi.encoding(), 0b111);
    }
}
