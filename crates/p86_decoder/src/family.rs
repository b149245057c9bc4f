/// The instruction families the decoder understands. Each one has a single encoding shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Family {
    MovRegMem,
    MovImmRegMem,
    MovImmReg,
    AddRegMem,
    AddImmRegMem,
    AddImmAcc,
    SubRegMem,
    SubImmRegMem,
    SubImmAcc,
    Unrecognized,
}

/// Matches when the top `bits` bits of an op code equal `pattern`.
struct Template {
    bits: u32,
    pattern: u8,
    family: Family,
}

impl Template {
    const fn new(bits: u32, pattern: u8, family: Family) -> Self {
        Self {
            bits,
            pattern,
            family,
        }
    }

    fn matches(&self, op_code: u8) -> bool {
        op_code >> (8 - self.bits) == self.pattern
    }
}

// Checked in order. Add and sub immediate to register/memory share `100000`, so the sub entry
// never matches; the 8086 tells them apart by the reg field of the next byte.
const TEMPLATES: &[Template] = &[
    Template::new(6, 0b100010, Family::MovRegMem),    // 1 0 0 0 1 0 d w
    Template::new(7, 0b1100011, Family::MovImmRegMem), // 1 1 0 0 0 1 1 w
    Template::new(4, 0b1011, Family::MovImmReg),      // 1 0 1 1 w reg
    Template::new(6, 0b000000, Family::AddRegMem),    // 0 0 0 0 0 0 d w
    Template::new(6, 0b100000, Family::AddImmRegMem), // 1 0 0 0 0 0 s w
    Template::new(7, 0b0000010, Family::AddImmAcc),   // 0 0 0 0 0 1 0 w
    Template::new(6, 0b001010, Family::SubRegMem),    // 0 0 1 0 1 0 d w
    Template::new(6, 0b100000, Family::SubImmRegMem), // 1 0 0 0 0 0 s w
    Template::new(7, 0b0010110, Family::SubImmAcc),   // 0 0 1 0 1 1 0 w
];

impl Family {
    /// Classify an op code by its fixed high bits. Never looks past the op code itself.
    pub fn classify(op_code: u8) -> Self {
        TEMPLATES
            .iter()
            .find(|template| template.matches(op_code))
            .map_or(Family::Unrecognized, |template| template.family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_ranges() {
        let tests = [
            (0x88..=0x8B, Family::MovRegMem),
            (0xC6..=0xC7, Family::MovImmRegMem),
            (0xB0..=0xBF, Family::MovImmReg),
            (0x00..=0x03, Family::AddRegMem),
            (0x80..=0x83, Family::AddImmRegMem),
            (0x04..=0x05, Family::AddImmAcc),
            (0x28..=0x2B, Family::SubRegMem),
            (0x2C..=0x2D, Family::SubImmAcc),
        ];

        for (range, family) in tests {
            for op_code in range {
                assert_eq!(Family::classify(op_code), family, "{:#04x}", op_code);
            }
        }
    }

    #[test]
    fn sub_immediate_to_register_or_memory_is_never_classified() {
        assert!((0..=0xFF).all(|op_code| Family::classify(op_code) != Family::SubImmRegMem));
    }

    #[test]
    fn everything_else_is_unrecognized() {
        let recognized = (0..=0xFFu8)
            .filter(|op_code| Family::classify(*op_code) != Family::Unrecognized)
            .count();
        assert_eq!(recognized, 38);

        for op_code in [0x06, 0x29 + 0x10, 0x8C, 0x90, 0xC5, 0xC8, 0xF4, 0xFF] {
            assert_eq!(Family::classify(op_code), Family::Unrecognized);
        }
    }
}
