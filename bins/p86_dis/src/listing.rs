use crate::Error;
use p86_decoder::{disassemble, DecodeOptions, Disassembled};
use std::io::Write;

/// First line of every output, so it can be fed straight back to nasm.
pub const HEADER: &str = "bits 16";

/// opcode + mod reg r/m + 2 displacement bytes + 2 immediate bytes.
const MAX_INSTRUCTION_LENGTH: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    /// Only the instruction text.
    Plain,
    /// Offset and raw bytes in front of the instruction text.
    Listing,
}

fn write_instruction(
    out: &mut impl Write,
    disassembled: &Disassembled,
    style: Style,
) -> std::io::Result<()> {
    match style {
        Style::Plain => writeln!(out, "{}", disassembled.decoded),
        Style::Listing => {
            write!(out, "{:04X}  ", disassembled.offset)?;
            for byte in disassembled.bytes.iter().take(MAX_INSTRUCTION_LENGTH) {
                write!(out, "{:02X} ", byte)?;
            }
            for _ in disassembled.bytes.len()..MAX_INSTRUCTION_LENGTH {
                write!(out, "   ")?;
            }
            writeln!(out, "  {}", disassembled.decoded)
        }
    }
}

/// Write the header and one line per instruction in `data`. Returns the number of instructions
/// written. Decoding stops at the first error, after everything before it has been written.
pub fn write_listing(
    out: &mut impl Write,
    data: &[u8],
    style: Style,
    options: DecodeOptions,
) -> Result<usize, Error> {
    writeln!(out, "{}", HEADER)?;
    writeln!(out)?;

    let mut count = 0;
    for item in disassemble(data, options) {
        match item {
            Ok(disassembled) => {
                write_instruction(out, &disassembled, style)?;
                count += 1;
            }
            Err(err) => {
                out.flush()?;
                return Err(err.into());
            }
        }
    }

    out.flush()?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use p86_decoder::DecodeError;

    fn render(data: &[u8], style: Style) -> (String, Result<usize, Error>) {
        let mut out = Vec::new();
        let result = write_listing(&mut out, data, style, DecodeOptions::default());
        (String::from_utf8(out).unwrap(), result)
    }

    #[test]
    fn plain() {
        let (text, result) = render(&[0x89, 0xD8, 0xB8, 0x05, 0x00], Style::Plain);

        assert_eq!(text, "bits 16\n\nmov AX, BX\nmov AX, 5\n");
        assert!(matches!(result, Ok(2)));
    }

    #[test]
    fn listing() {
        let (text, result) = render(
            &[0x89, 0xD8, 0xB8, 0x05, 0x00, 0xC7, 0x85, 0x85, 0x03, 0x5B, 0x01],
            Style::Listing,
        );

        let expected = [
            "bits 16",
            "",
            "0000  89 D8               mov AX, BX",
            "0002  B8 05 00            mov AX, 5",
            "0005  C7 85 85 03 5B 01   mov word [DI + 901], 347",
            "",
        ]
        .join("\n");

        assert_eq!(text, expected);
        assert!(matches!(result, Ok(3)));
    }

    #[test]
    fn empty_input_prints_header_only() {
        let (text, result) = render(&[], Style::Plain);

        assert_eq!(text, "bits 16\n\n");
        assert!(matches!(result, Ok(0)));
    }

    #[test]
    fn stops_at_unrecognized_byte() {
        let (text, result) = render(&[0x89, 0xD8, 0xF4, 0x01, 0xC0], Style::Plain);

        assert_eq!(text, "bits 16\n\nmov AX, BX\n");
        match result {
            Err(Error::Disassembly(err)) => {
                assert_eq!(err.offset, 2);
                assert_eq!(err.byte, 0xF4);
                assert_eq!(err.source, DecodeError::UnrecognizedOpcode(0xF4));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn truncated_tail() {
        let (text, result) = render(&[0xB8, 0x05], Style::Plain);

        assert_eq!(text, "bits 16\n\n");
        assert!(matches!(
            result,
            Err(Error::Disassembly(err)) if err.source == DecodeError::MalformedStream
        ));
    }
}
