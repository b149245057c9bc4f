use super::*;
use crate::traits::ByteCounter;
use p86_instruction::{
    AddressingMode, Immediate, Memory, Operand, OperandSize, Register, SizedRegister,
};

fn decode(bytes: &[u8]) -> Result<Decoded> {
    decode_instruction(&mut bytes.iter().copied())
}

fn decode_with_direct_address(bytes: &[u8]) -> Result<Decoded> {
    decode_instruction_with(
        &mut bytes.iter().copied(),
        DecodeOptions {
            direct_address: true,
        },
    )
}

fn assert_decodes(bytes: &[u8], text: &str) {
    let decoded = decode(bytes).unwrap();
    assert_eq!(decoded.to_string(), text, "{:02X?}", bytes);
    assert_eq!(decoded.length, bytes.len(), "{:02X?}", bytes);
}

#[test]
fn mov_register_to_register() {
    let decoded = decode(&[0x89, 0xD8]).unwrap();
    assert_eq!(
        decoded.instruction,
        Instruction::new(
            Operation::MOV,
            Operand::Register(SizedRegister(Register::AlAx, OperandSize::Word)),
            Operand::Register(SizedRegister(Register::BlBx, OperandSize::Word)),
        )
    );
    assert_eq!(decoded.length, 2);
    assert_eq!(decoded.to_string(), "mov AX, BX");
}

#[test]
fn mov_register_to_memory() {
    let decoded = decode(&[0x89, 0x08]).unwrap();
    assert_eq!(
        decoded.instruction.destination,
        Operand::Memory(Memory::based(AddressingMode::BxSi, 0))
    );
    assert_eq!(decoded.length, 2);
    assert_eq!(decoded.to_string(), "mov [BX + SI], CX");
}

#[test]
fn mov_direction_bit() {
    assert_decodes(&[0x8A, 0x00], "mov AL, [BX + SI]");
    assert_decodes(&[0x88, 0x00], "mov [BX + SI], AL");
    assert_decodes(&[0x8B, 0xD8], "mov BX, AX");
}

#[test]
fn mov_with_displacement() {
    assert_decodes(&[0x8B, 0x56, 0xDB], "mov DX, [BP - 37]");
    assert_decodes(&[0x89, 0x87, 0x87, 0x13], "mov [BX + 4999], AX");
    assert_decodes(&[0x8A, 0x60, 0x04], "mov AH, [BX + SI + 4]");
}

#[test]
fn zero_displacement_is_consumed_but_not_rendered() {
    assert_decodes(&[0x88, 0x40, 0x00], "mov [BX + SI], AL");
    assert_decodes(&[0x89, 0x83, 0x00, 0x00], "mov [BP + DI], AX");
}

#[test]
fn mov_immediate_to_register() {
    let decoded = decode(&[0xB8, 0x05, 0x00]).unwrap();
    assert_eq!(
        decoded.instruction.source,
        Operand::Immediate(Immediate::Word(5))
    );
    assert_eq!(decoded.length, 3);
    assert_eq!(decoded.to_string(), "mov AX, 5");

    assert_decodes(&[0xB1, 0x0C], "mov CL, 12");
    assert_decodes(&[0xB5, 0xF4], "mov CH, 244");
    assert_decodes(&[0xBC, 0xF4, 0xFF], "mov SP, 65524");
    assert_decodes(&[0xBF, 0x0C, 0x00], "mov DI, 12");
}

#[test]
fn mov_immediate_to_register_or_memory() {
    assert_decodes(&[0xC6, 0x03, 0x07], "mov byte [BP + DI], 7");
    assert_decodes(
        &[0xC7, 0x85, 0x85, 0x03, 0x5B, 0x01],
        "mov word [DI + 901], 347",
    );
    // No s bit for mov; a word immediate is always two bytes.
    assert_decodes(&[0xC7, 0xC1, 0xFF, 0xFF], "mov CX, 65535");
}

#[test]
fn add_register_or_memory_and_register() {
    assert_decodes(&[0x03, 0x18], "add BX, [BX + SI]");
    assert_decodes(&[0x03, 0x5E, 0x00], "add BX, [BP]");
    assert_decodes(&[0x00, 0xC3], "add BL, AL");
    assert_decodes(&[0x01, 0x4F, 0xFE], "add [BX - 2], CX");
}

#[test]
fn add_sign_extended_immediate() {
    let decoded = decode(&[0x83, 0xC0, 0x05]).unwrap();
    assert_eq!(
        decoded.instruction.source,
        Operand::Immediate(Immediate::SignExtended(5))
    );
    assert_eq!(decoded.length, 3);
    assert_eq!(decoded.to_string(), "add AX, 5");

    assert_decodes(&[0x83, 0xC1, 0xFF], "add CX, -1");
    assert_decodes(&[0x83, 0x46, 0xF6, 0xE8], "add word [BP - 10], -24");
}

#[test]
fn add_immediate_without_sign_extension() {
    assert_decodes(&[0x81, 0xC4, 0x88, 0x01], "add SP, 392");
    assert_decodes(&[0x80, 0x07, 0x22], "add byte [BX], 34");
    assert_decodes(&[0x81, 0x07, 0xFF, 0xFF], "add word [BX], 65535");
}

#[test]
fn sign_extension_is_ignored_for_byte_destinations() {
    assert_decodes(&[0x82, 0xC0, 0xFF], "add AL, 255");
}

#[test]
fn add_and_sub_immediate_to_accumulator() {
    assert_decodes(&[0x05, 0xE8, 0x03], "add AX, 1000");
    assert_decodes(&[0x04, 0xE2], "add AL, 226");
    assert_decodes(&[0x2D, 0xE8, 0x03], "sub AX, 1000");
    assert_decodes(&[0x2C, 0x09], "sub AL, 9");
}

#[test]
fn sub_register_or_memory_and_register() {
    assert_decodes(&[0x2B, 0x4E, 0x00], "sub CX, [BP]");
    assert_decodes(&[0x29, 0xD8], "sub AX, BX");
    assert_decodes(&[0x2A, 0x42, 0x0C], "sub AL, [BP + SI + 12]");
}

#[test]
fn immediate_group_always_decodes_as_add() {
    // The reg field holds 101 (sub), but classification only looks at the op code.
    assert_decodes(&[0x83, 0xE8, 0x05], "add AX, 5");
    assert_decodes(&[0x80, 0x2F, 0x22], "add byte [BX], 34");
}

#[test]
fn sub_immediate_family_decoder() {
    let mut it = ByteCounter::new([0xE8, 0x05].into_iter());
    let instruction = decode_family(
        Family::SubImmRegMem,
        0x83,
        &mut it,
        DecodeOptions::default(),
    )
    .unwrap();

    assert_eq!(instruction.to_string(), "sub AX, 5");
    assert_eq!(it.consumed(), 2);
}

#[test]
fn bp_without_displacement() {
    let bytes = [0x8B, 0x1E, 0x10, 0x00];

    let decoded = decode(&bytes).unwrap();
    assert_eq!(decoded.to_string(), "mov BX, [BP]");
    assert_eq!(decoded.length, 2);

    let decoded = decode_with_direct_address(&bytes).unwrap();
    assert_eq!(decoded.to_string(), "mov BX, [16]");
    assert_eq!(decoded.length, 4);

    let decoded = decode_with_direct_address(&[0xC6, 0x06, 0xE8, 0x03, 0x07]).unwrap();
    assert_eq!(decoded.to_string(), "mov byte [1000], 7");
    assert_eq!(decoded.length, 5);
}

#[test]
fn back_to_back() {
    let bytes = [
        0x89, 0xD8, // mov AX, BX
        0x89, 0x08, // mov [BX + SI], CX
        0xB8, 0x05, 0x00, // mov AX, 5
        0x83, 0xC0, 0x05, // add AX, 5
        0x8B, 0x56, 0xDB, // mov DX, [BP - 37]
        0xC7, 0x85, 0x85, 0x03, 0x5B, 0x01, // mov word [DI + 901], 347
        0x2C, 0x09, // sub AL, 9
    ];

    let mut it = bytes.iter().copied();
    let mut lines = vec![];
    let mut total = 0;
    loop {
        match decode_instruction(&mut it) {
            Ok(decoded) => {
                total += decoded.length;
                lines.push(decoded.to_string());
            }
            Err(err) => {
                assert_eq!(err, DecodeError::EndOfInput);
                break;
            }
        }
    }

    assert_eq!(total, bytes.len());
    assert_eq!(
        lines,
        [
            "mov AX, BX",
            "mov [BX + SI], CX",
            "mov AX, 5",
            "add AX, 5",
            "mov DX, [BP - 37]",
            "mov word [DI + 901], 347",
            "sub AL, 9",
        ]
    );
}

#[test]
fn length_matches_bytes_taken_from_the_stream() {
    let bytes = [0x89, 0x87, 0x87, 0x13, 0xAA, 0xBB];
    let mut it = bytes.iter().copied();

    let decoded = decode_instruction(&mut it).unwrap();
    assert_eq!(decoded.length, 4);
    assert_eq!(it.len(), bytes.len() - decoded.length);
}

#[test]
fn truncated_instruction() {
    assert_eq!(decode(&[0x89]), Err(DecodeError::MalformedStream));
    assert_eq!(decode(&[0x89, 0x87, 0x87]), Err(DecodeError::MalformedStream));
    assert_eq!(decode(&[0x81, 0xC4, 0x88]), Err(DecodeError::MalformedStream));
    assert_eq!(decode(&[0xB8, 0x05]), Err(DecodeError::MalformedStream));
    assert_eq!(decode(&[0x05]), Err(DecodeError::MalformedStream));
}

#[test]
fn unrecognized_op_code() {
    assert_eq!(decode(&[0xF4]), Err(DecodeError::UnrecognizedOpcode(0xF4)));
    assert_eq!(
        decode(&[0xF4, 0x89, 0xD8]),
        Err(DecodeError::UnrecognizedOpcode(0xF4))
    );
}

#[test]
fn empty_input() {
    assert_eq!(decode(&[]), Err(DecodeError::EndOfInput));
}
