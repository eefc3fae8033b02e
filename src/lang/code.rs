use crate::{
    lang::cursor::Cursor,
    runtime::{
        data_structures::value::{Direction, RobotValue, ValueKind},
        error::{self, CompileError, DecodeError},
    },
};
use std::fmt::Write;

/// A compiled program.  Lives only in memory for the length of one run.
pub type ByteCode = Vec<u8>;

/// Ends both word names and string payloads.
pub const TERMINATOR: u8 = 0x00;

/// Number of bytes following the IF and JMP words that hold their destination offset.
pub const JUMP_ADDRESS_WIDTH: usize = 2;

/// The largest offset a jump can reach.
pub const MAX_JUMP_DESTINATION: usize = u16::MAX as usize;

/// The conditional jump word.  Pops a BOOL and skips to its destination when it's false.
pub const IF_WORD: &str = "IF";

/// The unconditional jump word, synthesized by the compiler for ELSE.
pub const JMP_WORD: &str = "JMP";

/// The two instructions of the virtual machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Op {
    /// `PUSH_VAL tag payload`, push a literal value onto the data stack.
    PushValue = 0x00,

    /// `EXEC_WORD name TERMINATOR`, look up a word in the dictionary and run it.
    ExecuteWord = 0x01,
}

impl Op {
    pub fn from_byte(byte: u8) -> Option<Op> {
        match byte {
            0x00 => Some(Op::PushValue),
            0x01 => Some(Op::ExecuteWord),
            _ => None,
        }
    }
}

/// The type tag written after a PUSH_VAL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ValueTag {
    Int = 0x00,
    Direction = 0x01,
    Bool = 0x02,
    String = 0x03,
}

impl ValueTag {
    pub fn from_byte(byte: u8) -> Option<ValueTag> {
        match byte {
            0x00 => Some(ValueTag::Int),
            0x01 => Some(ValueTag::Direction),
            0x02 => Some(ValueTag::Bool),
            0x03 => Some(ValueTag::String),
            _ => None,
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            ValueTag::Int => ValueKind::Int,
            ValueTag::Direction => ValueKind::Direction,
            ValueTag::Bool => ValueKind::Bool,
            ValueTag::String => ValueKind::String,
        }
    }
}

/// Encode a jump destination, most significant byte first.
pub fn encode_jump_target(destination: usize) -> error::Result<[u8; JUMP_ADDRESS_WIDTH]> {
    let address = u16::try_from(destination).map_err(|_| CompileError::ProgramTooLarge {
        destination,
        limit: MAX_JUMP_DESTINATION,
    })?;

    Ok(address.to_be_bytes())
}

/// Read the destination offset that follows an IF or JMP word.
pub fn read_jump_target(code: &mut Cursor<u8>) -> error::Result<usize> {
    let high = code.get_next()?;
    let low = code.get_next()?;

    Ok(u16::from_be_bytes([high, low]) as usize)
}

/// Read bytes up to, and consuming, the terminator.
fn read_terminated(code: &mut Cursor<u8>) -> error::Result<Vec<u8>> {
    let mut bytes = Vec::new();

    loop {
        let next = code.get_next()?;

        if next == TERMINATOR {
            return Ok(bytes);
        }

        bytes.push(next);
    }
}

/// Read a word name following an EXEC_WORD.
pub fn read_word_name(code: &mut Cursor<u8>) -> error::Result<String> {
    let position = code.position();
    let bytes = read_terminated(code)?;

    if !bytes.is_ascii() {
        return Err(DecodeError::InvalidWordName { position }.into());
    }

    String::from_utf8(bytes).map_err(|_| DecodeError::InvalidWordName { position }.into())
}

/// Read the tag and payload following a PUSH_VAL and rebuild the value.
pub fn read_value(code: &mut Cursor<u8>) -> error::Result<RobotValue> {
    let position = code.position();
    let tag_byte = code.get_next()?;

    let Some(tag) = ValueTag::from_byte(tag_byte) else {
        return Err(DecodeError::UnknownValueTag { tag: tag_byte, position }.into());
    };

    let invalid = || DecodeError::InvalidPayload { kind: tag.kind(), position };

    let value = match tag {
        ValueTag::Int => RobotValue::Int(code.get_next()? as i64),

        ValueTag::Direction => {
            let byte = code.get_next()?;
            RobotValue::Direction(Direction::from_byte(byte).ok_or_else(invalid)?)
        }

        ValueTag::Bool => match code.get_next()? {
            0 => RobotValue::Bool(false),
            1 => RobotValue::Bool(true),
            _ => return Err(invalid().into()),
        },

        ValueTag::String => {
            let bytes = read_terminated(code)?;
            RobotValue::String(String::from_utf8(bytes).map_err(|_| invalid())?)
        }
    };

    Ok(value)
}

/// Render byte-code as one instruction per line, each prefixed with its offset.  IF and JMP show
/// the destination they jump to.
///
/// ```text
/// 0000  PUSH_VAL   BOOL TRUE
/// 0003  EXEC_WORD  IF -> 0018
/// ```
pub fn disassemble(code: &[u8]) -> error::Result<String> {
    let mut cursor = Cursor::new(code.to_vec());
    let mut listing = String::new();

    while cursor.has_next() {
        let position = cursor.position();
        let op_byte = cursor.get_next()?;

        let line = match Op::from_byte(op_byte) {
            Some(Op::PushValue) => match read_value(&mut cursor)? {
                RobotValue::String(text) => format!("PUSH_VAL   STRING {:?}", text),
                value => format!("PUSH_VAL   {} {}", value.kind(), value),
            },

            Some(Op::ExecuteWord) => {
                let name = read_word_name(&mut cursor)?;

                if name == IF_WORD || name == JMP_WORD {
                    let target = read_jump_target(&mut cursor)?;
                    format!("EXEC_WORD  {} -> {:04}", name, target)
                } else {
                    format!("EXEC_WORD  {}", name)
                }
            }

            None => {
                return Err(DecodeError::UnknownOpcode { opcode: op_byte, position }.into());
            }
        };

        let _ = writeln!(listing, "{:04}  {}", position, line);
    }

    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::error::ScriptError;

    #[test]
    fn jump_targets_are_big_endian() {
        assert_eq!(encode_jump_target(0x0102).unwrap(), [0x01, 0x02]);
        assert_eq!(read_jump_target(&mut Cursor::new(vec![0x01, 0x02])).unwrap(), 0x0102);

        assert_eq!(
            encode_jump_target(MAX_JUMP_DESTINATION + 1).unwrap_err(),
            ScriptError::Compile(CompileError::ProgramTooLarge {
                destination: MAX_JUMP_DESTINATION + 1,
                limit: MAX_JUMP_DESTINATION,
            })
        );
    }

    #[test]
    fn reads_each_value_kind() {
        let mut cursor = Cursor::new(vec![0x00, 42, 0x01, 3, 0x02, 1, 0x03, b'h', b'i', 0x00]);

        assert_eq!(read_value(&mut cursor).unwrap(), RobotValue::Int(42));
        assert_eq!(read_value(&mut cursor).unwrap(), RobotValue::Direction(Direction::West));
        assert_eq!(read_value(&mut cursor).unwrap(), RobotValue::Bool(true));
        assert_eq!(read_value(&mut cursor).unwrap(), RobotValue::from("hi"));
        assert!(!cursor.has_next());
    }

    #[test]
    fn rejects_bad_payloads() {
        let error = read_value(&mut Cursor::new(vec![0x02, 7])).unwrap_err();
        assert_eq!(
            error,
            ScriptError::Decode(DecodeError::InvalidPayload { kind: ValueKind::Bool, position: 0 })
        );

        let error = read_value(&mut Cursor::new(vec![0x09, 0])).unwrap_err();
        assert_eq!(
            error,
            ScriptError::Decode(DecodeError::UnknownValueTag { tag: 9, position: 0 })
        );

        // A string that runs off the end of the code.
        let error = read_value(&mut Cursor::new(vec![0x03, b'a'])).unwrap_err();
        assert_eq!(error, ScriptError::Decode(DecodeError::Exhausted { position: 2 }));
    }

    #[test]
    fn word_names_must_be_ascii() {
        let mut cursor = Cursor::new(vec![b'M', b'O', b'V', b'E', 0x00]);
        assert_eq!(read_word_name(&mut cursor).unwrap(), "MOVE");

        let error = read_word_name(&mut Cursor::new(vec![0xc3, 0xa9, 0x00])).unwrap_err();
        assert_eq!(error, ScriptError::Decode(DecodeError::InvalidWordName { position: 0 }));
    }

    #[test]
    fn disassembles_a_conditional() {
        let code = vec![
            0x00, 0x02, 0x01, // PUSH_VAL BOOL TRUE
            0x01, b'I', b'F', 0x00, 0x00, 0x0c, // EXEC_WORD IF -> 12
            0x00, 0x00, 0x07, // PUSH_VAL INT 7
        ];

        let listing = disassemble(&code).unwrap();

        assert_eq!(
            listing,
            "0000  PUSH_VAL   BOOL TRUE\n\
             0003  EXEC_WORD  IF -> 0012\n\
             0009  PUSH_VAL   INT 7\n"
        );
    }

    #[test]
    fn disassembly_stops_at_unknown_opcodes() {
        let error = disassemble(&[0x07]).unwrap_err();

        assert_eq!(
            error,
            ScriptError::Decode(DecodeError::UnknownOpcode { opcode: 7, position: 0 })
        );
    }
}
