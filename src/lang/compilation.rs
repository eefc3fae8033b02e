use crate::{
    lang::{
        code::{
            encode_jump_target, ByteCode, Op, ValueTag, IF_WORD, JMP_WORD, JUMP_ADDRESS_WIDTH,
            TERMINATOR,
        },
        cursor::Cursor,
        source_buffer::SourceLocation,
        tokenizing::{Token, TokenKind, TokenList, TokenValue},
    },
    runtime::error::{self, CompileError},
};
use log::debug;

const ELSE_WORD: &str = "ELSE";
const THEN_WORD: &str = "THEN";

/// Word names are written as raw bytes ending in the terminator.
fn is_encodable_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|byte| byte.is_ascii() && byte != TERMINATOR)
}

/// Book keeping for an IF that hasn't seen its THEN yet.  The indices point at the placeholder
/// destination bytes that need to be filled in once the real destination is known.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IfFrame {
    /// Where the IF's destination placeholder lives.
    pub if_patch_index: usize,

    /// Where the JMP's destination placeholder lives, once an ELSE has been seen.
    pub else_patch_index: Option<usize>,

    /// Where the IF was found, for reporting an IF that is never closed.
    pub location: SourceLocation,
}

/// Turns a token list into byte-code.  IF/ELSE/THEN are compiled into the IF and JMP words with
/// destinations that are patched in once the end of each block is reached.
pub struct CodeConstructor {
    tokens: Cursor<Token>,
    code: ByteCode,
    if_frames: Vec<IfFrame>,
}

impl CodeConstructor {
    pub fn new(tokens: TokenList) -> CodeConstructor {
        CodeConstructor {
            tokens: Cursor::new(tokens),
            code: ByteCode::new(),
            if_frames: Vec::new(),
        }
    }

    /// Compile every token, then make sure that every IF was closed.
    pub fn compile(mut self) -> error::Result<ByteCode> {
        while self.tokens.has_next() {
            let token = self.tokens.get_next()?;
            self.compile_token(&token)?;
        }

        if let Some(frame) = self.if_frames.pop() {
            return Err(CompileError::UnterminatedIf { location: frame.location }.into());
        }

        debug!("Compiled {} tokens into {} bytes.", self.tokens.len(), self.code.len());
        Ok(self.code)
    }

    fn compile_token(&mut self, token: &Token) -> error::Result<()> {
        match (token.kind, &token.value) {
            (TokenKind::Number, TokenValue::Number(number)) => {
                let byte = u8::try_from(*number).map_err(|_| CompileError::LiteralOutOfRange {
                    location: token.location.clone(),
                    value: *number,
                })?;

                self.push_value(ValueTag::Int, &[byte]);
            }

            (TokenKind::Direction, TokenValue::Direction(direction)) => {
                self.push_value(ValueTag::Direction, &[direction.to_byte()]);
            }

            (TokenKind::Bool, TokenValue::Bool(flag)) => {
                self.push_value(ValueTag::Bool, &[*flag as u8]);
            }

            (TokenKind::String, TokenValue::Text(text)) => {
                if text.as_bytes().contains(&TERMINATOR) {
                    return Err(CompileError::InvalidStringLiteral {
                        location: token.location.clone(),
                    }
                    .into());
                }

                self.push_value(ValueTag::String, text.as_bytes());
                self.code.push(TERMINATOR);
            }

            (TokenKind::Word, TokenValue::Text(name)) => match name.as_str() {
                IF_WORD => self.begin_if(&token.location),
                ELSE_WORD => self.begin_else(&token.location)?,
                THEN_WORD => self.end_if(&token.location)?,

                JMP_WORD => {
                    return Err(CompileError::ReservedWord {
                        location: token.location.clone(),
                        name: name.clone(),
                    }
                    .into());
                }

                _ if !is_encodable_name(name) => {
                    return Err(CompileError::InvalidWordName {
                        location: token.location.clone(),
                        name: name.clone(),
                    }
                    .into());
                }

                _ => self.execute_word(name),
            },

            (kind, _) => {
                return Err(CompileError::TokenValueMismatch {
                    location: token.location.clone(),
                    kind,
                    lexeme: token.lexeme.clone(),
                }
                .into());
            }
        }

        Ok(())
    }

    fn push_value(&mut self, tag: ValueTag, payload: &[u8]) {
        self.code.push(Op::PushValue as u8);
        self.code.push(tag as u8);
        self.code.extend_from_slice(payload);
    }

    fn execute_word(&mut self, name: &str) {
        self.code.push(Op::ExecuteWord as u8);
        self.code.extend_from_slice(name.as_bytes());
        self.code.push(TERMINATOR);
    }

    /// Emit a jump word followed by an empty destination.  Returns the index of the destination so
    /// that it can be patched later.
    fn jump_placeholder(&mut self, word: &str) -> usize {
        self.execute_word(word);

        let index = self.code.len();
        self.code.extend_from_slice(&[0; JUMP_ADDRESS_WIDTH]);

        index
    }

    /// Point the placeholder at `index` to the given destination.
    fn patch_jump(&mut self, index: usize, destination: usize) -> error::Result<()> {
        let address = encode_jump_target(destination)?;
        self.code[index..index + JUMP_ADDRESS_WIDTH].copy_from_slice(&address);

        Ok(())
    }

    fn begin_if(&mut self, location: &SourceLocation) {
        let if_patch_index = self.jump_placeholder(IF_WORD);

        self.if_frames.push(IfFrame {
            if_patch_index,
            else_patch_index: None,
            location: location.clone(),
        });
    }

    /// The false branch starts right after the JMP, which skips it when the true branch finishes.
    fn begin_else(&mut self, location: &SourceLocation) -> error::Result<()> {
        let Some(mut frame) = self.if_frames.pop() else {
            return Err(CompileError::UnmatchedElse { location: location.clone() }.into());
        };

        if frame.else_patch_index.is_some() {
            return Err(CompileError::DuplicateElse { location: location.clone() }.into());
        }

        let else_patch_index = self.jump_placeholder(JMP_WORD);
        self.patch_jump(frame.if_patch_index, self.code.len())?;

        frame.else_patch_index = Some(else_patch_index);
        self.if_frames.push(frame);

        Ok(())
    }

    /// Whichever jump is still open lands here.
    fn end_if(&mut self, location: &SourceLocation) -> error::Result<()> {
        let Some(frame) = self.if_frames.pop() else {
            return Err(CompileError::UnmatchedThen { location: location.clone() }.into());
        };

        let index = frame.else_patch_index.unwrap_or(frame.if_patch_index);
        self.patch_jump(index, self.code.len())
    }
}

/// Compile a token list into byte-code.
pub fn compile(tokens: TokenList) -> error::Result<ByteCode> {
    CodeConstructor::new(tokens).compile()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        lang::{code::disassemble, tokenizing::tokenize},
        runtime::{data_structures::value::Direction, error::ScriptError},
    };

    fn compile_source(source: &str) -> error::Result<ByteCode> {
        compile(tokenize(source)?)
    }

    #[test]
    fn literals_are_pushed() {
        let code = compile_source("3 NORTH TRUE \"hi\"").unwrap();

        assert_eq!(
            code,
            vec![
                0x00, 0x00, 3, //
                0x00, 0x01, Direction::North.to_byte(), //
                0x00, 0x02, 1, //
                0x00, 0x03, b'h', b'i', 0x00,
            ]
        );
    }

    #[test]
    fn words_are_name_and_terminator() {
        let code = compile_source("MOVE .").unwrap();

        assert_eq!(code, vec![0x01, b'M', b'O', b'V', b'E', 0x00, 0x01, b'.', 0x00]);
    }

    #[test]
    fn if_then_jumps_past_the_block() {
        let code = compile_source("IF MOVE THEN").unwrap();

        // IF word is 4 bytes plus 2 for its destination, MOVE is 6 bytes.
        assert_eq!(code.len(), 12);
        assert_eq!(&code[0..6], &[0x01, b'I', b'F', 0x00, 0x00, 12]);
    }

    #[test]
    fn if_else_then_layout() {
        let code = compile_source("TRUE IF 1 ELSE 2 THEN").unwrap();

        assert_eq!(
            disassemble(&code).unwrap(),
            "0000  PUSH_VAL   BOOL TRUE\n\
             0003  EXEC_WORD  IF -> 0019\n\
             0009  PUSH_VAL   INT 1\n\
             0012  EXEC_WORD  JMP -> 0022\n\
             0019  PUSH_VAL   INT 2\n"
        );
    }

    #[test]
    fn nested_conditionals_patch_their_own_frames() {
        let code = compile_source("IF IF 1 THEN ELSE 2 THEN").unwrap();

        assert_eq!(
            disassemble(&code).unwrap(),
            "0000  EXEC_WORD  IF -> 0022\n\
             0006  EXEC_WORD  IF -> 0015\n\
             0012  PUSH_VAL   INT 1\n\
             0015  EXEC_WORD  JMP -> 0025\n\
             0022  PUSH_VAL   INT 2\n"
        );
    }

    #[test]
    fn structural_errors() {
        assert!(matches!(
            compile_source("1 THEN").unwrap_err(),
            ScriptError::Compile(CompileError::UnmatchedThen { .. })
        ));

        assert!(matches!(
            compile_source("ELSE 1 THEN").unwrap_err(),
            ScriptError::Compile(CompileError::UnmatchedElse { .. })
        ));

        assert!(matches!(
            compile_source("TRUE IF 1 ELSE 2 ELSE 3 THEN").unwrap_err(),
            ScriptError::Compile(CompileError::DuplicateElse { .. })
        ));

        assert!(matches!(
            compile_source("TRUE IF 1").unwrap_err(),
            ScriptError::Compile(CompileError::UnterminatedIf { .. })
        ));
    }

    #[test]
    fn rejects_literals_wider_than_a_byte() {
        assert!(compile_source("255").is_ok());

        assert!(matches!(
            compile_source("256").unwrap_err(),
            ScriptError::Compile(CompileError::LiteralOutOfRange { value: 256, .. })
        ));
    }

    #[test]
    fn rejects_tokens_with_the_wrong_value() {
        let token = Token::new(TokenKind::Number, TokenValue::Text("3".to_string()), "3");

        assert!(matches!(
            compile(vec![token]).unwrap_err(),
            ScriptError::Compile(CompileError::TokenValueMismatch { kind: TokenKind::Number, .. })
        ));
    }

    #[test]
    fn rejects_names_that_can_not_be_encoded() {
        for name in ["A\0B", "caf\u{e9}", ""] {
            assert!(matches!(
                compile(vec![Token::word(name)]).unwrap_err(),
                ScriptError::Compile(CompileError::InvalidWordName { .. })
            ));
        }
    }

    #[test]
    fn rejects_strings_holding_the_terminator() {
        assert!(matches!(
            compile(vec![Token::string("x\0y")]).unwrap_err(),
            ScriptError::Compile(CompileError::InvalidStringLiteral { .. })
        ));
    }

    #[test]
    fn jmp_is_only_generated_by_the_compiler() {
        assert!(matches!(
            compile_source("JMP MOVE 1 1 1").unwrap_err(),
            ScriptError::Compile(CompileError::ReservedWord { name, .. }) if name == "JMP"
        ));
    }

    #[test]
    fn long_conditional_blocks_use_both_address_bytes() {
        let source = format!("IF {} THEN", "MOVE ".repeat(100));
        let code = compile_source(&source).unwrap();

        assert_eq!(code.len(), 606);
        assert_eq!(&code[4..6], &606u16.to_be_bytes());
    }
}
