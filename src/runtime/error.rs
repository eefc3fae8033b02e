use crate::{
    lang::{source_buffer::SourceLocation, tokenizing::TokenKind},
    runtime::{
        data_structures::value::{RobotValue, ValueKind},
        interpreter::Interpreter,
    },
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScriptError>;

/// Problems found while splitting the source text into tokens.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string")]
    UnterminatedString { location: SourceLocation },

    #[error("{location}: invalid character {character:?}")]
    InvalidCharacter { location: SourceLocation, character: char },

    #[error("{location}: number {text} is too large")]
    InvalidNumber { location: SourceLocation, text: String },
}

/// Problems found while turning tokens into byte-code.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("{location}: token '{lexeme}' does not hold a {kind} value")]
    TokenValueMismatch { location: SourceLocation, kind: TokenKind, lexeme: String },

    #[error("{location}: ELSE without a matching IF")]
    UnmatchedElse { location: SourceLocation },

    #[error("{location}: THEN without a matching IF")]
    UnmatchedThen { location: SourceLocation },

    #[error("{location}: IF already has an ELSE")]
    DuplicateElse { location: SourceLocation },

    #[error("{location}: IF without a matching THEN")]
    UnterminatedIf { location: SourceLocation },

    #[error("{location}: word name {name:?} must be non-empty ASCII without NUL characters")]
    InvalidWordName { location: SourceLocation, name: String },

    #[error("{location}: string literal contains a NUL character")]
    InvalidStringLiteral { location: SourceLocation },

    #[error("{location}: {name} is generated by the compiler and can't be used in source")]
    ReservedWord { location: SourceLocation, name: String },

    #[error("{location}: literal {value} does not fit in a byte")]
    LiteralOutOfRange { location: SourceLocation, value: u64 },

    #[error("jump destination {destination} is past the largest addressable offset {limit}")]
    ProgramTooLarge { destination: usize, limit: usize },
}

/// Malformed byte-code found by the interpreter or the disassembler.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("instruction stream exhausted at offset {position}")]
    Exhausted { position: usize },

    #[error("unknown opcode {opcode:#04x} at offset {position}")]
    UnknownOpcode { opcode: u8, position: usize },

    #[error("unknown value tag {tag:#04x} at offset {position}")]
    UnknownValueTag { tag: u8, position: usize },

    #[error("invalid {kind} payload at offset {position}")]
    InvalidPayload { kind: ValueKind, position: usize },

    #[error("word name at offset {position} is not ASCII")]
    InvalidWordName { position: usize },

    #[error("jump from offset {position} to {target} is outside the instruction stream")]
    InvalidJump { position: usize, target: usize },
}

/// Failures raised while the byte-code is executing.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("unknown word {word}")]
    UnknownWord { word: String },

    #[error("empty stack")]
    StackUnderflow,

    #[error("expected a {expected} value, found {found:?}")]
    TypeMismatch { expected: ValueKind, found: RobotValue },

    #[error("{word} at offset {position}: {message}")]
    WordFailed { word: String, position: usize, message: String },

    #[error("no program is running")]
    NoActiveProgram,

    #[error("I/O error: {0}")]
    Io(String),
}

/// Any error that stops a Toy Robot program.  Whichever stage failed, the first error found is the
/// one handed back to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Allow for the conversion of a std::io::Error into a ScriptError.
impl From<std::io::Error> for ScriptError {
    fn from(error: std::io::Error) -> ScriptError {
        RuntimeError::Io(error.to_string()).into()
    }
}

/// Fail the currently executing word with a message.  The word's name and the interpreter's
/// position in the byte-code are filled in from the interpreter.
pub fn script_error<T>(interpreter: &dyn Interpreter, message: String) -> Result<T> {
    let word = interpreter.current_word().unwrap_or("<none>").to_string();
    let position = interpreter.code_position().unwrap_or(0);

    Err(RuntimeError::WordFailed { word, position, message }.into())
}

pub fn script_error_str<T>(interpreter: &dyn Interpreter, message: &str) -> Result<T> {
    script_error(interpreter, message.to_string())
}
