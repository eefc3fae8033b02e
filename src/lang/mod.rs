/// Module for managing the original source code.
pub mod source_buffer;

/// A forward only reader used over both token lists and byte-code.
pub mod cursor;

/// Module for turning source code into a list of tokens for further processing.
pub mod tokenizing;

/// Module for defining the byte-code format of the robot virtual machine, along with its decoder
/// and disassembler.
pub mod code;

/// Module for compiling a list of tokens into byte-code.  IF/ELSE/THEN are resolved here into the
/// jump words the interpreter executes.
pub mod compilation;
