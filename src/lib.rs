//! A small Forth-like language for driving a toy robot around a table.  Source is tokenized,
//! compiled to a compact byte-code and run by a stack based interpreter whose words move the
//! robot.

/// Module for managing source code and the generation of byte-code.
#[macro_use]
pub mod lang;

/// Module for the runtime and the data structures used by the interpreter.  As well as the
/// interpreter itself.
#[macro_use]
pub mod runtime;

/// Settings read from the environment.
pub mod config;
