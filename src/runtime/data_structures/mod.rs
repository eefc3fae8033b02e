/// Module contains the RobotValue enumeration and its implementation.  Values are what live on the
/// data stack and what PUSH_VAL instructions carry.
pub mod value;

/// The data stack used by a single program run.
pub mod value_stack;

/// The dictionary module provides the word dictionary used by the interpreter.
pub mod dictionary;

/// The simulated robot and the table it moves around on.
pub mod robot;
