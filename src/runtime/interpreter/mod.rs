use crate::{
    lang::code::ByteCode,
    runtime::{
        data_structures::{
            dictionary::{Dictionary, WordInfo},
            robot::Robot,
            value::{Direction, RobotValue},
            value_stack::ValueStack,
        },
        error,
    },
};
use std::{io::Write, rc::Rc};

pub mod robot_interpreter;

/// The code behind a dictionary word.  Handlers get the whole interpreter so that they can work the
/// data stack, move the instruction cursor and drive the robot.
pub type WordHandler = Rc<dyn Fn(&mut dyn Interpreter) -> error::Result<()>>;

/// Trait for managing the interpreter's data stack.
pub trait InterpreterStack {
    /// The full data stack, bottom first.
    fn stack(&self) -> &ValueStack;

    /// Push a value onto the stack.  This always succeeds.
    fn push(&mut self, value: RobotValue);

    /// Pop a value from the stack.  If the stack is empty a stack underflow error is returned.
    fn pop(&mut self) -> error::Result<RobotValue>;

    /// Pop the top value, which must be an INT.
    fn pop_as_int(&mut self) -> error::Result<i64> {
        self.pop()?.into_int()
    }

    /// Pop the top value, which must be a BOOL.
    fn pop_as_bool(&mut self) -> error::Result<bool> {
        self.pop()?.into_bool()
    }

    /// Pop the top value, which must be a DIRECTION.
    fn pop_as_direction(&mut self) -> error::Result<Direction> {
        self.pop()?.into_direction()
    }
}

/// Trait for compiling and running code, and for words that need to steer the instruction cursor.
pub trait CodeManagement {
    /// Tokenize, compile and run a program.  Each program gets a fresh data stack.
    fn process_source(&mut self, path: &str, source: &str) -> error::Result<()>;

    /// Run already compiled byte-code against the current data stack.
    fn run_code(&mut self, code: ByteCode) -> error::Result<()>;

    /// Offset of the next byte to be executed, if a program is running.
    fn code_position(&self) -> Option<usize>;

    /// Read the jump destination embedded after the word currently executing.
    fn read_jump_target(&mut self) -> error::Result<usize>;

    /// Continue execution at the given offset.  Execution can only move forward.
    fn jump_to(&mut self, target: usize) -> error::Result<()>;

    /// The name of the word currently executing, if any.
    fn current_word(&self) -> Option<&str>;
}

/// Trait for managing the dictionary of words.
pub trait WordManagement {
    /// Add a word to the dictionary, recording where in the Rust source it was registered.  Use the
    /// add_native_word! macro rather than calling this directly.
    #[allow(clippy::too_many_arguments)]
    fn add_word(
        &mut self,
        file: String,
        line: usize,
        column: usize,
        name: String,
        handler: WordHandler,
        description: String,
        signature: String,
    );

    fn find_word(&self, name: &str) -> Option<&WordInfo>;

    fn dictionary(&self) -> &Dictionary;

    /// Look up a word and run it.  Unknown words are an error.
    fn execute_word_named(&mut self, name: &str) -> error::Result<()>;
}

/// Trait for the state outside the language that words act on.
pub trait DeviceManagement {
    fn robot(&self) -> &Robot;

    fn robot_mut(&mut self) -> &mut Robot;

    /// Where REPORT and the printing words send their text.
    fn output(&mut self) -> &mut dyn Write;
}

/// The full interface handed to word handlers.
pub trait Interpreter: InterpreterStack + CodeManagement + WordManagement + DeviceManagement {}

/// Register a native word with the interpreter.
///
/// ```ignore
/// add_native_word!(interpreter, "DUP", word_dup, "Duplicate the top value.", "a -- a a");
/// ```
#[macro_export]
macro_rules! add_native_word {
    (
        $interpreter:expr ,
        $name:expr ,
        $function:expr ,
        $description:expr ,
        $signature:expr
    ) => {{
        use std::rc::Rc;

        $interpreter.add_word(
            file!().to_string(), // Where this word
            line!() as usize,    //  was registered.
            column!() as usize,
            $name.to_string(),
            Rc::new($function),
            $description.to_string(),
            $signature.to_string(),
        );
    }};
}
