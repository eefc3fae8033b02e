/// The IF and JMP words that structured control flow compiles down to.
pub mod control_words;

/// Words that do arithmetic, comparison and logic.
pub mod math_words;

/// Words that manipulate the data stack.
pub mod stack_words;

/// Words that write to the interpreter's output.
pub mod io_words;

/// Words that drive the robot.
pub mod robot_words;

use crate::runtime::{
    built_ins::{
        control_words::register_control_words, io_words::register_io_words,
        math_words::register_math_words, robot_words::register_robot_words,
        stack_words::register_stack_words,
    },
    interpreter::Interpreter,
};

/// Register every native word of the language.
pub fn register_builtin_words(interpreter: &mut dyn Interpreter) {
    register_control_words(interpreter);
    register_math_words(interpreter);
    register_stack_words(interpreter);
    register_io_words(interpreter);
    register_robot_words(interpreter);
}
