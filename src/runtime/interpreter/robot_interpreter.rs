use crate::{
    config::Config,
    lang::{
        code::{self, ByteCode, Op},
        compilation::compile,
        cursor::Cursor,
        source_buffer::SourceLocation,
        tokenizing::tokenize_from_source,
    },
    runtime::{
        data_structures::{
            dictionary::{Dictionary, WordInfo},
            robot::Robot,
            value::RobotValue,
            value_stack::ValueStack,
        },
        error::{self, DecodeError, RuntimeError},
        interpreter::{
            CodeManagement, DeviceManagement, Interpreter, InterpreterStack, WordHandler,
            WordManagement,
        },
    },
};
use log::{debug, trace};
use std::io::{stdout, Write};

/// The byte-code interpreter for the Toy Robot language.
///
/// The interpreter owns the dictionary and the robot, both of which live across programs.  The data
/// stack and the instruction cursor belong to a single run.
pub struct RobotInterpreter {
    /// The data stack for the current, or most recent, run.
    stack: ValueStack,

    /// Every word the interpreter knows.
    dictionary: Dictionary,

    /// The byte-code being executed, if a program is running.
    code: Option<Cursor<u8>>,

    /// Name of the word currently executing, used when reporting word failures.
    current_word: Option<String>,

    robot: Robot,

    output: Box<dyn Write>,
}

impl Default for RobotInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl RobotInterpreter {
    /// An interpreter with an empty dictionary, a default sized table and output going to stdout.
    pub fn new() -> RobotInterpreter {
        RobotInterpreter::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> RobotInterpreter {
        RobotInterpreter {
            stack: ValueStack::new(),
            dictionary: Dictionary::new(),
            code: None,
            current_word: None,
            robot: Robot::new(config),
            output: Box::new(stdout()),
        }
    }

    /// Send all word output somewhere other than stdout.
    pub fn set_output(&mut self, output: Box<dyn Write>) {
        self.output = output;
    }

    fn code_cursor(&mut self) -> error::Result<&mut Cursor<u8>> {
        self.code.as_mut().ok_or_else(|| RuntimeError::NoActiveProgram.into())
    }

    /// The decode and dispatch loop.  Control flow isn't handled here, the IF and JMP words move
    /// the cursor themselves.
    fn execute_loaded_code(&mut self) -> error::Result<()> {
        loop {
            let cursor = self.code_cursor()?;

            if !cursor.has_next() {
                break;
            }

            let position = cursor.position();
            let op_byte = cursor.get_next()?;

            match Op::from_byte(op_byte) {
                Some(Op::PushValue) => {
                    let value = code::read_value(cursor)?;

                    trace!("{:04}  push {:?}", position, value);
                    self.stack.push(value);
                }

                Some(Op::ExecuteWord) => {
                    let name = code::read_word_name(cursor)?;

                    trace!("{:04}  exec {}", position, name);
                    self.execute_word_named(&name)?;
                }

                None => {
                    return Err(DecodeError::UnknownOpcode { opcode: op_byte, position }.into());
                }
            }
        }

        Ok(())
    }
}

impl InterpreterStack for RobotInterpreter {
    fn stack(&self) -> &ValueStack {
        &self.stack
    }

    fn push(&mut self, value: RobotValue) {
        self.stack.push(value);
    }

    fn pop(&mut self) -> error::Result<RobotValue> {
        self.stack.pop()
    }
}

impl CodeManagement for RobotInterpreter {
    fn process_source(&mut self, path: &str, source: &str) -> error::Result<()> {
        let tokens = tokenize_from_source(path, source)?;
        let code = compile(tokens)?;

        self.stack = ValueStack::new();
        self.run_code(code)
    }

    fn run_code(&mut self, code: ByteCode) -> error::Result<()> {
        debug!("Running {} bytes of code.", code.len());

        // Keep whatever was running before so that a word can run code of its own.
        let previous = self.code.replace(Cursor::new(code));
        let result = self.execute_loaded_code();
        self.code = previous;

        match &result {
            Ok(()) => {
                debug!("Program finished, the stack peaked at {} values.", self.stack.max_depth())
            }
            Err(error) => debug!("Program stopped: {}", error),
        }

        result
    }

    fn code_position(&self) -> Option<usize> {
        self.code.as_ref().map(Cursor::position)
    }

    fn read_jump_target(&mut self) -> error::Result<usize> {
        let cursor = self.code_cursor()?;
        code::read_jump_target(cursor)
    }

    fn jump_to(&mut self, target: usize) -> error::Result<()> {
        trace!("jump to {:04}", target);
        self.code_cursor()?.advance_to(target)
    }

    fn current_word(&self) -> Option<&str> {
        self.current_word.as_deref()
    }
}

impl WordManagement for RobotInterpreter {
    fn add_word(
        &mut self,
        file: String,
        line: usize,
        column: usize,
        name: String,
        handler: WordHandler,
        description: String,
        signature: String,
    ) {
        let location = SourceLocation::new_from_info(&file, line, column);
        let mut info = WordInfo::new(location, name.clone(), handler);

        info.description = description;
        info.signature = signature;

        self.dictionary.insert(name, info);
    }

    fn find_word(&self, name: &str) -> Option<&WordInfo> {
        self.dictionary.try_get(name)
    }

    fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    fn execute_word_named(&mut self, name: &str) -> error::Result<()> {
        let Some(info) = self.find_word(name) else {
            return Err(RuntimeError::UnknownWord { word: name.to_string() }.into());
        };

        // Clone the handler out of the dictionary so that the handler can borrow the interpreter.
        let handler = info.handler.clone();

        let previous = self.current_word.replace(name.to_string());
        let result = (*handler)(self);
        self.current_word = previous;

        result
    }
}

impl DeviceManagement for RobotInterpreter {
    fn robot(&self) -> &Robot {
        &self.robot
    }

    fn robot_mut(&mut self) -> &mut Robot {
        &mut self.robot
    }

    fn output(&mut self) -> &mut dyn Write {
        self.output.as_mut()
    }
}

impl Interpreter for RobotInterpreter {}
