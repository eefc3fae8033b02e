use log::debug;
use std::{
    env::args,
    fs::read_to_string,
    io::{stdin, BufRead},
    process::ExitCode,
};
use toyrobot::{
    config::Config,
    lang::{code::disassemble, compilation::compile, tokenizing::tokenize_from_source},
    runtime::{
        built_ins::register_builtin_words,
        error::{self, ScriptError},
        interpreter::{robot_interpreter::RobotInterpreter, CodeManagement},
    },
};

/// Command line settings.  `toyrobot [--bytecode] [script]`
struct Arguments {
    show_bytecode: bool,
    script: Option<String>,
}

fn parse_arguments() -> error::Result<Arguments> {
    let mut arguments = Arguments { show_bytecode: false, script: None };

    for argument in args().skip(1) {
        match argument.as_str() {
            "--bytecode" => arguments.show_bytecode = true,

            _ if arguments.script.is_none() => arguments.script = Some(argument),

            _ => {
                return Err(ScriptError::Config(format!("unexpected argument '{}'", argument)));
            }
        }
    }

    Ok(arguments)
}

/// Print the compiled form of a program to stdout.
fn print_bytecode(path: &str, source: &str) -> error::Result<()> {
    let code = compile(tokenize_from_source(path, source)?)?;

    print!("{}", disassemble(&code)?);
    Ok(())
}

fn run_program(
    interpreter: &mut RobotInterpreter,
    show_bytecode: bool,
    path: &str,
    source: &str,
) -> error::Result<()> {
    if show_bytecode {
        print_bytecode(path, source)?;
    }

    interpreter.process_source(path, source)
}

/// Run every line of stdin as its own program.  A failing line is reported and the next one is
/// run against the same robot.
fn run_stdin(interpreter: &mut RobotInterpreter, show_bytecode: bool) -> error::Result<()> {
    for (index, bytes) in stdin().lock().split(b'\n').enumerate() {
        let path = format!("<stdin:{}>", index + 1);

        let line = match String::from_utf8(bytes?) {
            Ok(line) => line,

            Err(_) => {
                eprintln!("{}: line is not valid UTF-8", path);
                continue;
            }
        };

        let line = line.trim_end_matches('\r');

        if line.trim().is_empty() {
            continue;
        }

        if let Err(error) = run_program(interpreter, show_bytecode, &path, line) {
            eprintln!("{}: {}", path, error);
        }
    }

    Ok(())
}

fn run() -> error::Result<()> {
    let arguments = parse_arguments()?;
    let config = Config::from_env()?;

    debug!("Table is {}x{}.", config.table_width, config.table_height);

    // Create the interpreter and give it the native words.
    let mut interpreter = RobotInterpreter::with_config(&config);
    register_builtin_words(&mut interpreter);

    match &arguments.script {
        Some(path) => {
            let source = read_to_string(path)?;
            run_program(&mut interpreter, arguments.show_bytecode, path, &source)
        }

        None => run_stdin(&mut interpreter, arguments.show_bytecode),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,

        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}
