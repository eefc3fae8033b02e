use crate::{
    add_native_word,
    runtime::{error, interpreter::Interpreter},
};

/// Pop the top value and write it followed by a new line.
///
/// Signature: `value -- `
fn word_print(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;

    writeln!(interpreter.output(), "{}", value)?;
    Ok(())
}

/// Write the whole stack, bottom first, without changing it.
///
/// Signature: ` -- `
fn word_print_stack(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let listing: Vec<String> = interpreter.stack().iter().map(ToString::to_string).collect();

    writeln!(interpreter.output(), "<{}> {}", listing.len(), listing.join(" "))?;
    Ok(())
}

/// Write the dictionary listing.
///
/// Signature: ` -- `
fn word_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let listing = interpreter.dictionary().to_string();

    write!(interpreter.output(), "{}", listing)?;
    Ok(())
}

pub fn register_io_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(interpreter, ".", word_print, "Print the top value.", "value -- ");
    add_native_word!(
        interpreter,
        ".S",
        word_print_stack,
        "Print the stack without changing it.",
        " -- "
    );
    add_native_word!(interpreter, "WORDS", word_words, "List every known word.", " -- ");
}
