use crate::{
    add_native_word,
    lang::code::{IF_WORD, JMP_WORD},
    runtime::{error, interpreter::Interpreter},
};

/// Conditional jump.  The destination is stored in the byte-code directly after the word's name.
/// A false flag jumps to it, a true flag carries on with the next instruction.
///
/// Signature: `flag -- `
fn word_if(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let target = interpreter.read_jump_target()?;
    let condition = interpreter.pop_as_bool()?;

    if !condition {
        interpreter.jump_to(target)?;
    }

    Ok(())
}

/// Unconditional jump to the destination stored after the word's name.
///
/// Signature: ` -- `
fn word_jmp(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let target = interpreter.read_jump_target()?;
    interpreter.jump_to(target)
}

pub fn register_control_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        IF_WORD,
        word_if,
        "Skip to the matching ELSE or THEN if the flag is false.",
        "flag -- "
    );

    add_native_word!(
        interpreter,
        JMP_WORD,
        word_jmp,
        "Jump forward, used to skip the ELSE branch of a conditional.",
        " -- "
    );
}
