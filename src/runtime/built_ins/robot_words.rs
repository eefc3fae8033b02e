use crate::{
    add_native_word,
    runtime::{error, interpreter::Interpreter},
};
use log::debug;

/// Put the robot on the table.  A position off the table is ignored.
///
/// Signature: `x y direction -- `
fn word_place(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let facing = interpreter.pop_as_direction()?;
    let y = interpreter.pop_as_int()?;
    let x = interpreter.pop_as_int()?;

    let _ = interpreter.robot_mut().place(x, y, facing);
    Ok(())
}

/// Move one square in the direction the robot is facing.
///
/// Signature: ` -- `
fn word_move(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let _ = interpreter.robot_mut().move_forward();
    Ok(())
}

/// Signature: ` -- `
fn word_left(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let _ = interpreter.robot_mut().turn_left();
    Ok(())
}

/// Signature: ` -- `
fn word_right(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let _ = interpreter.robot_mut().turn_right();
    Ok(())
}

/// Write the robot's position as `X,Y,DIRECTION`.  Nothing is written if it hasn't been placed.
///
/// Signature: ` -- `
fn word_report(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    match interpreter.robot().position() {
        Some(position) => writeln!(interpreter.output(), "{}", position)?,
        None => debug!("Ignoring REPORT, the robot has not been placed."),
    }

    Ok(())
}

pub fn register_robot_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "PLACE",
        word_place,
        "Place the robot on the table at x, y facing the given direction.",
        "x y direction -- "
    );
    add_native_word!(interpreter, "MOVE", word_move, "Move the robot forward one square.", " -- ");
    add_native_word!(interpreter, "LEFT", word_left, "Turn the robot to its left.", " -- ");
    add_native_word!(interpreter, "RIGHT", word_right, "Turn the robot to its right.", " -- ");
    add_native_word!(
        interpreter,
        "REPORT",
        word_report,
        "Print the robot's position and direction.",
        " -- "
    );
}
