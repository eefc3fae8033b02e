use crate::{
    add_native_word,
    runtime::{
        error::{self, script_error_str},
        interpreter::Interpreter,
    },
};

/// Pop two INT values, run the checked operation and push the result.  Overflow fails the word
/// rather than wrapping.
fn checked_binary_op(
    interpreter: &mut dyn Interpreter,
    op: fn(i64, i64) -> Option<i64>,
) -> error::Result<()> {
    let b = interpreter.pop_as_int()?;
    let a = interpreter.pop_as_int()?;

    match op(a, b) {
        Some(result) => {
            interpreter.push(result.into());
            Ok(())
        }

        None => script_error_str(interpreter, "Integer overflow."),
    }
}

/// Pop two INT values and push the BOOL result of comparing them.
fn comparison_op(
    interpreter: &mut dyn Interpreter,
    op: fn(&i64, &i64) -> bool,
) -> error::Result<()> {
    let b = interpreter.pop_as_int()?;
    let a = interpreter.pop_as_int()?;

    interpreter.push(op(&a, &b).into());
    Ok(())
}

/// Signature: `a b -- a+b`
fn word_add(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    checked_binary_op(interpreter, i64::checked_add)
}

/// Signature: `a b -- a-b`
fn word_subtract(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    checked_binary_op(interpreter, i64::checked_sub)
}

/// Signature: `a b -- a*b`
fn word_multiply(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    checked_binary_op(interpreter, i64::checked_mul)
}

/// Integer division, truncating towards zero.
///
/// Signature: `a b -- a/b`
fn word_divide(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let b = interpreter.pop_as_int()?;
    let a = interpreter.pop_as_int()?;

    if b == 0 {
        return script_error_str(interpreter, "Division by zero.");
    }

    match a.checked_div(b) {
        Some(result) => {
            interpreter.push(result.into());
            Ok(())
        }

        None => script_error_str(interpreter, "Integer overflow."),
    }
}

/// Signature: `a b -- a>b`
fn word_greater_than(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    comparison_op(interpreter, i64::gt)
}

/// Signature: `a b -- a<b`
fn word_less_than(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    comparison_op(interpreter, i64::lt)
}

/// Compare any two values.  Values of different kinds are never equal.
///
/// Signature: `a b -- a=b`
fn word_equal(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push((a == b).into());
    Ok(())
}

/// Signature: `flag -- !flag`
fn word_not(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let flag = interpreter.pop_as_bool()?;

    interpreter.push((!flag).into());
    Ok(())
}

pub fn register_math_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(interpreter, "+", word_add, "Add two integers.", "a b -- sum");
    add_native_word!(
        interpreter,
        "-",
        word_subtract,
        "Subtract the top integer from the one below it.",
        "a b -- difference"
    );
    add_native_word!(interpreter, "*", word_multiply, "Multiply two integers.", "a b -- product");
    add_native_word!(
        interpreter,
        "/",
        word_divide,
        "Divide the second integer by the top one.",
        "a b -- quotient"
    );

    add_native_word!(
        interpreter,
        "GT",
        word_greater_than,
        "Is the second integer greater than the top one?",
        "a b -- flag"
    );
    add_native_word!(
        interpreter,
        "LT",
        word_less_than,
        "Is the second integer less than the top one?",
        "a b -- flag"
    );
    add_native_word!(interpreter, "EQ", word_equal, "Are the top two values equal?", "a b -- flag");
    add_native_word!(interpreter, "NOT", word_not, "Invert a flag.", "flag -- !flag");
}
