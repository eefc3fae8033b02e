use crate::runtime::{
    data_structures::value::RobotValue,
    error::{self, RuntimeError},
};
use std::slice::Iter;

/// The data stack words pass their arguments and results on.  There is no depth limit, the stack
/// grows for as long as the program keeps pushing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValueStack {
    values: Vec<RobotValue>,

    /// The deepest the stack has been since it was created.
    max_depth: usize,
}

impl ValueStack {
    pub fn new() -> ValueStack {
        ValueStack { values: Vec::new(), max_depth: 0 }
    }

    pub fn push(&mut self, value: RobotValue) {
        self.values.push(value);

        if self.values.len() > self.max_depth {
            self.max_depth = self.values.len();
        }
    }

    /// Pop the top value.  An empty stack is an error, never a default value.
    pub fn pop(&mut self) -> error::Result<RobotValue> {
        self.values.pop().ok_or_else(|| RuntimeError::StackUnderflow.into())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Iterate from the bottom of the stack to the top.
    pub fn iter(&self) -> Iter<'_, RobotValue> {
        self.values.iter()
    }

    pub fn as_slice(&self) -> &[RobotValue] {
        &self.values
    }
}
