use core::str::Chars;
use std::fmt::{self, Display, Formatter};

/// The location in the source code where a token was found.  Used by the tokenizer to tag each
/// token and by the compiler to point its errors at the offending text.
///
/// This is a read-only structure.  Use the field accessor methods to get the values.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    /// Either the path to the file or a description of the source code, for example `<stdin>`.
    path: String,

    /// The 1 based line number in the source code.
    line: usize,

    /// The 1 based column number in the source code.
    column: usize,
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::new()
    }
}

/// Used for error reporting to show where in the source code an error originated.
impl Display for SourceLocation {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} ({}, {})", self.path, self.line, self.column)
    }
}

impl SourceLocation {
    /// Create a new SourceLocation with default values.
    pub fn new() -> SourceLocation {
        SourceLocation { path: "unspecified".to_string(), line: 1, column: 1 }
    }

    /// Create a new SourceLocation at the start of the given source.
    pub fn new_from_path(path: &str) -> Self {
        SourceLocation { path: path.to_owned(), line: 1, column: 1 }
    }

    /// Create a new SourceLocation with all of the needed information.  This is useful in
    /// conjunction with the location_here! macro.
    pub fn new_from_info(path: &str, line: usize, column: usize) -> Self {
        SourceLocation { path: path.to_owned(), line, column }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

/// Get the location of the macro invocation.  Native words use this to record where in the Rust
/// code they were registered from.
#[macro_export]
macro_rules! location_here {
    () => {
        $crate::lang::source_buffer::SourceLocation::new_from_info(
            file!(),
            line!() as usize,
            column!() as usize,
        )
    };
}

/// A forward only reader over program text.  As characters are consumed the location of the
/// reader is maintained so the tokenizer can tag every token with where it started.
///
/// The buffer borrows the source text, it is never copied.
pub struct SourceBuffer<'a> {
    chars: Chars<'a>,

    /// The location of the next character to be consumed.
    location: SourceLocation,

    /// A character that has been peeked at but not yet consumed.
    current: Option<char>,
}

impl<'a> SourceBuffer<'a> {
    pub fn new(path: &str, source: &'a str) -> Self {
        SourceBuffer {
            chars: source.chars(),
            location: SourceLocation::new_from_path(path),
            current: None,
        }
    }

    /// The location of the next character in the source code.
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// Take a peek at the next character in the source code without consuming it.
    pub fn peek_next(&mut self) -> Option<char> {
        if self.current.is_none() {
            self.current = self.chars.next();
        }

        self.current
    }

    /// Get and consume the next character in the source code.
    pub fn next_char(&mut self) -> Option<char> {
        let next = match self.current.take() {
            Some(peeked) => Some(peeked),
            None => self.chars.next(),
        };

        if let Some(next_char) = next {
            self.increment_location(next_char);
        }

        next
    }

    /// Advance one column for regular characters.  New lines reset the column and move on to the
    /// next line.
    fn increment_location(&mut self, next: char) {
        if next == '\n' {
            self.location.line += 1;
            self.location.column = 1;
        } else {
            self.location.column += 1;
        }
    }
}
