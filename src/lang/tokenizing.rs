use crate::{
    lang::source_buffer::{SourceBuffer, SourceLocation},
    runtime::{
        data_structures::value::Direction,
        error::{self, LexError},
    },
};
use lazy_static::lazy_static;
use log::debug;
use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
};

/// The five kinds of token the language knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    Direction,
    Bool,
    String,
    Word,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            TokenKind::Number => "NUMBER",
            TokenKind::Direction => "DIRECTION",
            TokenKind::Bool => "BOOL",
            TokenKind::String => "STRING",
            TokenKind::Word => "WORD",
        };

        write!(f, "{}", name)
    }
}

/// The decoded value of a token.  Both string literals and words carry text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenValue {
    Number(u64),
    Direction(Direction),
    Bool(bool),
    Text(String),
}

/// A single unit of the language along with the text it was read from.
///
/// The kind and the value are kept separately, the compiler checks that they agree before emitting
/// any code for the token.
#[derive(Clone, Debug)]
pub struct Token {
    pub location: SourceLocation,
    pub kind: TokenKind,
    pub value: TokenValue,
    pub lexeme: String,
}

/// A list of tokens found in the source code.
pub type TokenList = Vec<Token>;

/// Tokens compare by what they hold, not by where they were found.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.value == other.value && self.lexeme == other.lexeme
    }
}

impl Eq for Token {}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.lexeme)
    }
}

impl Token {
    /// Create a token with an unspecified location.
    pub fn new(kind: TokenKind, value: TokenValue, lexeme: &str) -> Token {
        Token { location: SourceLocation::new(), kind, value, lexeme: lexeme.to_string() }
    }

    pub fn number(value: u64) -> Token {
        Token::new(TokenKind::Number, TokenValue::Number(value), &value.to_string())
    }

    pub fn direction(direction: Direction) -> Token {
        Token::new(TokenKind::Direction, TokenValue::Direction(direction), direction.name())
    }

    pub fn bool(value: bool) -> Token {
        let lexeme = if value { "TRUE" } else { "FALSE" };
        Token::new(TokenKind::Bool, TokenValue::Bool(value), lexeme)
    }

    /// A string literal token.  The lexeme gets the quotes, the value does not.
    pub fn string(text: &str) -> Token {
        Token::new(TokenKind::String, TokenValue::Text(text.to_string()), &format!("\"{}\"", text))
    }

    pub fn word(name: &str) -> Token {
        Token::new(TokenKind::Word, TokenValue::Text(name.to_string()), name)
    }
}

lazy_static! {
    /// The reserved words that turn into literal values rather than words.  These are case
    /// sensitive.
    static ref KEYWORDS: HashMap<&'static str, (TokenKind, TokenValue)> = {
        let mut keywords = HashMap::new();

        for direction in [Direction::North, Direction::East, Direction::South, Direction::West] {
            keywords.insert(
                direction.name(),
                (TokenKind::Direction, TokenValue::Direction(direction)),
            );
        }

        keywords.insert("TRUE", (TokenKind::Bool, TokenValue::Bool(true)));
        keywords.insert("FALSE", (TokenKind::Bool, TokenValue::Bool(false)));

        keywords
    };
}

/// Skip over whitespace in the text.  Stopping only at either the end of the buffer or the next
/// non-whitespace character.
fn skip_whitespace(buffer: &mut SourceBuffer) {
    while let Some(next) = buffer.peek_next() {
        if !next.is_whitespace() {
            break;
        }

        let _ = buffer.next_char();
    }
}

/// Process a string literal.  The buffer is sitting on the opening quote.  Everything up to the
/// closing quote is taken as is, including whitespace and new lines.  Returns the text without the
/// quotes.
fn process_string(buffer: &mut SourceBuffer) -> error::Result<(SourceLocation, String)> {
    let location = buffer.location().clone();
    let _ = buffer.next_char();

    let mut text = String::new();

    loop {
        match buffer.next_char() {
            Some('"') => break,

            // The terminator byte can't appear inside an encoded string.
            Some('\0') => {
                return Err(LexError::InvalidCharacter {
                    location: buffer.location().clone(),
                    character: '\0',
                }
                .into());
            }

            Some(next) => text.push(next),

            None => return Err(LexError::UnterminatedString { location }.into()),
        }
    }

    Ok((location, text))
}

/// Pull text out of the buffer until we hit a whitespace character.  Words are limited to printable
/// ASCII so that they can be encoded as plain bytes.
fn process_until_whitespace(buffer: &mut SourceBuffer) -> error::Result<(SourceLocation, String)> {
    let location = buffer.location().clone();
    let mut text = String::new();

    while let Some(next) = buffer.peek_next() {
        if next.is_whitespace() {
            break;
        }

        if !next.is_ascii_graphic() {
            return Err(LexError::InvalidCharacter {
                location: buffer.location().clone(),
                character: next,
            }
            .into());
        }

        let _ = buffer.next_char();
        text.push(next);
    }

    Ok((location, text))
}

/// Decide what a bare run of text is.  Digits make a number, keywords make their literal values and
/// everything else is a word.
fn classify(location: SourceLocation, text: String) -> error::Result<Token> {
    if text.chars().all(|c| c.is_ascii_digit()) {
        let value = text.parse::<u64>().map_err(|_| LexError::InvalidNumber {
            location: location.clone(),
            text: text.clone(),
        })?;

        return Ok(Token {
            location,
            kind: TokenKind::Number,
            value: TokenValue::Number(value),
            lexeme: text,
        });
    }

    if let Some((kind, value)) = KEYWORDS.get(text.as_str()) {
        return Ok(Token { location, kind: *kind, value: value.clone(), lexeme: text });
    }

    Ok(Token {
        location,
        kind: TokenKind::Word,
        value: TokenValue::Text(text.clone()),
        lexeme: text,
    })
}

/// Tokenize the source code from a string.  The path is only used to tag token locations.
pub fn tokenize_from_source(path: &str, source: &str) -> error::Result<TokenList> {
    let mut buffer = SourceBuffer::new(path, source);
    let mut token_list = TokenList::new();

    while let Some(next) = buffer.peek_next() {
        if next.is_whitespace() {
            skip_whitespace(&mut buffer);
            continue;
        }

        let token = if next == '"' {
            let (location, text) = process_string(&mut buffer)?;
            let lexeme = format!("\"{}\"", text);

            Token { location, kind: TokenKind::String, value: TokenValue::Text(text), lexeme }
        } else {
            let (location, text) = process_until_whitespace(&mut buffer)?;
            classify(location, text)?
        };

        token_list.push(token);
    }

    debug!("Tokenized {} into {} tokens.", path, token_list.len());
    Ok(token_list)
}

/// Tokenize source code that didn't come from a file.
pub fn tokenize(source: &str) -> error::Result<TokenList> {
    tokenize_from_source("<input>", source)
}
