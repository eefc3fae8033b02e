use crate::runtime::error::{self, DecodeError};

/// A forward only, bounds checked reader over an ordered list of items.  The compiler walks its
/// token list with one and the interpreter walks the byte-code with another.
///
/// There is no rewind and no random access.  The only way to move other than one item at a time is
/// `advance_to`, which may only move forward.
#[derive(Clone, Debug)]
pub struct Cursor<T> {
    items: Vec<T>,
    position: usize,
}

impl<T: Clone> Cursor<T> {
    /// Take ownership of the items and start reading from the first one.
    pub fn new(items: Vec<T>) -> Cursor<T> {
        Cursor { items, position: 0 }
    }

    /// Are there any items left to read?
    pub fn has_next(&self) -> bool {
        self.position < self.items.len()
    }

    /// Read the next item and move past it.  Reading past the end of the items is an error rather
    /// than a panic, byte-code can be truncated.
    pub fn get_next(&mut self) -> error::Result<T> {
        match self.items.get(self.position) {
            Some(item) => {
                self.position += 1;
                Ok(item.clone())
            }

            None => Err(DecodeError::Exhausted { position: self.position }.into()),
        }
    }

    /// Index of the next item to be read.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Skip forward so that the next item read is the one at `target`.  Moving to one past the last
    /// item is allowed and leaves the cursor exhausted.
    pub fn advance_to(&mut self, target: usize) -> error::Result<()> {
        if target < self.position || target > self.items.len() {
            return Err(DecodeError::InvalidJump { position: self.position, target }.into());
        }

        self.position = target;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::error::ScriptError;

    #[test]
    fn reads_items_in_order() {
        let mut cursor = Cursor::new(vec![1u8, 2, 3]);

        assert_eq!(cursor.len(), 3);
        assert!(cursor.has_next());
        assert_eq!(cursor.get_next().unwrap(), 1);
        assert_eq!(cursor.get_next().unwrap(), 2);
        assert_eq!(cursor.get_next().unwrap(), 3);
        assert!(!cursor.has_next());
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn reading_past_the_end_fails() {
        let mut cursor = Cursor::new(vec!["only"]);
        let _ = cursor.get_next().unwrap();

        let error = cursor.get_next().unwrap_err();
        assert_eq!(error, ScriptError::Decode(DecodeError::Exhausted { position: 1 }));

        let mut empty: Cursor<char> = Cursor::new(Vec::new());
        assert!(empty.is_empty());
        assert!(empty.get_next().is_err());
    }

    #[test]
    fn advances_forward_only() {
        let mut cursor = Cursor::new(vec![0u8; 6]);
        let _ = cursor.get_next().unwrap();

        cursor.advance_to(4).unwrap();
        assert_eq!(cursor.position(), 4);

        assert_eq!(
            cursor.advance_to(2).unwrap_err(),
            ScriptError::Decode(DecodeError::InvalidJump { position: 4, target: 2 })
        );
        assert!(cursor.advance_to(7).is_err());

        cursor.advance_to(6).unwrap();
        assert!(!cursor.has_next());
    }
}
