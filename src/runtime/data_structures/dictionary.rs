use crate::{lang::source_buffer::SourceLocation, runtime::interpreter::WordHandler};
use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
};

/// The information stored in the dictionary for each word.
#[derive(Clone)]
pub struct WordInfo {
    /// Where in the Rust source the word was registered.
    pub location: SourceLocation,

    pub name: String,

    /// A simple description of the word.
    pub description: String,

    /// The stack signature of the word.
    pub signature: String,

    /// The code run when the word is executed.
    pub handler: WordHandler,
}

impl WordInfo {
    pub fn new(location: SourceLocation, name: String, handler: WordHandler) -> WordInfo {
        WordInfo {
            location,
            name,
            description: String::new(),
            signature: String::new(),
            handler,
        }
    }
}

/// The dictionary of every word the interpreter can execute.  Words are looked up by name each time
/// an EXEC_WORD instruction runs.  Registering a word under an existing name replaces it.
#[derive(Clone, Default)]
pub struct Dictionary {
    words: HashMap<String, WordInfo>,
}

/// Print a sorted listing of the words with their signatures and descriptions.
impl Display for Dictionary {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let mut words: Vec<&WordInfo> = self.words.values().collect();
        words.sort_by(|a, b| a.name.cmp(&b.name));

        let name_width = words.iter().map(|info| info.name.len()).max().unwrap_or(0);
        let signature_width = self
            .words
            .values()
            .map(|info| info.signature.len())
            .max()
            .unwrap_or(0);

        writeln!(formatter, "{} words defined.\n", self.words.len())?;

        for info in words {
            writeln!(
                formatter,
                "{:name_width$}  {:signature_width$}  --  {}",
                info.name,
                info.signature,
                info.description,
                name_width = name_width,
                signature_width = signature_width
            )?;
        }

        Ok(())
    }
}

impl Dictionary {
    pub fn new() -> Dictionary {
        Dictionary { words: HashMap::new() }
    }

    pub fn insert(&mut self, name: String, info: WordInfo) {
        let _ = self.words.insert(name, info);
    }

    pub fn try_get(&self, name: &str) -> Option<&WordInfo> {
        self.words.get(name)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
