//! The terminal alphabet {a, b}.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A terminal symbol of the language. Anything else is outside the alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    #[serde(rename = "a")]
    A,
    #[serde(rename = "b")]
    B,
}

/// Every terminal, in alphabet order.
pub const ALPHABET: [Symbol; 2] = [Symbol::A, Symbol::B];

impl Symbol {
    pub const fn as_char(self) -> char {
        match self {
            Symbol::A => 'a',
            Symbol::B => 'b',
        }
    }

    /// Maps a character onto the alphabet, `None` for foreign characters.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'a' => Some(Symbol::A),
            'b' => Some(Symbol::B),
            _ => None,
        }
    }
}

impl TryFrom<char> for Symbol {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Symbol::from_char(c).ok_or(c)
    }
}

impl From<Symbol> for char {
    fn from(symbol: Symbol) -> Self {
        symbol.as_char()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
