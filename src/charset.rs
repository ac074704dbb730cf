//! Character set module
//!
//! Resolves a preset name or literal string into the effective alphabet,
//! minus an exclusion set.

use crate::error::{GenerationError, Result};
use std::fmt;

const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()-_=+[]{}|;:',.<>?/`~";
const ALL: &str = concat!(
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "0123456789",
    "!@#$%^&*()-_=+[]{}|;:',.<>?/`~"
);

/// Built-in character set presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    /// Lowercase then uppercase letters
    Chat,
    /// Decimal digits
    Num,
    /// Punctuation and symbols
    Sym,
    /// Chat + Num + SYM
    All,
}

impl Charset {
    pub const ALL_PRESETS: [Charset; 4] = [Charset::Chat, Charset::Num, Charset::Sym, Charset::All];

    /// Name used to select the preset (case-sensitive)
    pub fn name(self) -> &'static str {
        match self {
            Charset::Chat => "Chat",
            Charset::Num => "Num",
            Charset::Sym => "SYM",
            Charset::All => "All",
        }
    }

    pub fn symbols(self) -> &'static str {
        match self {
            Charset::Chat => LETTERS,
            Charset::Num => DIGITS,
            Charset::Sym => SYMBOLS,
            Charset::All => ALL,
        }
    }

    /// Look up a preset by its exact name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL_PRESETS.into_iter().find(|c| c.name() == name)
    }
}

/// Ordered, non-empty sequence of symbols used for generation.
///
/// Symbol order fixes enumeration order. Duplicates are not removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Build an alphabet from explicit symbols
    pub fn new<I: IntoIterator<Item = char>>(symbols: I) -> Result<Self> {
        let symbols: Vec<char> = symbols.into_iter().collect();
        if symbols.is_empty() {
            return Err(GenerationError::EmptyAlphabet);
        }
        Ok(Self { symbols })
    }

    /// Resolve a preset name or custom string, then drop every excluded symbol.
    ///
    /// Remaining symbols keep their relative order.
    pub fn resolve(input: &str, exclude: &str) -> Result<Self> {
        let source = Charset::from_name(input)
            .map(Charset::symbols)
            .unwrap_or(input);

        Self::new(source.chars().filter(|c| !exclude.contains(*c)))
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Construction rejects empty alphabets, so this is never true
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.symbols.iter().try_for_each(|c| write!(f, "{}", c))
    }
}
