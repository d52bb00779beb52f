//! Pattern calls extracted from live-coding source
//!
//! Only one call is interpreted per piece of code: the first `note("...")`,
//! or failing that the first `s("...")` / `sound("...")`. Its quoted body is
//! split into whitespace-separated tokens with rests dropped. Mini-notation
//! operators (`*`, `[]`, `<>`, `(n,k)`) are not evaluated; their text stays
//! inside the tokens.

mod extractor;

pub use extractor::{extract, split_tokens};

use crate::types::{SampleKind, Token};

/// Which function the pattern body came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CallKind {
    /// `note("...")`: pitched tokens
    Note,
    /// `s("...")` or `sound("...")`: sample names
    Sound,
}

/// The pattern call selected from a code string
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternCall {
    pub kind: CallKind,
    /// Quoted body as written
    pub body: String,
    /// Body tokens with rests removed
    pub tokens: Vec<String>,
}

impl PatternCall {
    /// Tokens interpreted according to the call kind
    pub fn typed_tokens(&self) -> Vec<Token> {
        self.tokens
            .iter()
            .map(|text| match self.kind {
                CallKind::Note => Token::Note(text.clone()),
                CallKind::Sound => Token::Sample(SampleKind::from_name(text)),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }
}
