use super::note::resolve_frequency;
use super::sample::SampleKind;

/// Rest marker in the pattern notation
pub const REST: &str = "~";

/// One sound-producing unit of a pattern body
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Token {
    /// Pitched note, kept as written (`c4`, `eb2`, ...)
    Note(String),
    /// Sample name from `s(...)` / `sound(...)`
    Sample(SampleKind),
}

impl Token {
    /// Frequency the token starts at
    pub fn frequency(&self) -> f32 {
        match self {
            Token::Note(text) => resolve_frequency(text),
            Token::Sample(kind) => kind.voicing().1.initial(),
        }
    }

    pub fn is_note(&self) -> bool {
        matches!(self, Token::Note(_))
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Note(text) => f.write_str(text),
            Token::Sample(kind) => write!(f, "{}", kind),
        }
    }
}
