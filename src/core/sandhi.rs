// File: src/core/sandhi.rs
//! Mandarin tone sandhi over one phrase.
//!
//! Three rules, applied right to left in a single pass:
//! - third tone: 3 → 2 before an *originally* third-tone syllable
//! - 不: 4 → 2 before a syllable that is still fourth tone after its own sandhi
//! - 一: 1 → 2 before a fourth tone, 1 → 4 before tones 1-3, unchanged before neutral
use crate::core::tone::Tone;

/// Lexical items whose tone depends on the following syllable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lexeme {
    /// 不
    Bu,
    /// 一
    Yi,
}

/// A syllable as seen by the rules: what it is and the tone it was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub lexeme: Option<Lexeme>,
    pub tone: Tone,
}

impl Token {
    pub fn new(lexeme: Option<Lexeme>, tone: Tone) -> Self {
        Self { lexeme, tone }
    }
}

/// Computes the spoken tone of every token. The output has the same length as
/// the input and the last tone is always the written one.
pub fn resolve_tones(tokens: &[Token]) -> Vec<Tone> {
    let mut result: Vec<Tone> = tokens.iter().map(|t| t.tone).collect();
    if tokens.len() < 2 {
        return result;
    }

    for i in (0..tokens.len() - 1).rev() {
        let current = tokens[i];
        // Rule 1 looks at the written tone, rules 2 and 3 at the spoken one.
        let next_original = tokens[i + 1].tone;
        let next_result = result[i + 1];

        result[i] = third_tone(current.tone, next_original)
            .or_else(|| lexical(current, next_result))
            .unwrap_or(current.tone);
    }

    result
}

fn third_tone(current: Tone, next_original: Tone) -> Option<Tone> {
    (current == Tone::Third && next_original == Tone::Third).then_some(Tone::Second)
}

fn lexical(token: Token, next_result: Tone) -> Option<Tone> {
    match (token.lexeme?, token.tone) {
        (Lexeme::Bu, Tone::Fourth) if next_result == Tone::Fourth => Some(Tone::Second),
        (Lexeme::Yi, Tone::First) => match next_result {
            Tone::Fourth => Some(Tone::Second),
            Tone::First | Tone::Second | Tone::Third => Some(Tone::Fourth),
            Tone::Neutral => None,
        },
        _ => None,
    }
}
