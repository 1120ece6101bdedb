// File: src/core/converter.rs
use crate::core::sandhi::Lexeme;
use crate::core::tone::Tone;
use std::fmt;

/// Pinyin vowels and their tone 1-4 marked forms, in lookup priority order.
static TONE_MARKS: [(char, [char; 4]); 12] = [
    ('a', ['ā', 'á', 'ǎ', 'à']),
    ('e', ['ē', 'é', 'ě', 'è']),
    ('i', ['ī', 'í', 'ǐ', 'ì']),
    ('o', ['ō', 'ó', 'ǒ', 'ò']),
    ('u', ['ū', 'ú', 'ǔ', 'ù']),
    ('ü', ['ǖ', 'ǘ', 'ǚ', 'ǜ']),
    ('A', ['Ā', 'Á', 'Ǎ', 'À']),
    ('E', ['Ē', 'É', 'Ě', 'È']),
    ('I', ['Ī', 'Í', 'Ǐ', 'Ì']),
    ('O', ['Ō', 'Ó', 'Ǒ', 'Ò']),
    ('U', ['Ū', 'Ú', 'Ǔ', 'Ù']),
    ('Ü', ['Ǖ', 'Ǘ', 'Ǚ', 'Ǜ']),
];

/// Wade-Giles superscripts for tones 1 through 5.
const SUPERSCRIPTS: [char; 5] = ['¹', '²', '³', '⁴', '⁵'];

/// Bopomofo neutral tone dot, written *before* the syllable.
const NEUTRAL_DOT: char = '˙';

/// Bopomofo postfix marks. Tone 1 is unmarked.
const BOPOMOFO_MARKS: [(Tone, char); 3] = [
    (Tone::Second, 'ˊ'),
    (Tone::Third, 'ˇ'),
    (Tone::Fourth, 'ˋ'),
];

const BOPOMOFO_BU: &str = "ㄅㄨ";
const BOPOMOFO_YI: &str = "ㄧ";

/// One decoded syllable. `surface` is the text exactly as it appeared in the phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syllable<'a> {
    pub surface: &'a str,
    pub base: String,
    pub tone: Tone,
}

impl<'a> Syllable<'a> {
    fn new(surface: &'a str, base: impl Into<String>, tone: Tone) -> Self {
        Self { surface, base: base.into(), tone }
    }

    fn unmarked(surface: &'a str, tone: Tone) -> Self {
        Self::new(surface, surface, tone)
    }
}

/// Reads and writes tones for a single notation.
pub trait ToneCodec: Send + Sync {
    /// Splits a syllable into its base spelling and tone. Never fails:
    /// unreadable markers decode as the notation's default tone.
    fn decode<'a>(&self, surface: &'a str) -> Syllable<'a>;

    /// Writes a full tone (1-4) onto a decoded syllable.
    fn mark(&self, syllable: &Syllable<'_>, tone: Tone) -> String;

    /// Recognises 不 / 一 from a base spelling.
    fn lexeme(&self, base: &str) -> Option<Lexeme>;

    /// Re-encodes `syllable` with `tone`. The neutral tone is never a
    /// sandhi target, so asking for it leaves the syllable untouched.
    fn encode(&self, syllable: &Syllable<'_>, tone: Tone) -> String {
        if tone.is_full() {
            self.mark(syllable, tone)
        } else {
            syllable.surface.to_string()
        }
    }

    /// Whether tones can be read back out of this notation at all.
    fn transforms(&self) -> bool {
        true
    }
}

fn latin_lexeme(base: &str, bu: &[&str], yi: &[&str]) -> Option<Lexeme> {
    if bu.iter().any(|b| base.eq_ignore_ascii_case(b)) {
        Some(Lexeme::Bu)
    } else if yi.iter().any(|y| base.eq_ignore_ascii_case(y)) {
        Some(Lexeme::Yi)
    } else {
        None
    }
}

/// Finds the first tone-marked vowel in table order: `(bare vowel, marks, marked char, tone)`.
fn find_tone_mark(surface: &str) -> Option<(char, &'static [char; 4], char, Tone)> {
    TONE_MARKS.iter().find_map(|(vowel, marks)| {
        marks
            .iter()
            .zip(Tone::FULL)
            .find(|(mark, _)| surface.contains(**mark))
            .map(|(mark, tone)| (*vowel, marks, *mark, tone))
    })
}

/// `ni3 hao3`: tone digit appended to each syllable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericCodec;

impl ToneCodec for NumericCodec {
    fn decode<'a>(&self, surface: &'a str) -> Syllable<'a> {
        match surface.chars().last().and_then(Tone::from_digit) {
            // Tone digits are ASCII, so the last byte is the whole char.
            Some(tone) => Syllable::new(surface, &surface[..surface.len() - 1], tone),
            None => Syllable::unmarked(surface, Tone::Neutral),
        }
    }

    fn mark(&self, syllable: &Syllable<'_>, tone: Tone) -> String {
        format!("{}{}", syllable.base, tone.number())
    }

    fn lexeme(&self, base: &str) -> Option<Lexeme> {
        latin_lexeme(base, &["bu"], &["yi"])
    }
}

/// `nǐ hǎo`: tone carried by a diacritic on the nucleus vowel.
#[derive(Debug, Clone, Copy, Default)]
pub struct PinyinCodec;

impl ToneCodec for PinyinCodec {
    fn decode<'a>(&self, surface: &'a str) -> Syllable<'a> {
        match find_tone_mark(surface) {
            Some((vowel, _, mark, tone)) => {
                Syllable::new(surface, surface.replace(mark, &vowel.to_string()), tone)
            }
            None => Syllable::unmarked(surface, Tone::Neutral),
        }
    }

    fn mark(&self, syllable: &Syllable<'_>, tone: Tone) -> String {
        let (Some((_, marks, old, _)), Some(idx)) = (find_tone_mark(syllable.surface), tone.mark_index())
        else {
            return syllable.surface.to_string();
        };
        syllable.surface.replace(old, &marks[idx].to_string())
    }

    fn lexeme(&self, base: &str) -> Option<Lexeme> {
        latin_lexeme(base, &["bu"], &["yi"])
    }
}

/// First tone mark anywhere in `surface`: `(byte offset, mark, tone)`.
fn find_mark(surface: &str, tone_of: impl Fn(char) -> Option<Tone>) -> Option<(usize, char, Tone)> {
    surface
        .char_indices()
        .find_map(|(at, c)| tone_of(c).map(|tone| (at, c, tone)))
}

/// Replaces the mark at `at` with `new`, or drops it when `new` is `None`.
fn splice_mark(surface: &str, at: usize, old: char, new: Option<char>) -> String {
    let mut out = String::with_capacity(surface.len());
    out.push_str(&surface[..at]);
    out.extend(new);
    out.push_str(&surface[at + old.len_utf8()..]);
    out
}

fn superscript_tone(c: char) -> Option<Tone> {
    SUPERSCRIPTS
        .iter()
        .position(|&s| s == c)
        .and_then(|idx| Tone::from_number(idx as u8 + 1))
}

fn bopomofo_tone(c: char) -> Option<Tone> {
    BOPOMOFO_MARKS.iter().find(|(_, mark)| *mark == c).map(|(tone, _)| *tone)
}

fn bopomofo_mark(tone: Tone) -> Option<char> {
    BOPOMOFO_MARKS.iter().find(|(t, _)| *t == tone).map(|(_, mark)| *mark)
}

/// `ni³ hao³`: Wade-Giles with a superscript digit, usually trailing
/// (`hua⁴r` keeps its erhua suffix after the mark).
#[derive(Debug, Clone, Copy, Default)]
pub struct WadeGilesCodec;

impl ToneCodec for WadeGilesCodec {
    fn decode<'a>(&self, surface: &'a str) -> Syllable<'a> {
        match find_mark(surface, superscript_tone) {
            Some((at, mark, tone)) => Syllable::new(surface, splice_mark(surface, at, mark, None), tone),
            None => Syllable::unmarked(surface, Tone::Neutral),
        }
    }

    fn mark(&self, syllable: &Syllable<'_>, tone: Tone) -> String {
        let glyph = SUPERSCRIPTS[tone.number() as usize - 1];
        match find_mark(syllable.surface, superscript_tone) {
            Some((at, old, _)) => splice_mark(syllable.surface, at, old, Some(glyph)),
            None => format!("{}{}", syllable.base, glyph),
        }
    }

    fn lexeme(&self, base: &str) -> Option<Lexeme> {
        latin_lexeme(base, &["pu"], &["i", "yi"])
    }
}

/// `ㄋㄧˇ ㄏㄠˇ`: Zhuyin with postfix marks and a prefixed neutral dot.
#[derive(Debug, Clone, Copy, Default)]
pub struct BopomofoCodec;

impl ToneCodec for BopomofoCodec {
    fn decode<'a>(&self, surface: &'a str) -> Syllable<'a> {
        if let Some(rest) = surface.strip_prefix(NEUTRAL_DOT) {
            return Syllable::new(surface, rest, Tone::Neutral);
        }
        match find_mark(surface, bopomofo_tone) {
            Some((at, mark, tone)) => Syllable::new(surface, splice_mark(surface, at, mark, None), tone),
            None => Syllable::unmarked(surface, Tone::First),
        }
    }

    fn mark(&self, syllable: &Syllable<'_>, tone: Tone) -> String {
        let glyph = bopomofo_mark(tone);
        let existing = if syllable.surface.starts_with(NEUTRAL_DOT) {
            None
        } else {
            find_mark(syllable.surface, bopomofo_tone)
        };
        match (existing, glyph) {
            (Some((at, old, _)), glyph) => splice_mark(syllable.surface, at, old, glyph),
            (None, Some(glyph)) => format!("{}{}", syllable.base, glyph),
            (None, None) => syllable.base.clone(),
        }
    }

    fn lexeme(&self, base: &str) -> Option<Lexeme> {
        match base {
            BOPOMOFO_BU => Some(Lexeme::Bu),
            BOPOMOFO_YI => Some(Lexeme::Yi),
            _ => None,
        }
    }
}

/// Gwoyeu Romatzyh spells the tone into the syllable itself; it is copied as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct RomatzyhCodec;

impl ToneCodec for RomatzyhCodec {
    fn decode<'a>(&self, surface: &'a str) -> Syllable<'a> {
        Syllable::unmarked(surface, Tone::Neutral)
    }

    fn mark(&self, syllable: &Syllable<'_>, _tone: Tone) -> String {
        syllable.surface.to_string()
    }

    fn lexeme(&self, _base: &str) -> Option<Lexeme> {
        None
    }

    fn transforms(&self) -> bool {
        false
    }
}

/// The transcription systems carried by every dataset form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Notation {
    Pinyin,
    Numeric,
    WadeGiles,
    Bopomofo,
    Romatzyh,
}

impl Notation {
    pub const ALL: [Notation; 5] = [
        Notation::Pinyin,
        Notation::Numeric,
        Notation::WadeGiles,
        Notation::Bopomofo,
        Notation::Romatzyh,
    ];

    /// The dataset key for this notation.
    pub fn key(self) -> &'static str {
        match self {
            Notation::Pinyin => "pinyin",
            Notation::Numeric => "numeric",
            Notation::WadeGiles => "wadegiles",
            Notation::Bopomofo => "bopomofo",
            Notation::Romatzyh => "romatzyh",
        }
    }

    pub fn codec(self) -> &'static dyn ToneCodec {
        match self {
            Notation::Pinyin => &PinyinCodec,
            Notation::Numeric => &NumericCodec,
            Notation::WadeGiles => &WadeGilesCodec,
            Notation::Bopomofo => &BopomofoCodec,
            Notation::Romatzyh => &RomatzyhCodec,
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
