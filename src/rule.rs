/*!
A single concrete rule, `input → output / prefix_suffix`.

The input and both halves of the environment compile into patterns; the output is
a list of slots, one per phoneme, that either give a phoneme outright, delete the
matched phoneme (`Ø`), or change its features (`[+high]`).
*/

use std::fmt;

use crate::error::{Error, Result, SyntaxError};
use crate::notation::{Notation, BOUNDARY, ENVIRONMENT, FOCUS};
use crate::pattern::{self, split_groups, Pattern};
use crate::phoneme::{FeatureDiff, Language, Phoneme};

/// One position of a rule's output.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Slot {
    Phoneme(Phoneme),
    Change(FeatureDiff),
    Delete,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Slot::Phoneme(ref p) => write!(f, "{}", p),
            Slot::Change(ref diff) => write!(f, "{}", diff),
            Slot::Delete => f.write_str("Ø"),
        }
    }
}

/// A contiguous run of a word being processed, and whether some rule produced it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Segment {
    pub changed: bool,
    pub phonemes: Vec<Phoneme>,
}

impl Segment {
    pub fn unchanged(phonemes: Vec<Phoneme>) -> Segment { Segment { changed: false, phonemes } }
    pub fn changed(phonemes: Vec<Phoneme>) -> Segment { Segment { changed: true, phonemes } }
}

pub struct Rule<'a> {
    text: String,
    arrow: String,
    input: Pattern,
    prefix: Pattern,
    suffix: Pattern,
    output: Vec<Slot>,
    requires_word_initial: bool,
    requires_word_final: bool,
    language: &'a Language,
}

impl<'a> Rule<'a> {
    /// Compiles a rule free of optional groups and polarity variables.
    pub fn compile(text: &str, language: &'a Language, notation: &Notation) -> Result<Rule<'a>> {
        let (input, rest) = split_once(text, notation.arrow(), "missing arrow", "more than one arrow")?;
        let (output, env) = split_once(rest, &ENVIRONMENT.to_string(),
                                       "missing environment", "more than one '/'")?;
        let (prefix, suffix) = split_once(env, &FOCUS.to_string(),
                                          "missing focus '_'", "more than one '_'")?;

        Ok(Rule {
            text: text.to_string(),
            arrow: notation.arrow().to_string(),
            input: pattern::parse(input, notation)?,
            prefix: pattern::parse(prefix, notation)?,
            suffix: pattern::parse(suffix, notation)?,
            output: parse_output(output, text, language, notation)?,
            requires_word_initial: prefix.trim_start().starts_with(BOUNDARY),
            requires_word_final: suffix.trim_end().ends_with(BOUNDARY),
            language,
        })
    }

    #[inline] pub fn text(&self) -> &str { &self.text }
    #[inline] pub fn input(&self) -> &Pattern { &self.input }
    #[inline] pub fn prefix(&self) -> &Pattern { &self.prefix }
    #[inline] pub fn suffix(&self) -> &Pattern { &self.suffix }
    #[inline] pub fn output(&self) -> &[Slot] { &self.output }
    #[inline] pub fn requires_word_initial(&self) -> bool { self.requires_word_initial }
    #[inline] pub fn requires_word_final(&self) -> bool { self.requires_word_final }

    /// Produces the replacement for a matched input span.
    ///
    /// An output made only of phonemes and deletions replaces the span wholesale,
    /// whatever its length. Once a feature change is involved the output is applied
    /// slot by slot, and the span must be exactly as long as the output.
    pub fn apply(&self, span: &[Phoneme]) -> Result<Vec<Phoneme>> {
        if !self.output.iter().any(|slot| matches!(*slot, Slot::Change(_))) {
            return Ok(self.output.iter().filter_map(|slot| match *slot {
                Slot::Phoneme(ref p) => Some(p.clone()),
                _ => None,
            }).collect());
        }
        if span.len() != self.output.len() {
            return Err(Error::LengthMismatch {
                expected: self.output.len(),
                found: span.len(),
                rule: self.text.clone(),
            });
        }
        Ok(span.iter().zip(&self.output).filter_map(|(p, slot)| match *slot {
            Slot::Phoneme(ref q) => Some(q.clone()),
            Slot::Change(ref diff) => Some(self.language.apply_changes(p, diff)),
            Slot::Delete => None,
        }).collect())
    }

    /// Runs the rule once over `word`, splitting it into unchanged and changed segments.
    ///
    /// The scan only moves forward. A changed segment covers the matched input only;
    /// the environment stays in the neighbouring unchanged segments, so a suffix can
    /// serve again as the prefix of the next match.
    pub fn process_word(&self, word: &[Phoneme]) -> Result<Vec<Segment>> {
        let mut segments = Vec::new();
        let mut index = 0;
        let mut last = 0;

        while let Some((prefix_start, prefix_len)) = self.prefix.next_match(word, index) {
            index = prefix_start + 1;

            let input_start = prefix_start + prefix_len;
            let input_len = match self.input.match_len(word, input_start) {
                Some(len) => len,
                None => continue,
            };
            let input_end = input_start + input_len;
            if self.suffix.match_len(word, input_end).is_none() {
                continue;
            }

            segments.push(Segment::unchanged(word[last..input_start].to_vec()));
            segments.push(Segment::changed(self.apply(&word[input_start..input_end])?));
            // an empty match at `prefix_start` must not be found again
            index = index.max(input_end);
            last = input_end;
        }

        segments.push(Segment::unchanged(word[last..].to_vec()));
        segments.retain(|s| s.changed || !s.phonemes.is_empty());
        Ok(segments)
    }
}

impl<'a> fmt::Display for Rule<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.input, self.arrow)?;
        for slot in &self.output { write!(f, "{}", slot)?; }
        f.write_str(" / ")?;
        if !self.prefix.is_null() { write!(f, "{}", self.prefix)?; }
        f.write_str("_")?;
        if !self.suffix.is_null() { write!(f, "{}", self.suffix)?; }
        Ok(())
    }
}

impl<'a> fmt::Debug for Rule<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
         .field("input", &self.input)
         .field("prefix", &self.prefix)
         .field("suffix", &self.suffix)
         .field("output", &self.output)
         .field("requires_word_initial", &self.requires_word_initial)
         .field("requires_word_final", &self.requires_word_final)
         .finish()
    }
}

fn split_once<'t>(text: &'t str, sep: &str, missing: &'static str,
                  duplicate: &'static str) -> Result<(&'t str, &'t str)> {
    match text.split_once(sep) {
        Some((_, right)) if right.contains(sep) => Err(SyntaxError::new(duplicate, text).into()),
        Some(split) => Ok(split),
        None => Err(SyntaxError::new(missing, text).into()),
    }
}

fn parse_output(spec: &str, rule: &str, language: &Language,
                notation: &Notation) -> Result<Vec<Slot>> {
    let parts = split_groups(spec, '[', ']', "unbalanced brackets")?
                    .unwrap_or_else(|| vec![spec.to_string()]);
    let mut slots = Vec::new();
    for (i, part) in parts.iter().enumerate() {
        if i % 2 == 1 {
            slots.push(Slot::Change(FeatureDiff::parse(part)));
            continue;
        }
        for c in part.chars().filter(|c| !c.is_whitespace()) {
            if c == notation.null() {
                slots.push(Slot::Delete);
                continue;
            }
            match language.phoneme(c.encode_utf8(&mut [0; 4])) {
                Some(p) => slots.push(Slot::Phoneme(p.clone())),
                None => return Err(Error::UnknownPhoneme { symbol: c, rule: rule.to_string() }),
            }
        }
    }
    Ok(slots)
}
