/*!
Rule sets: one line of notation, expanded into concrete rules and applied in order.

Three constructs make a line stand for several rules:

- `(...)` is optional: the rules with and without its contents.
- `<...>` is likewise present or absent.
- A polarity letter like `α` is `+` in one rule and `-` in the other,
  consistently for each of its occurrences.

They are expanded in that order of priority, outermost construct first, and
each expansion keeps the "with" (or `+`) rules before the "without" (or `-`) ones.
A parenthesized group directly followed by a quantifier is a repeated atom and
is left to the pattern parser.
*/

use std::fmt;

use crate::error::{Result, SyntaxError};
use crate::notation::Notation;
use crate::phoneme::{Language, Phoneme};
use crate::rule::{Rule, Segment};

#[derive(Debug)]
pub struct RuleSet<'a> {
    representation: String,
    rules: Vec<Rule<'a>>,
    language: &'a Language,
}

impl<'a> RuleSet<'a> {
    /// Compiles `text` in the default notation.
    pub fn new(text: &str, language: &'a Language) -> Result<RuleSet<'a>> {
        RuleSet::with_notation(text, language, &Notation::default())
    }

    pub fn with_notation(text: &str, language: &'a Language,
                         notation: &Notation) -> Result<RuleSet<'a>> {
        notation.validate()?;
        let rules = expand(text, notation)?.iter().map(|concrete| {
            trace!("{} expands to {}", text, concrete);
            Rule::compile(concrete, language, notation)
        }).collect::<Result<Vec<_>>>()?;
        Ok(RuleSet { representation: text.to_string(), rules, language })
    }

    pub fn representation(&self) -> &str { &self.representation }

    pub fn rules(&self) -> &[Rule<'a>] { &self.rules }

    /// Applies every rule in turn to `word`.
    ///
    /// Whatever a rule has changed is off limits to the rules after it. Rules anchored
    /// to a word edge only look at the outermost segment on that side, and only if it
    /// is still unchanged; a rule anchored to both edges runs only while the word is
    /// still in one piece.
    pub fn process(&self, word: &[Phoneme]) -> Result<Vec<Phoneme>> {
        let mut segments = vec![Segment::unchanged(word.to_vec())];
        for rule in &self.rules {
            let before = if log_enabled!(log::Level::Debug) {Some(spell(&segments))} else {None};

            if rule.requires_word_initial() && rule.requires_word_final() && segments.len() > 1 {
                continue;
            } else if rule.requires_word_final() {
                if let Some(last) = segments.pop() {
                    if last.changed {
                        segments.push(last);
                    } else {
                        segments.extend(rule.process_word(&last.phonemes)?);
                    }
                }
            } else if rule.requires_word_initial() {
                if !segments.is_empty() && !segments[0].changed {
                    let first = segments.remove(0);
                    let mut processed = rule.process_word(&first.phonemes)?;
                    processed.append(&mut segments);
                    segments = processed;
                }
            } else {
                let mut processed = Vec::with_capacity(segments.len());
                for segment in segments {
                    if segment.changed {
                        processed.push(segment);
                    } else {
                        processed.extend(rule.process_word(&segment.phonemes)?);
                    }
                }
                segments = processed;
            }

            segments = merge(segments);
            if let Some(before) = before {
                let after = spell(&segments);
                if before != after { debug!("{} --> {} ({})", before, after, rule); }
            }
        }
        Ok(segments.into_iter().flat_map(|s| s.phonemes).collect())
    }

    /// Splits `word` into the language's phonemes and processes it.
    pub fn process_str(&self, word: &str) -> Result<Vec<Phoneme>> {
        self.process(&self.language.segment(word))
    }
}

impl<'a> fmt::Display for RuleSet<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.representation) }
}

/// Joins neighbouring segments with the same flag and drops empty ones.
fn merge(segments: Vec<Segment>) -> Vec<Segment> {
    let mut ret: Vec<Segment> = Vec::with_capacity(segments.len());
    for mut segment in segments.into_iter().filter(|s| !s.phonemes.is_empty()) {
        match ret.last_mut() {
            Some(last) if last.changed == segment.changed => last.phonemes.append(&mut segment.phonemes),
            _ => ret.push(segment),
        }
    }
    ret
}

fn spell(segments: &[Segment]) -> String {
    segments.iter().flat_map(|s| s.phonemes.iter()).map(|p| p.symbol()).collect()
}

/// Expands optional groups, alternative groups and polarity letters into concrete rules.
pub fn expand(text: &str, notation: &Notation) -> std::result::Result<Vec<String>, SyntaxError> {
    let quantified = |rest: &str| {
        rest.trim_start().chars().next()
            .map_or(false, |c| c == '*' || notation.subscript_digit(c).is_some())
    };
    let group = match find_group(text, '(', ')', "unbalanced parentheses", quantified)? {
        Some(group) => Some(group),
        None => find_group(text, '<', '>', "unbalanced angle brackets", |_| false)?,
    };

    if let Some((open, close)) = group {
        let before = &text[..open];
        let inside = &text[open + 1..close];
        let after = &text[close + 1..];
        let mut ret = expand(&format!("{}{}{}", before, inside, after), notation)?;
        ret.extend(expand(&format!("{}{}", before, after), notation)?);
        return Ok(ret);
    }

    if let Some(letter) = text.chars().find(|&c| notation.is_polarity(c)) {
        let mut ret = expand(&text.replace(letter, "+"), notation)?;
        ret.extend(expand(&text.replace(letter, "-"), notation)?);
        return Ok(ret);
    }

    Ok(vec![text.to_string()])
}

/// Byte offsets of the delimiters of the first outermost `open`...`close` group
/// that `skip` does not reject, given the text following the group.
fn find_group<F>(text: &str, open: char, close: char, message: &'static str,
                 skip: F) -> std::result::Result<Option<(usize, usize)>, SyntaxError>
        where F: Fn(&str) -> bool {
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if c == open {
            if depth == 0 { start = i; }
            depth += 1;
        } else if c == close {
            if depth == 0 {
                return Err(SyntaxError::at(message, text[..i].chars().count(), text));
            }
            depth -= 1;
            if depth == 0 && !skip(&text[i + c.len_utf8()..]) {
                return Ok(Some((start, i)));
            }
        }
    }
    if depth > 0 {
        return Err(SyntaxError::new(message, text));
    }
    Ok(None)
}
