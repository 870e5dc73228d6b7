/*!
Compiled phoneme patterns.

A `Pattern` is what one side of a rule (the input, or either half of the
environment) compiles into. Matching is anchored and greedy: `match_len` tells how
many phonemes the pattern consumes at a given offset, without ever backtracking.
In particular a repetition always takes as many copies as it can, so `V*V` never
matches anything; rules are expected to be written with that in mind.
*/

use std::fmt;

use crate::phoneme::{FeatureDiff, Phoneme};

pub use self::parse::parse;
pub(crate) use self::parse::split_groups;

mod canonical;
mod parse;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Pattern {
    /// Matches the empty string anywhere.
    Null,
    /// Matches the empty string at either end of the word.
    WordBoundary,
    /// One phoneme written with the given symbol.
    Symbol(String),
    /// One phoneme with the given features.
    Features(FeatureDiff),
    Sequence(Vec<Pattern>),
    /// As many copies of the base as possible, failing below the minimum count.
    Repeated(Box<Pattern>, usize),
    /// The longest match among the alternatives.
    Alternation(Vec<Pattern>),
}

impl Pattern {
    /// The number of phonemes matched at `start`, or `None` if it doesn't match there.
    pub fn match_len(&self, word: &[Phoneme], start: usize) -> Option<usize> {
        match *self {
            Pattern::Null => Some(0),
            Pattern::WordBoundary => {
                if start == 0 || start == word.len() {Some(0)} else {None}
            }
            Pattern::Symbol(ref symbol) => match word.get(start) {
                Some(p) if p.symbol() == symbol => Some(1),
                _ => None,
            },
            Pattern::Features(ref diff) => match word.get(start) {
                Some(p) if diff.matches(p) => Some(1),
                _ => None,
            },
            Pattern::Sequence(ref items) => {
                let mut total = 0;
                for item in items {
                    if start + total > word.len() { return None; }
                    total += item.match_len(word, start + total)?;
                }
                Some(total)
            }
            Pattern::Repeated(ref base, min) => {
                let mut total = 0;
                let mut count = 0;
                while let Some(len) = base.match_len(word, start + total) {
                    if len == 0 {
                        // an empty match repeats forever, so any minimum is reached
                        count = min;
                        break;
                    }
                    count += 1;
                    total += len;
                }
                if count >= min {Some(total)} else {None}
            }
            Pattern::Alternation(ref alts) => {
                alts.iter().filter_map(|alt| alt.match_len(word, start)).max()
            }
        }
    }

    /// The first offset at or after `start` where the pattern matches, with the match length.
    pub fn next_match(&self, word: &[Phoneme], start: usize) -> Option<(usize, usize)> {
        (start..word.len()).find_map(|i| self.match_len(word, i).map(|len| (i, len)))
    }

    pub fn is_null(&self) -> bool { *self == Pattern::Null }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Pattern::Null => f.write_str("Ø"),
            Pattern::WordBoundary => f.write_str("#"),
            Pattern::Symbol(ref s) => f.write_str(s),
            Pattern::Features(ref diff) => write!(f, "{}", diff),
            Pattern::Sequence(ref items) => {
                for item in items { write!(f, "{}", item)?; }
                Ok(())
            }
            Pattern::Repeated(ref base, min) => {
                match **base {
                    Pattern::Sequence(_) => write!(f, "({})", base)?,
                    Pattern::Symbol(ref s) if s.chars().count() > 1 => write!(f, "({})", s)?,
                    _ => write!(f, "{}", base)?,
                }
                if min == 0 {
                    return f.write_str("*");
                }
                const SUBSCRIPTS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];
                for d in min.to_string().bytes() {
                    write!(f, "{}", SUBSCRIPTS[usize::from(d - b'0')])?;
                }
                Ok(())
            }
            Pattern::Alternation(ref alts) => {
                let alts: Vec<String> = alts.iter().map(|a| a.to_string()).collect();
                write!(f, "{{{}}}", alts.join(","))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Pattern::*;
    use crate::phoneme::Phoneme;

    fn word(s: &str) -> Vec<Phoneme> {
        s.chars().map(|c| {
            let syll = if "aeiou".contains(c) {Some("syll")} else {None};
            Phoneme::new(c.to_string(), syll)
        }).collect()
    }

    fn sym(s: &str) -> Pattern { Symbol(s.to_string()) }
    fn vowel() -> Pattern { Features(FeatureDiff::new(["syll"], None::<&str>)) }

    #[test]
    fn test_leaves() {
        let w = word("pat");
        assert_eq!(Null.match_len(&w, 3), Some(0));
        assert_eq!(WordBoundary.match_len(&w, 0), Some(0));
        assert_eq!(WordBoundary.match_len(&w, 1), None);
        assert_eq!(WordBoundary.match_len(&w, 3), Some(0));
        assert_eq!(sym("a").match_len(&w, 1), Some(1));
        assert_eq!(sym("a").match_len(&w, 3), None);
        assert_eq!(vowel().match_len(&w, 0), None);
        assert_eq!(vowel().match_len(&w, 1), Some(1));
    }

    #[test]
    fn test_sequence() {
        let w = word("pat");
        let pat = Sequence(vec![sym("p"), vowel(), WordBoundary]);
        assert_eq!(pat.match_len(&w, 0), None);
        let pat = Sequence(vec![vowel(), sym("t"), WordBoundary]);
        assert_eq!(pat.match_len(&w, 1), Some(2));
    }

    #[test]
    fn test_repeated_is_greedy() {
        let w = word("paaat");
        assert_eq!(Repeated(Box::new(vowel()), 2).match_len(&w, 1), Some(3));
        assert_eq!(Repeated(Box::new(vowel()), 4).match_len(&w, 1), None);
        assert_eq!(Repeated(Box::new(vowel()), 0).match_len(&w, 0), Some(0));
        // no backtracking: the repetition eats the vowel the sequence needs
        let pat = Sequence(vec![Repeated(Box::new(vowel()), 1), vowel()]);
        assert_eq!(pat.match_len(&w, 1), None);
    }

    #[test]
    fn test_repeated_zero_width_base_terminates() {
        let w = word("pa");
        assert_eq!(Repeated(Box::new(Null), 3).match_len(&w, 1), Some(0));
        assert_eq!(Repeated(Box::new(WordBoundary), 2).match_len(&w, 0), Some(0));
        assert_eq!(Repeated(Box::new(WordBoundary), 2).match_len(&w, 1), None);
    }

    #[test]
    fn test_alternation_longest() {
        let w = word("pat");
        let pat = Alternation(vec![sym("p"), Sequence(vec![sym("p"), sym("a")]), sym("x")]);
        assert_eq!(pat.match_len(&w, 0), Some(2));
        assert_eq!(pat.match_len(&w, 1), None);
        assert_eq!(Alternation(vec![]).match_len(&w, 0), None);
    }

    #[test]
    fn test_next_match() {
        let w = word("tapa");
        assert_eq!(sym("p").next_match(&w, 0), Some((2, 1)));
        assert_eq!(vowel().next_match(&w, 2), Some((3, 1)));
        assert_eq!(sym("t").next_match(&w, 1), None);
        // the end of the word is never a starting point
        assert_eq!(WordBoundary.next_match(&w, 1), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Repeated(Box::new(sym("i")), 12).to_string(), "i₁₂");
        assert_eq!(Repeated(Box::new(vowel()), 1).to_string(), "[+syll]₁");
        assert_eq!(Repeated(Box::new(sym("a")), 0).to_string(), "a*");
        let pair = Sequence(vec![sym("a"), sym("b")]);
        assert_eq!(Repeated(Box::new(pair.clone()), 0).to_string(), "(ab)*");
        // huge counts are written out, never spelled by repeating the base
        let huge = Repeated(Box::new(pair), usize::MAX).to_string();
        assert!(huge.starts_with("(ab)"));
        assert_eq!(huge.chars().count(), 4 + usize::MAX.to_string().len());
        let pat = Sequence(vec![WordBoundary, Alternation(vec![sym("a"), Null]), vowel()]);
        assert_eq!(pat.to_string(), "#{a,Ø}[+syll]");
    }
}
