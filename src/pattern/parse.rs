//! Parsing of the matcher half of the notation.
//!
//! Grouping is flat: `{a,b}` and `[+high]` may not contain their own kind of group,
//! so they can be found by simple delimiter splitting. Quantifiers (`*` and the
//! subscript digits) are found first and bind to the atom right before them, which
//! is a whole group when one ends there. Quantifiers inside a quantified group
//! belong to the group's own parse.

use crate::error::SyntaxError;
use crate::notation::{Notation, BOUNDARY};
use crate::phoneme::FeatureDiff;

use super::Pattern;

/// Parses `text` into a canonical pattern.
pub fn parse(text: &str, notation: &Notation) -> Result<Pattern, SyntaxError> {
    parse_raw(text, notation).map(Pattern::canonical)
}

/// A quantifier and the atom it applies to, as char offsets.
#[derive(Debug, PartialEq, Eq)]
struct Quantifier {
    atom_start: usize,
    atom_end: usize,
    end: usize,
    min: usize,
}

fn parse_raw(text: &str, notation: &Notation) -> Result<Pattern, SyntaxError> {
    let text = text.trim();
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (None, _) => return Ok(Pattern::Null),
        (Some(c), None) if c == notation.null() => return Ok(Pattern::Null),
        (Some(BOUNDARY), None) => return Ok(Pattern::WordBoundary),
        _ => {}
    }

    let chars: Vec<char> = text.chars().collect();
    let quantifiers = find_quantifiers(&chars, text, notation)?;
    if !quantifiers.is_empty() {
        let mut items = Vec::with_capacity(quantifiers.len() * 2 + 1);
        let mut last = 0;
        for q in quantifiers {
            items.push(parse_raw(&collect(&chars[last..q.atom_start]), notation)?);
            let base = parse_atom(&chars[q.atom_start..q.atom_end], notation)?;
            items.push(Pattern::Repeated(Box::new(base), q.min));
            last = q.end;
        }
        items.push(parse_raw(&collect(&chars[last..]), notation)?);
        return Ok(Pattern::Sequence(items));
    }

    if let Some(parts) = split_groups(text, '{', '}', "unbalanced braces")? {
        let mut items = Vec::with_capacity(parts.len());
        for (i, part) in parts.iter().enumerate() {
            if i % 2 == 1 {
                let alts = part.split(',')
                               .map(|alt| parse_raw(alt, notation))
                               .collect::<Result<Vec<_>, _>>()?;
                items.push(Pattern::Alternation(alts));
            } else {
                items.push(parse_raw(part, notation)?);
            }
        }
        return Ok(Pattern::Sequence(items));
    }

    if let Some(parts) = split_groups(text, '[', ']', "unbalanced brackets")? {
        let mut items = Vec::with_capacity(parts.len());
        for (i, part) in parts.iter().enumerate() {
            if i % 2 == 1 {
                items.push(Pattern::Features(FeatureDiff::parse(part)));
            } else {
                items.push(parse_raw(part, notation)?);
            }
        }
        return Ok(Pattern::Sequence(items));
    }

    let items = chars.iter().filter(|c| !c.is_whitespace()).map(|&c| {
        if c == BOUNDARY {
            Pattern::WordBoundary
        } else if c == notation.null() {
            Pattern::Null
        } else if let Some(class) = notation.class(c) {
            Pattern::Features(class.clone())
        } else {
            Pattern::Symbol(c.to_string())
        }
    }).collect();
    Ok(Pattern::Sequence(items))
}

/// Parses the atom a quantifier applies to. A parenthesized atom loses its parentheses.
fn parse_atom(atom: &[char], notation: &Notation) -> Result<Pattern, SyntaxError> {
    match atom {
        ['(', inner @ .., ')'] => parse_raw(&collect(inner), notation),
        _ => parse_raw(&collect(atom), notation),
    }
}

fn find_quantifiers(chars: &[char], text: &str,
                    notation: &Notation) -> Result<Vec<Quantifier>, SyntaxError> {
    let is_quantifier = |c: char| c == '*' || notation.subscript_digit(c).is_some();
    let mut ret = Vec::new();
    let mut last_end = 0;
    // the last group skipped over as a whole, `[start, end)`
    let mut group: Option<(usize, usize)> = None;
    let mut i = 0;
    while i < chars.len() {
        if let Some(end) = group_end(chars, i) {
            // parentheses only group what a quantifier applies to
            let quantified = chars[end..].iter().find(|c| !c.is_whitespace())
                                         .map_or(false, |&c| is_quantifier(c));
            if chars[i] != '(' || quantified {
                group = Some((i, end));
                i = end;
                continue;
            }
        }

        let (min, end) = if chars[i] == '*' {
            (0, i + 1)
        } else if notation.subscript_digit(chars[i]).is_some() {
            let mut min = 0usize;
            let mut j = i;
            while let Some(d) = chars.get(j).and_then(|&c| notation.subscript_digit(c)) {
                min = min.saturating_mul(10).saturating_add(d);
                j += 1;
            }
            (min, j)
        } else {
            i += 1;
            continue;
        };

        let mut atom_end = i;
        while atom_end > last_end && chars[atom_end - 1].is_whitespace() {
            atom_end -= 1;
        }
        if atom_end == last_end {
            return Err(SyntaxError::at("quantifier without preceding atom", i, text));
        }
        let atom_start = match group {
            Some((start, end)) if end == atom_end => start,
            _ if matches!(chars[atom_end - 1], ')' | ']' | '}') => {
                return Err(SyntaxError::at("quantified group is never opened", atom_end - 1, text));
            }
            _ => atom_end - 1,
        };

        ret.push(Quantifier { atom_start, atom_end, end, min });
        last_end = end;
        i = end;
    }
    Ok(ret)
}

/// The offset just past the group opening at `start`, if a group opens there and
/// is closed. Parentheses nest; brackets and braces end at their first closer.
fn group_end(chars: &[char], start: usize) -> Option<usize> {
    let (open, close) = match chars[start] {
        '(' => ('(', ')'),
        '[' => ('[', ']'),
        '{' => ('{', '}'),
        _ => return None,
    };
    let mut depth = 0usize;
    for (k, &c) in chars.iter().enumerate().skip(start) {
        if c == open {
            if depth > 0 && open != '(' { return None; }
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 { return Some(k + 1); }
        }
    }
    None
}

/// Splits `text` around `open`...`close` groups, so that odd-numbered parts are
/// the insides of groups. Returns `None` if there are no delimiters at all.
pub(crate) fn split_groups(text: &str, open: char, close: char,
                           message: &'static str) -> Result<Option<Vec<String>>, SyntaxError> {
    if !text.contains([open, close]) {
        return Ok(None);
    }
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut inside = false;
    for (pos, c) in text.chars().enumerate() {
        if c == open || c == close {
            if inside == (c == open) {
                return Err(SyntaxError::at(message, pos, text));
            }
            parts.push(std::mem::take(&mut current));
            inside = !inside;
        } else {
            current.push(c);
        }
    }
    if inside {
        return Err(SyntaxError::new(message, text));
    }
    parts.push(current);
    Ok(Some(parts))
}

fn collect(chars: &[char]) -> String { chars.iter().collect() }

#[cfg(test)]
mod tests {
    use super::*;
    use super::Pattern::*;

    fn sym(s: &str) -> Pattern { Symbol(s.to_string()) }
    fn feat(present: &[&str], absent: &[&str]) -> Pattern {
        Features(FeatureDiff::new(present.iter().copied(), absent.iter().copied()))
    }
    fn p(text: &str) -> Pattern {
        parse(text, &Notation::default()).unwrap_or_else(|err| panic!("{}: {}", text, err))
    }

    #[test]
    fn test_trivial() {
        assert_eq!(p(""), Null);
        assert_eq!(p("  "), Null);
        assert_eq!(p("Ø"), Null);
        assert_eq!(p("#"), WordBoundary);
        assert_eq!(p(" a "), sym("a"));
        assert_eq!(p("a b"), Sequence(vec![sym("a"), sym("b")]));
        assert_eq!(p("#aØ"), Sequence(vec![WordBoundary, sym("a")]));
    }

    #[test]
    fn test_features() {
        assert_eq!(p("[-high]"), feat(&[], &["high"]));
        assert_eq!(p("a[+high -front]#"),
                   Sequence(vec![sym("a"), feat(&["high"], &["front"]), WordBoundary]));
        assert_eq!(p("[]"), feat(&[], &[]));
    }

    #[test]
    fn test_alternation() {
        assert_eq!(p("{a,b}"), Alternation(vec![sym("a"), sym("b")]));
        assert_eq!(p("x{a,[+high]}"),
                   Sequence(vec![sym("x"), Alternation(vec![sym("a"), feat(&["high"], &[])])]));
        assert_eq!(p("{a,}"), Alternation(vec![sym("a"), Null]));
        assert_eq!(p("{ab}"), Sequence(vec![sym("a"), sym("b")]));
    }

    #[test]
    fn test_quantifiers() {
        assert_eq!(p("i₂"), Repeated(Box::new(sym("i")), 2));
        assert_eq!(p("a*b"), Sequence(vec![Repeated(Box::new(sym("a")), 0), sym("b")]));
        assert_eq!(p("ab₁₀"), Sequence(vec![sym("a"), Repeated(Box::new(sym("b")), 10)]));
        assert_eq!(p("[+high] *"), Repeated(Box::new(feat(&["high"], &[])), 0));
        assert_eq!(p("{a,e}₁"), Repeated(Box::new(Alternation(vec![sym("a"), sym("e")])), 1));
        assert_eq!(p("(ab)*c"), Sequence(vec![
            Repeated(Box::new(Sequence(vec![sym("a"), sym("b")])), 0),
            sym("c"),
        ]));
        assert_eq!(p("a*b*"), Sequence(vec![
            Repeated(Box::new(sym("a")), 0),
            Repeated(Box::new(sym("b")), 0),
        ]));
        assert_eq!(p("{a*,e}"), Alternation(vec![Repeated(Box::new(sym("a")), 0), sym("e")]));
    }

    #[test]
    fn test_nested_quantifiers() {
        // counts add up through a quantified group
        assert_eq!(p("(a₂)₁"), Repeated(Box::new(sym("a")), 3));
        assert_eq!(p("x(ia*)₁"), Sequence(vec![
            sym("x"),
            Repeated(Box::new(Sequence(vec![sym("i"), Repeated(Box::new(sym("a")), 0)])), 1),
        ]));
        assert_eq!(p("((ab)*c)₂"), Repeated(Box::new(Sequence(vec![
            Repeated(Box::new(Sequence(vec![sym("a"), sym("b")])), 0),
            sym("c"),
        ])), 2));
    }

    #[test]
    fn test_classes() {
        let n = Notation::default().with_class('V', FeatureDiff::new(["syll"], None::<&str>));
        assert_eq!(parse("tV₁", &n), Ok(Sequence(vec![
            sym("t"),
            Repeated(Box::new(feat(&["syll"], &[])), 1),
        ])));
        assert_eq!(parse("V", &Notation::default()), Ok(sym("V")));
    }

    #[test]
    fn test_syntax_errors() {
        let n = Notation::default();
        let err = parse("*a", &n).unwrap_err();
        assert_eq!(err.message, "quantifier without preceding atom");
        assert_eq!(err.position, Some(0));
        assert!(parse("a* ₂", &n).is_err());
        assert!(parse("(ab)*₂", &n).is_err());
        assert_eq!(parse("a)*", &n).unwrap_err().message, "quantified group is never opened");
        assert_eq!(parse("a]₂", &n).unwrap_err().position, Some(1));
        assert_eq!(parse("{a,b", &n).unwrap_err().message, "unbalanced braces");
        assert_eq!(parse("a}", &n).unwrap_err().message, "unbalanced braces");
        assert_eq!(parse("{a{b}}", &n).unwrap_err().message, "unbalanced braces");
        assert_eq!(parse("[+high", &n).unwrap_err().message, "unbalanced brackets");
        assert_eq!(parse("]a[", &n).unwrap_err().message, "unbalanced brackets");
    }

    #[test]
    fn test_round_trip_rendering() {
        let n = Notation::default();
        for text in ["#{a,e}i₂[+high -front]", "{a,Ø}[+syll]([+syll])*", "x(ab)*",
                     "x(ab)₉₉₉₉₉₉₉₉₉₉₉₉", "(a₂)₁"] {
            let once = p(text);
            assert_eq!(parse(&once.to_string(), &n), Ok(once.clone()), "{}", text);
        }
    }
}
