//! Phonemes, feature diffs, and the inventory of a language.

use std::collections::BTreeSet;
use std::fmt;

/// A phoneme: a printable symbol plus the set of features it carries.
///
/// Two phonemes are the same phoneme when both the symbol and the features agree.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Phoneme {
    symbol: String,
    features: BTreeSet<String>,
}

impl Phoneme {
    pub fn new<S, I>(symbol: S, features: I) -> Phoneme
            where S: Into<String>, I: IntoIterator, I::Item: Into<String> {
        Phoneme {
            symbol: symbol.into(),
            features: features.into_iter().map(Into::into).collect(),
        }
    }

    #[inline]
    pub fn symbol(&self) -> &str { &self.symbol }

    #[inline]
    pub fn features(&self) -> &BTreeSet<String> { &self.features }

    #[inline]
    pub fn has_feature(&self, feature: &str) -> bool { self.features.contains(feature) }
}

impl fmt::Display for Phoneme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.symbol) }
}

/// A set of features that must be (or become) present and a set that must be
/// (or become) absent.
///
/// As a condition it matches phonemes with every present feature and none of the
/// absent ones; as a change it adds the former and removes the latter.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct FeatureDiff {
    pub present: BTreeSet<String>,
    pub absent: BTreeSet<String>,
}

impl FeatureDiff {
    pub fn new<I, J>(present: I, absent: J) -> FeatureDiff
            where I: IntoIterator, I::Item: Into<String>,
                  J: IntoIterator, J::Item: Into<String> {
        FeatureDiff {
            present: present.into_iter().map(Into::into).collect(),
            absent: absent.into_iter().map(Into::into).collect(),
        }
    }

    /// Reads the inside of a `[+high -front]` group. Unsigned words are ignored.
    pub fn parse(spec: &str) -> FeatureDiff {
        let mut diff = FeatureDiff::default();
        for word in spec.split_whitespace() {
            if let Some(name) = word.strip_prefix('+') {
                diff.present.insert(name.to_string());
            } else if let Some(name) = word.strip_prefix('-') {
                diff.absent.insert(name.to_string());
            }
        }
        diff
    }

    pub fn is_empty(&self) -> bool { self.present.is_empty() && self.absent.is_empty() }

    pub fn matches(&self, phoneme: &Phoneme) -> bool {
        self.present.iter().all(|f| phoneme.has_feature(f)) &&
            !self.absent.iter().any(|f| phoneme.has_feature(f))
    }

    pub fn apply(&self, features: &BTreeSet<String>) -> BTreeSet<String> {
        features.iter()
                .filter(|f| !self.absent.contains(*f))
                .chain(self.present.iter())
                .cloned()
                .collect()
    }
}

impl fmt::Display for FeatureDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let present = self.present.iter().map(|p| format!("+{}", p));
        let absent = self.absent.iter().map(|a| format!("-{}", a));
        write!(f, "[{}]", present.chain(absent).collect::<Vec<_>>().join(" "))
    }
}

/// A language, which for our purposes is its ordered phoneme inventory.
#[derive(Clone, Debug, Default)]
pub struct Language {
    phonemes: Vec<Phoneme>,
}

impl Language {
    pub fn new(phonemes: Vec<Phoneme>) -> Language {
        Language { phonemes }
    }

    pub fn phonemes(&self) -> &[Phoneme] { &self.phonemes }

    /// The first phoneme in the inventory written as `symbol`.
    pub fn phoneme(&self, symbol: &str) -> Option<&Phoneme> {
        self.phonemes.iter().find(|p| p.symbol == symbol)
    }

    /// Applies `changes` to `base` and returns the inventory phoneme with exactly
    /// the resulting features.
    ///
    /// When the inventory has no such phoneme, a `?` phoneme carrying the computed
    /// features is returned instead and a warning is logged.
    pub fn apply_changes(&self, base: &Phoneme, changes: &FeatureDiff) -> Phoneme {
        let features = changes.apply(&base.features);
        match self.phonemes.iter().find(|p| p.features == features) {
            Some(p) => p.clone(),
            None => {
                warn!("no phoneme for feature set {:?} ({} with {})", features, base, changes);
                Phoneme { symbol: "?".to_string(), features }
            }
        }
    }

    /// Splits `text` into phonemes, taking the longest known symbol at each position.
    ///
    /// Characters that start no known symbol (whitespace, `#`, class letters...)
    /// become featureless one-character phonemes, so this never fails.
    pub fn segment(&self, text: &str) -> Vec<Phoneme> {
        let mut ret = Vec::new();
        let mut rest = text;
        while let Some(c) = rest.chars().next() {
            let best = self.phonemes.iter()
                           .filter(|p| !p.symbol.is_empty() && rest.starts_with(&p.symbol[..]))
                           .fold(None::<&Phoneme>, |best, p| match best {
                               Some(b) if b.symbol.len() >= p.symbol.len() => Some(b),
                               _ => Some(p),
                           });
            match best {
                Some(p) => {
                    rest = &rest[p.symbol.len()..];
                    ret.push(p.clone());
                }
                None => {
                    rest = &rest[c.len_utf8()..];
                    ret.push(Phoneme::new(c.to_string(), None::<String>));
                }
            }
        }
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vowels() -> Language {
        Language::new(vec![
            Phoneme::new("a", None::<&str>),
            Phoneme::new("u", ["high"]),
            Phoneme::new("e", ["front"]),
            Phoneme::new("i", ["front", "high"]),
        ])
    }

    #[test]
    fn test_apply_changes() {
        let lang = vowels();
        let a = lang.phonemes()[0].clone();
        let u = lang.phonemes()[1].clone();
        assert_eq!(lang.apply_changes(&a, &FeatureDiff::new(["high"], None::<&str>)).symbol(), "u");
        assert_eq!(lang.apply_changes(&u, &FeatureDiff::new(["front"], ["high"])).symbol(), "e");
    }

    #[test]
    fn test_apply_changes_placeholder() {
        let lang = vowels();
        let a = lang.phonemes()[0].clone();
        let p = lang.apply_changes(&a, &FeatureDiff::new(["round"], None::<&str>));
        assert_eq!(p.symbol(), "?");
        assert!(p.has_feature("round"));
    }

    #[test]
    fn test_feature_diff_matches() {
        let lang = vowels();
        let front_nonhigh = FeatureDiff::new(["front"], ["high"]);
        let hits: Vec<&str> = lang.phonemes().iter()
                                  .filter(|p| front_nonhigh.matches(p))
                                  .map(|p| p.symbol())
                                  .collect();
        assert_eq!(hits, ["e"]);
        assert!(FeatureDiff::default().matches(&lang.phonemes()[3]));
    }

    #[test]
    fn test_feature_diff_parse_and_display() {
        let diff = FeatureDiff::parse("  +high -front round ");
        assert_eq!(diff, FeatureDiff::new(["high"], ["front"]));
        assert_eq!(diff.to_string(), "[+high -front]");
        assert_eq!(FeatureDiff::default().to_string(), "[]");
    }

    #[test]
    fn test_segment() {
        let lang = Language::new(vec![
            Phoneme::new("t", None::<&str>),
            Phoneme::new("ts", ["affricate"]),
            Phoneme::new("a", None::<&str>),
        ]);
        let word = lang.segment("tsat#");
        let symbols: Vec<&str> = word.iter().map(|p| p.symbol()).collect();
        assert_eq!(symbols, ["ts", "a", "t", "#"]);
        assert!(word[3].features().is_empty());
        assert!(lang.segment("").is_empty());
    }
}
