/*!
A toy language with six phonemes and a short history.

Mostly an example for phonorule: the inventory is small enough to keep every
feature in mind, and the cascade touches each corner of the notation (classes,
subscripts, feature changes, deletion and word boundaries).
*/

#[macro_use] extern crate log;

use phonorule::{Error, FeatureDiff, Language, Notation, Phoneme, RuleSet};

/// The sound changes, oldest first.
pub const RULES: &[&str] = &[
    // lenition
    "C → [+continuant] / V_V",
    // runs of i collapse
    "i₂ → i / _",
    // final raising
    "[+syll -high] → [+high] / _#",
    // initial a is lost before a consonant
    "a → Ø / #_C",
];

/// The phoneme inventory.
///
/// | | front | back |
/// |---|---|---|
/// | high | i | u |
/// | low | e | a |
///
/// plus `p` and its continuant `f`.
pub fn language() -> Language {
    Language::new(vec![
        Phoneme::new("a", ["syll"]),
        Phoneme::new("u", ["syll", "high"]),
        Phoneme::new("e", ["syll", "front"]),
        Phoneme::new("i", ["syll", "front", "high"]),
        Phoneme::new("p", None::<&str>),
        Phoneme::new("f", ["continuant"]),
    ])
}

/// The default notation with `C` and `V` for consonants and vowels.
pub fn notation() -> Notation {
    Notation::default()
        .with_class('C', FeatureDiff::new(None::<&str>, ["syll"]))
        .with_class('V', FeatureDiff::new(["syll"], None::<&str>))
}

/// Runs `word` through the whole cascade.
pub fn evolve(word: &str) -> Result<String, Error> {
    let lang = language();
    let notation = notation();
    let mut phonemes = lang.segment(word);
    for rules in RULES {
        let set = RuleSet::with_notation(rules, &lang, &notation)?;
        phonemes = set.process(&phonemes)?;
    }
    let evolved: String = phonemes.iter().map(|p| p.symbol()).collect();
    debug!("{} evolved into {}", word, evolved);
    Ok(evolved)
}

#[test]
fn test_evolve() {
    assert_eq!(evolve("apa").unwrap(), "afu");
    assert_eq!(evolve("ape").unwrap(), "afi");
    assert_eq!(evolve("ipa").unwrap(), "ifu");
    assert_eq!(evolve("iiip").unwrap(), "ip");
    assert_eq!(evolve("appa").unwrap(), "ppu");
}

#[test]
fn test_rules_compile() {
    let lang = language();
    let notation = notation();
    for rules in RULES {
        assert!(RuleSet::with_notation(rules, &lang, &notation).is_ok(), "{}", rules);
    }
}
