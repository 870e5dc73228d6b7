/*!
A tool for applying sound changes written in feature notation.

Rules are written the way historical linguists write them on paper:

```text
[-high] → [+high] / _#          raise final non-high vowels
i₂ → i / _                      collapse runs of two or more i
C → [+continuant] / V_V         lenite intervocalic consonants
[] → [αhigh] / _[αhigh]         assimilate height to the next phoneme
```

A phoneme is a symbol with a set of features, and a language is just an
inventory of phonemes. A rule line is compiled once into a `RuleSet` and can then
process any number of words:

```
use phonorule::{Language, Phoneme, RuleSet};

let a = Phoneme::new("a", ["syll"]);
let u = Phoneme::new("u", ["syll", "high"]);
let e = Phoneme::new("e", ["syll", "front"]);
let i = Phoneme::new("i", ["syll", "front", "high"]);
let lang = Language::new(vec![a.clone(), u.clone(), e.clone(), i.clone()]);

let raise = RuleSet::new("[-high] → [+high] / _#", &lang).unwrap();
assert_eq!(raise.process(&[a.clone(), a.clone()]).unwrap(), [a, u]);
assert_eq!(raise.process_str("ue").unwrap(), [Phoneme::new("u", ["syll", "high"]), i]);
```

Patterns match greedily and never backtrack: `x*` always takes every `x` it can
see, even if that makes the rest of the rule fail.

The glyphs (`→`, `Ø`, subscript digits, polarity letters) and the class
abbreviations such as `C` and `V` are configured with a `Notation`.

Note: You can use `RUST_LOG=debug` with any `log` backend to trace every change
to a word together with the rule responsible for it.
*/

#[macro_use] extern crate log;

pub use error::{Error, Result, SyntaxError};
pub use notation::Notation;
pub use pattern::Pattern;
pub use phoneme::{FeatureDiff, Language, Phoneme};
pub use rule::{Rule, Segment, Slot};
pub use ruleset::{expand, RuleSet};

pub mod pattern;

mod error;
mod notation;
mod phoneme;
mod rule;
mod ruleset;

#[test]
fn test_ruleset() {
    let a = Phoneme::new("a", ["syll"]);
    let u = Phoneme::new("u", ["syll", "high"]);
    let e = Phoneme::new("e", ["syll", "front"]);
    let i = Phoneme::new("i", ["syll", "front", "high"]);
    let lang = Language::new(vec![a.clone(), u.clone(), e.clone(), i.clone()]);

    let raise = RuleSet::new("[-high] → [+high] / _#", &lang).unwrap();
    assert_eq!(raise.process(&[a.clone(), a.clone()]).unwrap(), [a.clone(), u.clone()]);
    assert_eq!(raise.process(&[u.clone(), e.clone()]).unwrap(), [u.clone(), i.clone()]);

    let lower = RuleSet::new("i → [-high] / _[-high]", &lang).unwrap();
    assert_eq!(lower.process(&[i.clone(), a.clone()]).unwrap(), [e.clone(), a.clone()]);

    let collapse = RuleSet::new("i₂ → i / _", &lang).unwrap();
    assert_eq!(collapse.process(&[i.clone(), i.clone(), i.clone(), i.clone()]).unwrap(), [i]);

    let p = Phoneme::new("p", None::<&str>);
    let f = Phoneme::new("f", ["continuant"]);
    let lang = Language::new(vec![a.clone(), e, u, p.clone(), f.clone()]);
    let notation = Notation::default()
        .with_class('C', FeatureDiff::new(None::<&str>, ["syll"]))
        .with_class('V', FeatureDiff::new(["syll"], None::<&str>));
    let lenite = RuleSet::with_notation("C → [+continuant] / V_V", &lang, &notation).unwrap();
    assert_eq!(lenite.process(&[a.clone(), p, a.clone()]).unwrap(), [a.clone(), f, a]);
}
