//! The glyphs that make up rule notation.
//!
//! Whatever the paper notation leaves to taste (the arrow, the null sign, the
//! subscript digits, polarity letters and class abbreviations) lives in a
//! `Notation` value that is handed to the compiler.

use std::collections::BTreeMap;

use crate::error::SyntaxError;
use crate::phoneme::FeatureDiff;

pub const BOUNDARY: char = '#';
pub const FOCUS: char = '_';
pub const ENVIRONMENT: char = '/';

#[derive(Clone, Debug)]
pub struct Notation {
    arrow: String,
    null: char,
    subscripts: [char; 10],
    polarity: Vec<char>,
    classes: BTreeMap<char, FeatureDiff>,
}

impl Default for Notation {
    fn default() -> Notation {
        Notation {
            arrow: "→".to_string(),
            null: 'Ø',
            subscripts: ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'],
            polarity: vec!['α', 'β', 'γ', 'δ'],
            classes: BTreeMap::new(),
        }
    }
}

impl Notation {
    pub fn with_arrow<S: Into<String>>(mut self, arrow: S) -> Notation {
        self.arrow = arrow.into();
        self
    }

    pub fn with_null(mut self, null: char) -> Notation {
        self.null = null;
        self
    }

    pub fn with_subscripts(mut self, subscripts: [char; 10]) -> Notation {
        self.subscripts = subscripts;
        self
    }

    pub fn with_polarity_letters<I: IntoIterator<Item = char>>(mut self, letters: I) -> Notation {
        self.polarity = letters.into_iter().collect();
        self
    }

    /// Lets `abbrev` stand for every phoneme matching `class`, e.g. `V` for `[+syll]`.
    pub fn with_class(mut self, abbrev: char, class: FeatureDiff) -> Notation {
        self.classes.insert(abbrev, class);
        self
    }

    #[inline] pub fn arrow(&self) -> &str { &self.arrow }
    #[inline] pub fn null(&self) -> char { self.null }
    #[inline] pub fn is_polarity(&self, c: char) -> bool { self.polarity.contains(&c) }
    #[inline] pub fn class(&self, abbrev: char) -> Option<&FeatureDiff> { self.classes.get(&abbrev) }

    /// The digit written by a subscript glyph, if `c` is one.
    pub fn subscript_digit(&self, c: char) -> Option<usize> {
        self.subscripts.iter().position(|&s| s == c)
    }

    /// Checks that the arrow can be told apart from the rest of the notation.
    pub fn validate(&self) -> Result<(), SyntaxError> {
        if self.arrow.is_empty() {
            return Err(SyntaxError::new("empty arrow token", &self.arrow));
        }
        if self.arrow.contains(['<', '>']) {
            return Err(SyntaxError::new("arrow token collides with alternative groups", &self.arrow));
        }
        if self.arrow.contains([ENVIRONMENT, FOCUS]) {
            return Err(SyntaxError::new("arrow token collides with the environment", &self.arrow));
        }
        Ok(())
    }
}
