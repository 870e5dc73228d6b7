//! Reduction of patterns to a minimal form.
//!
//! In canonical form no sequence holds a sequence, no alternation holds an
//! alternation, no composite has fewer than two children, and no repetition
//! repeats a repetition.

use super::Pattern;

#[derive(Clone, Copy)]
enum Composite {
    Sequence,
    Alternation,
}

impl Composite {
    /// The composite with no children, which also acts as its identity element.
    fn empty(self) -> Pattern {
        match self {
            Composite::Sequence => Pattern::Null,
            Composite::Alternation => Pattern::Alternation(Vec::new()),
        }
    }

    fn build(self, items: Vec<Pattern>) -> Pattern {
        match self {
            Composite::Sequence => Pattern::Sequence(items),
            Composite::Alternation => Pattern::Alternation(items),
        }
    }

    /// The children of `p` if it is a composite of this kind, `p` itself otherwise.
    fn children(self, p: Pattern) -> Result<Vec<Pattern>, Pattern> {
        match (self, p) {
            (Composite::Sequence, Pattern::Sequence(items)) |
            (Composite::Alternation, Pattern::Alternation(items)) => Ok(items),
            (_, p) => Err(p),
        }
    }

    fn collapse(self, items: Vec<Pattern>) -> Pattern {
        let empty = self.empty();
        let mut ret = Vec::with_capacity(items.len());
        for item in items {
            let item = item.canonical();
            if item == empty { continue; }
            match self.children(item) {
                Ok(inner) => ret.extend(inner),
                Err(item) => ret.push(item),
            }
        }
        match ret.len() {
            0 => empty,
            1 => ret.swap_remove(0),
            _ => self.build(ret),
        }
    }
}

impl Pattern {
    /// Returns the canonical form of this pattern. Already canonical patterns come back equal.
    pub fn canonical(self) -> Pattern {
        match self {
            Pattern::Sequence(items) => Composite::Sequence.collapse(items),
            Pattern::Alternation(alts) => Composite::Alternation.collapse(alts),
            Pattern::Repeated(base, min) => match base.canonical() {
                // counts add up: `(a₂)₁` is `a₃`
                Pattern::Repeated(inner, n) => Pattern::Repeated(inner, n.saturating_add(min)),
                base => Pattern::Repeated(Box::new(base), min),
            },
            leaf => leaf,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::Pattern::*;
    use super::super::Pattern;

    fn sym(s: &str) -> Pattern { Symbol(s.to_string()) }

    #[test]
    fn test_flattens_sequences() {
        let p = Sequence(vec![Null, Sequence(vec![sym("a"), Null, Sequence(vec![sym("b")])]), sym("c")]);
        assert_eq!(p.canonical(), Sequence(vec![sym("a"), sym("b"), sym("c")]));
    }

    #[test]
    fn test_collapses_small_composites() {
        assert_eq!(Sequence(vec![]).canonical(), Null);
        assert_eq!(Sequence(vec![Null, Null]).canonical(), Null);
        assert_eq!(Sequence(vec![Null, sym("a")]).canonical(), sym("a"));
        assert_eq!(Alternation(vec![]).canonical(), Alternation(vec![]));
        assert_eq!(Alternation(vec![Alternation(vec![]), sym("a")]).canonical(), sym("a"));
        // the null pattern is an ordinary alternative, not the empty alternation
        assert_eq!(Alternation(vec![Null]).canonical(), Null);
    }

    #[test]
    fn test_flattens_alternations() {
        let p = Alternation(vec![sym("a"), Alternation(vec![sym("b"), sym("c")])]);
        assert_eq!(p.canonical(), Alternation(vec![sym("a"), sym("b"), sym("c")]));
        // but not an alternation inside a sequence
        let p = Sequence(vec![sym("a"), Alternation(vec![sym("b"), Sequence(vec![sym("c")])])]);
        assert_eq!(p.canonical(),
                   Sequence(vec![sym("a"), Alternation(vec![sym("b"), sym("c")])]));
    }

    #[test]
    fn test_folds_repetition_additively() {
        let p = Repeated(Box::new(Repeated(Box::new(sym("a")), 2)), 3);
        assert_eq!(p.canonical(), Repeated(Box::new(sym("a")), 5));
        let p = Repeated(Box::new(Sequence(vec![Repeated(Box::new(sym("a")), 1)])), 0);
        assert_eq!(p.canonical(), Repeated(Box::new(sym("a")), 1));
        let p = Repeated(Box::new(Repeated(Box::new(sym("a")), usize::MAX)), 2);
        assert_eq!(p.canonical(), Repeated(Box::new(sym("a")), usize::MAX));
    }

    #[test]
    fn test_idempotent() {
        let p = Sequence(vec![
            WordBoundary,
            Sequence(vec![Repeated(Box::new(Repeated(Box::new(sym("i")), 1)), 1)]),
            Alternation(vec![Alternation(vec![sym("a"), sym("e")]), Null]),
        ]);
        let once = p.canonical();
        assert_eq!(once.clone().canonical(), once);
    }
}
