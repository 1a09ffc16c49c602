// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

//! The flatten analysis: the sole mechanism by which [`crate::combinators::group`]
//! decides whether a single-line alternative is ever worth building,
//! without materialising an exponential number of `Union`s (§4.2).

use crate::doc::{Doc, DocInner};
use crate::page_width::PageWidth;

/// The outcome of asking whether flattening a document would change it.
pub enum FlattenResult<T> {
    /// Flattening produces a (possibly) different document.
    Flattened(T),
    /// The document is already in its flat form; flattening is a no-op.
    AlreadyFlat,
    /// The document can never be flattened (it contains an unconditional
    /// hard line break with no escape via `FlatAlt`).
    NeverFlat,
}

impl<T> FlattenResult<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FlattenResult<U> {
        match self {
            FlattenResult::Flattened(t) => FlattenResult::Flattened(f(t)),
            FlattenResult::AlreadyFlat => FlattenResult::AlreadyFlat,
            FlattenResult::NeverFlat => FlattenResult::NeverFlat,
        }
    }
}

/// Rewrite `doc` by removing all soft alternatives, committing to the
/// single-line form. Used internally by [`changes_upon_flattening`] and by
/// [`crate::combinators::group`].
pub fn flatten<A: Clone + 'static>(doc: &Doc<A>) -> Doc<A> {
    match doc.inner() {
        DocInner::Fail | DocInner::Empty | DocInner::Char(_) | DocInner::Text(_) => doc.clone(),
        DocInner::Line => Doc::fail(),
        DocInner::FlatAlt(_, y) => flatten(y),
        DocInner::Cat(x, y) => flatten(x).cat(flatten(y)),
        DocInner::Nest(i, x) => flatten(x).nest(*i),
        DocInner::Union(x, _) => flatten(x),
        DocInner::Column(f) => {
            let f = f.clone();
            Doc::column(move |col| flatten(&f(col)))
        }
        DocInner::WithPageWidth(f) => {
            let f = f.clone();
            Doc::with_page_width(move |pw: PageWidth| flatten(&f(pw)))
        }
        DocInner::Nesting(f) => {
            let f = f.clone();
            Doc::nesting(move |i| flatten(&f(i)))
        }
        DocInner::Annotated(ann, x) => flatten(x).annotate(ann.clone()),
    }
}

/// Classify whether flattening `doc` would produce a different document,
/// without necessarily building the flattened form when it can be avoided
/// (`Union`'s left branch is already known to be flat by the `Union`
/// invariant, so no new tree is built in that case).
pub fn changes_upon_flattening<A>(doc: &Doc<A>) -> FlattenResult<Doc<A>>
where
    A: Clone + 'static,
{
    match doc.inner() {
        DocInner::Empty | DocInner::Char(_) | DocInner::Text(_) | DocInner::Fail => {
            FlattenResult::AlreadyFlat
        }
        DocInner::Line => FlattenResult::NeverFlat,
        DocInner::FlatAlt(_, y) => FlattenResult::Flattened(flatten(y)),
        DocInner::Union(x, _) => FlattenResult::Flattened(x.clone()),
        DocInner::Cat(a, b) => {
            let ra = changes_upon_flattening(a);
            let rb = changes_upon_flattening(b);
            combine_cat(a, b, ra, rb)
        }
        DocInner::Nest(i, a) => changes_upon_flattening(a).map(|a| a.nest(*i)),
        DocInner::Column(f) => {
            let f = f.clone();
            FlattenResult::Flattened(Doc::column(move |col| flatten(&f(col))))
        }
        DocInner::WithPageWidth(f) => {
            let f = f.clone();
            FlattenResult::Flattened(Doc::with_page_width(move |pw: PageWidth| flatten(&f(pw))))
        }
        DocInner::Nesting(f) => {
            let f = f.clone();
            FlattenResult::Flattened(Doc::nesting(move |i| flatten(&f(i))))
        }
        DocInner::Annotated(ann, a) => {
            let ann = ann.clone();
            changes_upon_flattening(a).map(|a| a.annotate(ann))
        }
    }
}

fn combine_cat<A>(
    a: &Doc<A>,
    b: &Doc<A>,
    ra: FlattenResult<Doc<A>>,
    rb: FlattenResult<Doc<A>>,
) -> FlattenResult<Doc<A>>
where
    A: Clone + 'static,
{
    match (ra, rb) {
        (FlattenResult::NeverFlat, _) | (_, FlattenResult::NeverFlat) => FlattenResult::NeverFlat,
        (FlattenResult::AlreadyFlat, FlattenResult::AlreadyFlat) => FlattenResult::AlreadyFlat,
        (FlattenResult::Flattened(a2), FlattenResult::AlreadyFlat) => {
            FlattenResult::Flattened(a2.cat(b.clone()))
        }
        (FlattenResult::AlreadyFlat, FlattenResult::Flattened(b2)) => {
            FlattenResult::Flattened(a.clone().cat(b2))
        }
        (FlattenResult::Flattened(a2), FlattenResult::Flattened(b2)) => {
            FlattenResult::Flattened(a2.cat(b2))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::text;

    #[test]
    fn leaves_are_already_flat() {
        assert!(matches!(
            changes_upon_flattening(&Doc::<()>::empty()),
            FlattenResult::AlreadyFlat
        ));
        assert!(matches!(
            changes_upon_flattening(&Doc::<()>::char('a')),
            FlattenResult::AlreadyFlat
        ));
        assert!(matches!(
            changes_upon_flattening(&text::<()>("hello")),
            FlattenResult::AlreadyFlat
        ));
    }

    #[test]
    fn line_never_flattens() {
        assert!(matches!(
            changes_upon_flattening(&Doc::<()>::line()),
            FlattenResult::NeverFlat
        ));
    }

    #[test]
    fn cat_never_flat_if_either_side_never_flat() {
        let d = text::<()>("hi").cat(Doc::line());
        assert!(matches!(
            changes_upon_flattening(&d),
            FlattenResult::NeverFlat
        ));
    }

    #[test]
    fn cat_already_flat_if_both_sides_already_flat() {
        let d = text::<()>("hi").cat(text("there"));
        assert!(matches!(
            changes_upon_flattening(&d),
            FlattenResult::AlreadyFlat
        ));
    }

    #[test]
    fn flatten_turns_line_into_space_via_flat_alt() {
        let d = Doc::<()>::line().flat_alt(Doc::char(' '));
        let flat = flatten(&d);
        assert!(matches!(flat.inner(), DocInner::Char(' ')));
    }

    #[test]
    fn flatten_is_idempotent() {
        let d = text::<()>("a")
            .cat(Doc::line())
            .cat(text("b"))
            .nest(2)
            .flat_alt(text("flat-form"));
        let once = flatten(&d);
        let twice = flatten(&once);
        assert_eq!(format!("{once:?}"), format!("{twice:?}"));
    }
}
