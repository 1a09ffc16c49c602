// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

//! The document algebra: a recursive tree representing a *set* of possible
//! line layouts with alternatives, not yet committed to any one rendering.

use std::fmt;
use std::rc::Rc;

use crate::page_width::PageWidth;

type ColumnFn<A> = Rc<dyn Fn(usize) -> Doc<A>>;
type PageWidthFn<A> = Rc<dyn Fn(PageWidth) -> Doc<A>>;
type NestingFn<A> = Rc<dyn Fn(i64) -> Doc<A>>;

/// A document over annotation type `A`.
///
/// Immutable once built; cheap to clone (an `Rc` bump) and freely shareable
/// as a subtree of many larger documents.
pub struct Doc<A = ()>(pub(crate) Rc<DocInner<A>>);

pub(crate) enum DocInner<A> {
    /// Rejects every layout containing it on its first line.
    Fail,
    /// The unit of concatenation; height 1, width 0.
    Empty,
    /// A single non-newline character.
    Char(char),
    /// A run of non-newline text, `len >= 2`.
    Text(Rc<str>),
    /// A hard line break.
    Line,
    /// Renders as `x` normally; under `group`, `y` is preferred if it fits.
    FlatAlt(Doc<A>, Doc<A>),
    Cat(Doc<A>, Doc<A>),
    /// Adds `indent` to the current nesting while laying out `doc`.
    Nest(i64, Doc<A>),
    /// Alternative of two layouts; `x` must be at least as wide as `y`
    /// flattened, on every first line (the layout engine relies on this).
    Union(Doc<A>, Doc<A>),
    Column(ColumnFn<A>),
    WithPageWidth(PageWidthFn<A>),
    Nesting(NestingFn<A>),
    Annotated(A, Doc<A>),
}

impl<A> Clone for Doc<A> {
    fn clone(&self) -> Self {
        Doc(Rc::clone(&self.0))
    }
}

impl<A> fmt::Debug for Doc<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            DocInner::Fail => write!(f, "Fail"),
            DocInner::Empty => write!(f, "Empty"),
            DocInner::Char(c) => write!(f, "Char({c:?})"),
            DocInner::Text(s) => write!(f, "Text({:?})", &**s),
            DocInner::Line => write!(f, "Line"),
            DocInner::FlatAlt(x, y) => f.debug_tuple("FlatAlt").field(x).field(y).finish(),
            DocInner::Cat(x, y) => f.debug_tuple("Cat").field(x).field(y).finish(),
            DocInner::Nest(i, d) => f.debug_tuple("Nest").field(i).field(d).finish(),
            DocInner::Union(x, y) => f.debug_tuple("Union").field(x).field(y).finish(),
            DocInner::Column(_) => write!(f, "Column(<closure>)"),
            DocInner::WithPageWidth(_) => write!(f, "WithPageWidth(<closure>)"),
            DocInner::Nesting(_) => write!(f, "Nesting(<closure>)"),
            DocInner::Annotated(_, d) => f.debug_tuple("Annotated").field(d).finish(),
        }
    }
}

impl<A> DocInner<A> {
    fn into_doc(self) -> Doc<A> {
        Doc(Rc::new(self))
    }
}

impl<A> Doc<A> {
    pub(crate) fn inner(&self) -> &DocInner<A> {
        &self.0
    }

    pub(crate) fn from_inner(inner: DocInner<A>) -> Self {
        Doc(Rc::new(inner))
    }
}

impl<A> Doc<A> {
    /// Rejects every layout containing it on its first line.
    pub fn fail() -> Self {
        DocInner::Fail.into_doc()
    }

    /// The unit of concatenation: renders to nothing.
    pub fn empty() -> Self {
        DocInner::Empty.into_doc()
    }

    /// A single non-newline character.
    pub fn char(ch: char) -> Self {
        debug_assert_ne!(ch, '\n', "Doc::char must not be a newline");
        DocInner::Char(ch).into_doc()
    }

    /// A run of raw text. Debug-asserts the core invariant (no embedded
    /// newline, length at least 2 — single characters should use
    /// [`Doc::char`], and the empty string should use [`Doc::empty`]).
    /// Use [`crate::combinators::text`] for a constructor that dispatches
    /// to the right variant automatically.
    pub fn text<S: Into<String>>(s: S) -> Self {
        let s: String = s.into();
        debug_assert!(!s.contains('\n'), "Doc::text must not contain a newline");
        debug_assert!(
            s.chars().count() >= 2,
            "Doc::text must hold at least two characters; use Doc::char or Doc::empty otherwise"
        );
        DocInner::Text(Rc::from(s)).into_doc()
    }

    pub(crate) fn text_rc(s: Rc<str>) -> Self {
        DocInner::Text(s).into_doc()
    }

    /// A hard line break: always breaks, indenting the next line to the
    /// current nesting level.
    pub fn line() -> Self {
        DocInner::Line.into_doc()
    }

    /// Renders as `self` normally; under [`crate::combinators::group`],
    /// `flat` is preferred if it fits. Caller contract: the first line of
    /// `self` must be no wider than the first line of `flat` once
    /// flattened.
    pub fn flat_alt(self, flat: Doc<A>) -> Self {
        DocInner::FlatAlt(self, flat).into_doc()
    }

    /// Concatenate two documents with no separator.
    pub fn cat(self, other: Doc<A>) -> Self {
        DocInner::Cat(self, other).into_doc()
    }

    /// Adjust the nesting level used by hard and soft line breaks within
    /// `self`. Negative indents are allowed.
    pub fn nest(self, indent: i64) -> Self {
        match indent {
            0 => self,
            _ => DocInner::Nest(indent, self).into_doc(),
        }
    }

    /// An alternative between two layouts. Callers outside this crate
    /// should prefer [`crate::combinators::group`], which maintains the
    /// width invariant `Union` depends on.
    pub fn union(self, other: Doc<A>) -> Self {
        DocInner::Union(self, other).into_doc()
    }

    /// React to the current output column (0-based).
    pub fn column<F>(f: F) -> Self
    where
        F: Fn(usize) -> Doc<A> + 'static,
    {
        DocInner::Column(Rc::new(f)).into_doc()
    }

    /// React to the page width in effect for this layout.
    pub fn with_page_width<F>(f: F) -> Self
    where
        F: Fn(PageWidth) -> Doc<A> + 'static,
    {
        DocInner::WithPageWidth(Rc::new(f)).into_doc()
    }

    /// React to the current nesting level.
    pub fn nesting<F>(f: F) -> Self
    where
        F: Fn(i64) -> Doc<A> + 'static,
    {
        DocInner::Nesting(Rc::new(f)).into_doc()
    }

    /// Attach an annotation to a subtree. Preserved through layout,
    /// dropped by the plain string renderer.
    pub fn annotate(self, ann: A) -> Self {
        DocInner::Annotated(ann, self).into_doc()
    }

    pub fn is_empty(&self) -> bool {
        matches!(&*self.0, DocInner::Empty)
    }
}

impl<A> Default for Doc<A> {
    fn default() -> Self {
        Doc::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_empty() {
        assert!(Doc::<()>::empty().is_empty());
        assert!(!Doc::<()>::char('a').is_empty());
    }

    #[test]
    fn nest_zero_is_identity_node() {
        // nest(0, d) collapses to d itself rather than wrapping — cheap but
        // observable only via Debug, since Doc has no structural equality.
        let d = Doc::<()>::char('a').nest(0);
        assert_eq!(format!("{d:?}"), "Char('a')");
    }

    #[test]
    fn clone_is_cheap_rc_bump() {
        let d = Doc::<()>::text("hello");
        let d2 = d.clone();
        assert!(Rc::ptr_eq(&d.0, &d2.0));
    }
}
