// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

//! The linearised output of the layout engine: a lazy cons-list-shaped
//! tagged tree consumed by both the fitting predicates and the renderer.
//!
//! Laziness is realized with memoising thunk cells (§4.3.2/§9 of the
//! design notes this crate follows): each non-terminal node's successor is
//! a [`Tail`], computed at most once and cached, so a discarded `Union`
//! alternative never pays for work beyond whatever a bounded fitness check
//! already forced.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A lazily-computed, memoised successor stream.
pub(crate) struct Tail<A>(Rc<RefCell<TailState<A>>>);

enum TailState<A> {
    Pending(Box<dyn FnOnce() -> SimpleDocStream<A>>),
    Forced(SimpleDocStream<A>),
}

impl<A> Clone for Tail<A> {
    fn clone(&self) -> Self {
        Tail(Rc::clone(&self.0))
    }
}

impl<A> Tail<A> {
    pub(crate) fn new<F>(f: F) -> Self
    where
        F: FnOnce() -> SimpleDocStream<A> + 'static,
    {
        Tail(Rc::new(RefCell::new(TailState::Pending(Box::new(f)))))
    }

    pub(crate) fn ready(stream: SimpleDocStream<A>) -> Self {
        Tail(Rc::new(RefCell::new(TailState::Forced(stream))))
    }

    /// Force the thunk, memoising the result. Subsequent calls are a cheap
    /// `Rc` clone of the cached stream.
    pub(crate) fn force(&self) -> SimpleDocStream<A> {
        if let TailState::Forced(s) = &*self.0.borrow() {
            return s.clone();
        }
        // Placeholder swapped in while the thunk runs; single-threaded and
        // non-reentrant (a thunk never forces itself), so this is never
        // observed.
        let pending = std::mem::replace(
            &mut *self.0.borrow_mut(),
            TailState::Forced(SimpleDocStream::empty()),
        );
        let s = match pending {
            TailState::Pending(f) => f(),
            TailState::Forced(s) => s,
        };
        *self.0.borrow_mut() = TailState::Forced(s.clone());
        s
    }
}

pub(crate) enum SdsNode<A> {
    Fail,
    Empty,
    Char(char, Tail<A>),
    Text(Rc<str>, Tail<A>),
    Line(usize, Tail<A>),
    AnnPush(A, Tail<A>),
    AnnPop(Tail<A>),
}

/// The lazily-produced output of the layout engine.
pub struct SimpleDocStream<A = ()>(pub(crate) Rc<SdsNode<A>>);

impl<A> Clone for SimpleDocStream<A> {
    fn clone(&self) -> Self {
        SimpleDocStream(Rc::clone(&self.0))
    }
}

impl<A> SimpleDocStream<A> {
    pub fn fail() -> Self {
        SimpleDocStream(Rc::new(SdsNode::Fail))
    }

    pub fn empty() -> Self {
        SimpleDocStream(Rc::new(SdsNode::Empty))
    }

    pub(crate) fn schar(c: char, tail: Tail<A>) -> Self {
        SimpleDocStream(Rc::new(SdsNode::Char(c, tail)))
    }

    pub(crate) fn stext(s: Rc<str>, tail: Tail<A>) -> Self {
        SimpleDocStream(Rc::new(SdsNode::Text(s, tail)))
    }

    pub(crate) fn sline(indent: usize, tail: Tail<A>) -> Self {
        SimpleDocStream(Rc::new(SdsNode::Line(indent, tail)))
    }

    pub(crate) fn sann_push(ann: A, tail: Tail<A>) -> Self {
        SimpleDocStream(Rc::new(SdsNode::AnnPush(ann, tail)))
    }

    pub(crate) fn sann_pop(tail: Tail<A>) -> Self {
        SimpleDocStream(Rc::new(SdsNode::AnnPop(tail)))
    }

    pub(crate) fn node(&self) -> &SdsNode<A> {
        &self.0
    }

    pub fn is_fail(&self) -> bool {
        matches!(&*self.0, SdsNode::Fail)
    }

    pub fn is_empty(&self) -> bool {
        matches!(&*self.0, SdsNode::Empty)
    }
}

impl<A> fmt::Debug for SimpleDocStream<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            SdsNode::Fail => write!(f, "SFail"),
            SdsNode::Empty => write!(f, "SEmpty"),
            SdsNode::Char(c, t) => write!(f, "SChar({c:?}, {:?})", t.force()),
            SdsNode::Text(s, t) => write!(f, "SText({:?}, {:?})", &**s, t.force()),
            SdsNode::Line(i, t) => write!(f, "SLine({i}, {:?})", t.force()),
            SdsNode::AnnPush(_, t) => write!(f, "SAnnPush(_, {:?})", t.force()),
            SdsNode::AnnPop(t) => write!(f, "SAnnPop({:?})", t.force()),
        }
    }
}

/// The functor `map` over the stream's annotation type, rewriting only
/// `SAnnPush` nodes (§9 design notes: "`SimpleDocStream<A>` is a functor;
/// `map` is defined structurally"). Lazy: the rest of the stream is not
/// walked until the caller forces past the returned node.
pub fn map_annotations<A, B, F>(stream: SimpleDocStream<A>, f: F) -> SimpleDocStream<B>
where
    A: 'static,
    B: 'static,
    F: Fn(&A) -> B + 'static,
{
    map_with(stream, Rc::new(f))
}

fn map_with<A: 'static, B: 'static>(
    stream: SimpleDocStream<A>,
    f: Rc<dyn Fn(&A) -> B>,
) -> SimpleDocStream<B> {
    match stream.node() {
        SdsNode::Fail => SimpleDocStream::fail(),
        SdsNode::Empty => SimpleDocStream::empty(),
        SdsNode::Char(c, t) => {
            let (c, t) = (*c, t.clone());
            SimpleDocStream::schar(c, Tail::new(move || map_with(t.force(), f)))
        }
        SdsNode::Text(s, t) => {
            let (s, t) = (Rc::clone(s), t.clone());
            SimpleDocStream::stext(s, Tail::new(move || map_with(t.force(), f)))
        }
        SdsNode::Line(i, t) => {
            let (i, t) = (*i, t.clone());
            SimpleDocStream::sline(i, Tail::new(move || map_with(t.force(), f)))
        }
        SdsNode::AnnPush(a, t) => {
            let b = f(a);
            let t = t.clone();
            SimpleDocStream::sann_push(b, Tail::new(move || map_with(t.force(), f)))
        }
        SdsNode::AnnPop(t) => {
            let t = t.clone();
            SimpleDocStream::sann_pop(Tail::new(move || map_with(t.force(), f)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_is_memoised() {
        use std::cell::Cell;
        use std::rc::Rc as StdRc;

        let calls = StdRc::new(Cell::new(0));
        let calls2 = StdRc::clone(&calls);
        let t: Tail<()> = Tail::new(move || {
            calls2.set(calls2.get() + 1);
            SimpleDocStream::empty()
        });
        let _ = t.force();
        let _ = t.force();
        let _ = t.force();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn fail_and_empty_have_no_tail() {
        assert!(SimpleDocStream::<()>::fail().is_fail());
        assert!(SimpleDocStream::<()>::empty().is_empty());
    }
}
