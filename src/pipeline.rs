// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

//! The layout engine's explicit work list, used in place of native
//! recursion through `Cat`/`Nest`/`Annotated` (§3.4, §9 "Explicit
//! pipeline, not native recursion").

use std::rc::Rc;

use crate::doc::Doc;

/// One frame of the engine's explicit stack: either a `(nesting, document)`
/// pair still to be laid out, or a marker requesting that an `SAnnPop` be
/// emitted once the annotated subtree above it has been fully processed.
pub(crate) enum Pipeline<A> {
    Nil,
    Cons {
        indent: i64,
        doc: Doc<A>,
        rest: Rc<Pipeline<A>>,
    },
    UndoAnn {
        rest: Rc<Pipeline<A>>,
    },
}

impl<A> Pipeline<A> {
    pub(crate) fn nil() -> Rc<Self> {
        Rc::new(Pipeline::Nil)
    }

    pub(crate) fn cons(indent: i64, doc: Doc<A>, rest: Rc<Pipeline<A>>) -> Rc<Self> {
        Rc::new(Pipeline::Cons { indent, doc, rest })
    }

    pub(crate) fn undo_ann(rest: Rc<Pipeline<A>>) -> Rc<Self> {
        Rc::new(Pipeline::UndoAnn { rest })
    }
}
