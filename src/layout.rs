// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

//! The Wadler/Leijen `best` algorithm: the heart of the engine. Produces a
//! [`SimpleDocStream`] from a [`Doc`] under a page width, parameterised by
//! a *fitting predicate* (§4.3).

use std::rc::Rc;

use crate::doc::{Doc, DocInner};
use crate::page_width::{remaining_width, PageWidth};
use crate::pipeline::Pipeline;
use crate::stream::{SdsNode, SimpleDocStream, Tail};

/// `fits(lineIndent, currentColumn, initialIndentOfAlt, stream) -> bool`
/// (§4.3). Boxed so the four entry points can each supply their own
/// variant without the core recursion caring which one is in play.
pub(crate) type FitsFn<A> = Rc<dyn Fn(i64, i64, Option<i64>, &SimpleDocStream<A>) -> bool>;

/// The width a [`crate::combinators::group`]ed layout is produced under.
/// Mirrors `AvailablePerLine`/`Unbounded` one level up, as the parameter
/// `layoutPretty`/`layoutSmart` take (§6).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutOptions {
    pub page_width: PageWidth,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            page_width: PageWidth::default(),
        }
    }
}

impl LayoutOptions {
    pub fn new(page_width: PageWidth) -> Self {
        LayoutOptions { page_width }
    }
}

/// Lay out `doc` with no width constraint: only hard [`Doc::line`]s break.
pub fn layout_unbounded<A: Clone + 'static>(doc: &Doc<A>) -> SimpleDocStream<A> {
    let fits: FitsFn<A> = Rc::new(|_nl, _cc, _init, s| !fails_on_first_line(s));
    run(fits, PageWidth::Unbounded, doc)
}

/// The classic Wadler/Leijen layout: a `Union` is chosen if its first line
/// fits the remaining width; otherwise the wider/unflattened alternative
/// is taken.
pub fn layout_pretty<A: Clone + 'static>(doc: &Doc<A>, opts: LayoutOptions) -> SimpleDocStream<A> {
    match opts.page_width {
        PageWidth::Unbounded => layout_unbounded(doc),
        PageWidth::AvailablePerLine {
            line_width,
            ribbon_fraction,
        } => {
            let line_width = line_width as i64;
            let fits: FitsFn<A> = Rc::new(move |nl, cc, _init, s| {
                let w = remaining_width(line_width, ribbon_fraction, nl, cc);
                first_line_fits_in(s, w)
            });
            run(fits, opts.page_width, doc)
        }
    }
}

/// Like [`layout_pretty`], but the fitness check looks past the first
/// line, bounded by the starting indent, avoiding runaway-rightward
/// renderings for deeply right-nested documents (§4.3.3, scenario 5).
pub fn layout_smart<A: Clone + 'static>(doc: &Doc<A>, opts: LayoutOptions) -> SimpleDocStream<A> {
    match opts.page_width {
        PageWidth::Unbounded => layout_unbounded(doc),
        PageWidth::AvailablePerLine {
            line_width,
            ribbon_fraction,
        } => {
            let line_width_i = line_width as i64;
            let fits: FitsFn<A> = Rc::new(move |nl, cc, init, s| {
                let w = remaining_width(line_width_i, ribbon_fraction, nl, cc);
                let min_nesting_level = match init {
                    Some(i) => cc.min(i),
                    None => cc,
                };
                smart_fits_in(s, w, min_nesting_level, line_width_i)
            });
            run(fits, opts.page_width, doc)
        }
    }
}

fn run<A: Clone + 'static>(fits: FitsFn<A>, page_width: PageWidth, doc: &Doc<A>) -> SimpleDocStream<A> {
    best(fits, page_width, 0, 0, Pipeline::cons(0, doc.clone(), Pipeline::nil()))
}

/// `best(nestingLevel, currentColumn, pipeline)` (§4.3.1). Iterative in
/// `pipeline` (the explicit work list absorbs `Cat`/`Nest`/reactive-variant
/// recursion, §9 "Explicit pipeline, not native recursion"); each emission
/// point returns with its continuation wrapped in a lazily-forced,
/// memoised [`Tail`] so a discarded `Union` branch costs only whatever a
/// bounded `fits` check already forced (§4.3.2).
fn best<A: Clone + 'static>(
    fits: FitsFn<A>,
    page_width: PageWidth,
    nl: i64,
    cc: i64,
    mut pipeline: Rc<Pipeline<A>>,
) -> SimpleDocStream<A> {
    loop {
        match &*pipeline {
            Pipeline::Nil => return SimpleDocStream::empty(),
            Pipeline::UndoAnn { rest } => {
                let rest = Rc::clone(rest);
                let (fits2, pw2) = (Rc::clone(&fits), page_width);
                return SimpleDocStream::sann_pop(Tail::new(move || best(fits2, pw2, nl, cc, rest)));
            }
            Pipeline::Cons { indent, doc, rest } => {
                let indent = *indent;
                match doc.inner() {
                    DocInner::Fail => return SimpleDocStream::fail(),
                    DocInner::Empty => {
                        pipeline = Rc::clone(rest);
                    }
                    DocInner::Char(c) => {
                        let (c, rest) = (*c, Rc::clone(rest));
                        let (fits2, pw2, new_cc) = (Rc::clone(&fits), page_width, cc + 1);
                        return SimpleDocStream::schar(
                            c,
                            Tail::new(move || best(fits2, pw2, nl, new_cc, rest)),
                        );
                    }
                    DocInner::Text(s) => {
                        let (s, rest) = (Rc::clone(s), Rc::clone(rest));
                        let len = s.chars().count() as i64;
                        let (fits2, pw2, new_cc) = (Rc::clone(&fits), page_width, cc + len);
                        let s_out = Rc::clone(&s);
                        return SimpleDocStream::stext(
                            s_out,
                            Tail::new(move || best(fits2, pw2, nl, new_cc, rest)),
                        );
                    }
                    DocInner::Line => {
                        let rest = Rc::clone(rest);
                        let tail_stream = best(Rc::clone(&fits), page_width, indent, indent, rest);
                        let indent_prime = match tail_stream.node() {
                            SdsNode::Empty | SdsNode::Line(_, _) => 0,
                            _ => indent,
                        };
                        return SimpleDocStream::sline(indent_prime as usize, Tail::ready(tail_stream));
                    }
                    DocInner::FlatAlt(x, _) => {
                        pipeline = Pipeline::cons(indent, x.clone(), Rc::clone(rest));
                    }
                    DocInner::Cat(x, y) => {
                        let inner = Pipeline::cons(indent, y.clone(), Rc::clone(rest));
                        pipeline = Pipeline::cons(indent, x.clone(), inner);
                    }
                    DocInner::Nest(j, x) => {
                        pipeline = Pipeline::cons(indent + j, x.clone(), Rc::clone(rest));
                    }
                    DocInner::Union(x, y) => {
                        let rest = Rc::clone(rest);
                        let sx = best(
                            Rc::clone(&fits),
                            page_width,
                            nl,
                            cc,
                            Pipeline::cons(indent, x.clone(), Rc::clone(&rest)),
                        );
                        let sy = best(
                            Rc::clone(&fits),
                            page_width,
                            nl,
                            cc,
                            Pipeline::cons(indent, y.clone(), rest),
                        );
                        return select_nicer(&fits, nl, cc, sx, sy);
                    }
                    DocInner::Column(f) => {
                        let d = f(cc.max(0) as usize);
                        pipeline = Pipeline::cons(indent, d, Rc::clone(rest));
                    }
                    DocInner::WithPageWidth(f) => {
                        let d = f(page_width);
                        pipeline = Pipeline::cons(indent, d, Rc::clone(rest));
                    }
                    DocInner::Nesting(f) => {
                        let d = f(indent);
                        pipeline = Pipeline::cons(indent, d, Rc::clone(rest));
                    }
                    DocInner::Annotated(ann, x) => {
                        let ann = ann.clone();
                        let inner = Pipeline::cons(indent, x.clone(), Pipeline::undo_ann(Rc::clone(rest)));
                        let (fits2, pw2) = (Rc::clone(&fits), page_width);
                        return SimpleDocStream::sann_push(
                            ann,
                            Tail::new(move || best(fits2, pw2, nl, cc, inner)),
                        );
                    }
                }
            }
        }
    }
}

/// `selectNicer(nl, cc, x, y) = if fits(nl, cc, initialIndentation(y), x)
/// then x else y` (§4.3.1).
fn select_nicer<A: 'static>(
    fits: &FitsFn<A>,
    nl: i64,
    cc: i64,
    x: SimpleDocStream<A>,
    y: SimpleDocStream<A>,
) -> SimpleDocStream<A> {
    let init = initial_indentation(&y);
    if fits(nl, cc, init, &x) {
        x
    } else {
        y
    }
}

/// Walk past leading `SChar`/`SText`/annotation markers; `Some(i)` if the
/// first non-text event is `SLine(i, _)`, else `None`.
fn initial_indentation<A>(s: &SimpleDocStream<A>) -> Option<i64> {
    match s.node() {
        SdsNode::Fail | SdsNode::Empty => None,
        SdsNode::Line(i, _) => Some(*i as i64),
        SdsNode::Char(_, t) => initial_indentation(&t.force()),
        SdsNode::Text(_, t) => initial_indentation(&t.force()),
        SdsNode::AnnPush(_, t) => initial_indentation(&t.force()),
        SdsNode::AnnPop(t) => initial_indentation(&t.force()),
    }
}

/// `fits` for [`layout_unbounded`]: true iff the first line contains no
/// `SFail`. Text length is not checked.
fn fails_on_first_line<A>(s: &SimpleDocStream<A>) -> bool {
    match s.node() {
        SdsNode::Fail => true,
        SdsNode::Empty | SdsNode::Line(_, _) => false,
        SdsNode::Char(_, t) => fails_on_first_line(&t.force()),
        SdsNode::Text(_, t) => fails_on_first_line(&t.force()),
        SdsNode::AnnPush(_, t) => fails_on_first_line(&t.force()),
        SdsNode::AnnPop(t) => fails_on_first_line(&t.force()),
    }
}

/// `fits` for [`layout_pretty`]: does the first line fit within `w`
/// columns?
fn first_line_fits_in<A>(s: &SimpleDocStream<A>, w: i64) -> bool {
    if w < 0 {
        return false;
    }
    match s.node() {
        SdsNode::Fail => false,
        SdsNode::Empty => true,
        SdsNode::Line(_, _) => true,
        SdsNode::Char(_, t) => first_line_fits_in(&t.force(), w - 1),
        SdsNode::Text(txt, t) => {
            let len = txt.chars().count() as i64;
            first_line_fits_in(&t.force(), w - len)
        }
        SdsNode::AnnPush(_, t) | SdsNode::AnnPop(t) => first_line_fits_in(&t.force(), w),
    }
}

/// `fits` for [`layout_smart`]: keeps checking past the first `SLine`
/// until a line whose indentation is `<= min_nesting_level` is reached,
/// treating deeper-indented lines as a continuation of the current
/// syntactic unit rather than a place it's safe to stop looking.
fn smart_fits_in<A>(s: &SimpleDocStream<A>, w: i64, min_nesting_level: i64, line_width: i64) -> bool {
    if w < 0 {
        return false;
    }
    match s.node() {
        SdsNode::Fail => false,
        SdsNode::Empty => true,
        SdsNode::Char(_, t) => smart_fits_in(&t.force(), w - 1, min_nesting_level, line_width),
        SdsNode::Text(txt, t) => {
            let len = txt.chars().count() as i64;
            smart_fits_in(&t.force(), w - len, min_nesting_level, line_width)
        }
        SdsNode::Line(i, t) => {
            let i = *i as i64;
            if min_nesting_level < i {
                smart_fits_in(&t.force(), line_width - i, min_nesting_level, line_width)
            } else {
                true
            }
        }
        SdsNode::AnnPush(_, t) | SdsNode::AnnPop(t) => {
            smart_fits_in(&t.force(), w, min_nesting_level, line_width)
        }
    }
}

/// Ignores the page width entirely: `FlatAlt` always takes its first
/// branch, `Union` always takes its narrower second branch, `Nest` and
/// `Annotated` wrappers are stripped, every `Line` resets the column to 0
/// with no indentation, and reactive producers see the current column,
/// `Unbounded`, and nesting level 0 respectively (§4.3.3).
///
/// Implemented as an explicit `Vec`-based stack rather than through
/// `best`: there is no choice point here (no two live alternatives ever
/// coexist), so the laziness `best` needs to stay off exponential blowup
/// would be pure overhead.
pub fn layout_compact<A: Clone + 'static>(doc: &Doc<A>) -> SimpleDocStream<A> {
    enum Part {
        Char(char),
        Text(Rc<str>),
        Line,
        Fail,
    }

    let mut stack = vec![doc.clone()];
    let mut parts: Vec<Part> = Vec::new();
    let mut column: usize = 0;

    while let Some(d) = stack.pop() {
        match d.inner() {
            DocInner::Fail => {
                parts.push(Part::Fail);
                break;
            }
            DocInner::Empty => {}
            DocInner::Char(c) => {
                parts.push(Part::Char(*c));
                column += 1;
            }
            DocInner::Text(s) => {
                column += s.chars().count();
                parts.push(Part::Text(Rc::clone(s)));
            }
            DocInner::Line => {
                parts.push(Part::Line);
                column = 0;
            }
            DocInner::FlatAlt(x, _) => stack.push(x.clone()),
            DocInner::Cat(x, y) => {
                stack.push(y.clone());
                stack.push(x.clone());
            }
            DocInner::Nest(_, x) => stack.push(x.clone()),
            DocInner::Union(_, y) => stack.push(y.clone()),
            DocInner::Column(f) => stack.push(f(column)),
            DocInner::WithPageWidth(f) => stack.push(f(PageWidth::Unbounded)),
            DocInner::Nesting(f) => stack.push(f(0)),
            DocInner::Annotated(_, x) => stack.push(x.clone()),
        }
    }

    let mut result = SimpleDocStream::empty();
    for part in parts.into_iter().rev() {
        result = match part {
            Part::Fail => SimpleDocStream::fail(),
            Part::Char(c) => SimpleDocStream::schar(c, Tail::ready(result)),
            Part::Text(s) => SimpleDocStream::stext(s, Tail::ready(result)),
            Part::Line => SimpleDocStream::sline(0, Tail::ready(result)),
        };
    }
    result
}
