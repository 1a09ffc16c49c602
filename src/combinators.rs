// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

//! The derived combinator surface (§6 "Consumed"). Everything here is
//! defined purely in terms of the core constructors in [`crate::doc`] and
//! never violates the invariants those constructors document: no raw
//! `'\n'` `Char`, no sub-length `Text`, no `Union` built anywhere but
//! [`group`].

use crate::doc::{Doc, DocInner};
use crate::flatten::{changes_upon_flattening, FlattenResult};
use crate::page_width::PageWidth;

/// Smart constructor dispatching to [`Doc::empty`], [`Doc::char`], or
/// [`Doc::text`] depending on length, and splitting on embedded newlines
/// (a raw string containing `'\n'` is not a single `Text` node — each
/// line becomes its own piece joined by a hard [`Doc::line`]).
pub fn text<A: 'static, S: AsRef<str>>(s: S) -> Doc<A> {
    let s = s.as_ref();
    if !s.contains('\n') {
        return text_segment(s);
    }
    let mut pieces = s.split('\n').map(text_segment);
    let first = pieces.next().unwrap_or_else(Doc::empty);
    pieces.fold(first, |acc, p| acc.cat(Doc::line()).cat(p))
}

fn text_segment<A: 'static>(s: &str) -> Doc<A> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Doc::empty(),
        (Some(c), None) => Doc::char(c),
        _ => Doc::text(s),
    }
}

/// `n` ASCII spaces, with fast paths for 0 and 1 (§9: "single-character
/// runs should use `Char`").
pub fn spaces<A: 'static>(n: i64) -> Doc<A> {
    match n {
        n if n <= 0 => Doc::empty(),
        1 => Doc::char(' '),
        n => Doc::text(" ".repeat(n as usize)),
    }
}

/// A hard line break that becomes a single space when flattened by an
/// enclosing [`group`]; the separator used by [`vsep`].
pub fn line<A: 'static>() -> Doc<A> {
    Doc::line().flat_alt(Doc::char(' '))
}

/// A hard line break that disappears entirely when flattened; the
/// separator used by [`vcat`].
pub fn line_prime<A: 'static>() -> Doc<A> {
    Doc::line().flat_alt(Doc::empty())
}

/// A space when flattened, a line break otherwise; the separator used by
/// [`fill_sep`].
pub fn soft_line<A: Clone + 'static>() -> Doc<A> {
    group(line())
}

/// Nothing when flattened, a line break otherwise; the separator used by
/// [`fill_cat`].
pub fn soft_line_break<A: Clone + 'static>() -> Doc<A> {
    group(line_prime())
}

/// Try to render `d` on one line by flattening it; fall back to `d`
/// unchanged if flattening cannot help or never applies (§4.4).
///
/// The produced `Union` always carries the wider, already-flat
/// alternative on the left, satisfying the width invariant
/// [`select_nicer`](crate::layout)'s fitting check depends on.
pub fn group<A: Clone + 'static>(d: Doc<A>) -> Doc<A> {
    match d.inner() {
        DocInner::FlatAlt(a, b) => {
            let (a, b) = (a.clone(), b.clone());
            match changes_upon_flattening(&b) {
                FlattenResult::Flattened(b2) => b2.union(a),
                FlattenResult::AlreadyFlat => b.union(a),
                FlattenResult::NeverFlat => a,
            }
        }
        DocInner::Union(_, _) => d,
        _ => match changes_upon_flattening(&d) {
            FlattenResult::Flattened(d2) => {
                let d_clone = d.clone();
                d2.union(d_clone)
            }
            FlattenResult::AlreadyFlat | FlattenResult::NeverFlat => d,
        },
    }
}

/// Increase the nesting level used by line breaks within `d` by
/// `indent` columns. Thin re-export of the core constructor, at the
/// combinator layer for symmetry with [`hang`]/[`indent`]/[`align`].
pub fn nest<A>(d: Doc<A>, indent: i64) -> Doc<A> {
    d.nest(indent)
}

/// Align subsequent lines of `d` to the current output column.
pub fn align<A: Clone + 'static>(d: Doc<A>) -> Doc<A> {
    let base = d;
    Doc::column(move |k| {
        let base = base.clone();
        Doc::nesting(move |i| base.clone().nest(k as i64 - i))
    })
}

/// `align(nest(indent, d))`: subsequent lines hang under the first
/// character rather than under the left margin.
pub fn hang<A: Clone + 'static>(d: Doc<A>, indent: i64) -> Doc<A> {
    align(d.nest(indent))
}

/// `hang(indent, spaces(indent) <> d)`.
pub fn indent<A: Clone + 'static>(d: Doc<A>, indent_by: i64) -> Doc<A> {
    hang(spaces(indent_by).cat(d), indent_by)
}

/// Fold `docs` pairwise with `f`, returning [`Doc::empty`] for an empty
/// iterator — the shared backbone of `hsep`/`vsep`/`hcat`/`vcat`/etc.
pub fn concat_with<A, F>(docs: impl IntoIterator<Item = Doc<A>>, f: F) -> Doc<A>
where
    F: Fn(Doc<A>, Doc<A>) -> Doc<A>,
{
    let mut iter = docs.into_iter();
    match iter.next() {
        None => Doc::empty(),
        Some(first) => iter.fold(first, f),
    }
}

pub fn hsep<A: 'static>(docs: impl IntoIterator<Item = Doc<A>>) -> Doc<A> {
    concat_with(docs, |x, y| x.cat(Doc::char(' ')).cat(y))
}

pub fn vsep<A: 'static>(docs: impl IntoIterator<Item = Doc<A>>) -> Doc<A> {
    concat_with(docs, |x, y| x.cat(line()).cat(y))
}

pub fn fill_sep<A: Clone + 'static>(docs: impl IntoIterator<Item = Doc<A>>) -> Doc<A> {
    concat_with(docs, |x, y| x.cat(soft_line()).cat(y))
}

/// `hsep` if the whole group fits, `vsep` otherwise.
pub fn sep<A: Clone + 'static>(docs: impl IntoIterator<Item = Doc<A>>) -> Doc<A> {
    group(vsep(docs))
}

pub fn hcat<A: 'static>(docs: impl IntoIterator<Item = Doc<A>>) -> Doc<A> {
    concat_with(docs, |x, y| x.cat(y))
}

pub fn vcat<A: 'static>(docs: impl IntoIterator<Item = Doc<A>>) -> Doc<A> {
    concat_with(docs, |x, y| x.cat(line_prime()).cat(y))
}

pub fn fill_cat<A: Clone + 'static>(docs: impl IntoIterator<Item = Doc<A>>) -> Doc<A> {
    concat_with(docs, |x, y| x.cat(soft_line_break()).cat(y))
}

/// `hcat` if the whole group fits, `vcat` otherwise.
pub fn cat<A: Clone + 'static>(docs: impl IntoIterator<Item = Doc<A>>) -> Doc<A> {
    group(vcat(docs))
}

/// Insert `p` after every document except the last.
pub fn punctuate<A: 'static>(p: Doc<A>, docs: impl IntoIterator<Item = Doc<A>>) -> Vec<Doc<A>>
where
    Doc<A>: Clone,
{
    let docs: Vec<_> = docs.into_iter().collect();
    let len = docs.len();
    docs.into_iter()
        .enumerate()
        .map(|(idx, d)| {
            if idx + 1 == len {
                d
            } else {
                d.cat(p.clone())
            }
        })
        .collect()
}

/// `l <> d <> r`.
pub fn enclose<A: 'static>(l: Doc<A>, r: Doc<A>, d: Doc<A>) -> Doc<A> {
    l.cat(d).cat(r)
}

/// `encloseSep`: brackets a comma-(or other `sep`-)separated sequence,
/// aligning continuation lines under the sequence when it does not fit on
/// one line. The workhorse behind [`list`] and [`tupled`].
pub fn enclose_sep<A: Clone + 'static>(
    l: Doc<A>,
    r: Doc<A>,
    sep: Doc<A>,
    docs: impl IntoIterator<Item = Doc<A>>,
) -> Doc<A> {
    let docs: Vec<_> = docs.into_iter().collect();
    match docs.len() {
        0 => l.cat(r),
        1 => {
            let mut it = docs.into_iter();
            l.cat(it.next().unwrap()).cat(r)
        }
        _ => {
            let mut it = docs.into_iter();
            let first = l.cat(it.next().unwrap());
            let rest = it.map(|d| sep.clone().cat(d));
            let mut pieces = vec![first];
            pieces.extend(rest);
            cat(pieces).cat(r)
        }
    }
}

/// `[1, 20, 300, 4000]` when flat, or one element per line with leading
/// separators when broken (§8 scenario 4).
pub fn list<A: Clone + 'static>(docs: impl IntoIterator<Item = Doc<A>>) -> Doc<A> {
    enclose_sep(
        Doc::text("[ ").flat_alt(Doc::char('[')),
        Doc::text(" ]").flat_alt(Doc::char(']')),
        Doc::text(", "),
        docs,
    )
}

/// As [`list`], but with parentheses.
pub fn tupled<A: Clone + 'static>(docs: impl IntoIterator<Item = Doc<A>>) -> Doc<A> {
    enclose_sep(
        Doc::text("( ").flat_alt(Doc::char('(')),
        Doc::text(" )").flat_alt(Doc::char(')')),
        Doc::text(", "),
        docs,
    )
}

/// Lay out `d`, then call `f` with the number of columns `d` occupied on
/// its last line, splicing the result immediately after.
pub fn width<A, F>(d: Doc<A>, f: F) -> Doc<A>
where
    A: Clone + 'static,
    F: Fn(i64) -> Doc<A> + 'static,
{
    Doc::column(move |col_start| {
        let d = d.clone();
        let f = clone_closure(&f);
        d.cat(Doc::column(move |col_end| f(col_end as i64 - col_start as i64)))
    })
}

fn clone_closure<A, F>(f: &F) -> impl Fn(i64) -> Doc<A> + 'static
where
    A: 'static,
    F: Fn(i64) -> Doc<A> + 'static + Clone,
{
    f.clone()
}

/// Pad `d` with spaces out to column `n` (relative to where `d` started);
/// if `d` is already `n` columns wide or more, nothing is added.
pub fn fill<A: Clone + 'static>(d: Doc<A>, n: i64) -> Doc<A> {
    width(d, move |w| if w >= n { Doc::empty() } else { spaces(n - w) })
}

/// As [`fill`], but if `d` overruns `n` columns, break and indent to `n`
/// instead of padding on the same line.
pub fn fill_break<A: Clone + 'static>(d: Doc<A>, n: i64) -> Doc<A> {
    width(d, move |w| {
        if w > n {
            line_prime::<A>().nest(n)
        } else {
            spaces(n - w)
        }
    })
}

/// Split `s` on whitespace into a sequence of smart [`text`] documents.
pub fn words<A: 'static>(s: &str) -> Vec<Doc<A>> {
    s.split_whitespace().map(text).collect()
}

/// Word-wrap `s`, breaking only where a line would otherwise overflow.
pub fn reflow<A: Clone + 'static>(s: &str) -> Doc<A> {
    fill_sep(words(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{layout_pretty, LayoutOptions};
    use crate::render::render_s;

    fn render(d: Doc<()>, width: usize) -> String {
        render_s(&layout_pretty(
            &d,
            LayoutOptions::new(PageWidth::available_per_line(width, 1.0)),
        ))
    }

    #[test]
    fn text_dispatches_by_length() {
        assert!(matches!(text::<()>("").inner(), DocInner::Empty));
        assert!(matches!(text::<()>("x").inner(), DocInner::Char('x')));
        assert!(matches!(text::<()>("xy").inner(), DocInner::Text(_)));
    }

    #[test]
    fn text_splits_on_embedded_newlines() {
        let d: Doc<()> = text("a\nb");
        assert_eq!(render(d, 80), "a\nb");
    }

    #[test]
    fn punctuate_skips_last() {
        let docs: Vec<Doc<()>> = vec![text("a"), text("b"), text("c")];
        let out = punctuate(text(","), docs);
        let rendered: Vec<String> = out.into_iter().map(|d| render(d, 80)).collect();
        assert_eq!(rendered, vec!["a,", "b,", "c"]);
    }

    #[test]
    fn enclose_wraps() {
        let d: Doc<()> = enclose(Doc::char('('), Doc::char(')'), text("x"));
        assert_eq!(render(d, 80), "(x)");
    }

    #[test]
    fn reflow_wraps_at_width() {
        let d: Doc<()> = reflow("the quick brown fox jumps");
        assert_eq!(render(d, 80), "the quick brown fox jumps");
        assert_eq!(render(d, 10), "the quick\nbrown fox\njumps");
    }

    #[test]
    fn fill_pads_to_width() {
        let d: Doc<()> = fill(text("ab"), 5).cat(text("|"));
        assert_eq!(render(d, 80), "ab   |");
    }

    #[test]
    fn tupled_matches_list_shape_with_parens() {
        let docs: Vec<Doc<()>> = vec![text("1"), text("2")];
        assert_eq!(render(tupled(docs.clone()), 80), "(1, 2)");
        assert_eq!(render(tupled(docs), 5), "( 1\n, 2 )");
    }
}
