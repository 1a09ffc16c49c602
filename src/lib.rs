// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

//! A Wadler/Leijen-style pretty printer: a document algebra for
//! describing a *set* of possible line layouts with alternatives, a lazy
//! layout engine that picks among them by bounded lookahead, and a plain
//! string renderer for the chosen output.
//!
//! The moving parts, leaves first:
//!
//! - [`page_width`] — the horizontal budget a layout must respect.
//! - [`doc`] — the document algebra ([`doc::Doc`]), parametric in an
//!   annotation type.
//! - [`pipeline`] — the layout engine's explicit work list.
//! - [`flatten`] — the analysis [`combinators::group`] uses to decide
//!   whether a single-line alternative is ever worth building.
//! - [`stream`] — the linearised output ([`stream::SimpleDocStream`]).
//! - [`layout`] — the `best` recursion and its four entry points
//!   ([`layout::layout_unbounded`], [`layout::layout_pretty`],
//!   [`layout::layout_smart`], [`layout::layout_compact`]).
//! - [`render`] — folds a stream into a `String`.
//! - [`combinators`] — the derived surface (`group`, `nest`, `align`,
//!   `hang`, `list`, `fill_sep`, `reflow`, …) built entirely atop the
//!   constructors in [`doc`].
//! - [`error`] — the one contract-violation error this crate can raise.
//!
//! Most callers only need the re-exports at the crate root plus
//! [`combinators`]:
//!
//! ```rust
//! use doclayout::{combinators::*, layout::{layout_pretty, LayoutOptions}, page_width::PageWidth, render::render_s};
//!
//! let doc: doclayout::Doc = group(vsep(vec![text("lorem"), text("ipsum")]));
//! let opts = LayoutOptions::new(PageWidth::available_per_line(80, 1.0));
//! assert_eq!(render_s(&layout_pretty(&doc, opts)), "lorem ipsum");
//! ```

pub mod combinators;
pub mod doc;
pub mod error;
pub mod flatten;
pub mod layout;
pub mod page_width;
pub mod pipeline;
pub mod render;
pub mod stream;

#[cfg(test)]
mod tests;

pub use doc::Doc;
pub use error::LayoutError;
pub use flatten::FlattenResult;
pub use layout::{layout_compact, layout_pretty, layout_smart, layout_unbounded, LayoutOptions};
pub use page_width::PageWidth;
pub use render::{render_s, try_render_s};
pub use stream::SimpleDocStream;

/// A convenience trait for types with a canonical [`Doc`] rendering,
/// generalizing the teacher's own `ToDoc` to the annotation-parametric
/// document type.
///
/// Implement [`ToDoc::to_doc`] and get a default, page-width-driven
/// [`ToDoc::render`] for free.
pub trait ToDoc<A = ()> {
    fn to_doc(&self) -> Doc<A>;

    /// Render via [`layout_pretty`] under a plain `line_width`-column,
    /// full-ribbon page width.
    fn render(&self, line_width: usize) -> String
    where
        A: Clone + 'static,
    {
        let opts = LayoutOptions::new(PageWidth::available_per_line(line_width, 1.0));
        render_s(&layout_pretty(&self.to_doc(), opts))
    }
}

/// Convert an iterator of [`ToDoc`] values into a single [`Doc`],
/// interspersing `separator` between adjacent renderings. Returns
/// [`Doc::empty`] for an empty iterator.
///
/// # Example
/// ```rust
/// use doclayout::{combinators, to_list, Doc, ToDoc};
///
/// struct Item(&'static str);
///
/// impl ToDoc for Item {
///     fn to_doc(&self) -> Doc { combinators::text(self.0) }
/// }
///
/// let xs = [Item("a"), Item("b"), Item("c")];
/// let doc = to_list(xs.iter(), Doc::char(','));
/// assert_eq!(doc.render(80), "a,b,c");
/// ```
pub fn to_list<'a, A, T>(docs: impl IntoIterator<Item = &'a T>, separator: Doc<A>) -> Doc<A>
where
    T: ToDoc<A> + 'a,
    A: Clone + 'static,
{
    combinators::concat_with(docs.into_iter().map(|d| d.to_doc()), move |acc, next| {
        acc.cat(separator.clone()).cat(next)
    })
}
