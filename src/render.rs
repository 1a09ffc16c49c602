// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

//! The string renderer: a simple fold over a [`SimpleDocStream`] (§4.5).
//! Everything upstream of this module has already decided *which*
//! alternatives to take — rendering just walks the chosen stream once,
//! left to right.

use crate::error::LayoutError;
use crate::stream::{SdsNode, SimpleDocStream};

/// Render a stream to a `String`. Annotation markers (`SAnnPush`/
/// `SAnnPop`) are skipped — this renderer has no notion of annotations,
/// matching spec §4.5 ("ignored by the string renderer").
///
/// # Panics
/// If the stream contains `SFail`: per §7, a `SimpleDocStream` reaching
/// the renderer with `SFail` still present is a contract violation (the
/// caller built a document whose every alternative fails), not a
/// recoverable error. Use [`try_render_s`] to get a `Result` instead.
pub fn render_s<A>(stream: &SimpleDocStream<A>) -> String {
    match try_render_s(stream) {
        Ok(s) => s,
        Err(err) => {
            tracing::error!(%err, "render_s: stream contains SFail");
            panic!("{err}");
        }
    }
}

/// As [`render_s`], but returns [`LayoutError::Failed`] instead of
/// panicking when the stream contains `SFail`.
pub fn try_render_s<A>(stream: &SimpleDocStream<A>) -> Result<String, LayoutError> {
    let mut out = String::new();
    let mut current = stream.clone();
    loop {
        match current.node() {
            SdsNode::Fail => return Err(LayoutError::Failed),
            SdsNode::Empty => return Ok(out),
            SdsNode::Char(c, tail) => {
                out.push(*c);
                current = tail.force();
            }
            SdsNode::Text(s, tail) => {
                out.push_str(s);
                current = tail.force();
            }
            SdsNode::Line(indent, tail) => {
                out.push('\n');
                out.extend(std::iter::repeat(' ').take(*indent));
                current = tail.force();
            }
            SdsNode::AnnPush(_, tail) | SdsNode::AnnPop(tail) => {
                current = tail.force();
            }
        }
    }
}
