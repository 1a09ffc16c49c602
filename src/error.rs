// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

//! Contract-violation errors (§7). The core algebra has no *recoverable*
//! errors — a well-formed document never produces one — so this type
//! exists purely to give the one unrecoverable condition spec'd in §7 a
//! typed, greppable shape instead of an ad-hoc panic message.

/// A layout reached a state the core considers a caller bug rather than
/// a runtime failure: every alternative of the input document failed.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// A [`crate::stream::SimpleDocStream`] reached the renderer still
    /// containing `SFail` (§7, condition 1). Typically caused by a
    /// [`crate::doc::Doc::line`] with no escape via
    /// [`crate::doc::Doc::flat_alt`] surviving into a flattened context.
    #[error("layout produced SFail: every alternative of the input document failed to lay out")]
    Failed,
}
