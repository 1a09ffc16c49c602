// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

//! Demonstration/integration tests, kept separate from the `#[cfg(test)]`
//! unit tests inline in each module, mirroring the teacher's own
//! `src/tests/` layout.

mod xml;
