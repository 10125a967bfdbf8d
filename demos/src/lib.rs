// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runnable demonstration scenarios for the Canopy crates.
//!
//! See the `examples/` directory; run one with
//! `cargo run -p canopy_demos --example hover_session`.
