// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Compile-time configuration of the chip crate.
//!
//! Options are plain `const` values rather than `#[cfg]` blocks so that every
//! code path stays type-checked; disabled branches fold away.

pub(crate) struct Config {
    /// Emit a `trace` log record for every register and FIFO access.
    pub(crate) trace_register_access: bool,

    /// Reject accesses to endpoint-banked registers until an endpoint has
    /// been selected through the accessor.
    ///
    /// Boards that hand an already configured controller to a fresh accessor
    /// can turn this off with the `relaxed_endpoint_selection` feature.
    pub(crate) strict_endpoint_selection: bool,
}

/// The only place in this crate where Cargo features are inspected.
pub(crate) const CONFIG: Config = Config {
    trace_register_access: cfg!(feature = "trace_register_access"),
    strict_endpoint_selection: !cfg!(feature = "relaxed_endpoint_selection"),
};
