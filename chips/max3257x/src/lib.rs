// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Peripheral implementations for the Analog Devices MAX32570 and MAX32572
//! microcontrollers.

#![no_std]
// `usbhs::registers` spans the whole 0x4A8-byte block in one
// `register_structs!` and requires a deeper recursion limit than the default
// to fully expand.
#![recursion_limit = "256"]

mod config;
pub mod error;
mod static_ref;
pub mod usbhs;

pub use static_ref::StaticRef;

// This is used to render trace output in host tests
#[cfg(test)]
#[macro_use]
extern crate std;
