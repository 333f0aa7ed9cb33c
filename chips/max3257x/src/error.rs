// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Errors returned by the register accessors.
//!
//! Every variant is a contract violation by the caller: the request was
//! rejected before touching the bus, so nothing needs to be undone and
//! nothing is worth retrying.

use core::fmt;

use crate::usbhs::map::Register;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessError {
    /// No register has the given name.
    UnknownRegister,
    /// The register has no field with the given name.
    UnknownField(Register),
    /// Endpoint index outside 0-15.
    EndpointOutOfRange(usize),
    /// An endpoint-banked register was accessed before INDEX was set.
    EndpointNotSelected(Register),
    /// The register does not exist for the selected endpoint: CSR0 and
    /// COUNT0 outside endpoint 0, or an endpoint 1-15 register while
    /// endpoint 0 is selected.
    WrongEndpoint { register: Register, endpoint: u8 },
    /// The value does not fit in the field.
    ValueOutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },
    ReadOnly(Register),
    WriteOnly(Register),
    ReadOnlyField(&'static str),
    WriteOnlyField(&'static str),
    /// Reading would discard latched flags; use `take_register`.
    ClearOnRead(Register),
    /// Accesses move the FIFO pointer; use `read_fifo` / `write_fifo`.
    FifoPort(Register),
    /// `take_register` on a register that latches nothing.
    NotLatched(Register),
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            AccessError::UnknownRegister => write!(f, "unknown register"),
            AccessError::UnknownField(register) => write!(f, "{} has no such field", register),
            AccessError::EndpointOutOfRange(endpoint) => {
                write!(f, "endpoint {} out of range", endpoint)
            }
            AccessError::EndpointNotSelected(register) => {
                write!(f, "{} accessed before selecting an endpoint", register)
            }
            AccessError::WrongEndpoint { register, endpoint } => {
                write!(f, "{} does not exist for endpoint {}", register, endpoint)
            }
            AccessError::ValueOutOfRange { field, value, max } => {
                write!(f, "{:#x} does not fit {} (max {:#x})", value, field, max)
            }
            AccessError::ReadOnly(register) => write!(f, "{} is read-only", register),
            AccessError::WriteOnly(register) => write!(f, "{} is write-only", register),
            AccessError::ReadOnlyField(field) => write!(f, "field {} is read-only", field),
            AccessError::WriteOnlyField(field) => write!(f, "field {} is write-only", field),
            AccessError::ClearOnRead(register) => write!(f, "{} clears on read", register),
            AccessError::FifoPort(register) => write!(f, "{} is a FIFO port", register),
            AccessError::NotLatched(register) => {
                write!(f, "{} holds no latched flags", register)
            }
        }
    }
}
