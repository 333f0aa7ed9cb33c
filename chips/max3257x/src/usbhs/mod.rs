// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! USB high-speed device controller (USBHS).
//!
//! [`Usbhs`] is a checked accessor over the controller's register block. It
//! moves whole registers, bitfields, and FIFO data, and rejects requests that
//! break the register contract (wrong access mode, value wider than its field,
//! endpoint out of range, endpoint registers used before INDEX was set or
//! while INDEX addresses an endpoint they do not exist for) before anything
//! reaches the bus.
//!
//! Accesses with hardware side effects have their own operations: latched
//! interrupt registers are drained with [`Usbhs::take_register`] and FIFO
//! ports are used through [`Usbhs::read_fifo`] / [`Usbhs::write_fifo`]. The
//! plain read and write operations refuse them.
//!
//! The accessor keeps no copy of any register. Its only state is the endpoint
//! it last wrote to INDEX, which makes it `!Sync`: callers sharing one
//! controller between contexts must serialize access themselves, otherwise
//! concurrent read-modify-writes lose updates. No operation allocates or
//! blocks, so all of them may be used from interrupt handlers.
//!
//! ```rust,ignore
//! let usb = Usbhs::new(USBHS_BASE);
//! usb.write_named_field("POWER", "SOFTCONN", 1)?;
//! usb.select_endpoint(1)?;
//! usb.write_register(Register::InMaxp, 512)?;
//! usb.write_fifo(1, &packet)?;
//! ```

pub mod bus;
pub mod debug;
pub mod emulated;
pub mod map;
pub mod registers;

use core::cell::Cell;

use log::{trace, warn};
use tock_registers::LocalRegisterCopy;

use crate::config::CONFIG;
use crate::error::AccessError;
use crate::static_ref::StaticRef;

use self::bus::RegisterBus;
use self::debug::{EndpointFlags, HexBuf, IntrUsbFlags, MxmIntFlags};
use self::map::{Access, Bank, Field, Register, SideEffect, NUM_ENDPOINTS};
use self::registers::{UsbhsRegisters, EPINFO, HWVERS, INDEX, USBHS_BASE};

/// Decoded HWVERS.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HardwareVersion {
    pub major: u8,
    pub minor: u16,
    pub release_candidate: bool,
}

fn violation(error: AccessError) -> AccessError {
    warn!("usbhs: {}", error);
    error
}

/// Whether `register` may be used with `selected` in INDEX. When `strict` is
/// off every access is let through.
fn endpoint_rule(
    strict: bool,
    register: Register,
    selected: Option<u8>,
) -> Result<(), AccessError> {
    if !strict {
        return Ok(());
    }
    match (register.bank(), selected) {
        (Bank::Unbanked, _) => Ok(()),
        (_, None) => Err(AccessError::EndpointNotSelected(register)),
        (Bank::Control, Some(0)) | (Bank::Data, Some(1..)) => Ok(()),
        (_, Some(endpoint)) => Err(AccessError::WrongEndpoint { register, endpoint }),
    }
}

pub struct Usbhs<B: RegisterBus> {
    bus: B,
    selected: Cell<Option<u8>>,
}

impl Usbhs<StaticRef<UsbhsRegisters>> {
    /// Accessor for the on-chip controller.
    pub const fn on_chip() -> Self {
        Usbhs::new(USBHS_BASE)
    }
}

impl<B: RegisterBus> Usbhs<B> {
    pub const fn new(bus: B) -> Self {
        Usbhs {
            bus,
            selected: Cell::new(None),
        }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Endpoint last written to INDEX through this accessor.
    pub fn selected_endpoint(&self) -> Option<u8> {
        self.selected.get()
    }

    fn load(&self, register: Register) -> u32 {
        let value = self.bus.read_word(register.offset());
        if CONFIG.trace_register_access {
            trace!("usbhs: {} -> {:#010x}", register, value);
        }
        value
    }

    fn store(&self, register: Register, value: u32) {
        if CONFIG.trace_register_access {
            trace!("usbhs: {} <- {:#010x}", register, value);
        }
        self.bus.write_word(register.offset(), value);
    }

    fn check_endpoint(&self, register: Register) -> Result<(), AccessError> {
        endpoint_rule(CONFIG.strict_endpoint_selection, register, self.selected.get())
            .map_err(violation)
    }

    fn check_plain_access(&self, register: Register) -> Result<(), AccessError> {
        match register.side_effect() {
            SideEffect::None => Ok(()),
            SideEffect::ClearOnRead => Err(violation(AccessError::ClearOnRead(register))),
            SideEffect::FifoPort => Err(violation(AccessError::FifoPort(register))),
        }
    }

    /// Load a register.
    ///
    /// Latched interrupt registers and FIFO ports are refused since reading
    /// them changes hardware state.
    pub fn read_register(&self, register: Register) -> Result<u32, AccessError> {
        self.check_plain_access(register)?;
        if !register.access().is_readable() {
            return Err(violation(AccessError::WriteOnly(register)));
        }
        self.check_endpoint(register)?;
        Ok(self.load(register))
    }

    /// Store a full register.
    ///
    /// Writing INDEX selects the endpoint, exactly as `select_endpoint` does.
    pub fn write_register(&self, register: Register, value: u32) -> Result<(), AccessError> {
        if register.side_effect() == SideEffect::FifoPort {
            return Err(violation(AccessError::FifoPort(register)));
        }
        if !register.access().is_writable() {
            return Err(violation(AccessError::ReadOnly(register)));
        }
        self.check_endpoint(register)?;
        if register == Register::Index {
            if value as usize >= NUM_ENDPOINTS {
                return Err(violation(AccessError::EndpointOutOfRange(value as usize)));
            }
            self.store(register, value);
            self.selected.set(Some(value as u8));
            return Ok(());
        }
        self.store(register, value);
        Ok(())
    }

    /// Read one field, right-justified.
    pub fn read_field(&self, field: &Field) -> Result<u32, AccessError> {
        let register = field.register;
        self.check_plain_access(register)?;
        if !field.access.is_readable() {
            return Err(violation(AccessError::WriteOnlyField(field.name)));
        }
        self.check_endpoint(register)?;
        Ok(field.extract(self.load(register)))
    }

    /// Replace one field and leave every other bit of the register as it was.
    ///
    /// This is a load followed by a single store. Write-one-to-clear fields
    /// are stored without the load, and the write-one-to-clear bits of other
    /// fields are stored as zero so their pending flags survive.
    pub fn write_field(&self, field: &Field, value: u32) -> Result<(), AccessError> {
        let register = field.register;
        if !field.access.is_writable() {
            return Err(violation(AccessError::ReadOnlyField(field.name)));
        }
        if value > field.mask {
            return Err(violation(AccessError::ValueOutOfRange {
                field: field.name,
                value,
                max: field.mask,
            }));
        }
        self.check_plain_access(register)?;
        self.check_endpoint(register)?;

        let bits = value << field.shift;
        let word = if field.access == Access::WriteOneToClear {
            bits
        } else {
            let current = self.load(register);
            current & !field.shifted_mask() & !register.write_one_to_clear_mask() | bits
        };
        self.store(register, word);
        if register == Register::Index {
            self.selected.set(Some(value as u8));
        }
        Ok(())
    }

    /// Point INDEX at `endpoint`.
    ///
    /// Endpoint-banked registers (INMAXP, CSR0/INCSRL, INCSRU, OUTMAXP,
    /// OUTCSRL, OUTCSRU, COUNT0/OUTCOUNT) address whichever endpoint INDEX
    /// holds, so this must precede any access to them.
    pub fn select_endpoint(&self, endpoint: usize) -> Result<(), AccessError> {
        if endpoint >= NUM_ENDPOINTS {
            return Err(violation(AccessError::EndpointOutOfRange(endpoint)));
        }
        let mut index = LocalRegisterCopy::<u32, INDEX::Register>::new(self.load(Register::Index));
        index.modify(INDEX::INDEX.val(endpoint as u32));
        self.store(Register::Index, index.get());
        self.selected.set(Some(endpoint as u8));
        Ok(())
    }

    /// Drain a latched status register.
    ///
    /// Clear-on-read registers are loaded once. Write-one-to-clear registers
    /// are loaded and the observed bits written back, so flags raised in
    /// between stay pending. Returns the flags observed.
    pub fn take_register(&self, register: Register) -> Result<u32, AccessError> {
        let flags = match (register.side_effect(), register.access()) {
            (SideEffect::ClearOnRead, _) => self.load(register),
            (_, Access::WriteOneToClear) => {
                let flags = self.load(register);
                if flags != 0 {
                    self.store(register, flags);
                }
                flags
            }
            _ => return Err(violation(AccessError::NotLatched(register))),
        };
        if CONFIG.trace_register_access {
            match register {
                Register::IntrUsb => trace!("usbhs: {} {:?}", register, IntrUsbFlags(flags)),
                Register::MxmInt => trace!("usbhs: {} {:?}", register, MxmIntFlags(flags)),
                _ => trace!("usbhs: {} {:?}", register, EndpointFlags(flags)),
            }
        }
        Ok(flags)
    }

    /// Pop `buf.len()` bytes from an endpoint FIFO.
    ///
    /// Whole words are moved with 32-bit loads and the tail byte by byte.
    /// Every load consumes data, so a failed transfer must not be retried
    /// blindly.
    pub fn read_fifo(&self, endpoint: usize, buf: &mut [u8]) -> Result<(), AccessError> {
        let offset = Register::fifo(endpoint).map_err(violation)?.offset();
        let mut words = buf.chunks_exact_mut(4);
        for chunk in &mut words {
            chunk.copy_from_slice(&self.bus.read_word(offset).to_le_bytes());
        }
        for byte in words.into_remainder() {
            *byte = self.bus.read_byte(offset);
        }
        if CONFIG.trace_register_access {
            trace!("usbhs: FIFO{} -> {:?}", endpoint, HexBuf(buf));
        }
        Ok(())
    }

    /// Push `data` into an endpoint FIFO.
    pub fn write_fifo(&self, endpoint: usize, data: &[u8]) -> Result<(), AccessError> {
        let offset = Register::fifo(endpoint).map_err(violation)?.offset();
        if CONFIG.trace_register_access {
            trace!("usbhs: FIFO{} <- {:?}", endpoint, HexBuf(data));
        }
        let words = data.chunks_exact(4);
        let tail = words.remainder();
        for chunk in words {
            self.bus
                .write_word(offset, u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
        }
        for byte in tail {
            self.bus.write_byte(offset, *byte);
        }
        Ok(())
    }

    pub fn read_named(&self, register: &str) -> Result<u32, AccessError> {
        self.read_register(Register::from_name(register).map_err(violation)?)
    }

    pub fn write_named(&self, register: &str, value: u32) -> Result<(), AccessError> {
        self.write_register(Register::from_name(register).map_err(violation)?, value)
    }

    pub fn read_named_field(&self, register: &str, field: &str) -> Result<u32, AccessError> {
        let register = Register::from_name(register).map_err(violation)?;
        self.read_field(register.field(field).map_err(violation)?)
    }

    pub fn write_named_field(
        &self,
        register: &str,
        field: &str,
        value: u32,
    ) -> Result<(), AccessError> {
        let register = Register::from_name(register).map_err(violation)?;
        self.write_field(register.field(field).map_err(violation)?, value)
    }

    pub fn hardware_version(&self) -> Result<HardwareVersion, AccessError> {
        let hwvers =
            LocalRegisterCopy::<u32, HWVERS::Register>::new(self.read_register(Register::HwVers)?);
        Ok(HardwareVersion {
            major: hwvers.read(HWVERS::MAJOR) as u8,
            minor: hwvers.read(HWVERS::MINOR) as u16,
            release_candidate: hwvers.is_set(HWVERS::RC),
        })
    }

    /// Endpoints implemented by this instance, endpoint 0 included.
    pub fn endpoint_count(&self) -> Result<usize, AccessError> {
        let epinfo =
            LocalRegisterCopy::<u32, EPINFO::Register>::new(self.read_register(Register::EpInfo)?);
        let endpoints = epinfo.read(EPINFO::INTXEP).max(epinfo.read(EPINFO::OUTRXEP));
        Ok(endpoints as usize + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::emulated::{EmulatedUsbhs, EPINFO_RESET, HWVERS_RESET};
    use super::*;

    fn field(register: Register, name: &str) -> &'static Field {
        register.field(name).unwrap()
    }

    #[test]
    fn power_suspend_scenario() {
        let hw = EmulatedUsbhs::new();
        let usb = Usbhs::new(&hw);

        usb.write_named("POWER", 0x0000_0001).unwrap();
        assert_eq!(usb.read_named_field("POWER", "SUSPEND_MODE_BIT"), Ok(1));
        assert_eq!(usb.read_named_field("POWER", "EN_SUSPENDM"), Ok(1));

        usb.write_named_field("POWER", "SUSPEND", 1).unwrap();
        assert_eq!(usb.read_named_field("POWER", "SUSPEND_MODE_BIT"), Ok(1));
        assert_eq!(usb.read_register(Register::Power), Ok(0b11));
    }

    #[test]
    fn plain_registers_hold_their_value() {
        let hw = EmulatedUsbhs::new();
        let usb = Usbhs::new(&hw);
        usb.select_endpoint(1).unwrap();

        for (i, register) in Register::ALL.iter().copied().enumerate() {
            if register.access() != Access::ReadWrite
                || register.side_effect() != SideEffect::None
                || register == Register::Index
                || register == Register::Csr0
                || register == Register::InCsrL
                || register == Register::OutCsrL
            {
                continue;
            }
            let value = 0x5A5A_0000 | i as u32;
            usb.write_register(register, value).unwrap();
            assert_eq!(usb.read_register(register), Ok(value), "{}", register);
        }
    }

    #[test]
    fn fields_round_trip_without_disturbing_neighbours() {
        let hw = EmulatedUsbhs::new();
        let usb = Usbhs::new(&hw);
        usb.select_endpoint(1).unwrap();

        for register in Register::ALL.iter().copied() {
            if register.access() != Access::ReadWrite
                || register.side_effect() != SideEffect::None
                || register == Register::Index
                || register == Register::Csr0
            {
                continue;
            }
            for field in register.fields() {
                if field.access != Access::ReadWrite {
                    continue;
                }
                let background = 0xA5A5_A5A5 & !register.write_one_to_clear_mask();
                hw.write_word(register.offset(), background);
                let before = hw.peek(register);

                for value in [field.mask, 0, field.mask >> 1] {
                    usb.write_field(field, value).unwrap();
                    assert_eq!(usb.read_field(field), Ok(value), "{}.{}", register, field.name);
                    assert_eq!(
                        hw.peek(register) & !field.shifted_mask(),
                        before & !field.shifted_mask(),
                        "{}.{}",
                        register,
                        field.name
                    );
                }
            }
        }
    }

    #[test]
    fn oversized_field_value_is_rejected_without_a_store() {
        let hw = EmulatedUsbhs::new();
        let usb = Usbhs::new(&hw);
        let addr = field(Register::Faddr, "ADDR");
        usb.write_field(addr, 0x7F).unwrap();
        let stores = hw.store_count();

        assert_eq!(
            usb.write_field(addr, 0x80),
            Err(AccessError::ValueOutOfRange {
                field: "ADDR",
                value: 0x80,
                max: 0x7F
            })
        );
        assert_eq!(hw.store_count(), stores);
        assert_eq!(usb.read_field(addr), Ok(0x7F));
    }

    #[test]
    fn endpoints_have_independent_shadow_registers() {
        let hw = EmulatedUsbhs::new();
        let usb = Usbhs::new(&hw);

        usb.select_endpoint(1).unwrap();
        usb.write_register(Register::InMaxp, 64).unwrap();
        usb.select_endpoint(2).unwrap();
        usb.write_register(Register::InMaxp, 512).unwrap();

        usb.select_endpoint(1).unwrap();
        assert_eq!(usb.read_register(Register::InMaxp), Ok(64));
        usb.select_endpoint(2).unwrap();
        assert_eq!(usb.read_register(Register::InMaxp), Ok(512));
        assert_eq!(hw.index(), 2);
        assert_eq!(usb.selected_endpoint(), Some(2));
    }

    #[test]
    #[cfg(not(feature = "relaxed_endpoint_selection"))]
    fn endpoint_range_and_selection_are_enforced() {
        let hw = EmulatedUsbhs::new();
        let usb = Usbhs::new(&hw);

        assert_eq!(
            usb.read_register(Register::OutCount),
            Err(AccessError::EndpointNotSelected(Register::OutCount))
        );
        assert_eq!(usb.select_endpoint(16), Err(AccessError::EndpointOutOfRange(16)));
        assert_eq!(
            usb.write_register(Register::Index, 20),
            Err(AccessError::EndpointOutOfRange(20))
        );
        assert_eq!(usb.read_fifo(16, &mut [0; 4]), Err(AccessError::EndpointOutOfRange(16)));
        assert_eq!(hw.store_count(), 0);

        usb.write_register(Register::Index, 7).unwrap();
        assert_eq!(usb.selected_endpoint(), Some(7));
        assert_eq!(usb.read_register(Register::OutCount), Ok(0));
    }

    #[test]
    #[cfg(not(feature = "relaxed_endpoint_selection"))]
    fn shared_cells_follow_the_selected_endpoint() {
        let hw = EmulatedUsbhs::new();
        let usb = Usbhs::new(&hw);

        usb.select_endpoint(3).unwrap();
        let stores = hw.store_count();
        assert_eq!(
            usb.write_named_field("CSR0", "SENDSTALL", 1),
            Err(AccessError::WrongEndpoint {
                register: Register::Csr0,
                endpoint: 3
            })
        );
        assert_eq!(
            usb.read_named_field("COUNT0", "COUNT0"),
            Err(AccessError::WrongEndpoint {
                register: Register::Count0,
                endpoint: 3
            })
        );
        assert_eq!(hw.store_count(), stores);
        assert_eq!(hw.peek_endpoint(3, Register::InCsrL), 0);

        usb.write_named_field("INCSRL", "SENDSTALL", 1).unwrap();
        assert_eq!(hw.peek_endpoint(3, Register::InCsrL), 1 << 4);

        usb.select_endpoint(0).unwrap();
        for register in [Register::InCsrL, Register::OutCount, Register::OutCsrU] {
            assert_eq!(
                usb.read_register(register),
                Err(AccessError::WrongEndpoint {
                    register,
                    endpoint: 0
                })
            );
        }
        assert_eq!(
            usb.write_register(Register::InMaxp, 64),
            Err(AccessError::WrongEndpoint {
                register: Register::InMaxp,
                endpoint: 0
            })
        );

        usb.write_named_field("CSR0", "SENDSTALL", 1).unwrap();
        assert_eq!(hw.peek_endpoint(0, Register::Csr0), 1 << 5);
        assert_eq!(hw.peek_endpoint(3, Register::InCsrL), 1 << 4);
        assert_eq!(usb.read_register(Register::Count0), Ok(0));
    }

    #[test]
    fn endpoint_rule_by_bank() {
        fn wrong(register: Register, endpoint: u8) -> Result<(), AccessError> {
            Err(AccessError::WrongEndpoint { register, endpoint })
        }

        assert_eq!(endpoint_rule(true, Register::Power, None), Ok(()));
        assert_eq!(
            endpoint_rule(true, Register::Csr0, None),
            Err(AccessError::EndpointNotSelected(Register::Csr0))
        );
        assert_eq!(endpoint_rule(true, Register::Csr0, Some(0)), Ok(()));
        assert_eq!(endpoint_rule(true, Register::Csr0, Some(15)), wrong(Register::Csr0, 15));
        assert_eq!(endpoint_rule(true, Register::Count0, Some(1)), wrong(Register::Count0, 1));
        assert_eq!(endpoint_rule(true, Register::OutCsrU, Some(0)), wrong(Register::OutCsrU, 0));
        assert_eq!(endpoint_rule(true, Register::OutCsrU, Some(15)), Ok(()));

        for register in Register::ALL.iter().copied() {
            for selected in [None, Some(0), Some(7)] {
                assert_eq!(endpoint_rule(false, register, selected), Ok(()), "{}", register);
            }
        }
    }

    #[test]
    fn access_modes_are_enforced() {
        let hw = EmulatedUsbhs::new();
        let usb = Usbhs::new(&hw);
        usb.select_endpoint(0).unwrap();

        assert_eq!(
            usb.write_register(Register::Frame, 1),
            Err(AccessError::ReadOnly(Register::Frame))
        );
        assert_eq!(
            usb.write_named_field("POWER", "HS_MODE", 1),
            Err(AccessError::ReadOnlyField("HS_MODE"))
        );
        assert_eq!(
            usb.read_field(field(Register::Csr0, "SERV_OUTPKTRDY")),
            Err(AccessError::WriteOnlyField("SERV_OUTPKTRDY"))
        );
        assert_eq!(
            usb.read_register(Register::IntrUsb),
            Err(AccessError::ClearOnRead(Register::IntrUsb))
        );
        assert_eq!(
            usb.write_register(Register::Fifo2, 0),
            Err(AccessError::FifoPort(Register::Fifo2))
        );
        assert_eq!(
            usb.take_register(Register::Power),
            Err(AccessError::NotLatched(Register::Power))
        );
        assert_eq!(usb.read_named("NOPE"), Err(AccessError::UnknownRegister));
        assert_eq!(
            usb.read_named_field("FRAME", "NOPE"),
            Err(AccessError::UnknownField(Register::Frame))
        );
    }

    #[test]
    fn latched_flags_are_taken_once() {
        let hw = EmulatedUsbhs::new();
        let usb = Usbhs::new(&hw);

        hw.latch(Register::IntrUsb, 0b0101);
        let flags = usb.take_register(Register::IntrUsb).unwrap();
        assert_eq!(field(Register::IntrUsb, "RESET").extract(flags), 1);
        assert_eq!(field(Register::IntrUsb, "SOF").extract(flags), 0);
        assert_eq!(usb.take_register(Register::IntrUsb), Ok(0));

        hw.latch(Register::MxmInt, 0b01);
        assert_eq!(usb.take_register(Register::MxmInt), Ok(0b01));
        hw.latch(Register::MxmInt, 0b10);
        assert_eq!(usb.read_register(Register::MxmInt), Ok(0b10));
    }

    #[test]
    fn write_one_to_clear_fields_spare_other_flags() {
        let hw = EmulatedUsbhs::new();
        let usb = Usbhs::new(&hw);

        hw.latch(Register::MxmInt, 0b11);
        usb.write_named_field("MXM_INT", "NOVBUS", 1).unwrap();
        assert_eq!(hw.peek(Register::MxmInt), 0b01);

        usb.write_named_field("MXM_INT_EN", "NOVBUS", 1).unwrap();
        usb.write_named_field("MXM_INT_EN", "VBUS", 1).unwrap();
        assert_eq!(hw.peek(Register::MxmIntEn), 0b11);
    }

    #[test]
    fn fifo_transfers_consume_data() {
        let hw = EmulatedUsbhs::new();
        let usb = Usbhs::new(&hw);

        hw.host_send(2, &[1, 2, 3, 4, 5, 6, 7]);
        let mut first = [0; 5];
        usb.read_fifo(2, &mut first).unwrap();
        assert_eq!(first, [1, 2, 3, 4, 5]);
        let mut second = [0; 2];
        usb.read_fifo(2, &mut second).unwrap();
        assert_eq!(second, [6, 7]);

        usb.write_fifo(4, &[0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x02]).unwrap();
        let mut sent = [0; 8];
        assert_eq!(hw.host_receive(4, &mut sent), 6);
        assert_eq!(&sent[..6], &[0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x02]);
        // One word store and two byte stores.
        assert_eq!(hw.store_count(), 3);
    }

    #[test]
    fn selection_preserves_reserved_index_bits() {
        let hw = EmulatedUsbhs::new();
        let usb = Usbhs::new(&hw);
        hw.write_word(Register::Index.offset(), 0xF0);

        usb.select_endpoint(3).unwrap();
        assert_eq!(hw.peek(Register::Index), 0xF3);
        usb.write_named_field("INDEX", "INDEX", 9).unwrap();
        assert_eq!(usb.selected_endpoint(), Some(9));
        assert_eq!(hw.index(), 9);
    }

    #[test]
    fn identification_registers() {
        let hw = EmulatedUsbhs::new();
        let usb = Usbhs::new(&hw);

        assert_eq!(HWVERS_RESET, 2 << 10);
        assert_eq!(
            usb.hardware_version(),
            Ok(HardwareVersion {
                major: 2,
                minor: 0,
                release_candidate: false
            })
        );
        assert_eq!(EPINFO_RESET, 0xBB);
        assert_eq!(usb.endpoint_count(), Ok(12));
    }
}
