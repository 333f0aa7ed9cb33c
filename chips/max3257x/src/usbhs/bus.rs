// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Raw access to the USBHS register block.
//!
//! [`RegisterBus`] is the single seam between the accessor and the hardware.
//! On the chip it is implemented by the memory-mapped block behind a
//! [`StaticRef`]; in tests by [`EmulatedUsbhs`](super::emulated::EmulatedUsbhs).
//! Implementations perform exactly one access per call, in program order, and
//! never cache.

use core::ptr;

use super::registers::{UsbhsRegisters, USBHS_SIZE};
use crate::static_ref::StaticRef;

pub trait RegisterBus {
    /// 32-bit load from `offset` bytes past the block base.
    fn read_word(&self, offset: usize) -> u32;

    /// 32-bit store to `offset` bytes past the block base.
    fn write_word(&self, offset: usize, value: u32);

    /// 8-bit load, used for the tail of FIFO transfers.
    fn read_byte(&self, offset: usize) -> u8;

    /// 8-bit store, used for the tail of FIFO transfers.
    fn write_byte(&self, offset: usize, value: u8);
}

impl<T: RegisterBus + ?Sized> RegisterBus for &T {
    fn read_word(&self, offset: usize) -> u32 {
        (**self).read_word(offset)
    }

    fn write_word(&self, offset: usize, value: u32) {
        (**self).write_word(offset, value)
    }

    fn read_byte(&self, offset: usize) -> u8 {
        (**self).read_byte(offset)
    }

    fn write_byte(&self, offset: usize, value: u8) {
        (**self).write_byte(offset, value)
    }
}

impl StaticRef<UsbhsRegisters> {
    fn cell(&self, offset: usize) -> *mut u8 {
        debug_assert!(offset < USBHS_SIZE);
        // Every register field is an `UnsafeCell`, so writing through a
        // pointer derived from the shared block is sound.
        self.as_ptr().cast::<u8>().cast_mut().wrapping_add(offset)
    }
}

impl RegisterBus for StaticRef<UsbhsRegisters> {
    fn read_word(&self, offset: usize) -> u32 {
        debug_assert!(offset % 4 == 0);
        unsafe { ptr::read_volatile(self.cell(offset).cast::<u32>()) }
    }

    fn write_word(&self, offset: usize, value: u32) {
        debug_assert!(offset % 4 == 0);
        unsafe { ptr::write_volatile(self.cell(offset).cast::<u32>(), value) }
    }

    fn read_byte(&self, offset: usize) -> u8 {
        unsafe { ptr::read_volatile(self.cell(offset)) }
    }

    fn write_byte(&self, offset: usize, value: u8) {
        unsafe { ptr::write_volatile(self.cell(offset), value) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tock_registers::interfaces::{Readable, Writeable};

    use crate::usbhs::registers::POWER;

    #[repr(C, align(4))]
    struct Backing([u8; USBHS_SIZE]);

    #[test]
    fn mmio_reaches_typed_registers() {
        let mut backing = Backing([0; USBHS_SIZE]);
        let block =
            unsafe { StaticRef::new(backing.0.as_mut_ptr().cast::<UsbhsRegisters>().cast_const()) };

        block.write_word(0x004, 0x41);
        assert!(block.power.is_set(POWER::SOFTCONN));
        assert!(block.power.is_set(POWER::EN_SUSPENDM));

        block.ctuch.set(0x1234);
        assert_eq!(block.read_word(0x12C), 0x1234);

        block.write_byte(0x080, 0xAB);
        assert_eq!(block.read_byte(0x080), 0xAB);
        assert_eq!(block.fifo0.get(), 0xAB);

        assert_eq!(backing.0[0x004], 0x41);
        assert_eq!(&backing.0[0x12C..0x12E], &[0x34, 0x12]);
    }
}
