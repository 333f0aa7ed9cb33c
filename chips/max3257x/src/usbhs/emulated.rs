// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Software model of the USBHS controller.
//!
//! `EmulatedUsbhs` implements [`RegisterBus`] without hardware so that code
//! built on the accessor can be exercised on a host. It models the behaviour
//! that makes register access order-sensitive:
//!
//! - the endpoint registers at 0x02C - 0x043 are banked by INDEX, and
//!   COUNT0/OUTCOUNT report the selected endpoint's receive FIFO level;
//! - INTRIN, INTROUT and INTRUSB clear when read;
//! - MXM_INT bits clear when a one is written to them;
//! - read-only registers and reserved space ignore stores;
//! - FIFO ports pop received bytes on load and queue bytes for transmission
//!   on store;
//! - FLUSHFIFO, CLRDATATOG and the CSR0 SERV_* bits act once and read back
//!   as zero.
//!
//! The host side of the bus is driven with [`EmulatedUsbhs::host_send`],
//! [`EmulatedUsbhs::host_receive`] and [`EmulatedUsbhs::latch`].

use core::array;
use core::cell::Cell;

use tock_registers::LocalRegisterCopy;

use super::bus::RegisterBus;
use super::map::{Access, Register, NUM_ENDPOINTS};
use super::registers::{CSR0, INCSRL, INDEX, OUTCSRL, USBHS_SIZE};

/// Bytes each endpoint FIFO holds in either direction.
pub const FIFO_DEPTH: usize = 512;

/// HWVERS after reset: core version 2.0.
pub const HWVERS_RESET: u32 = 2 << 10;
/// EPINFO after reset: 11 IN and 11 OUT endpoints besides endpoint 0.
pub const EPINFO_RESET: u32 = 0xBB;
/// RAMINFO after reset: 12 address bits of FIFO RAM, 2 DMA channels.
pub const RAMINFO_RESET: u32 = 0x2C;

const WORDS: usize = USBHS_SIZE / 4;

const INTRIN_OFFSET: usize = Register::IntrIn.offset();
const INTROUT_OFFSET: usize = Register::IntrOut.offset();
const INTRUSB_OFFSET: usize = Register::IntrUsb.offset();
const INDEX_OFFSET: usize = Register::Index.offset();
const INMAXP_OFFSET: usize = Register::InMaxp.offset();
const CSR_OFFSET: usize = Register::Csr0.offset();
const INCSRU_OFFSET: usize = Register::InCsrU.offset();
const OUTMAXP_OFFSET: usize = Register::OutMaxp.offset();
const OUTCSRL_OFFSET: usize = Register::OutCsrL.offset();
const OUTCSRU_OFFSET: usize = Register::OutCsrU.offset();
const COUNT_OFFSET: usize = Register::Count0.offset();

const BANKED_SLOTS: usize = 6;

fn banked_slot(offset: usize) -> Option<usize> {
    match offset {
        INMAXP_OFFSET => Some(0),
        CSR_OFFSET => Some(1),
        INCSRU_OFFSET => Some(2),
        OUTMAXP_OFFSET => Some(3),
        OUTCSRL_OFFSET => Some(4),
        OUTCSRU_OFFSET => Some(5),
        _ => None,
    }
}

fn fifo_endpoint(offset: usize) -> Option<usize> {
    Register::at_offset(offset).and_then(Register::fifo_endpoint)
}

/// Fixed-capacity byte ring.
struct Queue {
    data: [Cell<u8>; FIFO_DEPTH],
    head: Cell<usize>,
    len: Cell<usize>,
}

impl Queue {
    fn new() -> Queue {
        Queue {
            data: array::from_fn(|_| Cell::new(0)),
            head: Cell::new(0),
            len: Cell::new(0),
        }
    }

    fn len(&self) -> usize {
        self.len.get()
    }

    /// Returns `false`, dropping the byte, when the queue is full.
    fn push(&self, byte: u8) -> bool {
        let len = self.len.get();
        if len == FIFO_DEPTH {
            return false;
        }
        self.data[(self.head.get() + len) % FIFO_DEPTH].set(byte);
        self.len.set(len + 1);
        true
    }

    /// An empty queue reads as zero, as the hardware does on underrun.
    fn pop(&self) -> u8 {
        let len = self.len.get();
        if len == 0 {
            return 0;
        }
        let head = self.head.get();
        self.head.set((head + 1) % FIFO_DEPTH);
        self.len.set(len - 1);
        self.data[head].get()
    }

    fn clear(&self) {
        self.head.set(0);
        self.len.set(0);
    }
}

struct EndpointModel {
    banked: [Cell<u32>; BANKED_SLOTS],
    /// Bytes received from the host, drained through the FIFO port.
    rx: Queue,
    /// Bytes written through the FIFO port, waiting for the host.
    tx: Queue,
}

impl EndpointModel {
    fn new() -> EndpointModel {
        EndpointModel {
            banked: array::from_fn(|_| Cell::new(0)),
            rx: Queue::new(),
            tx: Queue::new(),
        }
    }
}

pub struct EmulatedUsbhs {
    words: [Cell<u32>; WORDS],
    endpoints: [EndpointModel; NUM_ENDPOINTS],
    stores: Cell<usize>,
}

impl EmulatedUsbhs {
    /// A controller in its reset state.
    pub fn new() -> EmulatedUsbhs {
        let emulated = EmulatedUsbhs {
            words: array::from_fn(|_| Cell::new(0)),
            endpoints: array::from_fn(|_| EndpointModel::new()),
            stores: Cell::new(0),
        };
        emulated.word(Register::HwVers.offset()).set(HWVERS_RESET);
        emulated.word(Register::EpInfo.offset()).set(EPINFO_RESET);
        emulated.word(Register::RamInfo.offset()).set(RAMINFO_RESET);
        emulated
    }

    fn word(&self, offset: usize) -> &Cell<u32> {
        &self.words[offset / 4]
    }

    /// Endpoint currently addressed by INDEX.
    pub fn index(&self) -> usize {
        let index = LocalRegisterCopy::<u32, INDEX::Register>::new(self.word(INDEX_OFFSET).get());
        index.read(INDEX::INDEX) as usize
    }

    fn selected(&self) -> &EndpointModel {
        &self.endpoints[self.index()]
    }

    /// Number of stores issued so far, FIFO pushes included.
    pub fn store_count(&self) -> usize {
        self.stores.get()
    }

    /// Set `bits` in a read-only or latched register, as hardware events
    /// would.
    pub fn latch(&self, register: Register, bits: u32) {
        let word = self.word(register.offset());
        word.set(word.get() | bits);
    }

    pub fn set_frame(&self, frame: u32) {
        self.word(Register::Frame.offset()).set(frame & 0x7FF);
    }

    /// Queue bytes as if the host had sent them to `endpoint`. Returns how
    /// many bytes fit.
    pub fn host_send(&self, endpoint: usize, data: &[u8]) -> usize {
        let rx = &self.endpoints[endpoint].rx;
        data.iter().take_while(|byte| rx.push(**byte)).count()
    }

    /// Drain bytes the device queued for the host on `endpoint`.
    pub fn host_receive(&self, endpoint: usize, buf: &mut [u8]) -> usize {
        let tx = &self.endpoints[endpoint].tx;
        let count = buf.len().min(tx.len());
        for byte in &mut buf[..count] {
            *byte = tx.pop();
        }
        count
    }

    /// Current value of `register` without side effects. Banked registers
    /// are seen through the current INDEX; FIFO ports read as zero.
    pub fn peek(&self, register: Register) -> u32 {
        self.peek_offset(register.offset())
    }

    /// Value of a banked register of `endpoint`, regardless of INDEX.
    pub fn peek_endpoint(&self, endpoint: usize, register: Register) -> u32 {
        let model = &self.endpoints[endpoint];
        match banked_slot(register.offset()) {
            Some(slot) => model.banked[slot].get(),
            None if register.offset() == COUNT_OFFSET => model.rx.len() as u32,
            None => self.peek(register),
        }
    }

    fn peek_offset(&self, offset: usize) -> u32 {
        if fifo_endpoint(offset).is_some() {
            return 0;
        }
        match banked_slot(offset) {
            Some(slot) => self.selected().banked[slot].get(),
            None if offset == COUNT_OFFSET => self.selected().rx.len() as u32,
            None => self.word(offset).get(),
        }
    }

    /// Apply the one-shot command bits of the control/status registers and
    /// return what remains stored.
    fn command(&self, offset: usize, value: u32) -> u32 {
        let endpoint = self.selected();
        if offset == OUTCSRL_OFFSET {
            let mut csr = LocalRegisterCopy::<u32, OUTCSRL::Register>::new(value);
            if csr.is_set(OUTCSRL::FLUSHFIFO) {
                endpoint.rx.clear();
            }
            csr.modify(OUTCSRL::FLUSHFIFO::CLEAR + OUTCSRL::CLRDATATOG::CLEAR);
            csr.get()
        } else if offset == CSR_OFFSET && self.index() == 0 {
            let stored = LocalRegisterCopy::<u32, CSR0::Register>::new(endpoint.banked[1].get());
            let mut csr = LocalRegisterCopy::<u32, CSR0::Register>::new(value);
            csr.modify(CSR0::OUTPKTRDY.val(stored.read(CSR0::OUTPKTRDY)));
            csr.modify(CSR0::SETUPEND.val(stored.read(CSR0::SETUPEND)));
            if csr.is_set(CSR0::SERV_OUTPKTRDY) {
                csr.modify(CSR0::OUTPKTRDY::CLEAR);
            }
            if csr.is_set(CSR0::SERV_SETUPEND) {
                csr.modify(CSR0::SETUPEND::CLEAR);
            }
            csr.modify(CSR0::SERV_OUTPKTRDY::CLEAR + CSR0::SERV_SETUPEND::CLEAR);
            csr.get()
        } else if offset == CSR_OFFSET {
            let mut csr = LocalRegisterCopy::<u32, INCSRL::Register>::new(value);
            if csr.is_set(INCSRL::FLUSHFIFO) {
                endpoint.tx.clear();
            }
            csr.modify(INCSRL::FLUSHFIFO::CLEAR + INCSRL::CLRDATATOG::CLEAR);
            csr.get()
        } else {
            value
        }
    }
}

impl RegisterBus for EmulatedUsbhs {
    fn read_word(&self, offset: usize) -> u32 {
        if let Some(endpoint) = fifo_endpoint(offset) {
            let rx = &self.endpoints[endpoint].rx;
            return u32::from_le_bytes([rx.pop(), rx.pop(), rx.pop(), rx.pop()]);
        }
        match offset {
            INTRIN_OFFSET | INTROUT_OFFSET | INTRUSB_OFFSET => self.word(offset).replace(0),
            _ => self.peek_offset(offset),
        }
    }

    fn write_word(&self, offset: usize, value: u32) {
        self.stores.set(self.stores.get() + 1);
        if let Some(endpoint) = fifo_endpoint(offset) {
            for byte in value.to_le_bytes() {
                self.endpoints[endpoint].tx.push(byte);
            }
            return;
        }
        if let Some(slot) = banked_slot(offset) {
            let value = self.command(offset, value);
            self.selected().banked[slot].set(value);
            return;
        }
        match Register::at_offset(offset).map(Register::access) {
            None | Some(Access::ReadOnly) => {}
            Some(Access::WriteOneToClear) => {
                let word = self.word(offset);
                word.set(word.get() & !value);
            }
            Some(Access::ReadWrite) | Some(Access::WriteOnly) => self.word(offset).set(value),
        }
    }

    fn read_byte(&self, offset: usize) -> u8 {
        match fifo_endpoint(offset) {
            Some(endpoint) => self.endpoints[endpoint].rx.pop(),
            None => (self.read_word(offset & !3) >> ((offset & 3) * 8)) as u8,
        }
    }

    fn write_byte(&self, offset: usize, value: u8) {
        match fifo_endpoint(offset) {
            Some(endpoint) => {
                self.stores.set(self.stores.get() + 1);
                self.endpoints[endpoint].tx.push(value);
            }
            None => {
                let aligned = offset & !3;
                let shift = (offset & 3) * 8;
                let word = self.peek_offset(aligned) & !(0xFF << shift);
                self.write_word(aligned, word | (u32::from(value) << shift));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banked_registers_follow_index() {
        let usb = EmulatedUsbhs::new();
        usb.write_word(INDEX_OFFSET, 2);
        usb.write_word(INMAXP_OFFSET, 64);
        usb.write_word(INDEX_OFFSET, 5);
        usb.write_word(INMAXP_OFFSET, 512);
        assert_eq!(usb.read_word(INMAXP_OFFSET), 512);
        assert_eq!(usb.peek_endpoint(2, Register::InMaxp), 64);
        usb.write_word(INDEX_OFFSET, 2);
        assert_eq!(usb.read_word(INMAXP_OFFSET), 64);
    }

    #[test]
    fn latched_registers_clear_on_read() {
        let usb = EmulatedUsbhs::new();
        usb.latch(Register::IntrUsb, 0b0100);
        assert_eq!(usb.read_word(INTRUSB_OFFSET), 0b0100);
        assert_eq!(usb.read_word(INTRUSB_OFFSET), 0);
    }

    #[test]
    fn write_one_to_clear_and_read_only() {
        let usb = EmulatedUsbhs::new();
        usb.latch(Register::MxmInt, 0b11);
        usb.write_word(Register::MxmInt.offset(), 0b01);
        assert_eq!(usb.peek(Register::MxmInt), 0b10);

        usb.write_word(Register::HwVers.offset(), 0);
        assert_eq!(usb.peek(Register::HwVers), HWVERS_RESET);
        assert_eq!(usb.store_count(), 2);
    }

    #[test]
    fn fifo_queues_and_count() {
        let usb = EmulatedUsbhs::new();
        assert_eq!(usb.host_send(3, &[1, 2, 3, 4, 5]), 5);
        usb.write_word(INDEX_OFFSET, 3);
        assert_eq!(usb.read_word(COUNT_OFFSET), 5);

        let fifo3 = Register::Fifo3.offset();
        assert_eq!(usb.read_word(fifo3), 0x0403_0201);
        assert_eq!(usb.read_byte(fifo3), 5);
        assert_eq!(usb.read_word(COUNT_OFFSET), 0);

        usb.write_word(fifo3, 0xDDCC_BBAA);
        usb.write_byte(fifo3, 0xEE);
        let mut out = [0; 8];
        assert_eq!(usb.host_receive(3, &mut out), 5);
        assert_eq!(&out[..5], &[0xAA, 0xBB, 0xCC, 0xDD, 0xEE]);
    }

    #[test]
    fn flush_and_serviced_bits_act_once() {
        let usb = EmulatedUsbhs::new();
        usb.host_send(1, &[9; 10]);
        usb.write_word(INDEX_OFFSET, 1);
        usb.write_word(OUTCSRL_OFFSET, 0x11);
        assert_eq!(usb.read_word(COUNT_OFFSET), 0);
        assert_eq!(usb.read_word(OUTCSRL_OFFSET), 0x01);

        usb.write_word(INDEX_OFFSET, 0);
        usb.endpoints[0].banked[1].set(0x01);
        usb.write_word(CSR_OFFSET, 0x40);
        assert_eq!(usb.read_word(CSR_OFFSET), 0);
    }

    #[test]
    fn full_fifo_drops_bytes() {
        let usb = EmulatedUsbhs::new();
        assert_eq!(usb.host_send(0, &[0; FIFO_DEPTH + 8]), FIFO_DEPTH);
    }
}
