// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Memory map of the USBHS device controller.
//!
//! Every register of the controller occupies one 32-bit cell, even where the
//! underlying core only implements 8 or 16 bits. Cells at 0x02C - 0x047 are
//! banked per endpoint: the value seen depends on the INDEX register.

use tock_registers::registers::{ReadOnly, ReadWrite};
use tock_registers::{register_bitfields, register_structs};

use crate::static_ref::StaticRef;

/// Size of the register block in bytes.
pub const USBHS_SIZE: usize = 0x4A8;

pub const USBHS_BASE: StaticRef<UsbhsRegisters> =
    unsafe { StaticRef::new(0x400B_1000 as *const UsbhsRegisters) };

register_structs! {
    pub UsbhsRegisters {
        /// Function address
        (0x000 => pub faddr: ReadWrite<u32, FADDR::Register>),
        /// Power management and connection control
        (0x004 => pub power: ReadWrite<u32, POWER::Register>),
        /// IN endpoint interrupt flags, cleared on read
        (0x008 => pub intrin: ReadOnly<u32, INTRIN::Register>),
        /// OUT endpoint interrupt flags, cleared on read
        (0x00C => pub introut: ReadOnly<u32, INTROUT::Register>),
        (0x010 => pub intrinen: ReadWrite<u32, INTRIN::Register>),
        (0x014 => pub introuten: ReadWrite<u32, INTROUT::Register>),
        /// Bus event flags, cleared on read
        (0x018 => pub intrusb: ReadOnly<u32, INTRUSB::Register>),
        (0x01C => pub intrusben: ReadWrite<u32, INTRUSB::Register>),
        (0x020 => pub frame: ReadOnly<u32, FRAME::Register>),
        /// Selects the endpoint whose registers appear at 0x02C - 0x047
        (0x024 => pub index: ReadWrite<u32, INDEX::Register>),
        (0x028 => pub testmode: ReadWrite<u32, TESTMODE::Register>),
        (0x02C => pub inmaxp: ReadWrite<u32, MAXP::Register>),
        /// CSR0 while endpoint 0 is selected, INCSRL otherwise
        (0x030 => pub csr0_incsrl: ReadWrite<u32>),
        (0x034 => pub incsru: ReadWrite<u32, INCSRU::Register>),
        (0x038 => pub outmaxp: ReadWrite<u32, MAXP::Register>),
        (0x03C => pub outcsrl: ReadWrite<u32, OUTCSRL::Register>),
        (0x040 => pub outcsru: ReadWrite<u32, OUTCSRU::Register>),
        /// COUNT0 while endpoint 0 is selected, OUTCOUNT otherwise
        (0x044 => pub count0_outcount: ReadOnly<u32, OUTCOUNT::Register>),
        (0x048 => _reserved0),
        (0x080 => pub fifo0: ReadWrite<u32>),
        (0x084 => pub fifo1: ReadWrite<u32>),
        (0x088 => pub fifo2: ReadWrite<u32>),
        (0x08C => pub fifo3: ReadWrite<u32>),
        (0x090 => pub fifo4: ReadWrite<u32>),
        (0x094 => pub fifo5: ReadWrite<u32>),
        (0x098 => pub fifo6: ReadWrite<u32>),
        (0x09C => pub fifo7: ReadWrite<u32>),
        (0x0A0 => pub fifo8: ReadWrite<u32>),
        (0x0A4 => pub fifo9: ReadWrite<u32>),
        (0x0A8 => pub fifo10: ReadWrite<u32>),
        (0x0AC => pub fifo11: ReadWrite<u32>),
        (0x0B0 => pub fifo12: ReadWrite<u32>),
        (0x0B4 => pub fifo13: ReadWrite<u32>),
        (0x0B8 => pub fifo14: ReadWrite<u32>),
        (0x0BC => pub fifo15: ReadWrite<u32>),
        (0x0C0 => _reserved1),
        (0x100 => pub hwvers: ReadOnly<u32, HWVERS::Register>),
        (0x104 => _reserved2),
        (0x110 => pub epinfo: ReadOnly<u32, EPINFO::Register>),
        (0x114 => pub raminfo: ReadOnly<u32, RAMINFO::Register>),
        (0x118 => pub softreset: ReadWrite<u32, SOFTRESET::Register>),
        (0x11C => pub earlydma: ReadWrite<u32, EARLYDMA::Register>),
        (0x120 => _reserved3),
        /// Chirp timeout
        (0x12C => pub ctuch: ReadWrite<u32, CTUCH::Register>),
        /// High-speed resume signalling delay
        (0x130 => pub cthsrtn: ReadWrite<u32, CTHSRTN::Register>),
        (0x134 => _reserved4),
        (0x400 => pub mxm_usb_reg_00: ReadWrite<u32>),
        (0x404 => pub m31_phy_utmi_reset: ReadWrite<u32>),
        (0x408 => pub m31_phy_utmi_vcontrol: ReadWrite<u32>),
        (0x40C => pub m31_phy_clk_en: ReadWrite<u32>),
        (0x410 => pub m31_phy_ponrst: ReadWrite<u32>),
        (0x414 => pub m31_phy_noncry_rstb: ReadWrite<u32>),
        (0x418 => pub m31_phy_noncry_en: ReadWrite<u32>),
        (0x41C => pub m31_phy_u2_compliance_en: ReadWrite<u32>),
        (0x420 => pub m31_phy_u2_compliance_dac_adj_en: ReadWrite<u32>),
        (0x424 => pub m31_phy_u2_compliance_dac_adj: ReadWrite<u32>),
        (0x428 => pub m31_phy_clk_rdy: ReadOnly<u32>),
        (0x42C => pub m31_phy_pll_en: ReadWrite<u32>),
        (0x430 => pub m31_phy_bist_ok: ReadOnly<u32>),
        (0x434 => pub m31_phy_data_oe: ReadOnly<u32>),
        (0x438 => pub m31_phy_oscouten: ReadWrite<u32>),
        (0x43C => pub m31_phy_lpm_alive: ReadWrite<u32>),
        (0x440 => pub m31_phy_hs_bist_mode: ReadWrite<u32>),
        (0x444 => pub m31_phy_coreclkin: ReadWrite<u32>),
        (0x448 => pub m31_phy_xtlsel: ReadWrite<u32>),
        (0x44C => pub m31_phy_ls_en: ReadWrite<u32>),
        (0x450 => pub m31_phy_debug_sel: ReadWrite<u32>),
        (0x454 => pub m31_phy_debug_out: ReadOnly<u32>),
        (0x458 => pub m31_phy_outclksel: ReadWrite<u32>),
        (0x45C => pub m31_phy_xcfgi_31_0: ReadWrite<u32>),
        (0x460 => pub m31_phy_xcfgi_63_32: ReadWrite<u32>),
        (0x464 => pub m31_phy_xcfgi_95_64: ReadWrite<u32>),
        (0x468 => pub m31_phy_xcfgi_127_96: ReadWrite<u32>),
        (0x46C => pub m31_phy_xcfgi_137_128: ReadWrite<u32>),
        (0x470 => pub m31_phy_xcfg_hs_coarse_tune_num: ReadWrite<u32>),
        (0x474 => pub m31_phy_xcfg_hs_fine_tune_num: ReadWrite<u32>),
        (0x478 => pub m31_phy_xcfg_fs_coarse_tune_num: ReadWrite<u32>),
        (0x47C => pub m31_phy_xcfg_fs_fine_tune_num: ReadWrite<u32>),
        (0x480 => pub m31_phy_xcfg_lock_range_max: ReadWrite<u32>),
        (0x484 => pub m31_phy_xcfgi_lock_range_min: ReadWrite<u32>),
        (0x488 => pub m31_phy_xcfg_ob_rsel: ReadWrite<u32>),
        (0x48C => pub m31_phy_xcfg_oc_rsel: ReadWrite<u32>),
        (0x490 => pub m31_phy_xcfgo: ReadOnly<u32>),
        (0x494 => _reserved5),
        /// VBUS event flags, write one to clear
        (0x498 => pub mxm_int: ReadWrite<u32, MXM_INT::Register>),
        (0x49C => pub mxm_int_en: ReadWrite<u32, MXM_INT::Register>),
        (0x4A0 => pub mxm_suspend: ReadWrite<u32, MXM_SUSPEND::Register>),
        (0x4A4 => pub mxm_reg_a4: ReadWrite<u32, MXM_REG_A4::Register>),
        (0x4A8 => @END),
    }
}

register_bitfields![u32,
    pub FADDR [
        /// Address assigned by the host
        ADDR OFFSET(0) NUMBITS(7) [],
        /// Set while a new address is pending the status stage
        UPDATE OFFSET(7) NUMBITS(1) []
    ],
    pub POWER [
        /// Enable entry into suspend mode
        EN_SUSPENDM OFFSET(0) NUMBITS(1) [],
        SUSPEND OFFSET(1) NUMBITS(1) [],
        /// Drive resume signalling
        RESUME OFFSET(2) NUMBITS(1) [],
        RESET OFFSET(3) NUMBITS(1) [],
        /// Set once high-speed negotiation succeeded
        HS_MODE OFFSET(4) NUMBITS(1) [],
        HS_ENABLE OFFSET(5) NUMBITS(1) [],
        /// Connect the D+ pull-up
        SOFTCONN OFFSET(6) NUMBITS(1) [],
        ISO_UPDATE OFFSET(7) NUMBITS(1) []
    ],
    pub INTRIN [
        /// One bit per IN endpoint; bit 0 covers both directions of endpoint 0
        EP OFFSET(0) NUMBITS(16) []
    ],
    pub INTROUT [
        /// One bit per OUT endpoint, starting at endpoint 1
        EP OFFSET(1) NUMBITS(15) []
    ],
    pub INTRUSB [
        SUSPEND OFFSET(0) NUMBITS(1) [],
        RESUME OFFSET(1) NUMBITS(1) [],
        RESET OFFSET(2) NUMBITS(1) [],
        SOF OFFSET(3) NUMBITS(1) []
    ],
    pub FRAME [
        FRAMENUM OFFSET(0) NUMBITS(11) []
    ],
    pub INDEX [
        INDEX OFFSET(0) NUMBITS(4) []
    ],
    pub TESTMODE [
        TEST_SE0_NAK OFFSET(0) NUMBITS(1) [],
        TEST_J OFFSET(1) NUMBITS(1) [],
        TEST_K OFFSET(2) NUMBITS(1) [],
        TEST_PKT OFFSET(3) NUMBITS(1) [],
        FORCE_HS OFFSET(4) NUMBITS(1) [],
        FORCE_FS OFFSET(5) NUMBITS(1) []
    ],
    pub MAXP [
        MAXPACKETSIZE OFFSET(0) NUMBITS(11) [],
        /// Packets per transaction minus one, for high-bandwidth transfers
        NUMPACKMINUS1 OFFSET(11) NUMBITS(5) []
    ],
    pub CSR0 [
        OUTPKTRDY OFFSET(0) NUMBITS(1) [],
        INPKTRDY OFFSET(1) NUMBITS(1) [],
        SENTSTALL OFFSET(2) NUMBITS(1) [],
        DATAEND OFFSET(3) NUMBITS(1) [],
        SETUPEND OFFSET(4) NUMBITS(1) [],
        SENDSTALL OFFSET(5) NUMBITS(1) [],
        SERV_OUTPKTRDY OFFSET(6) NUMBITS(1) [],
        SERV_SETUPEND OFFSET(7) NUMBITS(1) []
    ],
    pub INCSRL [
        INPKTRDY OFFSET(0) NUMBITS(1) [],
        FIFONOTEMPTY OFFSET(1) NUMBITS(1) [],
        UNDERRUN OFFSET(2) NUMBITS(1) [],
        FLUSHFIFO OFFSET(3) NUMBITS(1) [],
        SENDSTALL OFFSET(4) NUMBITS(1) [],
        SENTSTALL OFFSET(5) NUMBITS(1) [],
        CLRDATATOG OFFSET(6) NUMBITS(1) [],
        INCOMPTX OFFSET(7) NUMBITS(1) []
    ],
    pub INCSRU [
        DPKTBUFDIS OFFSET(1) NUMBITS(1) [],
        DMAREQMODE OFFSET(2) NUMBITS(1) [],
        FRCDATATOG OFFSET(3) NUMBITS(1) [],
        DMAREQENAB OFFSET(4) NUMBITS(1) [],
        MODE OFFSET(5) NUMBITS(1) [
            Out = 0,
            In = 1
        ],
        ISO OFFSET(6) NUMBITS(1) [],
        AUTOSET OFFSET(7) NUMBITS(1) []
    ],
    pub OUTCSRL [
        OUTPKTRDY OFFSET(0) NUMBITS(1) [],
        FIFOFULL OFFSET(1) NUMBITS(1) [],
        OVERRUN OFFSET(2) NUMBITS(1) [],
        DATAERROR OFFSET(3) NUMBITS(1) [],
        FLUSHFIFO OFFSET(4) NUMBITS(1) [],
        SENDSTALL OFFSET(5) NUMBITS(1) [],
        SENTSTALL OFFSET(6) NUMBITS(1) [],
        CLRDATATOG OFFSET(7) NUMBITS(1) []
    ],
    pub OUTCSRU [
        INCOMPRX OFFSET(0) NUMBITS(1) [],
        DPKTBUFDIS OFFSET(1) NUMBITS(1) [],
        DMAREQMODE OFFSET(3) NUMBITS(1) [],
        DISNYET OFFSET(4) NUMBITS(1) [],
        DMAREQENAB OFFSET(5) NUMBITS(1) [],
        ISO OFFSET(6) NUMBITS(1) [],
        AUTOCLEAR OFFSET(7) NUMBITS(1) []
    ],
    pub COUNT0 [
        COUNT0 OFFSET(0) NUMBITS(7) []
    ],
    pub OUTCOUNT [
        OUTCOUNT OFFSET(0) NUMBITS(13) []
    ],
    pub HWVERS [
        MINOR OFFSET(0) NUMBITS(10) [],
        MAJOR OFFSET(10) NUMBITS(5) [],
        /// Release candidate build
        RC OFFSET(15) NUMBITS(1) []
    ],
    pub EPINFO [
        /// Number of IN endpoints besides endpoint 0
        INTXEP OFFSET(0) NUMBITS(4) [],
        /// Number of OUT endpoints besides endpoint 0
        OUTRXEP OFFSET(4) NUMBITS(4) []
    ],
    pub RAMINFO [
        /// Address width of the FIFO RAM
        RAMBITS OFFSET(0) NUMBITS(4) [],
        DMACHANS OFFSET(4) NUMBITS(4) []
    ],
    pub SOFTRESET [
        RSTS OFFSET(0) NUMBITS(1) [],
        RSTXS OFFSET(1) NUMBITS(1) []
    ],
    pub EARLYDMA [
        EDMAOUT OFFSET(0) NUMBITS(2) [],
        EDMAIN OFFSET(4) NUMBITS(2) []
    ],
    pub CTUCH [
        C_T_UCH OFFSET(0) NUMBITS(16) []
    ],
    pub CTHSRTN [
        C_T_HSRTN OFFSET(0) NUMBITS(16) []
    ],
    pub MXM_INT [
        /// VBUS became valid
        VBUS OFFSET(0) NUMBITS(1) [],
        /// VBUS dropped
        NOVBUS OFFSET(1) NUMBITS(1) []
    ],
    pub MXM_SUSPEND [
        SEL OFFSET(0) NUMBITS(1) []
    ],
    pub MXM_REG_A4 [
        VRST_VDDB_N_A OFFSET(0) NUMBITS(1) [],
        VRST_VBUS_N_A OFFSET(1) NUMBITS(1) []
    ]
];
