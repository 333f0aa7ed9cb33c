// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Runtime catalogue of USBHS registers and their bitfields.
//!
//! The typed block in [`registers`](super::registers) is what drivers use when
//! they know at compile time which register they touch. This module describes
//! the same block as data, so registers and fields can be addressed by value
//! or by name and checked before any bus access happens.
//!
//! Offsets are taken from the `register_structs!` layout and field positions
//! from the `register_bitfields!` definitions, so the two views cannot drift
//! apart.

use core::fmt;
use core::mem::offset_of;

use tock_registers::fields::Field as Bitfield;
use tock_registers::RegisterLongName;

use super::registers::*;
use crate::error::AccessError;

/// Number of endpoint slots addressable through INDEX and the FIFO ports.
pub const NUM_ENDPOINTS: usize = 16;

/// How software may access a register or a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    ReadOnly,
    WriteOnly,
    ReadWrite,
    /// Reads return pending flags; writing a one clears that flag and
    /// writing a zero has no effect.
    WriteOneToClear,
}

impl Access {
    pub const fn is_readable(self) -> bool {
        !matches!(self, Access::WriteOnly)
    }

    pub const fn is_writable(self) -> bool {
        !matches!(self, Access::ReadOnly)
    }
}

/// Hardware behaviour triggered by an access beyond moving a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SideEffect {
    None,
    /// The register resets to zero once it has been read.
    ClearOnRead,
    /// Every access pushes to or pops from an endpoint FIFO.
    FifoPort,
}

/// Endpoint banking of a register.
///
/// CSR0 and COUNT0 only exist while INDEX is 0. The same cells hold INCSRL
/// and OUTCOUNT for endpoints 1-15, which is also the only place the other
/// banked registers exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bank {
    Unbanked,
    /// Endpoint 0 only.
    Control,
    /// Endpoints 1-15 only.
    Data,
}

/// A named bit range inside a register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub register: Register,
    pub name: &'static str,
    pub shift: usize,
    /// Right-justified mask, `2^width - 1`.
    pub mask: u32,
    pub access: Access,
}

impl Field {
    pub const fn from_bitfield<R: RegisterLongName>(
        register: Register,
        name: &'static str,
        bitfield: Bitfield<u32, R>,
        access: Access,
    ) -> Field {
        Field {
            register,
            name,
            shift: bitfield.shift as usize,
            mask: bitfield.mask,
            access,
        }
    }

    pub const fn width(&self) -> u32 {
        self.mask.count_ones()
    }

    /// The field's bits in register position.
    pub const fn shifted_mask(&self) -> u32 {
        self.mask << self.shift
    }

    /// Pull this field's value out of a full register word.
    pub const fn extract(&self, word: u32) -> u32 {
        (word >> self.shift) & self.mask
    }
}

macro_rules! fields {
    ($register:ident, $bitfields:ident { $( $field:ident: $access:ident ),* $(,)? }) => {
        &[$(
            Field::from_bitfield(
                Register::$register,
                stringify!($field),
                $bitfields::$field,
                Access::$access,
            ),
        )*]
    };
}

const NO_FIELDS: &[Field] = &[];

const FADDR_FIELDS: &[Field] = fields!(Faddr, FADDR { ADDR: ReadWrite, UPDATE: ReadOnly });
const POWER_FIELDS: &[Field] = fields!(Power, POWER {
    EN_SUSPENDM: ReadWrite,
    SUSPEND: ReadWrite,
    RESUME: ReadWrite,
    RESET: ReadOnly,
    HS_MODE: ReadOnly,
    HS_ENABLE: ReadWrite,
    SOFTCONN: ReadWrite,
    ISO_UPDATE: ReadWrite,
});
/// Alternative names accepted by [`Register::field`], as `(register, alias,
/// field)`.
const FIELD_ALIASES: &[(Register, &str, &str)] =
    &[(Register::Power, "SUSPEND_MODE_BIT", "EN_SUSPENDM")];

const INTRIN_FIELDS: &[Field] = fields!(IntrIn, INTRIN { EP: ReadOnly });
const INTROUT_FIELDS: &[Field] = fields!(IntrOut, INTROUT { EP: ReadOnly });
const INTRINEN_FIELDS: &[Field] = fields!(IntrInEn, INTRIN { EP: ReadWrite });
const INTROUTEN_FIELDS: &[Field] = fields!(IntrOutEn, INTROUT { EP: ReadWrite });
const INTRUSB_FIELDS: &[Field] = fields!(IntrUsb, INTRUSB {
    SUSPEND: ReadOnly,
    RESUME: ReadOnly,
    RESET: ReadOnly,
    SOF: ReadOnly,
});
const INTRUSBEN_FIELDS: &[Field] = fields!(IntrUsbEn, INTRUSB {
    SUSPEND: ReadWrite,
    RESUME: ReadWrite,
    RESET: ReadWrite,
    SOF: ReadWrite,
});
const FRAME_FIELDS: &[Field] = fields!(Frame, FRAME { FRAMENUM: ReadOnly });
const INDEX_FIELDS: &[Field] = fields!(Index, INDEX { INDEX: ReadWrite });
const TESTMODE_FIELDS: &[Field] = fields!(TestMode, TESTMODE {
    TEST_SE0_NAK: ReadWrite,
    TEST_J: ReadWrite,
    TEST_K: ReadWrite,
    TEST_PKT: ReadWrite,
    FORCE_HS: ReadWrite,
    FORCE_FS: ReadWrite,
});
const INMAXP_FIELDS: &[Field] = fields!(InMaxp, MAXP {
    MAXPACKETSIZE: ReadWrite,
    NUMPACKMINUS1: ReadWrite,
});
const CSR0_FIELDS: &[Field] = fields!(Csr0, CSR0 {
    OUTPKTRDY: ReadOnly,
    INPKTRDY: ReadWrite,
    SENTSTALL: ReadWrite,
    DATAEND: ReadWrite,
    SETUPEND: ReadOnly,
    SENDSTALL: ReadWrite,
    SERV_OUTPKTRDY: WriteOnly,
    SERV_SETUPEND: WriteOnly,
});
const INCSRL_FIELDS: &[Field] = fields!(InCsrL, INCSRL {
    INPKTRDY: ReadWrite,
    FIFONOTEMPTY: ReadWrite,
    UNDERRUN: ReadWrite,
    FLUSHFIFO: WriteOnly,
    SENDSTALL: ReadWrite,
    SENTSTALL: ReadWrite,
    CLRDATATOG: WriteOnly,
    INCOMPTX: ReadWrite,
});
const INCSRU_FIELDS: &[Field] = fields!(InCsrU, INCSRU {
    DPKTBUFDIS: ReadWrite,
    DMAREQMODE: ReadWrite,
    FRCDATATOG: ReadWrite,
    DMAREQENAB: ReadWrite,
    MODE: ReadWrite,
    ISO: ReadWrite,
    AUTOSET: ReadWrite,
});
const OUTMAXP_FIELDS: &[Field] = fields!(OutMaxp, MAXP {
    MAXPACKETSIZE: ReadWrite,
    NUMPACKMINUS1: ReadWrite,
});
const OUTCSRL_FIELDS: &[Field] = fields!(OutCsrL, OUTCSRL {
    OUTPKTRDY: ReadWrite,
    FIFOFULL: ReadOnly,
    OVERRUN: ReadWrite,
    DATAERROR: ReadOnly,
    FLUSHFIFO: WriteOnly,
    SENDSTALL: ReadWrite,
    SENTSTALL: ReadWrite,
    CLRDATATOG: WriteOnly,
});
const OUTCSRU_FIELDS: &[Field] = fields!(OutCsrU, OUTCSRU {
    INCOMPRX: ReadWrite,
    DPKTBUFDIS: ReadWrite,
    DMAREQMODE: ReadWrite,
    DISNYET: ReadWrite,
    DMAREQENAB: ReadWrite,
    ISO: ReadWrite,
    AUTOCLEAR: ReadWrite,
});
const COUNT0_FIELDS: &[Field] = fields!(Count0, COUNT0 { COUNT0: ReadOnly });
const OUTCOUNT_FIELDS: &[Field] = fields!(OutCount, OUTCOUNT { OUTCOUNT: ReadOnly });
const HWVERS_FIELDS: &[Field] = fields!(HwVers, HWVERS {
    MINOR: ReadOnly,
    MAJOR: ReadOnly,
    RC: ReadOnly,
});
const EPINFO_FIELDS: &[Field] = fields!(EpInfo, EPINFO { INTXEP: ReadOnly, OUTRXEP: ReadOnly });
const RAMINFO_FIELDS: &[Field] = fields!(RamInfo, RAMINFO { RAMBITS: ReadOnly, DMACHANS: ReadOnly });
const SOFTRESET_FIELDS: &[Field] = fields!(SoftReset, SOFTRESET { RSTS: ReadWrite, RSTXS: ReadWrite });
const EARLYDMA_FIELDS: &[Field] = fields!(EarlyDma, EARLYDMA { EDMAOUT: ReadWrite, EDMAIN: ReadWrite });
const CTUCH_FIELDS: &[Field] = fields!(Ctuch, CTUCH { C_T_UCH: ReadWrite });
const CTHSRTN_FIELDS: &[Field] = fields!(Cthsrtn, CTHSRTN { C_T_HSRTN: ReadWrite });
const MXM_INT_FIELDS: &[Field] = fields!(MxmInt, MXM_INT {
    VBUS: WriteOneToClear,
    NOVBUS: WriteOneToClear,
});
const MXM_INT_EN_FIELDS: &[Field] = fields!(MxmIntEn, MXM_INT { VBUS: ReadWrite, NOVBUS: ReadWrite });
const MXM_SUSPEND_FIELDS: &[Field] = fields!(MxmSuspend, MXM_SUSPEND { SEL: ReadWrite });
const MXM_REG_A4_FIELDS: &[Field] = fields!(MxmRegA4, MXM_REG_A4 {
    VRST_VDDB_N_A: ReadWrite,
    VRST_VBUS_N_A: ReadWrite,
});

macro_rules! register_map {
    ($( $variant:ident => $field:ident, $name:literal, $access:ident, $fields:expr; )*) => {
        /// Every register of the USBHS block.
        ///
        /// CSR0 and INCSRL share a cell, as do COUNT0 and OUTCOUNT. Which one
        /// the hardware presents depends on the selected endpoint.
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub enum Register {
            $( $variant, )*
        }

        impl Register {
            pub const ALL: &'static [Register] = &[$( Register::$variant, )*];

            /// Byte offset from the peripheral base.
            pub const fn offset(self) -> usize {
                match self {
                    $( Register::$variant => offset_of!(UsbhsRegisters, $field), )*
                }
            }

            /// Data sheet name, without the `USBHS_` prefix.
            pub const fn name(self) -> &'static str {
                match self {
                    $( Register::$variant => $name, )*
                }
            }

            pub const fn access(self) -> Access {
                match self {
                    $( Register::$variant => Access::$access, )*
                }
            }

            pub const fn fields(self) -> &'static [Field] {
                match self {
                    $( Register::$variant => $fields, )*
                }
            }
        }
    };
}

register_map! {
    Faddr => faddr, "FADDR", ReadWrite, FADDR_FIELDS;
    Power => power, "POWER", ReadWrite, POWER_FIELDS;
    IntrIn => intrin, "INTRIN", ReadOnly, INTRIN_FIELDS;
    IntrOut => introut, "INTROUT", ReadOnly, INTROUT_FIELDS;
    IntrInEn => intrinen, "INTRINEN", ReadWrite, INTRINEN_FIELDS;
    IntrOutEn => introuten, "INTROUTEN", ReadWrite, INTROUTEN_FIELDS;
    IntrUsb => intrusb, "INTRUSB", ReadOnly, INTRUSB_FIELDS;
    IntrUsbEn => intrusben, "INTRUSBEN", ReadWrite, INTRUSBEN_FIELDS;
    Frame => frame, "FRAME", ReadOnly, FRAME_FIELDS;
    Index => index, "INDEX", ReadWrite, INDEX_FIELDS;
    TestMode => testmode, "TESTMODE", ReadWrite, TESTMODE_FIELDS;
    InMaxp => inmaxp, "INMAXP", ReadWrite, INMAXP_FIELDS;
    Csr0 => csr0_incsrl, "CSR0", ReadWrite, CSR0_FIELDS;
    InCsrL => csr0_incsrl, "INCSRL", ReadWrite, INCSRL_FIELDS;
    InCsrU => incsru, "INCSRU", ReadWrite, INCSRU_FIELDS;
    OutMaxp => outmaxp, "OUTMAXP", ReadWrite, OUTMAXP_FIELDS;
    OutCsrL => outcsrl, "OUTCSRL", ReadWrite, OUTCSRL_FIELDS;
    OutCsrU => outcsru, "OUTCSRU", ReadWrite, OUTCSRU_FIELDS;
    Count0 => count0_outcount, "COUNT0", ReadOnly, COUNT0_FIELDS;
    OutCount => count0_outcount, "OUTCOUNT", ReadOnly, OUTCOUNT_FIELDS;
    Fifo0 => fifo0, "FIFO0", ReadWrite, NO_FIELDS;
    Fifo1 => fifo1, "FIFO1", ReadWrite, NO_FIELDS;
    Fifo2 => fifo2, "FIFO2", ReadWrite, NO_FIELDS;
    Fifo3 => fifo3, "FIFO3", ReadWrite, NO_FIELDS;
    Fifo4 => fifo4, "FIFO4", ReadWrite, NO_FIELDS;
    Fifo5 => fifo5, "FIFO5", ReadWrite, NO_FIELDS;
    Fifo6 => fifo6, "FIFO6", ReadWrite, NO_FIELDS;
    Fifo7 => fifo7, "FIFO7", ReadWrite, NO_FIELDS;
    Fifo8 => fifo8, "FIFO8", ReadWrite, NO_FIELDS;
    Fifo9 => fifo9, "FIFO9", ReadWrite, NO_FIELDS;
    Fifo10 => fifo10, "FIFO10", ReadWrite, NO_FIELDS;
    Fifo11 => fifo11, "FIFO11", ReadWrite, NO_FIELDS;
    Fifo12 => fifo12, "FIFO12", ReadWrite, NO_FIELDS;
    Fifo13 => fifo13, "FIFO13", ReadWrite, NO_FIELDS;
    Fifo14 => fifo14, "FIFO14", ReadWrite, NO_FIELDS;
    Fifo15 => fifo15, "FIFO15", ReadWrite, NO_FIELDS;
    HwVers => hwvers, "HWVERS", ReadOnly, HWVERS_FIELDS;
    EpInfo => epinfo, "EPINFO", ReadOnly, EPINFO_FIELDS;
    RamInfo => raminfo, "RAMINFO", ReadOnly, RAMINFO_FIELDS;
    SoftReset => softreset, "SOFTRESET", ReadWrite, SOFTRESET_FIELDS;
    EarlyDma => earlydma, "EARLYDMA", ReadWrite, EARLYDMA_FIELDS;
    Ctuch => ctuch, "CTUCH", ReadWrite, CTUCH_FIELDS;
    Cthsrtn => cthsrtn, "CTHSRTN", ReadWrite, CTHSRTN_FIELDS;
    MxmUsbReg00 => mxm_usb_reg_00, "MXM_USB_REG_00", ReadWrite, NO_FIELDS;
    M31PhyUtmiReset => m31_phy_utmi_reset, "M31_PHY_UTMI_RESET", ReadWrite, NO_FIELDS;
    M31PhyUtmiVcontrol => m31_phy_utmi_vcontrol, "M31_PHY_UTMI_VCONTROL", ReadWrite, NO_FIELDS;
    M31PhyClkEn => m31_phy_clk_en, "M31_PHY_CLK_EN", ReadWrite, NO_FIELDS;
    M31PhyPonrst => m31_phy_ponrst, "M31_PHY_PONRST", ReadWrite, NO_FIELDS;
    M31PhyNoncryRstb => m31_phy_noncry_rstb, "M31_PHY_NONCRY_RSTB", ReadWrite, NO_FIELDS;
    M31PhyNoncryEn => m31_phy_noncry_en, "M31_PHY_NONCRY_EN", ReadWrite, NO_FIELDS;
    M31PhyU2ComplianceEn => m31_phy_u2_compliance_en, "M31_PHY_U2_COMPLIANCE_EN", ReadWrite, NO_FIELDS;
    M31PhyU2ComplianceDacAdjEn => m31_phy_u2_compliance_dac_adj_en, "M31_PHY_U2_COMPLIANCE_DAC_ADJ_EN", ReadWrite, NO_FIELDS;
    M31PhyU2ComplianceDacAdj => m31_phy_u2_compliance_dac_adj, "M31_PHY_U2_COMPLIANCE_DAC_ADJ", ReadWrite, NO_FIELDS;
    M31PhyClkRdy => m31_phy_clk_rdy, "M31_PHY_CLK_RDY", ReadOnly, NO_FIELDS;
    M31PhyPllEn => m31_phy_pll_en, "M31_PHY_PLL_EN", ReadWrite, NO_FIELDS;
    M31PhyBistOk => m31_phy_bist_ok, "M31_PHY_BIST_OK", ReadOnly, NO_FIELDS;
    M31PhyDataOe => m31_phy_data_oe, "M31_PHY_DATA_OE", ReadOnly, NO_FIELDS;
    M31PhyOscouten => m31_phy_oscouten, "M31_PHY_OSCOUTEN", ReadWrite, NO_FIELDS;
    M31PhyLpmAlive => m31_phy_lpm_alive, "M31_PHY_LPM_ALIVE", ReadWrite, NO_FIELDS;
    M31PhyHsBistMode => m31_phy_hs_bist_mode, "M31_PHY_HS_BIST_MODE", ReadWrite, NO_FIELDS;
    M31PhyCoreclkin => m31_phy_coreclkin, "M31_PHY_CORECLKIN", ReadWrite, NO_FIELDS;
    M31PhyXtlsel => m31_phy_xtlsel, "M31_PHY_XTLSEL", ReadWrite, NO_FIELDS;
    M31PhyLsEn => m31_phy_ls_en, "M31_PHY_LS_EN", ReadWrite, NO_FIELDS;
    M31PhyDebugSel => m31_phy_debug_sel, "M31_PHY_DEBUG_SEL", ReadWrite, NO_FIELDS;
    M31PhyDebugOut => m31_phy_debug_out, "M31_PHY_DEBUG_OUT", ReadOnly, NO_FIELDS;
    M31PhyOutclksel => m31_phy_outclksel, "M31_PHY_OUTCLKSEL", ReadWrite, NO_FIELDS;
    M31PhyXcfgi31_0 => m31_phy_xcfgi_31_0, "M31_PHY_XCFGI_31_0", ReadWrite, NO_FIELDS;
    M31PhyXcfgi63_32 => m31_phy_xcfgi_63_32, "M31_PHY_XCFGI_63_32", ReadWrite, NO_FIELDS;
    M31PhyXcfgi95_64 => m31_phy_xcfgi_95_64, "M31_PHY_XCFGI_95_64", ReadWrite, NO_FIELDS;
    M31PhyXcfgi127_96 => m31_phy_xcfgi_127_96, "M31_PHY_XCFGI_127_96", ReadWrite, NO_FIELDS;
    M31PhyXcfgi137_128 => m31_phy_xcfgi_137_128, "M31_PHY_XCFGI_137_128", ReadWrite, NO_FIELDS;
    M31PhyXcfgHsCoarseTuneNum => m31_phy_xcfg_hs_coarse_tune_num, "M31_PHY_XCFG_HS_COARSE_TUNE_NUM", ReadWrite, NO_FIELDS;
    M31PhyXcfgHsFineTuneNum => m31_phy_xcfg_hs_fine_tune_num, "M31_PHY_XCFG_HS_FINE_TUNE_NUM", ReadWrite, NO_FIELDS;
    M31PhyXcfgFsCoarseTuneNum => m31_phy_xcfg_fs_coarse_tune_num, "M31_PHY_XCFG_FS_COARSE_TUNE_NUM", ReadWrite, NO_FIELDS;
    M31PhyXcfgFsFineTuneNum => m31_phy_xcfg_fs_fine_tune_num, "M31_PHY_XCFG_FS_FINE_TUNE_NUM", ReadWrite, NO_FIELDS;
    M31PhyXcfgLockRangeMax => m31_phy_xcfg_lock_range_max, "M31_PHY_XCFG_LOCK_RANGE_MAX", ReadWrite, NO_FIELDS;
    M31PhyXcfgiLockRangeMin => m31_phy_xcfgi_lock_range_min, "M31_PHY_XCFGI_LOCK_RANGE_MIN", ReadWrite, NO_FIELDS;
    M31PhyXcfgObRsel => m31_phy_xcfg_ob_rsel, "M31_PHY_XCFG_OB_RSEL", ReadWrite, NO_FIELDS;
    M31PhyXcfgOcRsel => m31_phy_xcfg_oc_rsel, "M31_PHY_XCFG_OC_RSEL", ReadWrite, NO_FIELDS;
    M31PhyXcfgo => m31_phy_xcfgo, "M31_PHY_XCFGO", ReadOnly, NO_FIELDS;
    MxmInt => mxm_int, "MXM_INT", WriteOneToClear, MXM_INT_FIELDS;
    MxmIntEn => mxm_int_en, "MXM_INT_EN", ReadWrite, MXM_INT_EN_FIELDS;
    MxmSuspend => mxm_suspend, "MXM_SUSPEND", ReadWrite, MXM_SUSPEND_FIELDS;
    MxmRegA4 => mxm_reg_a4, "MXM_REG_A4", ReadWrite, MXM_REG_A4_FIELDS;
}

const FIFOS: [Register; NUM_ENDPOINTS] = [
    Register::Fifo0,
    Register::Fifo1,
    Register::Fifo2,
    Register::Fifo3,
    Register::Fifo4,
    Register::Fifo5,
    Register::Fifo6,
    Register::Fifo7,
    Register::Fifo8,
    Register::Fifo9,
    Register::Fifo10,
    Register::Fifo11,
    Register::Fifo12,
    Register::Fifo13,
    Register::Fifo14,
    Register::Fifo15,
];

impl Register {
    /// Look a register up by its data sheet name.
    ///
    /// Matching ignores ASCII case and accepts an optional `USBHS_` prefix.
    pub fn from_name(name: &str) -> Result<Register, AccessError> {
        let name = match name.get(..6) {
            Some(prefix) if prefix.eq_ignore_ascii_case("USBHS_") => &name[6..],
            _ => name,
        };
        Register::ALL
            .iter()
            .copied()
            .find(|register| register.name().eq_ignore_ascii_case(name))
            .ok_or(AccessError::UnknownRegister)
    }

    /// The first catalogued register at `offset`, if any.
    ///
    /// For shared cells this is the endpoint 0 view (CSR0, COUNT0).
    pub fn at_offset(offset: usize) -> Option<Register> {
        Register::ALL
            .iter()
            .copied()
            .find(|register| register.offset() == offset)
    }

    /// The FIFO port of `endpoint`.
    pub fn fifo(endpoint: usize) -> Result<Register, AccessError> {
        FIFOS
            .get(endpoint)
            .copied()
            .ok_or(AccessError::EndpointOutOfRange(endpoint))
    }

    /// Endpoint served by this FIFO port, or `None` for other registers.
    pub fn fifo_endpoint(self) -> Option<usize> {
        FIFOS.iter().position(|fifo| *fifo == self)
    }

    /// Look a field up by name, ignoring ASCII case. Aliases resolve to the
    /// field they stand for.
    pub fn field(self, name: &str) -> Result<&'static Field, AccessError> {
        let name = FIELD_ALIASES
            .iter()
            .find(|&&(register, alias, _)| register == self && alias.eq_ignore_ascii_case(name))
            .map_or(name, |&(_, _, field)| field);
        self.fields()
            .iter()
            .find(|field| field.name.eq_ignore_ascii_case(name))
            .ok_or(AccessError::UnknownField(self))
    }

    pub fn side_effect(self) -> SideEffect {
        match self {
            Register::IntrIn | Register::IntrOut | Register::IntrUsb => SideEffect::ClearOnRead,
            _ if self.fifo_endpoint().is_some() => SideEffect::FifoPort,
            _ => SideEffect::None,
        }
    }

    /// Which endpoints this register exists for.
    pub const fn bank(self) -> Bank {
        match self {
            Register::Csr0 | Register::Count0 => Bank::Control,
            Register::InMaxp
            | Register::InCsrL
            | Register::InCsrU
            | Register::OutMaxp
            | Register::OutCsrL
            | Register::OutCsrU
            | Register::OutCount => Bank::Data,
            _ => Bank::Unbanked,
        }
    }

    /// Whether the value seen at this register depends on INDEX.
    pub const fn is_endpoint_indexed(self) -> bool {
        !matches!(self.bank(), Bank::Unbanked)
    }

    /// Bits of this register that are cleared by writing a one.
    ///
    /// A read-modify-write must write zeros here so it does not discard
    /// pending flags it merely read back.
    pub fn write_one_to_clear_mask(self) -> u32 {
        self.fields()
            .iter()
            .filter(|field| field.access == Access::WriteOneToClear)
            .fold(0, |mask, field| mask | field.shifted_mask())
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "USBHS_{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_offsets() {
        let expected = [
            (Register::Faddr, 0x000),
            (Register::Power, 0x004),
            (Register::IntrIn, 0x008),
            (Register::IntrOut, 0x00C),
            (Register::IntrInEn, 0x010),
            (Register::IntrOutEn, 0x014),
            (Register::IntrUsb, 0x018),
            (Register::IntrUsbEn, 0x01C),
            (Register::Frame, 0x020),
            (Register::Index, 0x024),
            (Register::TestMode, 0x028),
            (Register::InMaxp, 0x02C),
            (Register::Csr0, 0x030),
            (Register::InCsrL, 0x030),
            (Register::InCsrU, 0x034),
            (Register::OutMaxp, 0x038),
            (Register::OutCsrL, 0x03C),
            (Register::OutCsrU, 0x040),
            (Register::Count0, 0x044),
            (Register::OutCount, 0x044),
            (Register::Fifo0, 0x080),
            (Register::Fifo15, 0x0BC),
            (Register::HwVers, 0x100),
            (Register::EpInfo, 0x110),
            (Register::RamInfo, 0x114),
            (Register::SoftReset, 0x118),
            (Register::EarlyDma, 0x11C),
            (Register::Ctuch, 0x12C),
            (Register::Cthsrtn, 0x130),
            (Register::MxmUsbReg00, 0x400),
            (Register::M31PhyXcfgo, 0x490),
            (Register::MxmInt, 0x498),
            (Register::MxmIntEn, 0x49C),
            (Register::MxmSuspend, 0x4A0),
            (Register::MxmRegA4, 0x4A4),
        ];
        for (register, offset) in expected {
            assert_eq!(register.offset(), offset, "{}", register);
        }
    }

    #[test]
    fn offsets_are_word_aligned_and_only_shared_cells_alias() {
        for (i, a) in Register::ALL.iter().enumerate() {
            assert_eq!(a.offset() % 4, 0, "{}", a);
            assert!(a.offset() < USBHS_SIZE, "{}", a);
            for b in &Register::ALL[i + 1..] {
                if a.offset() == b.offset() {
                    let pair = (*a, *b);
                    assert!(
                        pair == (Register::Csr0, Register::InCsrL)
                            || pair == (Register::Count0, Register::OutCount),
                        "{} aliases {}",
                        a,
                        b
                    );
                }
            }
        }
    }

    #[test]
    fn fields_fit_and_do_not_overlap() {
        for register in Register::ALL {
            let mut seen = 0u32;
            for field in register.fields() {
                assert_eq!(field.register, *register, "{}.{}", register, field.name);
                assert!(field.mask != 0);
                assert!(field.shift + field.width() as usize <= 32);
                assert_eq!(seen & field.shifted_mask(), 0, "{}.{}", register, field.name);
                seen |= field.shifted_mask();
                if !register.access().is_writable() {
                    assert!(!field.access.is_writable(), "{}.{}", register, field.name);
                }
            }
        }
    }

    #[test]
    fn names_resolve() {
        for register in Register::ALL {
            assert_eq!(Register::from_name(register.name()), Ok(*register));
        }
        assert_eq!(Register::from_name("usbhs_power"), Ok(Register::Power));
        assert_eq!(Register::from_name("USBHS_MXM_REG_A4"), Ok(Register::MxmRegA4));
        assert_eq!(Register::from_name("POWERS"), Err(AccessError::UnknownRegister));
        assert_eq!(Register::from_name(""), Err(AccessError::UnknownRegister));

        let field = Register::Power.field("en_suspendm").unwrap();
        assert_eq!((field.shift, field.mask), (0, 1));
        assert_eq!(Register::Power.field("SUSPEND_MODE_BIT"), Ok(field));
        assert_eq!(Register::Power.field("suspend_mode_bit"), Ok(field));
        assert_eq!(
            Register::IntrUsb.field("SUSPEND_MODE_BIT"),
            Err(AccessError::UnknownField(Register::IntrUsb))
        );
        assert_eq!(
            Register::Power.field("SOF"),
            Err(AccessError::UnknownField(Register::Power))
        );
        assert_eq!(
            Register::Fifo3.field("DATA"),
            Err(AccessError::UnknownField(Register::Fifo3))
        );
    }

    #[test]
    fn field_positions_follow_bitfields() {
        let maxp = Register::InMaxp.field("NUMPACKMINUS1").unwrap();
        assert_eq!((maxp.shift, maxp.width()), (11, 5));
        let rc = Register::HwVers.field("RC").unwrap();
        assert_eq!(rc.extract(0x8000), 1);
        let introut = Register::IntrOut.field("EP").unwrap();
        assert_eq!(introut.shifted_mask(), 0xFFFE);
        assert_eq!(Register::MxmInt.write_one_to_clear_mask(), 0b11);
        assert_eq!(Register::Power.write_one_to_clear_mask(), 0);
    }

    #[test]
    fn classification() {
        assert_eq!(Register::IntrUsb.side_effect(), SideEffect::ClearOnRead);
        assert_eq!(Register::Fifo7.side_effect(), SideEffect::FifoPort);
        assert_eq!(Register::IntrUsbEn.side_effect(), SideEffect::None);
        assert_eq!(Register::fifo(7), Ok(Register::Fifo7));
        assert_eq!(Register::fifo(16), Err(AccessError::EndpointOutOfRange(16)));
        assert_eq!(Register::Fifo12.fifo_endpoint(), Some(12));
        assert!(Register::OutCount.is_endpoint_indexed());
        assert!(!Register::Index.is_endpoint_indexed());
        assert_eq!(Register::Csr0.bank(), Bank::Control);
        assert_eq!(Register::Count0.bank(), Bank::Control);
        assert_eq!(Register::InCsrL.bank(), Bank::Data);
        assert_eq!(Register::OutCount.bank(), Bank::Data);
        assert_eq!(Register::Power.bank(), Bank::Unbanked);
        assert_eq!(Register::at_offset(0x030), Some(Register::Csr0));
        assert_eq!(Register::at_offset(0x048), None);
    }
}
