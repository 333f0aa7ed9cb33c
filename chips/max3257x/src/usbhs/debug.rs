// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! `Debug` renderings of raw register words, used by access tracing.

use core::fmt;

pub struct HexBuf<'a>(pub &'a [u8]);

impl fmt::Debug for HexBuf<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, b) in self.0.iter().enumerate() {
            write!(f, "{}{:02x}", if i > 0 { " " } else { "" }, b)?;
        }
        write!(f, "]")
    }
}

macro_rules! debug_flags {
    ( $tyname:ident {$( $flag:ident = $offset:expr; )*} ) => {

        pub struct $tyname(pub u32);

        impl fmt::Debug for $tyname {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                let w: u32 = self.0;
                write!(f, "{{")?;
                $(
                    if w & (1 << $offset) != 0 {
                        write!(f, " {}", stringify!($flag))?;
                    }
                )*
                write!(f, " }}")
            }
        }
    };
}

debug_flags!(IntrUsbFlags {
    SUSPEND = 0;
    RESUME = 1;
    RESET = 2;
    SOF = 3;
});

debug_flags!(MxmIntFlags {
    VBUS = 0;
    NOVBUS = 1;
});

/// One flag per endpoint, as found in INTRIN and INTROUT.
pub struct EndpointFlags(pub u32);

impl fmt::Debug for EndpointFlags {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for ep in 0..16 {
            if self.0 & (1 << ep) != 0 {
                write!(f, " EP{}", ep)?;
            }
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_words_render_set_bits() {
        assert_eq!(format!("{:?}", IntrUsbFlags(0b0101)), "{ SUSPEND RESET }");
        assert_eq!(format!("{:?}", IntrUsbFlags(0)), "{ }");
        assert_eq!(format!("{:?}", MxmIntFlags(0b10)), "{ NOVBUS }");
        assert_eq!(
            format!("{:?}", EndpointFlags(0b1000_0000_0000_1001)),
            "{ EP0 EP3 EP15 }"
        );
        assert_eq!(format!("{:?}", EndpointFlags(1 << 16)), "{ }");
    }

    #[test]
    fn buffers_render_as_hex_bytes() {
        assert_eq!(format!("{:?}", HexBuf(&[0x01, 0xab, 0x00])), "[01 ab 00]");
        assert_eq!(format!("{:?}", HexBuf(&[])), "[]");
    }
}
