use bitflags::bitflags;

bitflags! {
    /// Condition bits in the high nibble of F. The low nibble reads as zero.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        const Z = 1 << 7;
        /// Last operation was a subtraction.
        const N = 1 << 6;
        /// Carry out of bit 3 (bit 11 for 16-bit adds).
        const H = 1 << 5;
        const C = 1 << 4;
    }
}

/// LR35902 register file.
///
/// Holds the interrupt master enable, halt state and EI latch next to the
/// data registers because instructions mutate all of them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
    pub ime: bool,
    pub halted: bool,
    /// EI ran; IME turns on after the next instruction.
    pub ime_pending: bool,
}

macro_rules! register_pair {
    ($get:ident, $set:ident, $hi:ident, $lo:ident) => {
        #[inline]
        pub fn $get(&self) -> u16 {
            u16::from_be_bytes([self.$hi, self.$lo])
        }

        #[inline]
        pub fn $set(&mut self, value: u16) {
            [self.$hi, self.$lo] = value.to_be_bytes();
        }
    };
}

impl Registers {
    register_pair!(bc, set_bc, b, c);
    register_pair!(de, set_de, d, e);
    register_pair!(hl, set_hl, h, l);

    #[inline]
    pub fn af(&self) -> u16 {
        u16::from_be_bytes([self.a, self.flags().bits()])
    }

    /// POP AF drops whatever lands in the low nibble of F.
    #[inline]
    pub fn set_af(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.a = a;
        self.set_flags(Flags::from_bits_truncate(f));
    }

    #[inline]
    pub fn flags(&self) -> Flags {
        Flags::from_bits_truncate(self.f)
    }

    #[inline]
    pub fn set_flags(&mut self, flags: Flags) {
        self.f = flags.bits();
    }

    #[inline]
    pub fn get_flag(&self, flag: Flags) -> bool {
        self.flags().contains(flag)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flags, value: bool) {
        let mut flags = self.flags();
        flags.set(flag, value);
        self.set_flags(flags);
    }
}
