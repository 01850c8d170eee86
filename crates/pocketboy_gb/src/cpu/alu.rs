use super::{AluOp, CbOp, Flags, Registers};

/// Result byte together with the flags the operation produced.
type Outcome = (u8, Flags);

#[inline]
fn zero_flag(value: u8) -> Flags {
    if value == 0 {
        Flags::Z
    } else {
        Flags::empty()
    }
}

/// `a + value + carry`. H and C come from bits 3 and 7.
fn add8(a: u8, value: u8, carry: u8) -> Outcome {
    let sum = a as u16 + value as u16 + carry as u16;
    let result = sum as u8;
    let mut flags = zero_flag(result);
    flags.set(Flags::H, (a & 0x0F) + (value & 0x0F) + carry > 0x0F);
    flags.set(Flags::C, sum > 0xFF);
    (result, flags)
}

/// `a - value - carry`. H and C report a borrow.
fn sub8(a: u8, value: u8, carry: u8) -> Outcome {
    let result = a.wrapping_sub(value).wrapping_sub(carry);
    let mut flags = zero_flag(result) | Flags::N;
    flags.set(Flags::H, (a & 0x0F) < (value & 0x0F) + carry);
    flags.set(Flags::C, (a as u16) < value as u16 + carry as u16);
    (result, flags)
}

/// The eight rotate/shift/swap forms of the CB table. `None` for BIT, RES
/// and SET.
fn shift8(op: CbOp, value: u8, carry_in: bool) -> Option<Outcome> {
    let (result, carry_out) = match op {
        CbOp::Rlc => (value.rotate_left(1), value & 0x80 != 0),
        CbOp::Rrc => (value.rotate_right(1), value & 0x01 != 0),
        CbOp::Rl => ((value << 1) | carry_in as u8, value & 0x80 != 0),
        CbOp::Rr => ((value >> 1) | ((carry_in as u8) << 7), value & 0x01 != 0),
        CbOp::Sla => (value << 1, value & 0x80 != 0),
        CbOp::Sra => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
        CbOp::Swap => (value.rotate_left(4), false),
        CbOp::Srl => (value >> 1, value & 0x01 != 0),
        CbOp::Bit(_) | CbOp::Res(_) | CbOp::Set(_) => return None,
    };
    let mut flags = zero_flag(result);
    flags.set(Flags::C, carry_out);
    Some((result, flags))
}

impl Registers {
    #[inline]
    fn carry(&self) -> u8 {
        self.get_flag(Flags::C) as u8
    }

    /// One of the eight `op A,value` forms. CP only updates flags.
    pub fn alu(&mut self, op: AluOp, value: u8) {
        let a = self.a;
        let (result, flags) = match op {
            AluOp::Add => add8(a, value, 0),
            AluOp::Adc => add8(a, value, self.carry()),
            AluOp::Sub | AluOp::Cp => sub8(a, value, 0),
            AluOp::Sbc => sub8(a, value, self.carry()),
            AluOp::And => (a & value, zero_flag(a & value) | Flags::H),
            AluOp::Xor => (a ^ value, zero_flag(a ^ value)),
            AluOp::Or => (a | value, zero_flag(a | value)),
        };
        if op != AluOp::Cp {
            self.a = result;
        }
        self.set_flags(flags);
    }

    /// Rotate, shift or swap `value` as the CB table does and return the
    /// result. N and H are cleared. BIT/RES/SET pass `value` through.
    pub fn shift(&mut self, op: CbOp, value: u8) -> u8 {
        match shift8(op, value, self.get_flag(Flags::C)) {
            Some((result, flags)) => {
                self.set_flags(flags);
                result
            }
            None => value,
        }
    }

    /// BIT b: Z set when the bit is clear. C is kept.
    pub fn test_bit(&mut self, bit: u8, value: u8) {
        let mut flags = self.flags() & Flags::C;
        flags |= zero_flag(value & (1 << bit)) | Flags::H;
        self.set_flags(flags);
    }

    /// INC r. C is kept.
    pub fn inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        let mut flags = (self.flags() & Flags::C) | zero_flag(result);
        flags.set(Flags::H, value & 0x0F == 0x0F);
        self.set_flags(flags);
        result
    }

    /// DEC r. C is kept.
    pub fn dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        let mut flags = (self.flags() & Flags::C) | zero_flag(result) | Flags::N;
        flags.set(Flags::H, value & 0x0F == 0x00);
        self.set_flags(flags);
        result
    }

    /// ADD HL,rr. Z is kept.
    pub fn add_hl(&mut self, value: u16) {
        let hl = self.hl();
        let (result, carry) = hl.overflowing_add(value);
        let mut flags = self.flags() & Flags::Z;
        flags.set(Flags::H, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
        flags.set(Flags::C, carry);
        self.set_flags(flags);
        self.set_hl(result);
    }

    /// `base + e8` for ADD SP,e8 and LD HL,SP+e8. H and C come from the
    /// unsigned low byte; Z and N are cleared.
    pub fn add_sp_offset(&mut self, base: u16, offset: u8) -> u16 {
        let (_, low_flags) = add8(base as u8, offset, 0);
        self.set_flags(low_flags & (Flags::H | Flags::C));
        base.wrapping_add_signed(offset as i8 as i16)
    }

    /// DAA, from the flags left by the last add or subtract.
    pub fn daa(&mut self) {
        let flags = self.flags();
        let mut correction = 0u8;
        let mut carry = false;

        if flags.contains(Flags::H) || (!flags.contains(Flags::N) && self.a & 0x0F > 0x09) {
            correction |= 0x06;
        }
        if flags.contains(Flags::C) || (!flags.contains(Flags::N) && self.a > 0x99) {
            correction |= 0x60;
            carry = true;
        }

        self.a = if flags.contains(Flags::N) {
            self.a.wrapping_sub(correction)
        } else {
            self.a.wrapping_add(correction)
        };

        let mut out = (flags & Flags::N) | zero_flag(self.a);
        out.set(Flags::C, carry);
        self.set_flags(out);
    }
}
