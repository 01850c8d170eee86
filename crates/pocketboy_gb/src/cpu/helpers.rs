use super::exec::Exec;
use super::{Bus, Cond, Flags, Reg16, Reg8};

impl<B: Bus> Exec<'_, B> {
    /// Read an 8-bit register, or memory at HL for [`Reg8::HlIndirect`].
    #[inline]
    pub(in crate::cpu) fn read_r8(&mut self, reg: Reg8) -> u8 {
        match reg {
            Reg8::B => self.regs.b,
            Reg8::C => self.regs.c,
            Reg8::D => self.regs.d,
            Reg8::E => self.regs.e,
            Reg8::H => self.regs.h,
            Reg8::L => self.regs.l,
            Reg8::HlIndirect => self.bus.read8(self.regs.hl()),
            Reg8::A => self.regs.a,
        }
    }

    #[inline]
    pub(in crate::cpu) fn write_r8(&mut self, reg: Reg8, value: u8) {
        match reg {
            Reg8::B => self.regs.b = value,
            Reg8::C => self.regs.c = value,
            Reg8::D => self.regs.d = value,
            Reg8::E => self.regs.e = value,
            Reg8::H => self.regs.h = value,
            Reg8::L => self.regs.l = value,
            Reg8::HlIndirect => self.bus.write8(self.regs.hl(), value),
            Reg8::A => self.regs.a = value,
        }
    }

    #[inline]
    pub(in crate::cpu) fn read_r16(&self, reg: Reg16) -> u16 {
        match reg {
            Reg16::BC => self.regs.bc(),
            Reg16::DE => self.regs.de(),
            Reg16::HL => self.regs.hl(),
            Reg16::SP => self.regs.sp,
        }
    }

    #[inline]
    pub(in crate::cpu) fn write_r16(&mut self, reg: Reg16, value: u16) {
        match reg {
            Reg16::BC => self.regs.set_bc(value),
            Reg16::DE => self.regs.set_de(value),
            Reg16::HL => self.regs.set_hl(value),
            Reg16::SP => self.regs.sp = value,
        }
    }

    #[inline]
    pub(in crate::cpu) fn fetch8(&mut self) -> u8 {
        let value = self.bus.read8(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    #[inline]
    pub(in crate::cpu) fn fetch16(&mut self) -> u16 {
        let lo = self.fetch8();
        let hi = self.fetch8();
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub(in crate::cpu) fn push16(&mut self, value: u16) {
        self.bus.push16(self.regs, value);
    }

    #[inline]
    pub(in crate::cpu) fn pop16(&mut self) -> u16 {
        self.bus.pop16(self.regs)
    }

    /// Evaluate an optional branch condition; `None` always holds.
    #[inline]
    pub(in crate::cpu) fn condition(&self, cc: Option<Cond>) -> bool {
        match cc {
            None => true,
            Some(Cond::NZ) => !self.regs.get_flag(Flags::Z),
            Some(Cond::Z) => self.regs.get_flag(Flags::Z),
            Some(Cond::NC) => !self.regs.get_flag(Flags::C),
            Some(Cond::C) => self.regs.get_flag(Flags::C),
        }
    }

    /// Relative jump used by JR / JR cc.
    ///
    /// The displacement is a signed 8-bit offset relative to the address
    /// following the operand. The operand is consumed whether or not the
    /// branch is taken.
    pub(in crate::cpu) fn jr(&mut self, cc: Option<Cond>) -> bool {
        let offset = self.fetch8() as i8;
        let taken = self.condition(cc);
        if taken {
            self.regs.pc = self.regs.pc.wrapping_add_signed(offset as i16);
        }
        taken
    }

    /// Absolute jump used by JP / JP cc.
    pub(in crate::cpu) fn jp_cond(&mut self, cc: Option<Cond>) -> bool {
        let addr = self.fetch16();
        let taken = self.condition(cc);
        if taken {
            self.regs.pc = addr;
        }
        taken
    }

    /// CALL / CALL cc: push the address of the next instruction and jump.
    pub(in crate::cpu) fn call_cond(&mut self, cc: Option<Cond>) -> bool {
        let addr = self.fetch16();
        let taken = self.condition(cc);
        if taken {
            let ret = self.regs.pc;
            self.push16(ret);
            self.regs.pc = addr;
        }
        taken
    }

    pub(in crate::cpu) fn ret_cond(&mut self, cc: Option<Cond>) -> bool {
        let taken = self.condition(cc);
        if taken {
            self.regs.pc = self.pop16();
        }
        taken
    }
}
