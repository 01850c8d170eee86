use crate::cpu::exec::Exec;
use crate::cpu::{Bus, Indirect, Reg16, Reg8};

impl<B: Bus> Exec<'_, B> {
    pub(super) fn exec_ld_r_r(&mut self, dst: Reg8, src: Reg8) {
        let value = self.read_r8(src);
        self.write_r8(dst, value);
    }

    pub(super) fn exec_ld_r_d8(&mut self, dst: Reg8) {
        let value = self.fetch8();
        self.write_r8(dst, value);
    }

    pub(super) fn exec_ld_rr_d16(&mut self, dst: Reg16) {
        let value = self.fetch16();
        self.write_r16(dst, value);
    }

    /// Resolve a register-indirect address, applying the HL post-increment
    /// or post-decrement.
    fn indirect_addr(&mut self, ind: Indirect) -> u16 {
        match ind {
            Indirect::BC => self.regs.bc(),
            Indirect::DE => self.regs.de(),
            Indirect::HlInc => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            Indirect::HlDec => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }

    pub(super) fn exec_ld_indirect_a(&mut self, ind: Indirect) {
        let addr = self.indirect_addr(ind);
        self.bus.write8(addr, self.regs.a);
    }

    pub(super) fn exec_ld_a_indirect(&mut self, ind: Indirect) {
        let addr = self.indirect_addr(ind);
        self.regs.a = self.bus.read8(addr);
    }

    pub(super) fn exec_ld_a16_sp(&mut self) {
        let addr = self.fetch16();
        self.bus.write16(addr, self.regs.sp);
    }

    pub(super) fn exec_ldh_a8_a(&mut self) {
        let addr = 0xFF00 | self.fetch8() as u16;
        self.bus.write8(addr, self.regs.a);
    }

    pub(super) fn exec_ldh_a_a8(&mut self) {
        let addr = 0xFF00 | self.fetch8() as u16;
        self.regs.a = self.bus.read8(addr);
    }

    pub(super) fn exec_ldh_c_a(&mut self) {
        let addr = 0xFF00 | self.regs.c as u16;
        self.bus.write8(addr, self.regs.a);
    }

    pub(super) fn exec_ldh_a_c(&mut self) {
        let addr = 0xFF00 | self.regs.c as u16;
        self.regs.a = self.bus.read8(addr);
    }

    pub(super) fn exec_ld_a16_a(&mut self) {
        let addr = self.fetch16();
        self.bus.write8(addr, self.regs.a);
    }

    pub(super) fn exec_ld_a_a16(&mut self) {
        let addr = self.fetch16();
        self.regs.a = self.bus.read8(addr);
    }

    pub(super) fn exec_ld_sp_hl(&mut self) {
        self.regs.sp = self.regs.hl();
    }

    pub(super) fn exec_ld_hl_sp_e8(&mut self) {
        let offset = self.fetch8();
        let sp = self.regs.sp;
        let value = self.regs.add_sp_offset(sp, offset);
        self.regs.set_hl(value);
    }

    pub(super) fn exec_add_sp_e8(&mut self) {
        let offset = self.fetch8();
        let sp = self.regs.sp;
        self.regs.sp = self.regs.add_sp_offset(sp, offset);
    }
}
