use crate::cpu::exec::Exec;
use crate::cpu::{Bus, Reg16, Reg8};

impl<B: Bus> Exec<'_, B> {
    pub(super) fn exec_inc_r(&mut self, reg: Reg8) {
        let value = self.read_r8(reg);
        let result = self.regs.inc8(value);
        self.write_r8(reg, result);
    }

    pub(super) fn exec_dec_r(&mut self, reg: Reg8) {
        let value = self.read_r8(reg);
        let result = self.regs.dec8(value);
        self.write_r8(reg, result);
    }

    // 16-bit INC/DEC leave the flags alone.

    pub(super) fn exec_inc16(&mut self, reg: Reg16) {
        let value = self.read_r16(reg).wrapping_add(1);
        self.write_r16(reg, value);
    }

    pub(super) fn exec_dec16(&mut self, reg: Reg16) {
        let value = self.read_r16(reg).wrapping_sub(1);
        self.write_r16(reg, value);
    }

    pub(super) fn exec_add_hl(&mut self, reg: Reg16) {
        let value = self.read_r16(reg);
        self.regs.add_hl(value);
    }
}
