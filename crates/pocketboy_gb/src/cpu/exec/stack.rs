use crate::cpu::exec::Exec;
use crate::cpu::{Bus, Reg16Stack};

impl<B: Bus> Exec<'_, B> {
    pub(super) fn exec_push(&mut self, reg: Reg16Stack) {
        let value = match reg {
            Reg16Stack::BC => self.regs.bc(),
            Reg16Stack::DE => self.regs.de(),
            Reg16Stack::HL => self.regs.hl(),
            Reg16Stack::AF => self.regs.af(),
        };
        self.push16(value);
    }

    /// POP AF drops the low nibble of F.
    pub(super) fn exec_pop(&mut self, reg: Reg16Stack) {
        let value = self.pop16();
        match reg {
            Reg16Stack::BC => self.regs.set_bc(value),
            Reg16Stack::DE => self.regs.set_de(value),
            Reg16Stack::HL => self.regs.set_hl(value),
            Reg16Stack::AF => self.regs.set_af(value),
        }
    }

    pub(super) fn exec_rst(&mut self, vector: u8) {
        let ret = self.regs.pc;
        self.push16(ret);
        self.regs.pc = vector as u16;
    }

    /// RETI enables interrupts immediately, unlike EI.
    pub(super) fn exec_reti(&mut self) {
        self.regs.pc = self.pop16();
        self.regs.ime = true;
    }
}
