use crate::cpu::exec::Exec;
use crate::cpu::{AluOp, Bus, CbOp, Flags, Instruction};

impl<B: Bus> Exec<'_, B> {
    pub(super) fn exec_alu(&mut self, op: AluOp, value: u8) {
        self.regs.alu(op, value);
    }

    /// RLCA/RRCA/RLA/RRA: the CB rotate on A with Z forced clear.
    pub(super) fn exec_rotate_a(&mut self, instruction: Instruction) {
        let op = match instruction {
            Instruction::Rlca => CbOp::Rlc,
            Instruction::Rrca => CbOp::Rrc,
            Instruction::Rla => CbOp::Rl,
            Instruction::Rra => CbOp::Rr,
            _ => return,
        };
        let a = self.regs.a;
        self.regs.a = self.regs.shift(op, a);
        self.regs.set_flag(Flags::Z, false);
    }

    pub(super) fn exec_cpl(&mut self) {
        self.regs.a = !self.regs.a;
        self.regs.set_flag(Flags::N | Flags::H, true);
    }

    pub(super) fn exec_scf(&mut self) {
        let kept = self.regs.flags() & Flags::Z;
        self.regs.set_flags(kept | Flags::C);
    }

    pub(super) fn exec_ccf(&mut self) {
        let flags = self.regs.flags();
        self.regs.set_flags((flags & Flags::Z) | ((flags & Flags::C) ^ Flags::C));
    }
}
