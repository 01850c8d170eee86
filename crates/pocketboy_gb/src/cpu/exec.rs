mod alu;
mod incdec;
mod ld;
mod stack;
mod system;

use super::{Bus, Executed, Instruction, Registers};

/// Execution context for a single instruction.
///
/// Borrows the register file and the bus for the duration of one step; the
/// `exec_*` handlers in the submodules are methods on this context.
pub(in crate::cpu) struct Exec<'a, B: Bus> {
    pub(in crate::cpu) regs: &'a mut Registers,
    pub(in crate::cpu) bus: &'a mut B,
}

impl<'a, B: Bus> Exec<'a, B> {
    pub(in crate::cpu) fn new(regs: &'a mut Registers, bus: &'a mut B) -> Self {
        Self { regs, bus }
    }

    /// Run a decoded instruction whose opcode byte has already been consumed.
    ///
    /// Returns the T-cycle cost and what was executed (the CB table entry
    /// for prefixed opcodes).
    pub(in crate::cpu) fn execute(&mut self, instruction: Instruction) -> (u32, Executed) {
        use Instruction::*;

        let mut taken = true;
        match instruction {
            Nop => {}
            Stop => self.exec_stop(),
            Halt => self.exec_halt(),
            Di => self.exec_di(),
            Ei => self.exec_ei(),

            Ld { dst, src } => self.exec_ld_r_r(dst, src),
            LdImm(dst) => self.exec_ld_r_d8(dst),
            LdImm16(dst) => self.exec_ld_rr_d16(dst),
            StoreA(ind) => self.exec_ld_indirect_a(ind),
            LoadA(ind) => self.exec_ld_a_indirect(ind),
            StoreSp => self.exec_ld_a16_sp(),
            StoreHigh => self.exec_ldh_a8_a(),
            LoadHigh => self.exec_ldh_a_a8(),
            StoreHighC => self.exec_ldh_c_a(),
            LoadHighC => self.exec_ldh_a_c(),
            StoreAbs => self.exec_ld_a16_a(),
            LoadAbs => self.exec_ld_a_a16(),
            LdSpHl => self.exec_ld_sp_hl(),
            LdHlSpOffset => self.exec_ld_hl_sp_e8(),
            AddSpOffset => self.exec_add_sp_e8(),

            Alu(op, src) => {
                let value = self.read_r8(src);
                self.exec_alu(op, value);
            }
            AluImm(op) => {
                let value = self.fetch8();
                self.exec_alu(op, value);
            }
            Inc(reg) => self.exec_inc_r(reg),
            Dec(reg) => self.exec_dec_r(reg),
            Inc16(reg) => self.exec_inc16(reg),
            Dec16(reg) => self.exec_dec16(reg),
            AddHl(reg) => self.exec_add_hl(reg),
            Rlca | Rrca | Rla | Rra => self.exec_rotate_a(instruction),
            Daa => self.regs.daa(),
            Cpl => self.exec_cpl(),
            Scf => self.exec_scf(),
            Ccf => self.exec_ccf(),

            Jr(cc) => taken = self.jr(cc),
            Jp(cc) => taken = self.jp_cond(cc),
            JpHl => self.regs.pc = self.regs.hl(),
            Call(cc) => taken = self.call_cond(cc),
            Ret(cc) => taken = self.ret_cond(cc),
            Reti => self.exec_reti(),
            Rst(vector) => self.exec_rst(vector),
            Push(reg) => self.exec_push(reg),
            Pop(reg) => self.exec_pop(reg),

            PrefixCb => {
                let cb = self.step_cb();
                return (cb.cycles(), Executed::Prefixed(cb));
            }
        }

        (instruction.cycles(taken), Executed::Main(instruction))
    }
}
