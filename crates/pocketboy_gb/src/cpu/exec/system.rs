use crate::cpu::exec::Exec;
use crate::cpu::Bus;

impl<B: Bus> Exec<'_, B> {
    pub(super) fn exec_halt(&mut self) {
        self.regs.halted = true;
    }

    /// STOP is two bytes long. Without a speed switch or a low-power state
    /// to enter, it parks the processor exactly like HALT.
    pub(super) fn exec_stop(&mut self) {
        let _padding = self.fetch8();
        self.regs.halted = true;
    }

    pub(super) fn exec_di(&mut self) {
        self.regs.ime = false;
        self.regs.ime_pending = false;
    }

    /// IME becomes 1 once the instruction after EI has completed.
    pub(super) fn exec_ei(&mut self) {
        self.regs.ime_pending = true;
    }
}
