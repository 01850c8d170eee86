use super::exec::Exec;
use super::{decode, service_interrupt, Bus, Cpu, Registers, IE_ADDR, IF_ADDR};
use crate::{Error, Result};

/// Cost of one idle step while halted.
const HALT_CYCLES: u32 = 4;

impl Cpu {
    /// Run one step: an interrupt dispatch, one idle HALT slice, or one
    /// instruction. Returns the T-cycles consumed.
    ///
    /// A halted processor wakes as soon as any enabled interrupt is
    /// requested, even with IME clear. An EI executed by the previous step
    /// takes effect once this step's instruction has completed.
    ///
    /// Unused opcodes return [`Error::UnknownOpcode`] and leave PC on the
    /// offending byte.
    pub fn step<B: Bus>(&mut self, regs: &mut Registers, bus: &mut B) -> Result<u32> {
        if regs.halted && bus.read8(IE_ADDR) & bus.read8(IF_ADDR) & 0x1F != 0 {
            regs.halted = false;
        }

        if let Some(serviced) = service_interrupt(regs, bus) {
            if let Some(tracer) = self.tracer.as_mut() {
                tracer.on_interrupt(regs, &serviced);
            }
            return Ok(serviced.cycles);
        }

        if regs.halted {
            return Ok(HALT_CYCLES);
        }

        if let Some(tracer) = self.tracer.as_mut() {
            tracer.before_fetch(regs);
        }

        let enable_ime = regs.ime_pending;
        let addr = regs.pc;
        let opcode = bus.read8(addr);
        let Some(instruction) = decode(opcode) else {
            return Err(Error::UnknownOpcode { opcode, addr });
        };
        regs.pc = addr.wrapping_add(1);

        let (cycles, executed) = Exec::new(regs, bus).execute(instruction);

        // DI in this slot cancels the pending enable.
        if enable_ime && regs.ime_pending {
            regs.ime = true;
            regs.ime_pending = false;
        }

        if let Some(tracer) = self.tracer.as_mut() {
            tracer.after_execute(regs, addr, executed, cycles);
        }
        Ok(cycles)
    }
}
