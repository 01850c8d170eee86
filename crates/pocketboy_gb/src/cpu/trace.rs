use std::fmt;

use super::{CbInstruction, Instruction, Registers, Serviced};

/// What a completed step executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Executed {
    Main(Instruction),
    Prefixed(CbInstruction),
}

impl fmt::Display for Executed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Executed::Main(instruction) => fmt::Display::fmt(instruction, f),
            Executed::Prefixed(instruction) => fmt::Display::fmt(instruction, f),
        }
    }
}

/// Observer for processor activity.
///
/// All hooks default to doing nothing, so an implementor only overrides the
/// events it cares about.
pub trait Tracer {
    /// Called before the opcode at `regs.pc` is fetched.
    fn before_fetch(&mut self, _regs: &Registers) {}

    /// Called once an instruction fetched from `addr` has run.
    fn after_execute(&mut self, _regs: &Registers, _addr: u16, _executed: Executed, _cycles: u32) {}

    /// Called after an interrupt was dispatched instead of an instruction.
    fn on_interrupt(&mut self, _regs: &Registers, _serviced: &Serviced) {}
}

/// Tracer that writes one `log::trace!` line per executed instruction.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn after_execute(&mut self, regs: &Registers, addr: u16, executed: Executed, cycles: u32) {
        log::trace!(
            concat!(
                "{:04X}: {} ({}) ",
                "A={:02X} F={:02X} BC={:04X} DE={:04X} HL={:04X} SP={:04X} PC={:04X}",
            ),
            addr,
            executed,
            cycles,
            regs.a,
            regs.f,
            regs.bc(),
            regs.de(),
            regs.hl(),
            regs.sp,
            regs.pc,
        );
    }

    fn on_interrupt(&mut self, regs: &Registers, serviced: &Serviced) {
        log::trace!(
            "interrupt {:?} from {:04X} -> {:04X}",
            serviced.interrupt,
            serviced.return_addr,
            regs.pc,
        );
    }
}
