use super::{Interrupt, InterruptFlags, IE_ADDR, IF_ADDR};
use crate::cpu::{Bus, Registers};

/// Cost of an interrupt dispatch (5 M-cycles).
pub const INTERRUPT_CYCLES: u32 = 20;

/// Outcome of a successful interrupt dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Serviced {
    pub interrupt: Interrupt,
    /// PC value that was pushed onto the stack.
    pub return_addr: u16,
    pub cycles: u32,
}

/// Dispatch the highest priority pending interrupt, if IME allows it.
///
/// On dispatch IME (and any pending EI) is cleared, HALT is left, the IF bit
/// of the serviced source is acknowledged, PC is pushed and execution moves
/// to the source's handler address.
pub fn service_interrupt<B: Bus>(regs: &mut Registers, bus: &mut B) -> Option<Serviced> {
    if !regs.ime {
        return None;
    }

    let ie = bus.read8(IE_ADDR);
    let iflags = bus.read8(IF_ADDR);
    let interrupt = InterruptFlags::from_bits_truncate(ie & iflags).highest_priority()?;

    regs.ime = false;
    regs.ime_pending = false;
    regs.halted = false;

    bus.write8(IF_ADDR, iflags & !interrupt.flag().bits());

    let return_addr = regs.pc;
    bus.push16(regs, return_addr);
    regs.pc = interrupt.handler_addr();

    log::debug!(
        "interrupt {:?}: vector=0x{:04X} ret=0x{:04X} sp=0x{:04X} IF=0x{:02X} IE=0x{:02X}",
        interrupt,
        regs.pc,
        return_addr,
        regs.sp,
        iflags & 0x1F,
        ie,
    );

    Some(Serviced {
        interrupt,
        return_addr,
        cycles: INTERRUPT_CYCLES,
    })
}
