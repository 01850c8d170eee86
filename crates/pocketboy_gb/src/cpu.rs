//! Sharp LR35902 processor core.
//!
//! The core itself holds no machine state: registers live in [`Registers`]
//! and memory behind a [`Bus`], and both are lent to [`Cpu::step`] for the
//! duration of a single instruction. The caller then advances the timer and
//! PPU with the returned cycle count.

mod alu;
mod bus;
mod cb;
mod exec;
mod helpers;
mod init;
mod instruction;
mod interrupts;
mod regs;
mod step;
mod trace;

pub use bus::Bus;
pub use instruction::{
    decode, decode_cb, AluOp, CbInstruction, CbOp, Cond, Indirect, Instruction, Reg16,
    Reg16Stack, Reg8,
};
pub use interrupts::{
    service_interrupt, Interrupt, InterruptFlags, Serviced, IE_ADDR, IF_ADDR, INTERRUPT_CYCLES,
};
pub use regs::{Flags, Registers};
pub use trace::{Executed, LogTracer, Tracer};

/// Fetch-decode-execute engine.
///
/// The only thing a `Cpu` owns is its optional tracing hook; see
/// [`Cpu::step`] for the per-step contract.
#[derive(Default)]
pub struct Cpu {
    tracer: Option<Box<dyn Tracer>>,
}
