mod service;

use bitflags::bitflags;

pub use service::{service_interrupt, Serviced, INTERRUPT_CYCLES};

/// Interrupt request register.
pub const IF_ADDR: u16 = 0xFF0F;
/// Interrupt enable register.
pub const IE_ADDR: u16 = 0xFFFF;

bitflags! {
    /// Bit layout shared by IE (0xFFFF) and IF (0xFF0F).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct InterruptFlags: u8 {
        const VBLANK = 1 << 0;
        const LCD_STAT = 1 << 1;
        const TIMER = 1 << 2;
        const SERIAL = 1 << 3;
        const JOYPAD = 1 << 4;
    }
}

impl InterruptFlags {
    /// The lowest-numbered set bit, which is also the highest priority one.
    pub fn highest_priority(self) -> Option<Interrupt> {
        if self.is_empty() {
            return None;
        }
        Interrupt::from_index(self.bits().trailing_zeros() as u8)
    }
}

/// Interrupt sources, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interrupt {
    VBlank = 0,
    LcdStat = 1,
    Timer = 2,
    Serial = 3,
    Joypad = 4,
}

impl Interrupt {
    pub const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::LcdStat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    #[inline]
    pub fn flag(self) -> InterruptFlags {
        InterruptFlags::from_bits_truncate(1 << (self as u8))
    }

    /// Address the processor jumps to when servicing this interrupt.
    #[inline]
    pub fn handler_addr(self) -> u16 {
        0x0040 + (self as u16) * 8
    }
}
