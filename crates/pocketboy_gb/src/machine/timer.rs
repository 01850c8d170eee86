use super::{MemoryBus, DIV, TAC, TIMA, TMA};
use crate::cpu::InterruptFlags;

/// Cycles per DIV increment.
const DIV_PERIOD: u32 = 256;

/// TAC bit 2.
const TAC_ENABLE: u8 = 0x04;

/// Divider and programmable counter.
///
/// Both registers live on the bus; the timer only keeps the cycles that
/// have not yet added up to a full increment. The two accumulators are
/// independent of each other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timer {
    div_cycles: u32,
    tima_cycles: u32,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// TIMA increment period selected by TAC bits 0-1.
    #[inline]
    pub fn tima_period(tac: u8) -> u32 {
        match tac & 0x03 {
            0x00 => 1024,
            0x01 => 16,
            0x02 => 64,
            _ => 256,
        }
    }

    /// Advance by `cycles` T-cycles.
    pub fn update(&mut self, cycles: u32, bus: &mut MemoryBus) {
        self.div_cycles += cycles;
        while self.div_cycles >= DIV_PERIOD {
            self.div_cycles -= DIV_PERIOD;
            let div = bus.peek(DIV).wrapping_add(1);
            bus.poke(DIV, div);
        }

        let tac = bus.peek(TAC);
        if tac & TAC_ENABLE == 0 {
            return;
        }

        let period = Self::tima_period(tac);
        self.tima_cycles += cycles;
        while self.tima_cycles >= period {
            self.tima_cycles -= period;
            Self::increment_tima(bus);
        }
    }

    /// On overflow TIMA is reloaded from TMA and the timer interrupt is
    /// requested.
    fn increment_tima(bus: &mut MemoryBus) {
        match bus.peek(TIMA).checked_add(1) {
            Some(next) => bus.poke(TIMA, next),
            None => {
                let tma = bus.peek(TMA);
                bus.poke(TIMA, tma);
                bus.request_interrupt(InterruptFlags::TIMER);
            }
        }
    }
}
