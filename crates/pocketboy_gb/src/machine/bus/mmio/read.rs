use super::super::MemoryBus;
use crate::machine::P1;

impl MemoryBus {
    pub(super) fn read8_mmio_impl(&self, addr: u16) -> u8 {
        match addr {
            // Echo RAM mirrors 0xC000..0xDDFF.
            0xE000..=0xFDFF => self.memory[(addr - 0x2000) as usize],

            P1 => self.read_joyp(),

            _ => self.memory[addr as usize],
        }
    }
}
