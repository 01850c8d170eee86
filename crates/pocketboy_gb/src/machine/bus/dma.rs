use super::MemoryBus;
use crate::machine::DMA;

/// OAM base address.
const OAM: u16 = 0xFE00;
const OAM_LEN: u16 = 0xA0;

impl MemoryBus {
    /// OAM DMA: copy XX00..XX9F to FE00..FE9F immediately, one byte at a
    /// time through the processor's read path.
    pub(super) fn do_oam_dma(&mut self, value: u8) {
        self.memory[DMA as usize] = value;
        let base = (value as u16) << 8;
        for i in 0..OAM_LEN {
            let byte = self.read8_mmio(base.wrapping_add(i));
            self.memory[(OAM + i) as usize] = byte;
        }
    }
}
