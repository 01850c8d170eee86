use super::MemoryBus;

impl MemoryBus {
    pub(super) fn read_joyp(&self) -> u8 {
        // Bits 7-6 always read as 1.
        let select = self.joyp_select & 0x30;
        let held = self.joypad.snapshot();

        // A held button pulls its line low.
        let mut low = 0x0F;
        if (select & 0x10) == 0 {
            low &= !held & 0x0F;
        }
        if (select & 0x20) == 0 {
            low &= !(held >> 4) & 0x0F;
        }
        0xC0 | select | low
    }

    pub(super) fn write_joyp(&mut self, value: u8) {
        // Only the two select bits are writable.
        self.joyp_select = value & 0x30;
    }
}
