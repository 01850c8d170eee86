use super::Registers;

/// Abstraction over the Game Boy bus (memory and IO) as seen by the CPU.
///
/// Implementors only need the byte accessors; word and stack helpers are
/// derived from them so every access goes through the same side-effect path.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Little-endian word read: low byte at `addr`, high byte at `addr + 1`.
    fn read16(&mut self, addr: u16) -> u16 {
        let lo = self.read8(addr);
        let hi = self.read8(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Little-endian word write.
    fn write16(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write8(addr, lo);
        self.write8(addr.wrapping_add(1), hi);
    }

    /// Push a word onto the stack addressed by `regs.sp`.
    ///
    /// The stack grows downward; afterwards memory[SP] holds the low byte
    /// and memory[SP+1] the high byte.
    fn push16(&mut self, regs: &mut Registers, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        regs.sp = regs.sp.wrapping_sub(1);
        self.write8(regs.sp, hi);
        regs.sp = regs.sp.wrapping_sub(1);
        self.write8(regs.sp, lo);
    }

    /// Pop a word pushed by [`Bus::push16`].
    fn pop16(&mut self, regs: &mut Registers) -> u16 {
        let lo = self.read8(regs.sp);
        regs.sp = regs.sp.wrapping_add(1);
        let hi = self.read8(regs.sp);
        regs.sp = regs.sp.wrapping_add(1);
        u16::from_le_bytes([lo, hi])
    }
}
