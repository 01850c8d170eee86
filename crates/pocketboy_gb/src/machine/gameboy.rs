use typed_builder::TypedBuilder;

use super::{Button, Cartridge, FrameBuffer, JoypadHandle, MemoryBus, Ppu, RamInit, Timer};
use crate::cpu::{Cpu, InterruptFlags, Registers, Tracer};
use crate::{Result, CYCLES_PER_FRAME};

/// Construction-time options for [`GameBoy`].
#[derive(TypedBuilder)]
pub struct GameBoyConfig {
    #[builder(default)]
    pub ram_init: RamInit,
    /// Observer handed to the processor.
    #[builder(default, setter(strip_option))]
    pub tracer: Option<Box<dyn Tracer>>,
}

impl Default for GameBoyConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// The whole machine.
///
/// Owns the register file, processor, bus, timer and PPU, and advances them
/// in lock-step: each [`GameBoy::step`] runs the processor once and feeds the
/// cycles it reports to the timer and then the PPU.
pub struct GameBoy {
    pub regs: Registers,
    cpu: Cpu,
    bus: MemoryBus,
    timer: Timer,
    ppu: Ppu,
    /// Cycles run past the end of the previous frame.
    frame_carry: u32,
    /// Button bits seen after the previous step, for edge detection.
    last_buttons: u8,
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new(GameBoyConfig::default())
    }
}

impl GameBoy {
    pub fn new(config: GameBoyConfig) -> Self {
        let GameBoyConfig { ram_init, tracer } = config;
        let cpu = match tracer {
            Some(tracer) => Cpu::with_tracer(tracer),
            None => Cpu::new(),
        };
        Self {
            regs: Registers::new(),
            cpu,
            bus: MemoryBus::new(ram_init),
            timer: Timer::new(),
            ppu: Ppu::new(),
            frame_carry: 0,
            last_buttons: 0,
        }
    }

    /// Validate `rom` and copy it to 0x0000. A rejected image leaves the
    /// machine untouched.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<Cartridge> {
        let cartridge = Cartridge::from_bytes(rom)?;
        self.load_cartridge(&cartridge);
        Ok(cartridge)
    }

    pub fn load_cartridge(&mut self, cartridge: &Cartridge) {
        self.bus.load_rom(cartridge.rom());
    }

    /// Run one processor step, then the timer and PPU with its cycle count.
    pub fn step(&mut self) -> Result<u32> {
        let cycles = self.cpu.step(&mut self.regs, &mut self.bus)?;
        self.timer.update(cycles, &mut self.bus);
        self.ppu.update(cycles, &mut self.bus);
        self.latch_buttons();
        Ok(cycles)
    }

    /// Run one frame's worth of cycles (70,224). The overshoot of the last
    /// step counts toward the next frame.
    pub fn step_frame(&mut self) -> Result<&FrameBuffer> {
        let mut elapsed = self.frame_carry;
        while elapsed < CYCLES_PER_FRAME {
            elapsed += self.step()?;
        }
        self.frame_carry = elapsed - CYCLES_PER_FRAME;
        Ok(self.ppu.frame_buffer())
    }

    /// Request the joypad interrupt on any released-to-pressed transition.
    fn latch_buttons(&mut self) {
        let buttons = self.bus.held_buttons();
        if buttons & !self.last_buttons != 0 {
            self.bus.request_interrupt(InterruptFlags::JOYPAD);
        }
        self.last_buttons = buttons;
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        self.bus.joypad().set(button, pressed);
    }

    /// Press or release a button by raw index (0..8).
    pub fn set_button_state(&mut self, index: usize, pressed: bool) -> Result<()> {
        self.bus.set_button_state(index, pressed)
    }

    /// Handle for feeding input from another thread.
    pub fn joypad(&self) -> JoypadHandle {
        self.bus.joypad()
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        self.ppu.frame_buffer()
    }

    /// Frames completed so far (V-Blank entries).
    pub fn frame_count(&self) -> u64 {
        self.ppu.frame_count()
    }

    pub fn bus(&self) -> &MemoryBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut MemoryBus {
        &mut self.bus
    }

    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }
}
