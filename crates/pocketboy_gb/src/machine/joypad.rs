use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::{Error, Result};

/// Joypad buttons, numbered the way the P1 register multiplexes them:
/// indices 0-3 are the direction pad, 4-7 the action buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Right = 0,
    Left = 1,
    Up = 2,
    Down = 3,
    A = 4,
    B = 5,
    Select = 6,
    Start = 7,
}

impl Button {
    pub const ALL: [Button; 8] = [
        Button::Right,
        Button::Left,
        Button::Up,
        Button::Down,
        Button::A,
        Button::B,
        Button::Select,
        Button::Start,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Shared button state.
///
/// Clones refer to the same eight switches, so an input thread can hold one
/// while the emulator reads another. Each switch is an independent atomic.
#[derive(Clone, Debug, Default)]
pub struct JoypadHandle {
    buttons: Arc<[AtomicBool; 8]>,
}

impl JoypadHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, button: Button, pressed: bool) {
        self.buttons[button.index()].store(pressed, Ordering::Relaxed);
    }

    /// Set a button by raw index. Indices outside 0..8 are rejected without
    /// touching any state.
    pub fn set_index(&self, index: usize, pressed: bool) -> Result<()> {
        let button = Button::from_index(index).ok_or(Error::ButtonOutOfRange(index))?;
        self.set(button, pressed);
        Ok(())
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.buttons[button.index()].load(Ordering::Relaxed)
    }

    /// All eight switches packed into a byte, bit n set when button n is held.
    pub fn snapshot(&self) -> u8 {
        self.buttons
            .iter()
            .enumerate()
            .filter(|(_, held)| held.load(Ordering::Relaxed))
            .fold(0u8, |acc, (i, _)| acc | (1 << i))
    }
}
