bitflags::bitflags! {
    /// Movement/action keys currently held.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct HeldKeys: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const UP = 1 << 2;
        const DOWN = 1 << 3;
        const JUMP = 1 << 4;
        const ROLL = 1 << 5;
    }
}

/// Latest input snapshot; consumed by physics and the interaction step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputState {
    pub keys: HeldKeys,
    /// Pointer in world pixels.
    pub pointer: (f32, f32),
    pub primary: bool,
    pub secondary: bool,
    /// Tick of the last left / right press, for double-tap detection.
    pub last_press: [Option<u64>; 2],
}

impl InputState {
    pub fn held(&self, keys: HeldKeys) -> bool {
        self.keys.intersects(keys)
    }
}
