//! Button bitmask

use bitflags::bitflags;

bitflags! {
    /// Buttons of the handheld, laid out the way its HID service reports them
    ///
    /// Desktop hosts map their keyboard/controller onto the same bits.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Keys: u32 {
        const A = 1 << 0;
        const B = 1 << 1;
        const SELECT = 1 << 2;
        const START = 1 << 3;
        const DRIGHT = 1 << 4;
        const DLEFT = 1 << 5;
        const DUP = 1 << 6;
        const DDOWN = 1 << 7;
        const R = 1 << 8;
        const L = 1 << 9;
        const X = 1 << 10;
        const Y = 1 << 11;
        /// Touch screen contact (not reported by the HID service itself)
        const TOUCH = 1 << 20;
        const CPAD_RIGHT = 1 << 28;
        const CPAD_LEFT = 1 << 29;
        const CPAD_UP = 1 << 30;
        const CPAD_DOWN = 1 << 31;

        /// D-pad up or circle pad up
        const UP = Self::DUP.bits() | Self::CPAD_UP.bits();
        /// D-pad down or circle pad down
        const DOWN = Self::DDOWN.bits() | Self::CPAD_DOWN.bits();
        /// D-pad left or circle pad left
        const LEFT = Self::DLEFT.bits() | Self::CPAD_LEFT.bits();
        /// D-pad right or circle pad right
        const RIGHT = Self::DRIGHT.bits() | Self::CPAD_RIGHT.bits();
        /// Any direction on the d-pad or circle pad
        const DIRECTIONS = Self::UP.bits() | Self::DOWN.bits() | Self::LEFT.bits() | Self::RIGHT.bits();
    }
}
