//! Shared palette of the low-poly scene.

pub const RED: u32 = 0xf25346;
pub const WHITE: u32 = 0xd8d0d1;
pub const BROWN: u32 = 0x59332e;
pub const BROWN_DARK: u32 = 0x23190f;
pub const BLUE: u32 = 0x68c3c0;
