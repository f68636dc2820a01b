pub mod controls;
pub mod gestures;
pub mod keyboard;
