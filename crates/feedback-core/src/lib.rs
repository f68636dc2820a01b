//! Platform-independent core of the feedback subsystem.
//!
//! The web front-end supplies browser implementations of the traits in
//! [`platform`] and [`clock`]; everything else here is plain Rust and runs
//! the same on the host under test.
pub mod cascade;
pub mod channel;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod feedback;
pub mod gesture;
pub mod media;
pub mod pattern;
pub mod platform;
pub mod pool;
pub mod prefs;

pub use cascade::*;
pub use channel::*;
pub use clock::*;
pub use config::*;
pub use error::PlatformError;
pub use feedback::*;
pub use gesture::*;
pub use media::*;
pub use pattern::*;
pub use platform::*;
pub use pool::*;
pub use prefs::*;
