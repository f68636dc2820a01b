//! Abstract feedback patterns and their per-mechanism renderings.
use crate::constants::{LONG_TONE_DURATION, TONE_DURATION};
use smallvec::{smallvec, SmallVec};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Vibration on/off timings in milliseconds, starting with "on".
pub type VibrationSequence = SmallVec<[u32; 8]>;
pub type ToneSequence = SmallVec<[f32; 4]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pattern {
    Single,
    Double,
    Triple,
    Long,
    Composite,
}

impl Pattern {
    pub const ALL: [Pattern; 5] = [
        Pattern::Single,
        Pattern::Double,
        Pattern::Triple,
        Pattern::Long,
        Pattern::Composite,
    ];

    /// How many times the primary mechanism fires.
    pub fn repetitions(self) -> u32 {
        match self {
            Pattern::Single => 1,
            Pattern::Double => 2,
            Pattern::Triple => 3,
            Pattern::Long => 4,
            Pattern::Composite => 4,
        }
    }

    /// Pause between consecutive primary fires.
    pub fn repeat_delay(self) -> Duration {
        let ms = match self {
            Pattern::Single => 0,
            Pattern::Double | Pattern::Triple => 100,
            Pattern::Long => 150,
            Pattern::Composite => 80,
        };
        Duration::from_millis(ms)
    }

    pub fn vibration(self) -> VibrationSequence {
        match self {
            Pattern::Single => smallvec![50],
            Pattern::Double => smallvec![50, 100, 50],
            Pattern::Triple => smallvec![50, 100, 50, 100, 50],
            Pattern::Long => smallvec![400],
            Pattern::Composite => smallvec![50, 50, 100, 50, 200],
        }
    }

    /// Frequencies (Hz) of the synthesized fallback, played back to back.
    pub fn tones(self) -> ToneSequence {
        match self {
            Pattern::Single => smallvec![800.0],
            Pattern::Double => smallvec![800.0, 1000.0],
            Pattern::Triple => smallvec![800.0, 1000.0, 1200.0],
            Pattern::Long => smallvec![600.0],
            Pattern::Composite => smallvec![600.0, 900.0, 1200.0, 900.0],
        }
    }

    pub fn tone_duration(self) -> Duration {
        match self {
            Pattern::Long => LONG_TONE_DURATION,
            _ => TONE_DURATION,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Single => "single",
            Pattern::Double => "double",
            Pattern::Triple => "triple",
            Pattern::Long => "long",
            Pattern::Composite => "composite",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPattern(pub String);

impl fmt::Display for UnknownPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown feedback pattern '{}'", self.0)
    }
}

impl std::error::Error for UnknownPattern {}

impl FromStr for Pattern {
    type Err = UnknownPattern;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Pattern::Single),
            "double" => Ok(Pattern::Double),
            "triple" => Ok(Pattern::Triple),
            "long" => Ok(Pattern::Long),
            "composite" => Ok(Pattern::Composite),
            _ => Err(UnknownPattern(s.to_string())),
        }
    }
}
