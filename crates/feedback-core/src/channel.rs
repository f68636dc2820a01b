use std::fmt;
use std::str::FromStr;

/// A user-facing feedback channel with its own persisted on/off preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Haptics,
    Sound,
    Music,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Haptics, Channel::Sound, Channel::Music];

    /// Key segment used in persistent storage. Sound effects persist as
    /// `audio` for compatibility with stored preferences.
    pub fn storage_key(self) -> &'static str {
        match self {
            Channel::Haptics => "haptics",
            Channel::Sound => "audio",
            Channel::Music => "music",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::Haptics => "haptics",
            Channel::Sound => "sound",
            Channel::Music => "music",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownChannel(pub String);

impl fmt::Display for UnknownChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown feedback channel '{}'", self.0)
    }
}

impl std::error::Error for UnknownChannel {}

impl FromStr for Channel {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "haptics" | "haptic" => Ok(Channel::Haptics),
            "sound" | "audio" => Ok(Channel::Sound),
            "music" => Ok(Channel::Music),
            _ => Err(UnknownChannel(s.to_string())),
        }
    }
}

/// A persisted boolean preference change, as delivered to subscribers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preference {
    pub key: Channel,
    pub value: bool,
}
