use std::fmt;

use crate::foundation::error::{ScrollyError, ScrollyResult};

/// The three kinds of sticky content a step can show.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Medium {
    /// A still image with an optional CSS scale.
    Image,
    /// A tile map centred on a coordinate.
    Map,
    /// An embedded video player.
    Video,
}

impl Medium {
    /// All media, in container order.
    pub const ALL: [Medium; 3] = [Medium::Image, Medium::Map, Medium::Video];

    /// Display value a container uses while it is the active one.
    pub fn visible_display(self) -> Display {
        match self {
            Self::Image => Display::Flex,
            Self::Map | Self::Video => Display::Block,
        }
    }

    /// Id of the sticky container element for this medium.
    pub fn container_id(self) -> &'static str {
        match self {
            Self::Image => "sticky-image-container",
            Self::Map => "sticky-map-container",
            Self::Video => "sticky-video-container",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Map => "map",
            Self::Video => "video",
        }
    }

    /// Parse a content-type tag as authors write it (case and surrounding space ignored).
    pub fn parse(tag: &str) -> ScrollyResult<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(Self::Image),
            "map" => Ok(Self::Map),
            "video" => Ok(Self::Video),
            other => Err(ScrollyError::validation(
                format!("unknown content type '{other}'"),
                "use one of: image, map, video",
            )),
        }
    }
}

impl fmt::Display for Medium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CSS display value of a sticky container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Display {
    None,
    Flex,
    Block,
}

impl Display {
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// 1-based position of a step in document order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct StepIndex(pub u32);

impl StepIndex {
    pub fn new(index: u32) -> ScrollyResult<Self> {
        if index == 0 {
            return Err(ScrollyError::validation(
                "step index must be >= 1",
                "number steps from 1 in document order",
            ));
        }
        Ok(Self(index))
    }
}

impl fmt::Display for StepIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Milliseconds on the engine's virtual clock; used both as an instant and as a duration.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Millis = Millis(0);

    pub fn saturating_add(self, rhs: Millis) -> Millis {
        Millis(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
