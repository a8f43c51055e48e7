use serde::{Deserialize, Serialize};

use crate::core::{AxisIndex, DataPoint, PanDirection, ZoomDirection};
use crate::model::Side;

/// Mouse button of a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
    Other(u16),
}

impl PointerButton {
    /// Maps toolkit button numbers (1 = primary, 2 = middle, 3 = secondary).
    #[must_use]
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::Primary,
            2 => Self::Middle,
            3 => Self::Secondary,
            other => Self::Other(other),
        }
    }

    /// Pick slot written by this button, if any.
    #[must_use]
    pub fn side(self) -> Option<Side> {
        match self {
            Self::Primary => Some(Side::Left),
            Self::Secondary => Some(Side::Right),
            Self::Middle | Self::Other(_) => None,
        }
    }
}

/// Keyboard input relevant to a panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Delete,
    Left,
    Right,
    Up,
    Down,
    ShiftUp,
    ShiftDown,
    Other(String),
}

impl Key {
    /// Parses toolkit key names such as `delete`, `left` or `shift+up`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "delete" => Self::Delete,
            "left" => Self::Left,
            "right" => Self::Right,
            "up" => Self::Up,
            "down" => Self::Down,
            "shift+up" => Self::ShiftUp,
            "shift+down" => Self::ShiftDown,
            _ => Self::Other(name.to_owned()),
        }
    }
}

/// Command a key resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    ClearMarkers,
    Pan(PanDirection),
    Zoom(ZoomDirection),
    ScaleAmplitude(ZoomDirection),
}

impl Key {
    #[must_use]
    pub fn command(&self) -> Option<KeyCommand> {
        match self {
            Self::Delete => Some(KeyCommand::ClearMarkers),
            Self::Left => Some(KeyCommand::Pan(PanDirection::Earlier)),
            Self::Right => Some(KeyCommand::Pan(PanDirection::Later)),
            Self::Up => Some(KeyCommand::Zoom(ZoomDirection::In)),
            Self::Down => Some(KeyCommand::Zoom(ZoomDirection::Out)),
            Self::ShiftUp => Some(KeyCommand::ScaleAmplitude(ZoomDirection::In)),
            Self::ShiftDown => Some(KeyCommand::ScaleAmplitude(ZoomDirection::Out)),
            Self::Other(_) => None,
        }
    }
}

/// One input event delivered to a panel.
///
/// `axis` is the axis under the pointer (`None` outside every axis) and
/// `position` is the pointer in data coordinates when the toolkit could
/// resolve it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerMove {
        axis: Option<AxisIndex>,
        position: Option<DataPoint>,
    },
    PointerClick {
        axis: Option<AxisIndex>,
        button: PointerButton,
        position: Option<DataPoint>,
    },
    KeyPress {
        key: Key,
        axis: Option<AxisIndex>,
    },
}

impl InputEvent {
    #[must_use]
    pub fn move_to(axis: AxisIndex, x: f64, y: f64) -> Self {
        Self::PointerMove {
            axis: Some(axis),
            position: Some(DataPoint::new(x, y)),
        }
    }

    #[must_use]
    pub fn click(axis: AxisIndex, button: PointerButton, x: f64, y: f64) -> Self {
        Self::PointerClick {
            axis: Some(axis),
            button,
            position: Some(DataPoint::new(x, y)),
        }
    }

    #[must_use]
    pub fn key(name: &str, axis: Option<AxisIndex>) -> Self {
        Self::KeyPress {
            key: Key::from_name(name),
            axis,
        }
    }
}
