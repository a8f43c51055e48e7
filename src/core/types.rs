use serde::{Deserialize, Serialize};

/// Index of one axis inside a panel; axes follow the configured component order.
pub type AxisIndex = usize;

/// Point in data coordinates: `x` is seconds from the trace start, `y` is amplitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Direction of a time-window shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanDirection {
    /// Toward smaller times (left arrow).
    Earlier,
    /// Toward larger times (right arrow).
    Later,
}

impl PanDirection {
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Earlier => -1.0,
            Self::Later => 1.0,
        }
    }
}

/// Direction of a range rescale. `In` shrinks the range, `Out` widens it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Multiplier applied to the current span for a given step factor.
    #[must_use]
    pub fn span_multiplier(self, factor: f64) -> f64 {
        match self {
            Self::In => 1.0 / factor,
            Self::Out => factor,
        }
    }
}
