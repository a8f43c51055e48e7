pub mod amplitude;
pub mod primitives;
pub mod time_window;
pub mod types;

pub use amplitude::AmplitudeRange;
pub use primitives::{PICK_TIME_DECIMALS, format_time_label, round_pick_time};
pub use time_window::TimeWindow;
pub use types::{AxisIndex, DataPoint, PanDirection, ZoomDirection};
