//! Run-level orchestration: configuration, the session registry and the
//! `PickerRun` facade hosts drive.

mod picker_config;
mod picker_run;
mod session_registry;

pub use picker_config::{
    DEFAULT_RAW_CLICKS_FILE, DEFAULT_SUMMARY_FILE, NavigationTuning, PickerConfig, StoreConfig,
};
pub use picker_run::{OpenedPanel, PickerRun, RunReport};
pub use session_registry::SessionRegistry;
