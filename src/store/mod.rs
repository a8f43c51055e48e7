//! Persistence of click tables as pretty JSON stores.

mod atomic;
mod codec;
mod merger;

pub use atomic::write_atomic;
pub use codec::{load_store_or_empty, try_load_store};
pub use merger::{SaveReport, StoreMerger};
