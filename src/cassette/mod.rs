//! Cassettes: named interaction logs that drive recording and replay.

pub mod current;
pub mod format;
pub mod mode;
pub mod session;
pub mod storage;

pub use current::CurrentCassette;
pub use format::RecordedInteraction;
pub use mode::RecordMode;
pub use session::{Cassette, CassetteOptions};
