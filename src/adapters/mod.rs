//! Implementations of the port traits.
//!
//! `live` talks to the network, `replaying` answers from stubs, and
//! `recording` captures what passes through into the current cassette.

pub mod live;
pub mod recording;
pub mod replaying;
