//! In-process event delivery

mod channel;

pub use channel::ChannelBroadcaster;
