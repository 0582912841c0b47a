pub mod realtime;

pub use realtime::{RealtimeConfig, RealtimeError, RealtimeResult};
