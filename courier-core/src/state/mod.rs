pub mod listener;

pub use listener::ListenerPhase;
