pub mod respiration;

pub use respiration::{update_breathing, BreathEvent, BreathingState, Lungs};
