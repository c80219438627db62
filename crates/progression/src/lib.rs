//! Leveling for the relics engine.
//!
//! Levels are intrinsic to a token: they survive every ownership change,
//! and so does the cooldown baseline. Advancement is gated by elapsed
//! logical ticks and a configurable fee.

pub mod leveling;
pub mod schedule;

pub use leveling::Progression;
pub use schedule::CooldownSchedule;
