//! Coach AI: situational decisions driven by a profile and the engine's
//! coach policy.

pub mod ai;
pub mod profile;

pub use ai::{
    choose_conversion, choose_defense, choose_fourth_down, choose_kickoff, choose_play, onside_probability,
};
pub use profile::CoachProfile;
