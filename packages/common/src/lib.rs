pub mod form;
pub mod gazetteer;
pub mod slug;
pub mod stats;
pub mod storage;
pub mod whatsapp;

pub use gazetteer::Gazetteer;
pub use stats::{CityPin, ClubStats, StatsInput};
