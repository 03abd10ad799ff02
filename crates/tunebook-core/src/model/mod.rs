pub mod ids;
pub mod tune;

pub use ids::TuneId;
pub use tune::{HeaderField, NewTune, Tune};
