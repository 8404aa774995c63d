// Scoring rules: settings, judgments, and the std/mania scoring engines

mod error;
pub mod mania_score;
mod record;
mod settings;
pub mod std_score;

pub use error::ConfigError;
pub use record::{Judgment, ScoreRecord, ScoreStream};
pub use settings::{SettingValue, Settings, SettingsBuilder};

// Re-exported so engine callers need only this crate for the common path.
pub use osu_model::InputError;
