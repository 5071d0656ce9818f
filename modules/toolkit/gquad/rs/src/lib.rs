pub use config::Config;
pub use gquad::GQuad;
pub use profile::Profile;
pub use result::Prediction;
pub use scanner::{Hit, Scanner, G4_PATTERN};

mod config;
mod gquad;
mod profile;
mod result;
mod scanner;
pub mod shuffle;
