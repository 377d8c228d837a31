pub mod chips;
pub mod cli;
pub mod config;
pub mod controller;
pub mod field;
pub mod logging;
pub mod surface;
pub mod tags;
pub mod tui;
pub mod utils;

pub use config::Config;
pub use controller::{TagController, TagInput};
pub use field::{FieldEvent, FormField};
pub use utils::Profile;
