pub mod persistence;

pub use persistence::{load_targets, save_json};
