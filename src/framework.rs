pub mod config;
pub use config::Config;

pub mod data;
pub use data::Data;

pub mod logging;
pub mod poise;
