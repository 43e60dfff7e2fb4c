pub mod poise;
pub use poise::Context;
