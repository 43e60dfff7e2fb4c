//! The serenity side of [`Surface`](crate::surface::Surface).

mod surface;
pub use surface::DiscordSurface;
