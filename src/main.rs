#![warn(clippy::perf)]
#![warn(clippy::unwrap_used)]

/// Poise commands and their handlers.
mod commands;
mod content;
mod discord;
mod dispatch;
mod errors;
use errors::Result;

mod escalation;

mod framework;
use framework::{Config, Data};

mod random;
mod sequence;
mod services;
mod surface;
#[cfg(test)]
mod testing;
mod utils;

use poise::serenity_prelude::{self as serenity, GatewayIntents};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    framework::logging::init_tracing();

    info!("deathbot {}", env!("CARGO_PKG_VERSION"));

    if let Err(err) = run().await {
        error!(%err, "deathbot shut down");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = Config::load()?;
    let token = Config::token()?;

    let data = Data::new(config)?;
    let framework = framework::poise::build(data);

    // member lookups need GUILD_MEMBERS, prefix commands need MESSAGE_CONTENT
    let intents = GatewayIntents::non_privileged()
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::Client::builder(token, intents)
        .framework(framework)
        .await?;

    client.start().await?;

    Ok(())
}
