use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use postscribe::cli::{Cli, Commands, Platform};
use postscribe::config::Config;
use postscribe::{agent::Agent, interactive, output};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "postscribe=debug"
    } else {
        "postscribe=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Generate {
            video_id,
            platform,
            query,
            output,
            retries,
            delay,
        } => {
            let config = Config::load().await?;
            let policy = Agent::policy_from(&config, retries, delay);
            let agent = Agent::from_config(&config, policy)?;

            tracing::info!("Generating {} post for video: {}", platform, video_id);

            let post = agent.run(&video_id, platform.as_str(), &query).await?;

            match output {
                Some(path) => {
                    output::save_to_file(&post, &path).await?;
                    println!("Post saved to: {}", path.display());
                }
                None => {
                    output::print_to_console(&post);
                }
            }
        }
        Commands::Interactive => {
            let config = Config::load().await?;
            interactive::run(&config, cli.quiet).await?;
        }
        Commands::Platforms => {
            println!("Supported platforms:");
            for platform in Platform::ALL {
                println!("  • {}", platform);
            }
        }
        Commands::Config { show } => {
            let config = Config::load().await?;
            if show {
                config.display();
            } else {
                config.save().await?;
                println!("Default configuration written. Edit it to change model or retry settings.");
            }
        }
    }

    Ok(())
}
