use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wrapperrors::config::RenderConfig;
use wrapperrors::{define, BoxError};

const USAGE: &str = "usage: wrapperrors-render <code> <status> [cause] [message...]";

fn main() -> Result<()> {
    let config = RenderConfig::from_env()?;

    // Diagnostics go to stderr so stdout only carries the rendered error
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let code = args.next().context(USAGE)?;
    let status: u16 = args
        .next()
        .context(USAGE)?
        .parse()
        .context("status must be a number between 0 and 65535")?;
    let cause = args
        .next()
        .filter(|cause| !cause.is_empty())
        .map(BoxError::from);

    let err = define(code, status).from_definition(cause);
    for message in args {
        err.add_message(message);
    }

    info!(code = %err.code(), format = ?config.format, "Rendering error");
    println!("{}", config.format.render(&err));

    Ok(())
}
