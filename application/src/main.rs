use std::{fmt, io, sync::OnceLock, time::Instant};

use application::{render, Args, Config, Controller};
use roster::{command::LoadUsers, infra::Http, Command as _};
use tracerr::Traced;
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    _ = start().await;
}

async fn start() -> Result<(), ()> {
    let Args { config, search } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config { remote, view, log } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let view: roster::Config = view.try_into().map_err(|e| {
        log::error!("invalid `view` configuration: {e}");
    })?;
    let remote = Http::new(&remote.into()).map_err(|e| {
        log::error!("failed to initialize `Http` client: {e}");
    })?;
    let controller = Controller::new(view, remote);

    _ = controller.execute(LoadUsers).await.map_err(report)?;

    if let Some(text) = search {
        controller.input_search(text, Instant::now());
        if let Some(deadline) = controller.search_deadline() {
            tokio::time::sleep_until(deadline.into()).await;
        }
        _ = controller.tick(Instant::now());
    }

    match controller.view() {
        Some(view) => log::info!("users view:\n{}", render::table(&view)),
        None => log::warn!("users are still loading"),
    }
    for n in controller.notifications() {
        log::info!("[{}] {}", n.severity, n.message);
    }
    Ok(())
}

/// Logs the provided [`Traced`] error.
fn report<E: fmt::Display>(e: Traced<E>) {
    log::error!("{e}");
}
