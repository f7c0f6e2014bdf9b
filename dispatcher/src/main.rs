use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dispatcher=info,shared_resources=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dispatcher::modules::run()
}
