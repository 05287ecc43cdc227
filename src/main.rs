use agro_advisor::utils::{log_init, log_policy};
use agro_advisor::{routes, settings, Advisor};
use anyhow::Result;
use tracing::subscriber::set_global_default;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("agro_advisor=info".parse()?))
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        );
    set_global_default(subscriber)?;

    let settings = settings().clone();
    settings.validate()?;

    let host = std::env::var("HOST").unwrap_or_else(|_| settings.server.host.clone());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(settings.server.port);

    let advisor = Advisor::new(settings);
    log_init(&host, port);
    log_policy(
        advisor.settings().suitability.viability_threshold,
        advisor.candidates().len(),
    );

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, routes::router(advisor)).await?;

    Ok(())
}
