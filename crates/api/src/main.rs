use anyhow::Context;

use productlist_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    productlist_observability::init_with(config.log_format);

    let app = productlist_api::app::build_app(&config);

    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address))?;

    tracing::info!(
        address = %listener.local_addr()?,
        dataset = %config.product_file.display(),
        "listening"
    );

    axum::serve(listener, app).await.context("server terminated")?;
    Ok(())
}
