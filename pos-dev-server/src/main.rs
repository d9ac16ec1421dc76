use pos_dev_server::{Server, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = setup_environment();

    tracing::info!(
        port = config.http_port,
        environment = %config.environment,
        "POS dev server starting"
    );

    Server::new(config).run().await?;

    Ok(())
}
