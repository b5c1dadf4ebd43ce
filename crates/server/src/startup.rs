use std::{future::Future, net::SocketAddr};

use axum::Router;
use configs::AppConfig;
use service::{runtime, ProductService};
use tokio::net::TcpListener;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

/// A bound listener plus the router serving it. Everything it needs comes
/// from the `AppConfig` passed to `build`.
pub struct Application {
    listener: TcpListener,
    router: Router,
    addr: SocketAddr,
}

impl Application {
    pub async fn build(config: AppConfig) -> Result<Self, StartupError> {
        runtime::ensure_env(&config.storage).await?;

        let products = ProductService::from_config(&config.storage);
        let router = routes::build_router(AppState { products }, &config.storage);

        let bind = config.server.bind_addr();
        let listener = TcpListener::bind(&bind)
            .await
            .map_err(|source| StartupError::Bind { addr: bind.clone(), source })?;
        let addr = listener.local_addr()?;

        info!(
            %addr,
            data_file = %config.storage.data_file.display(),
            id_strategy = ?config.storage.id_strategy,
            write_mode = ?config.storage.write_mode,
            "product store configured"
        );
        Ok(Self { listener, router, addr })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), StartupError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(addr = %self.addr, "server is running");
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

/// Public entry: build the app from `config` and serve until `shutdown`.
pub async fn run<F>(config: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = Application::build(config).await?;
    app.run_until(shutdown).await?;
    Ok(())
}
