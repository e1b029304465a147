#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod app;
mod ui;

use dioxus::prelude::*;

#[cfg(feature = "desktop")]
use dioxus_desktop::{tao::window::WindowBuilder, Config as DesktopConfig};

use port_goods_quote::{
    config::ClientConfig, infra::DataClient, telemetry, util::version::APP_NAME,
};

fn main() {
    dotenvy::dotenv().ok();
    telemetry::init();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "invalid client configuration");
            std::process::exit(1);
        }
    };

    // The listener is bound before launch so the first country request
    // cannot beat it.
    #[cfg(not(target_arch = "wasm32"))]
    let config = match config.embedded_proxy.then(embedded::start_proxy).flatten() {
        Some(addr) => match config.clone().with_proxy_at(addr) {
            Ok(redirected) => redirected,
            Err(error) => {
                tracing::error!(%error, "cannot point client at embedded proxy");
                config
            }
        },
        None => config,
    };

    let client = match DataClient::new(&config) {
        Ok(client) => client,
        Err(error) => {
            tracing::error!(%error, "failed to build data client");
            std::process::exit(1);
        }
    };
    tracing::info!(proxy = %client.base_url(), "data client ready");

    let builder = LaunchBuilder::new().with_context(client);

    #[cfg(feature = "desktop")]
    let builder = {
        let config = desktop! {
            DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title(APP_NAME)
            )
        };
        builder.with_cfg(config)
    };

    builder.launch(app::App);
}

#[cfg(not(target_arch = "wasm32"))]
mod embedded {
    use std::net::SocketAddr;

    use port_goods_quote::{config::ProxyConfig, infra::proxy};

    /// Binds the proxy forwarder and runs it on its own runtime for the life
    /// of the app. Returns the bound address, or `None` if it could not start.
    pub fn start_proxy() -> Option<SocketAddr> {
        let config = match ProxyConfig::from_env() {
            Ok(config) => config,
            Err(error) => {
                tracing::error!(%error, "embedded proxy disabled: invalid configuration");
                return None;
            }
        };

        let listener = match proxy::bind(&config) {
            Ok(listener) => listener,
            Err(error) => {
                tracing::error!(%error, "embedded proxy disabled: cannot bind");
                return None;
            }
        };
        let addr = match listener.local_addr() {
            Ok(addr) => addr,
            Err(error) => {
                tracing::error!(%error, "embedded proxy disabled: no local address");
                return None;
            }
        };

        let spawned = std::thread::Builder::new()
            .name("quote-proxy".into())
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_multi_thread()
                    .worker_threads(2)
                    .enable_all()
                    .build()
                {
                    Ok(runtime) => runtime,
                    Err(error) => {
                        tracing::error!(%error, "failed to start proxy runtime");
                        return;
                    }
                };
                let served = runtime.block_on(proxy::serve(config, listener, std::future::pending()));
                if let Err(error) = served {
                    tracing::error!(%error, "embedded proxy stopped");
                }
            });

        match spawned {
            Ok(_) => Some(addr),
            Err(error) => {
                tracing::error!(%error, "failed to spawn proxy thread");
                None
            }
        }
    }
}
