use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "port_goods_quote=debug,quote_proxy=debug,tower_http=info";

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
///
/// Calling it again keeps the subscriber that is already installed.
pub fn init() {
    let installed = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
    if let Err(error) = installed {
        tracing::debug!(%error, "tracing subscriber already installed");
    }
}
