use std::sync::Arc;

use anyhow::Result;

use polyglot_core::AppConfig;

pub async fn run(config: Arc<AppConfig>, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = (*config).clone();
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    println!(
        "Starting polyglot on http://{}:{}",
        config.server.host, config.server.port
    );
    polyglot_web::serve(Arc::new(config)).await
}
