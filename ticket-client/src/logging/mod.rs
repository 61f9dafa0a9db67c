// src/logging/mod.rs

use std::sync::Once;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// トレーシングの設定（多重初期化は無視する）
pub fn init() {
    INIT.call_once(|| {
        tracing_subscriber::registry()
            .with(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| "ticket_client=info".into()),
            )
            .with(fmt::layer())
            .init();
    });
}
