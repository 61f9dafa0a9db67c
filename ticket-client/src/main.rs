// src/main.rs
use std::sync::Arc;

use ticket_client::api::dto::ticket_query_dto::TicketSearchQuery;
use ticket_client::config::{AppConfig, ThemePreference};
use ticket_client::domain::ticket_status::TicketStatus;
use ticket_client::export::csv::export_csv;
use ticket_client::repository::TicketRepository;
use ticket_client::service::{LogNotifier, TicketService};
use ticket_client::AppError;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // トレーシングの設定
    ticket_client::logging::init();

    tracing::info!("Starting ticket client...");

    // 設定を読み込む
    let config = AppConfig::from_env().map_err(|message| {
        tracing::error!("Failed to load configuration: {}", message);
        AppError::Config(message)
    })?;
    tracing::info!("Configuration loaded: {:?}", config);

    // テーマ設定は起動境界で明示的に読み込む
    let theme = ThemePreference::load(&config.theme_path);
    tracing::info!(theme = ?theme, "Theme preference loaded");

    let repository = Arc::new(TicketRepository::new(&config));
    let notifier = Arc::new(LogNotifier);
    let mut service = TicketService::new(repository, notifier);

    let count = service.load().await?;
    tracing::info!("Fetched {} tickets from {}", count, config.api_base_url);

    // ステータスごとの件数サマリ
    for status in TicketStatus::all() {
        let query = TicketSearchQuery {
            status: Some(status),
            ..TicketSearchQuery::default()
        };
        tracing::info!("{}: {} tickets", status, service.view(&query).len());
    }

    // 環境変数で指定があれば現在のコレクションをCSVに書き出す
    if let Ok(path) = std::env::var("TICKET_CSV_EXPORT") {
        let csv = export_csv(service.tickets());
        std::fs::write(&path, csv)?;
        tracing::info!("Exported ticket CSV to {}", path);
    }

    // 終了境界でテーマ設定を保存する
    theme.save(&config.theme_path)?;

    Ok(())
}
