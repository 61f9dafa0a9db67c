// src/config/app.rs

use std::env;
use std::path::PathBuf;

/// バックエンド未指定時に使うローカルのデフォルトオリジン
const DEFAULT_ORIGIN: &str = "http://127.0.0.1:8000";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub environment: String,
    /// 末尾 `/api` まで解決済みのベースURL
    pub api_base_url: String,
    /// テーマ設定の永続化先
    pub theme_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let raw_base = env::var("TICKET_API_URL").ok();
        if let Some(raw) = raw_base.as_deref() {
            let trimmed = raw.trim();
            if !trimmed.is_empty() && !trimmed.starts_with("http") {
                return Err(format!("Invalid TICKET_API_URL: '{}'", trimmed));
            }
        }

        Ok(Self {
            environment,
            api_base_url: resolve_api_base(raw_base.as_deref()),
            theme_path: env::var("THEME_PREFERENCE_PATH")
                .unwrap_or_else(|_| ".ticket-theme.json".to_string())
                .into(),
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// テスト用の設定を作成（モックサーバのオリジンを直接渡す）
    pub fn for_testing(origin: &str) -> Self {
        Self {
            environment: "test".to_string(),
            api_base_url: resolve_api_base(Some(origin)),
            theme_path: PathBuf::from(".ticket-theme-test.json"),
        }
    }
}

/// ベースURLの解決。
/// 指定があれば末尾スラッシュを除去して `/api` を付ける。
/// 未指定・空文字ならローカルのデフォルトオリジンに `/api` を付ける。
pub fn resolve_api_base(raw: Option<&str>) -> String {
    let trimmed = raw.map(str::trim).unwrap_or("");
    if trimmed.is_empty() {
        return format!("{}/api", DEFAULT_ORIGIN);
    }
    format!("{}/api", trimmed.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_api_base_strips_trailing_slashes() {
        assert_eq!(
            resolve_api_base(Some("https://tickets.example.com/")),
            "https://tickets.example.com/api"
        );
        assert_eq!(
            resolve_api_base(Some("https://tickets.example.com")),
            "https://tickets.example.com/api"
        );
    }

    #[test]
    fn test_resolve_api_base_default_origin() {
        assert_eq!(resolve_api_base(None), "http://127.0.0.1:8000/api");
        assert_eq!(resolve_api_base(Some("   ")), "http://127.0.0.1:8000/api");
    }

    #[test]
    fn test_for_testing_appends_api() {
        let config = AppConfig::for_testing("http://127.0.0.1:39999");
        assert_eq!(config.api_base_url, "http://127.0.0.1:39999/api");
        assert_eq!(config.environment, "test");
    }
}
