// src/config/theme.rs

use crate::error::AppResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// UIテーマ設定。
///
/// アンビエントなグローバルストレージではなく、起動時に `load`、
/// 終了境界で `save` を明示的に呼ぶ所有状態として扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// 保存済みのテーマを読み込む。未保存・読込失敗時はデフォルト（初回起動扱い）。
    pub fn load(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default()
    }

    pub fn save(self, path: &Path) -> AppResult<()> {
        fs::write(path, serde_json::to_string(&self)?)?;
        Ok(())
    }
}
