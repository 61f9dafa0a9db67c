// src/domain/priority.rs

use crate::types::SelectOption;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 優先度（P0が最重大）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    P0,
    P1,
    P2,
    P3,
    P4,
}

impl Priority {
    /// 文字列からPriorityに変換
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "P0" => Some(Self::P0),
            "P1" => Some(Self::P1),
            "P2" => Some(Self::P2),
            "P3" => Some(Self::P3),
            "P4" => Some(Self::P4),
            _ => None,
        }
    }

    /// Priorityをワイヤ文字列として取得
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::P0 => "P0",
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
            Self::P4 => "P4",
        }
    }

    /// UI表示用ラベル
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::P0 => "P0 - Catastrophic",
            Self::P1 => "P1 - Critical",
            Self::P2 => "P2 - High",
            Self::P3 => "P3 - Medium",
            Self::P4 => "P4 - Low",
        }
    }

    /// すべての優先度を取得
    pub fn all() -> Vec<Self> {
        vec![Self::P0, Self::P1, Self::P2, Self::P3, Self::P4]
    }
}

/// フォーム用の選択肢一覧
pub fn priority_options() -> Vec<SelectOption> {
    Priority::all()
        .into_iter()
        .map(|priority| SelectOption::new(priority.as_str(), priority.display_name()))
        .collect()
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s).ok_or_else(|| format!("Invalid priority: '{}'. Valid values are P0-P4", s))
    }
}
