// src/domain/building.rs

use crate::types::SelectOption;
use serde::{Deserialize, Serialize};
use std::fmt;

/// サイトの建屋コード（固定セット）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Building {
    #[serde(rename = "LOS1")]
    Los1,
    #[serde(rename = "LOS2")]
    Los2,
    #[serde(rename = "LOS3")]
    Los3,
    #[serde(rename = "LOS4")]
    Los4,
    #[serde(rename = "LOS5")]
    Los5,
}

impl Building {
    /// 文字列からBuildingに変換
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "LOS1" => Some(Self::Los1),
            "LOS2" => Some(Self::Los2),
            "LOS3" => Some(Self::Los3),
            "LOS4" => Some(Self::Los4),
            "LOS5" => Some(Self::Los5),
            _ => None,
        }
    }

    /// Buildingをワイヤ文字列として取得
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Los1 => "LOS1",
            Self::Los2 => "LOS2",
            Self::Los3 => "LOS3",
            Self::Los4 => "LOS4",
            Self::Los5 => "LOS5",
        }
    }

    /// すべての建屋コードを取得
    pub fn all() -> Vec<Self> {
        vec![Self::Los1, Self::Los2, Self::Los3, Self::Los4, Self::Los5]
    }
}

/// フォーム用の建屋選択肢一覧
pub fn building_options() -> Vec<SelectOption> {
    Building::all()
        .into_iter()
        .map(|building| SelectOption::new(building.as_str(), building.as_str()))
        .collect()
}

impl fmt::Display for Building {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
