// src/domain/category.rs

use crate::types::SelectOption;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 設備インシデントのカテゴリ（固定セット）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Network,
    Server,
    Storage,
    Power,
    Cooling,
    Security,
    #[serde(rename = "Access Control")]
    AccessControl,
    Application,
    Database,
}

impl Category {
    /// 文字列からCategoryに変換
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "network" => Some(Self::Network),
            "server" => Some(Self::Server),
            "storage" => Some(Self::Storage),
            "power" => Some(Self::Power),
            "cooling" => Some(Self::Cooling),
            "security" => Some(Self::Security),
            "access control" => Some(Self::AccessControl),
            "application" => Some(Self::Application),
            "database" => Some(Self::Database),
            _ => None,
        }
    }

    /// Categoryをワイヤ文字列として取得
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "Network",
            Self::Server => "Server",
            Self::Storage => "Storage",
            Self::Power => "Power",
            Self::Cooling => "Cooling",
            Self::Security => "Security",
            Self::AccessControl => "Access Control",
            Self::Application => "Application",
            Self::Database => "Database",
        }
    }

    /// すべてのカテゴリを取得
    pub fn all() -> Vec<Self> {
        vec![
            Self::Network,
            Self::Server,
            Self::Storage,
            Self::Power,
            Self::Cooling,
            Self::Security,
            Self::AccessControl,
            Self::Application,
            Self::Database,
        ]
    }

    /// カテゴリごとの有効なサブカテゴリ（固定テーブル）
    pub fn sub_categories(&self) -> &'static [&'static str] {
        match self {
            Self::Network => &[
                "Router Failure",
                "Switch Failure",
                "Network Latency",
                "Packet Loss",
                "ISP Outage",
                "Fiber Cut",
                "DNS Issue",
                "Bandwidth Saturation",
            ],
            Self::Server => &["CPU/Memory Overload", "Hardware Fault", "OS Crash"],
            Self::Storage => &["Disk Failure", "RAID Degraded", "Capacity Alert"],
            Self::Power => &["Power Outage", "UPS Failure", "Generator Issue"],
            Self::Cooling => &["Cooling Unit Failure", "Temperature Alert"],
            Self::Security => &[
                "Security Breach",
                "Access Control Failure",
                "Surveillance Offline",
            ],
            Self::AccessControl => &["Badge Reader Failure", "Door Lock Failure"],
            Self::Application => &["Software Bug", "Service Crash", "Performance Degradation"],
            Self::Database => &["Database Error", "Connection Timeout", "Data Corruption"],
        }
    }

    /// サブカテゴリがこのカテゴリに属するかチェック
    pub fn is_valid_sub_category(&self, sub_category: &str) -> bool {
        self.sub_categories().contains(&sub_category)
    }
}

/// カテゴリ未選択・未知のカテゴリは空のサブカテゴリ集合になる
pub fn sub_category_options(category: Option<Category>) -> Vec<SelectOption> {
    let Some(category) = category else {
        return Vec::new();
    };
    category
        .sub_categories()
        .iter()
        .map(|sub| SelectOption::new(*sub, *sub))
        .collect()
}

/// フォーム用のカテゴリ選択肢一覧
pub fn category_options() -> Vec<SelectOption> {
    Category::all()
        .into_iter()
        .map(|category| SelectOption::new(category.as_str(), category.as_str()))
        .collect()
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s).ok_or_else(|| format!("Invalid incident category: '{}'", s))
    }
}
