// src/types/select.rs

use serde::{Deserialize, Serialize};

/// UI層の選択肢表現（ワイヤ値 + 表示ラベルのペア）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// ワイヤ値から選択肢を復元する。空文字は未選択（None）。
    pub fn from_value(value: &str) -> Option<Self> {
        if value.is_empty() {
            None
        } else {
            Some(Self::new(value, value))
        }
    }

    /// 選択状態をワイヤ値に変換する。未選択は空文字。
    pub fn to_wire(selected: Option<&SelectOption>) -> String {
        selected.map(|option| option.value.clone()).unwrap_or_default()
    }
}
