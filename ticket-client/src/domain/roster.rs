// src/domain/roster.rs

use crate::types::SelectOption;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// 担当エンジニアの固定ロスター
pub const ENGINEERS: &[&str] = &[
    "Adaeze Okafor",
    "Chinedu Eze",
    "Femi Adeyemi",
    "Ifeoma Nwosu",
    "Kunle Balogun",
    "Ngozi Umeh",
    "Tunde Alabi",
    "Zainab Bello",
];

static ENGINEER_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ENGINEERS.iter().copied().collect());

/// 名前がロスターに含まれるかチェック
pub fn is_known_engineer(name: &str) -> bool {
    ENGINEER_SET.contains(name)
}

/// 担当者マルチセレクト用の選択肢一覧
pub fn engineer_options() -> Vec<SelectOption> {
    ENGINEERS
        .iter()
        .map(|name| SelectOption::new(*name, *name))
        .collect()
}
