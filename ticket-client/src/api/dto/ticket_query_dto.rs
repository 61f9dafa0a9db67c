// src/api/dto/ticket_query_dto.rs

use crate::domain::building::Building;
use crate::domain::priority::Priority;
use crate::domain::ticket_status::TicketStatus;
use crate::types::SortOrder;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 統一チケット検索クエリ。
/// すべて任意で、未指定の条件はその次元を素通しする。
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TicketSearchQuery {
    /// 全フィールド横断の部分一致検索（大文字小文字を区別しない）
    pub search: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<TicketStatus>,
    pub building: Option<Building>,
    /// 選択した担当者集合と積が空でないチケットにマッチ
    #[serde(default)]
    pub assigned_to: Vec<String>,
    /// `opened` のローカル日付レンジ（両端含む）
    pub opened_from: Option<NaiveDate>,
    pub opened_to: Option<NaiveDate>,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl TicketSearchQuery {
    pub fn has_date_range(&self) -> bool {
        self.opened_from.is_some() || self.opened_to.is_some()
    }

    /// 何も絞り込まないクエリか（検索語は空文字のみ無効扱い）
    pub fn is_unfiltered(&self) -> bool {
        self.search.as_deref().unwrap_or("").is_empty()
            && self.priority.is_none()
            && self.status.is_none()
            && self.building.is_none()
            && self.assigned_to.is_empty()
            && !self.has_date_range()
    }
}
