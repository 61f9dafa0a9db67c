// src/domain/ticket_model.rs

use crate::domain::building::Building;
use crate::domain::category::Category;
use crate::domain::priority::Priority;
use crate::domain::ticket_status::TicketStatus;
use crate::types::DateTimeField;

/// インシデントチケットのドメイン表現。
///
/// ワイヤ表現（素の文字列・区切り文字列・"Yes"/"No" フラグ）との変換は
/// すべて `api::dto` 側で行い、ここには型付きの値だけを持たせる。
/// ローカルに保持するコレクションはバックエンドのキャッシュに過ぎない。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ticket {
    /// サーバ採番の識別子（不透明な文字列として扱う）
    pub ticket_id: String,

    pub category: Option<Category>,
    /// `category` に従属。`sub_categories(category)` に含まれるか空のみ有効
    pub sub_category: Option<String>,
    pub priority: Option<Priority>,
    pub building: Option<Building>,
    pub status: TicketStatus,

    pub description: String,
    pub location: String,
    pub impacted: String,
    pub reported_by: String,
    pub contact_info: String,
    pub detected_by: String,
    pub root_cause: String,
    pub actions_taken: String,
    pub resolution_summary: String,
    pub escalation_history: String,

    pub opened: DateTimeField,
    pub time_detected: DateTimeField,
    pub resolution_time: DateTimeField,
    pub closed: DateTimeField,

    /// 担当エンジニア（ロスター内の名前の順序付きリスト）
    pub assigned_to: Vec<String>,

    pub post_review: bool,
    pub sla_breach: bool,

    /// 添付の表示用文字列。書き込みはフォームからのみ（編集時に再投入しない）
    pub attachments: String,
}

impl Ticket {
    /// `closed` と `opened` が両方絶対時刻なら closed >= opened を要求する
    pub fn temporal_order_is_valid(&self) -> bool {
        match (self.opened.instant(), self.closed.instant()) {
            (Some(opened), Some(closed)) => closed >= opened,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ticket_is_open_and_undated() {
        let ticket = Ticket::default();
        assert_eq!(ticket.status, TicketStatus::Open);
        assert!(ticket.opened.is_absent());
        assert!(ticket.assigned_to.is_empty());
        assert!(!ticket.sla_breach);
    }

    #[test]
    fn test_temporal_order() {
        let mut ticket = Ticket {
            opened: DateTimeField::from_wire("2025-05-01T10:00:00Z"),
            closed: DateTimeField::from_wire("2025-05-02T10:00:00Z"),
            ..Ticket::default()
        };
        assert!(ticket.temporal_order_is_valid());

        ticket.closed = DateTimeField::from_wire("2025-04-30T10:00:00Z");
        assert!(!ticket.temporal_order_is_valid());

        // どちらかが欠けている場合は制約なし
        ticket.opened = DateTimeField::Absent;
        assert!(ticket.temporal_order_is_valid());
    }
}
