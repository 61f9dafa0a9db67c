// src/service/filter.rs

use crate::api::dto::ticket_dto::TicketDto;
use crate::api::dto::ticket_query_dto::TicketSearchQuery;
use crate::domain::ticket_model::Ticket;
use crate::types::{local_day_end, local_day_start, SortOrder};

/// フィルタ済み・ソート済みビューを導出する。
/// 元コレクションは変更せず、同じ入力からは常に同じ順序の結果を返す。
pub fn derive_view(tickets: &[Ticket], query: &TicketSearchQuery) -> Vec<Ticket> {
    let mut view: Vec<Ticket> = tickets
        .iter()
        .filter(|ticket| matches(ticket, query))
        .cloned()
        .collect();
    sort_by_opened(&mut view, query.sort_order);
    view
}

/// すべての有効な条件のAND。条件は純粋な述語で、評価順は結果に影響しない。
pub fn matches(ticket: &Ticket, query: &TicketSearchQuery) -> bool {
    if let Some(term) = query.search.as_deref() {
        if !term.is_empty() && !matches_search(ticket, term) {
            return false;
        }
    }
    if let Some(priority) = query.priority {
        if ticket.priority != Some(priority) {
            return false;
        }
    }
    if let Some(status) = query.status {
        if ticket.status != status {
            return false;
        }
    }
    if let Some(building) = query.building {
        if ticket.building != Some(building) {
            return false;
        }
    }
    if !query.assigned_to.is_empty() && !assignee_intersects(ticket, &query.assigned_to) {
        return false;
    }
    if query.has_date_range() && !opened_in_range(ticket, query) {
        return false;
    }
    true
}

/// 任意フィールドの文字列表現に対する部分一致（大文字小文字を区別しない、フィールド横断OR）
fn matches_search(ticket: &Ticket, term: &str) -> bool {
    let needle = term.to_lowercase();
    wire_values(ticket)
        .iter()
        .any(|value| value.to_lowercase().contains(&needle))
}

/// ワイヤ表現の全フィールド値を文字列化する（検索はワイヤの見え方に対して行う）
fn wire_values(ticket: &Ticket) -> Vec<String> {
    let dto = TicketDto::from(ticket);
    match serde_json::to_value(&dto) {
        Ok(serde_json::Value::Object(map)) => map.into_iter().map(|(_, v)| stringify(v)).collect(),
        _ => Vec::new(),
    }
}

fn stringify(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

/// 選択した担当者集合との積が空でないかチェック
fn assignee_intersects(ticket: &Ticket, selected: &[String]) -> bool {
    ticket
        .assigned_to
        .iter()
        .any(|name| selected.iter().any(|wanted| wanted == name))
}

/// `opened` がローカル日付レンジ（開始日の0時〜終了日の23:59:59、両端含む）に入るか。
/// 日付を持たないチケットは、レンジが片側でも有効なら常に不成立。
fn opened_in_range(ticket: &Ticket, query: &TicketSearchQuery) -> bool {
    let Some(opened) = ticket.opened.instant() else {
        return false;
    };
    if let Some(lower) = query.opened_from.and_then(local_day_start) {
        if opened < lower {
            return false;
        }
    }
    if let Some(upper) = query.opened_to.and_then(local_day_end) {
        if opened > upper {
            return false;
        }
    }
    true
}

/// `opened` 単一キーの安定ソート。日時が同値なら元のコレクション順を保つ。
pub fn sort_by_opened(view: &mut [Ticket], order: SortOrder) {
    match order {
        SortOrder::Asc => view.sort_by_key(|ticket| ticket.opened.sort_key()),
        SortOrder::Desc => {
            view.sort_by(|a, b| b.opened.sort_key().cmp(&a.opened.sort_key()));
        }
    }
}
