// src/export/csv.rs

use crate::api::dto::ticket_dto::{TicketDto, WIRE_FIELDS};
use crate::domain::ticket_model::Ticket;

/// フィルタ済みビューをCSV化する。
/// ヘッダ行はワイヤのフィールド名、すべての値を個別にクォートする。
/// 行順は渡されたビューの順序をそのまま使う。
pub fn export_csv(tickets: &[Ticket]) -> String {
    let mut output = String::new();

    let header: Vec<String> = WIRE_FIELDS.iter().map(|field| quote(field)).collect();
    output.push_str(&header.join(","));
    output.push('\n');

    for ticket in tickets {
        let dto = TicketDto::from(ticket);
        let row = match serde_json::to_value(&dto) {
            Ok(serde_json::Value::Object(map)) => WIRE_FIELDS
                .iter()
                .map(|field| quote(&field_string(map.get(*field))))
                .collect::<Vec<String>>(),
            _ => Vec::new(),
        };
        output.push_str(&row.join(","));
        output.push('\n');
    }

    output
}

fn field_string(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// 値のクォート。埋め込みの `"` は二重化する。
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::priority::Priority;
    use crate::domain::ticket_status::TicketStatus;

    #[test]
    fn test_header_uses_wire_field_names() {
        let csv = export_csv(&[]);
        let header = csv.lines().next().unwrap();
        assert!(header.starts_with("\"ticket_id\",\"category\""));
        assert!(header.contains("\"detectedBy\""));
        assert!(header.ends_with("\"sla_breach\""));
    }

    #[test]
    fn test_every_value_is_quoted_and_escaped() {
        let ticket = Ticket {
            ticket_id: "TCK-1".to_string(),
            priority: Some(Priority::P1),
            status: TicketStatus::Open,
            description: "router said \"goodbye\"".to_string(),
            assigned_to: vec!["Ngozi Umeh".to_string(), "Tunde Alabi".to_string()],
            sla_breach: true,
            ..Ticket::default()
        };

        let csv = export_csv(&[ticket]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains("\"TCK-1\""));
        assert!(row.contains("\"P1\""));
        assert!(row.contains("\"router said \"\"goodbye\"\"\""));
        assert!(row.contains("\"Ngozi Umeh, Tunde Alabi\""));
        assert!(row.contains("\"true\""));
    }

    #[test]
    fn test_rows_follow_view_order() {
        let first = Ticket {
            ticket_id: "A".to_string(),
            ..Ticket::default()
        };
        let second = Ticket {
            ticket_id: "B".to_string(),
            ..Ticket::default()
        };

        let csv = export_csv(&[first, second]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("\"A\""));
        assert!(lines[2].starts_with("\"B\""));
    }
}
