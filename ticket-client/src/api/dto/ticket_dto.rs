// src/api/dto/ticket_dto.rs

use crate::domain::building::Building;
use crate::domain::category::Category;
use crate::domain::priority::Priority;
use crate::domain::ticket_model::Ticket;
use crate::domain::ticket_status::TicketStatus;
use crate::types::{wire_datetime, DateTimeField};
use crate::utils::validation::common;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// `assigned_to` のワイヤ区切り文字（読み取りは3種を許容、書き込みはカンマ）
const ASSIGNEE_DELIMITERS: &[char] = &[',', ';', '|'];

/// ワイヤの区切り文字列を順序付きリストへ展開する
pub fn split_assignees(raw: &str) -> Vec<String> {
    raw.split(ASSIGNEE_DELIMITERS)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// リストをワイヤの区切り文字列へ戻す
pub fn join_assignees(names: &[String]) -> String {
    names.join(", ")
}

/// `assigned_to` 用 serde アダプタ（ワイヤ境界で一度だけ変換する）
pub mod assigned_list {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(names: &[String], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&join_assignees(names))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => Ok(split_assignees(&raw)),
            None => Ok(Vec::new()),
        }
    }
}

/// bool / "Yes"・"No" / "true"・"false" が混在するフラグ用 serde アダプタ。
/// 読み取りは両対応、書き込みは常に bool。
pub mod flexible_bool {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireFlag {
        Bool(bool),
        Text(String),
    }

    pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bool(*value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<WireFlag>::deserialize(deserializer)? {
            None => Ok(false),
            Some(WireFlag::Bool(value)) => Ok(value),
            Some(WireFlag::Text(text)) => Ok(matches!(
                text.trim().to_lowercase().as_str(),
                "yes" | "true" | "1"
            )),
        }
    }
}

// --- Wire DTO ---

/// バックエンドとやり取りするワイヤ表現。
/// enumは素の文字列（未設定は空文字）、日時はRFC 3339文字列、
/// `detectedBy` だけは歴史的にcamelCaseで送受信される。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketDto {
    #[serde(default)]
    pub ticket_id: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sub_category: String,
    #[serde(default, with = "wire_datetime")]
    pub opened: DateTimeField,
    #[serde(default)]
    pub reported_by: String,
    #[serde(default)]
    pub contact_info: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub building: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub impacted: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "detectedBy")]
    pub detected_by: String,
    #[serde(default, with = "wire_datetime")]
    pub time_detected: DateTimeField,
    #[serde(default)]
    pub root_cause: String,
    #[serde(default)]
    pub actions_taken: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, with = "assigned_list")]
    pub assigned_to: Vec<String>,
    #[serde(default)]
    pub resolution_summary: String,
    #[serde(default, with = "wire_datetime")]
    pub resolution_time: DateTimeField,
    #[serde(default, with = "flexible_bool")]
    pub post_review: bool,
    #[serde(default)]
    pub attachments: String,
    #[serde(default)]
    pub escalation_history: String,
    #[serde(default, with = "wire_datetime")]
    pub closed: DateTimeField,
    #[serde(default, with = "flexible_bool")]
    pub sla_breach: bool,
}

/// CSVや全文検索が使うワイヤのフィールド名（列順もこの順）
pub const WIRE_FIELDS: &[&str] = &[
    "ticket_id",
    "category",
    "sub_category",
    "opened",
    "reported_by",
    "contact_info",
    "priority",
    "building",
    "location",
    "impacted",
    "description",
    "detectedBy",
    "time_detected",
    "root_cause",
    "actions_taken",
    "status",
    "assigned_to",
    "resolution_summary",
    "resolution_time",
    "post_review",
    "attachments",
    "escalation_history",
    "closed",
    "sla_breach",
];

// ワイヤ表現からドメイン表現への変換。
// 未知のenum値は未設定扱いに落とす（statusのみデフォルトOpen）。
impl From<TicketDto> for Ticket {
    fn from(dto: TicketDto) -> Self {
        Self {
            ticket_id: dto.ticket_id,
            category: Category::from_str(&dto.category),
            sub_category: if dto.sub_category.is_empty() {
                None
            } else {
                Some(dto.sub_category)
            },
            priority: Priority::from_str(&dto.priority),
            building: Building::from_str(&dto.building),
            status: TicketStatus::from_str(&dto.status).unwrap_or_default(),
            description: dto.description,
            location: dto.location,
            impacted: dto.impacted,
            reported_by: dto.reported_by,
            contact_info: dto.contact_info,
            detected_by: dto.detected_by,
            root_cause: dto.root_cause,
            actions_taken: dto.actions_taken,
            resolution_summary: dto.resolution_summary,
            escalation_history: dto.escalation_history,
            opened: dto.opened,
            time_detected: dto.time_detected,
            resolution_time: dto.resolution_time,
            closed: dto.closed,
            assigned_to: dto.assigned_to,
            post_review: dto.post_review,
            sla_breach: dto.sla_breach,
            attachments: dto.attachments,
        }
    }
}

impl From<&Ticket> for TicketDto {
    fn from(ticket: &Ticket) -> Self {
        Self {
            ticket_id: ticket.ticket_id.clone(),
            category: ticket
                .category
                .map(|category| category.as_str().to_string())
                .unwrap_or_default(),
            sub_category: ticket.sub_category.clone().unwrap_or_default(),
            priority: ticket
                .priority
                .map(|priority| priority.as_str().to_string())
                .unwrap_or_default(),
            building: ticket
                .building
                .map(|building| building.as_str().to_string())
                .unwrap_or_default(),
            status: ticket.status.as_str().to_string(),
            description: ticket.description.clone(),
            location: ticket.location.clone(),
            impacted: ticket.impacted.clone(),
            reported_by: ticket.reported_by.clone(),
            contact_info: ticket.contact_info.clone(),
            detected_by: ticket.detected_by.clone(),
            root_cause: ticket.root_cause.clone(),
            actions_taken: ticket.actions_taken.clone(),
            resolution_summary: ticket.resolution_summary.clone(),
            escalation_history: ticket.escalation_history.clone(),
            opened: ticket.opened.clone(),
            time_detected: ticket.time_detected.clone(),
            resolution_time: ticket.resolution_time.clone(),
            closed: ticket.closed.clone(),
            assigned_to: ticket.assigned_to.clone(),
            post_review: ticket.post_review,
            sla_breach: ticket.sla_breach,
            attachments: ticket.attachments.clone(),
        }
    }
}

// --- Request DTOs ---

/// フォーム正規化済みの作成・全体更新ペイロード。
/// フィールド名はワイヤ形式に合わせる（`detectedBy` 含む）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct TicketDraft {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sub_category: String,
    #[serde(default, with = "wire_datetime")]
    pub opened: DateTimeField,
    #[serde(default)]
    pub reported_by: String,
    #[serde(default)]
    pub contact_info: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub building: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub impacted: String,

    #[validate(length(
        min = common::ticket::DESCRIPTION_MIN_LENGTH,
        max = common::ticket::DESCRIPTION_MAX_LENGTH,
        message = "Incident description is required"
    ))]
    pub description: String,

    #[serde(default, rename = "detectedBy")]
    pub detected_by: String,
    #[serde(default, with = "wire_datetime")]
    pub time_detected: DateTimeField,
    #[serde(default)]
    pub root_cause: String,
    #[serde(default)]
    pub actions_taken: String,
}

impl TicketDraft {
    /// 全体編集の保存時に、ドラフトの内容をローカルのチケットへ反映する。
    /// ドラフトに無いフィールド（status・担当・解決情報）は保持される。
    pub fn apply_to(&self, ticket: &mut Ticket) {
        ticket.category = Category::from_str(&self.category);
        ticket.sub_category = if self.sub_category.is_empty() {
            None
        } else {
            Some(self.sub_category.clone())
        };
        ticket.priority = Priority::from_str(&self.priority);
        ticket.building = Building::from_str(&self.building);
        ticket.opened = self.opened.clone();
        ticket.reported_by = self.reported_by.clone();
        ticket.contact_info = self.contact_info.clone();
        ticket.location = self.location.clone();
        ticket.impacted = self.impacted.clone();
        ticket.description = self.description.clone();
        ticket.detected_by = self.detected_by.clone();
        ticket.time_detected = self.time_detected.clone();
        ticket.root_cause = self.root_cause.clone();
        ticket.actions_taken = self.actions_taken.clone();
    }
}

/// 部分更新（PUT）のボディ。変更したフィールドだけを送る。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TicketPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}

impl TicketPatch {
    pub fn status_only(status: TicketStatus) -> Self {
        Self {
            status: Some(status.as_str().to_string()),
            ..Self::default()
        }
    }

    pub fn assignment_only(names: &[String]) -> Self {
        Self {
            assigned_to: Some(join_assignees(names)),
            ..Self::default()
        }
    }
}

/// 解決フローの入力。
/// `status` フィールドはフォーム上に残っていても送信時に Resolved で上書きされる。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveTicketDto {
    pub status: String,
    pub resolution_summary: String,
    /// ローカル分精度（`YYYY-MM-DDTHH:mm`）の文字列入力
    pub resolution_time: String,
    pub root_cause: String,
    pub post_review: bool,
    pub sla_breach: bool,
}
