// src/types/datetime.rs

use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// UI側のローカル日時入力フォーマット（分精度）
pub const LOCAL_MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// 日時フィールドの明示的な状態。
///
/// パース不能な入力はエラーにせず `Raw` としてそのまま保持し、
/// ワイヤへも原文のまま通す。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateTimeField {
    #[default]
    Absent,
    Instant(DateTime<Utc>),
    Raw(String),
}

impl DateTimeField {
    /// ローカル分精度文字列（`YYYY-MM-DDTHH:mm`）から変換する。
    /// 空文字は `Absent`、パース不能は `Raw` になる。
    pub fn from_local_minute(input: &str) -> Self {
        if input.is_empty() {
            return Self::Absent;
        }
        match NaiveDateTime::parse_from_str(input, LOCAL_MINUTE_FORMAT) {
            Ok(naive) => match local_to_utc(naive) {
                Some(instant) => Self::Instant(instant),
                None => Self::Raw(input.to_string()),
            },
            Err(_) => Self::Raw(input.to_string()),
        }
    }

    /// ワイヤ文字列（RFC 3339 の絶対時刻）から変換する。
    pub fn from_wire(value: &str) -> Self {
        if value.is_empty() {
            return Self::Absent;
        }
        match DateTime::parse_from_rfc3339(value) {
            Ok(dt) => Self::Instant(dt.with_timezone(&Utc)),
            Err(_) => Self::Raw(value.to_string()),
        }
    }

    /// UI表示用のローカル分精度文字列。`Raw` は原文のまま返す。
    pub fn to_local_minute(&self) -> String {
        match self {
            Self::Absent => String::new(),
            Self::Instant(dt) => dt
                .with_timezone(&Local)
                .format(LOCAL_MINUTE_FORMAT)
                .to_string(),
            Self::Raw(raw) => raw.clone(),
        }
    }

    /// ワイヤ表現。`Instant` はUTCのRFC 3339、`Absent` は空文字。
    pub fn to_wire(&self) -> String {
        match self {
            Self::Absent => String::new(),
            Self::Instant(dt) => dt.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            Self::Raw(raw) => raw.clone(),
        }
    }

    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Instant(dt) => Some(*dt),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// ソート用キー。`Instant` 以外はエポック0に丸める（ソース挙動を保持）。
    pub fn sort_key(&self) -> i64 {
        match self {
            Self::Instant(dt) => dt.timestamp_millis(),
            _ => 0,
        }
    }
}

/// ローカル naive 日時をUTCへ。DST等で存在しない時刻は None。
fn local_to_utc(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

/// ローカル日付の 00:00:00 をUTC境界に変換する（レンジの下限、両端含む）
pub fn local_day_start(date: NaiveDate) -> Option<DateTime<Utc>> {
    local_to_utc(date.and_hms_opt(0, 0, 0)?)
}

/// ローカル日付の 23:59:59 をUTC境界に変換する（レンジの上限、両端含む）
pub fn local_day_end(date: NaiveDate) -> Option<DateTime<Utc>> {
    local_to_utc(date.and_hms_opt(23, 59, 59)?)
}

/// `TicketDto` の日時フィールド用 serde アダプタ。
/// 欠損・null は `Absent`、文字列は `from_wire` で解釈する。
pub mod wire_datetime {
    use super::*;

    pub fn serialize<S>(field: &DateTimeField, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&field.to_wire())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTimeField, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(value) => Ok(DateTimeField::from_wire(&value)),
            None => Ok(DateTimeField::Absent),
        }
    }
}
