// src/domain/detection.rs

use crate::types::SelectOption;

/// 「その他」を選んだときに自由記述へ切り替わるセンチネル値
pub const DETECTED_BY_OTHER: &str = "Other";

/// 検知元の選択肢（固定）。未選択状態は選択肢ではなく `None` で表す。
pub const DETECTED_BY_VALUES: &[&str] = &[
    "Monitoring Tool",
    "Customer Report",
    "Engineer Observation",
    "Automated Alert",
    DETECTED_BY_OTHER,
];

/// フォーム用の検知元選択肢一覧
pub fn detected_by_options() -> Vec<SelectOption> {
    DETECTED_BY_VALUES
        .iter()
        .map(|value| SelectOption::new(*value, *value))
        .collect()
}
