// src/service/intake.rs

use crate::api::dto::ticket_dto::{TicketDraft, TicketDto};
use crate::domain::category::{self, Category};
use crate::domain::detection::DETECTED_BY_OTHER;
use crate::domain::ticket_model::Ticket;
use crate::error::AppResult;
use crate::repository::{AttachmentUpload, TicketApi};
use crate::service::notifier::{Notification, Notifier};
use crate::types::{DateTimeField, SelectOption};
use crate::utils::validation;
use std::sync::Arc;
use validator::Validate;

/// インシデント受付フォームの状態。
///
/// UI層はこの構造体のフィールドをコントロールド入力として描画する。
/// enumフィールドは選択肢オブジェクト、日時フィールドはローカル分精度の
/// 文字列を保持し、送信時に `to_draft` でワイヤ表現へ正規化する。
#[derive(Debug, Clone, Default)]
pub struct IntakeForm {
    pub category: Option<SelectOption>,
    pub sub_category: String,
    pub opened: String,
    pub reported_by: String,
    pub contact_info: String,
    pub priority: Option<SelectOption>,
    pub building: String,
    pub location: String,
    pub impacted: String,
    pub description: String,
    pub detected_by: Option<SelectOption>,
    pub detected_by_other: String,
    pub time_detected: String,
    pub root_cause: String,
    pub actions_taken: String,
    pub attachments: Vec<AttachmentUpload>,
}

impl IntakeForm {
    /// カテゴリ変更。サブカテゴリは前の値に関係なく必ず空へリセットする。
    pub fn set_category(&mut self, selected: Option<SelectOption>) {
        self.category = selected;
        self.sub_category.clear();
    }

    pub fn set_sub_category(&mut self, selected: Option<SelectOption>) {
        self.sub_category = SelectOption::to_wire(selected.as_ref());
    }

    pub fn set_priority(&mut self, selected: Option<SelectOption>) {
        self.priority = selected;
    }

    pub fn set_building(&mut self, selected: Option<SelectOption>) {
        self.building = SelectOption::to_wire(selected.as_ref());
    }

    /// 検知元の変更。"Other" 以外に切り替えたら自由記述を消す。
    pub fn set_detected_by(&mut self, selected: Option<SelectOption>) {
        let is_other = matches!(&selected, Some(option) if option.value == DETECTED_BY_OTHER);
        self.detected_by = selected;
        if !is_other {
            self.detected_by_other.clear();
        }
    }

    /// 現在のカテゴリで有効なサブカテゴリ選択肢。
    /// 未選択・未知のカテゴリでは空になる。
    pub fn sub_category_options(&self) -> Vec<SelectOption> {
        let selected = self
            .category
            .as_ref()
            .and_then(|option| Category::from_str(&option.value));
        category::sub_category_options(selected)
    }

    /// ワイヤ表現への正規化。
    /// 選択肢は素の値へ、"Other" は自由記述の内容へ置き換える
    /// （自由記述が空でも置き換える。空文字は有効なワイヤ値）。
    pub fn to_draft(&self) -> TicketDraft {
        let mut detected_by = SelectOption::to_wire(self.detected_by.as_ref());
        if detected_by == DETECTED_BY_OTHER {
            detected_by = self.detected_by_other.clone();
        }

        TicketDraft {
            category: SelectOption::to_wire(self.category.as_ref()),
            sub_category: self.sub_category.clone(),
            opened: DateTimeField::from_local_minute(&self.opened),
            reported_by: self.reported_by.clone(),
            contact_info: self.contact_info.clone(),
            priority: SelectOption::to_wire(self.priority.as_ref()),
            building: self.building.clone(),
            location: self.location.clone(),
            impacted: self.impacted.clone(),
            description: self.description.clone(),
            detected_by,
            time_detected: DateTimeField::from_local_minute(&self.time_detected),
            root_cause: self.root_cause.clone(),
            actions_taken: self.actions_taken.clone(),
        }
    }

    /// 既存チケットの編集開始時にフォームへ逆変換する。
    /// 添付は書き込み専用なので再投入しない。
    pub fn populate(&mut self, ticket: &Ticket) {
        self.category = ticket
            .category
            .and_then(|category| SelectOption::from_value(category.as_str()));
        self.sub_category = ticket.sub_category.clone().unwrap_or_default();
        self.opened = ticket.opened.to_local_minute();
        self.reported_by = ticket.reported_by.clone();
        self.contact_info = ticket.contact_info.clone();
        self.priority = ticket
            .priority
            .and_then(|priority| SelectOption::from_value(priority.as_str()));
        self.building = ticket
            .building
            .map(|building| building.as_str().to_string())
            .unwrap_or_default();
        self.location = ticket.location.clone();
        self.impacted = ticket.impacted.clone();
        self.description = ticket.description.clone();
        self.detected_by = SelectOption::from_value(&ticket.detected_by);
        self.detected_by_other = String::new();
        self.time_detected = ticket.time_detected.to_local_minute();
        self.root_cause = ticket.root_cause.clone();
        self.actions_taken = ticket.actions_taken.clone();
        self.attachments.clear();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 受付フォームの送信フロー（新規作成と全体編集）。
pub struct IntakeService {
    api: Arc<dyn TicketApi>,
    notifier: Arc<dyn Notifier>,
    pub form: IntakeForm,
    edit_target: Option<String>,
}

impl IntakeService {
    pub fn new(api: Arc<dyn TicketApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            form: IntakeForm::default(),
            edit_target: None,
        }
    }

    /// 既存チケットを編集モードで開く
    pub fn begin_edit(&mut self, ticket: &Ticket) {
        self.form.populate(ticket);
        self.edit_target = Some(ticket.ticket_id.clone());
    }

    pub fn is_editing(&self) -> bool {
        self.edit_target.is_some()
    }

    /// フォームを正規化して送信する。
    ///
    /// バリデーション失敗はネットワークに出る前にErrで返す（通知ではなく
    /// フィールド付近にインライン表示する想定）。バックエンド失敗は通知へ
    /// 変換し、フォーム内容は保持したままErrを返す。作成成功時のみフォームを
    /// 初期状態へ戻す。
    pub async fn submit(&mut self) -> AppResult<TicketDto> {
        let draft = self.form.to_draft();
        draft.validate()?;
        validation::validate_sub_category(&draft.category, &draft.sub_category)?;

        let result = match self.edit_target.as_deref() {
            Some(ticket_id) => self.api.update_draft(ticket_id, &draft).await,
            None if !self.form.attachments.is_empty() => {
                self.api
                    .create_with_attachments(&draft, &self.form.attachments)
                    .await
            }
            None => self.api.create(&draft).await,
        };

        match result {
            Ok(saved) => {
                if self.edit_target.take().is_some() {
                    self.notifier
                        .notify(Notification::success("Ticket updated successfully!"));
                } else {
                    self.notifier
                        .notify(Notification::success("Ticket created successfully!"));
                    self.form.reset();
                }
                Ok(saved)
            }
            Err(err) => {
                self.notifier.notify(Notification::error(format!(
                    "Error submitting ticket: {}",
                    err
                )));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ticket_status::TicketStatus;

    fn option(value: &str) -> Option<SelectOption> {
        Some(SelectOption::new(value, value))
    }

    #[test]
    fn test_category_change_always_resets_sub_category() {
        let mut form = IntakeForm::default();
        form.set_category(option("Network"));
        form.set_sub_category(option("Router Failure"));
        assert_eq!(form.sub_category, "Router Failure");

        form.set_category(option("Storage"));
        assert_eq!(form.sub_category, "");

        // クリア（未選択へ戻す）でもリセットされる
        form.set_sub_category(option("Disk Failure"));
        form.set_category(None);
        assert_eq!(form.sub_category, "");
    }

    #[test]
    fn test_sub_category_options_follow_category() {
        let mut form = IntakeForm::default();
        assert!(form.sub_category_options().is_empty());

        form.set_category(option("Network"));
        let options = form.sub_category_options();
        assert!(options.iter().any(|o| o.value == "Router Failure"));
        assert!(!options.iter().any(|o| o.value == "Disk Failure"));

        form.set_category(option("Telephony"));
        assert!(form.sub_category_options().is_empty());
    }

    #[test]
    fn test_switching_away_from_other_clears_companion() {
        let mut form = IntakeForm::default();
        form.set_detected_by(option("Other"));
        form.detected_by_other = "Security guard phoned it in".to_string();

        form.set_detected_by(option("Monitoring Tool"));
        assert_eq!(form.detected_by_other, "");

        form.set_detected_by(option("Other"));
        form.detected_by_other = "again".to_string();
        form.set_detected_by(None);
        assert_eq!(form.detected_by_other, "");
    }

    #[test]
    fn test_other_sentinel_is_replaced_by_companion_text() {
        let mut form = IntakeForm::default();
        form.set_detected_by(option("Other"));
        form.detected_by_other = "Night-shift operator".to_string();
        form.description = "Generator room alarm".to_string();

        let draft = form.to_draft();
        assert_eq!(draft.detected_by, "Night-shift operator");
    }

    #[test]
    fn test_other_with_empty_companion_is_still_submittable() {
        let mut form = IntakeForm::default();
        form.set_detected_by(option("Other"));
        form.description = "Generator room alarm".to_string();

        let draft = form.to_draft();
        // 空文字も有効なワイヤ値（この緩い挙動は仕様として保持）
        assert_eq!(draft.detected_by, "");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_to_draft_normalizes_option_objects_and_datetimes() {
        let mut form = IntakeForm::default();
        form.set_category(option("Power"));
        form.set_sub_category(option("UPS Failure"));
        form.set_priority(Some(SelectOption::new("P1", "P1 - Critical")));
        form.set_building(option("LOS4"));
        form.opened = "2025-05-01T10:30".to_string();
        form.time_detected = "not a timestamp".to_string();
        form.description = "UPS bank B offline".to_string();

        let draft = form.to_draft();
        assert_eq!(draft.category, "Power");
        assert_eq!(draft.priority, "P1");
        assert_eq!(draft.building, "LOS4");
        assert!(matches!(draft.opened, DateTimeField::Instant(_)));
        // パース不能は原文のまま通す
        assert_eq!(
            draft.time_detected,
            DateTimeField::Raw("not a timestamp".to_string())
        );
    }

    #[test]
    fn test_draft_requires_description_before_any_network_call() {
        let form = IntakeForm::default();
        let draft = form.to_draft();
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_populate_round_trips_through_draft() {
        let ticket = Ticket {
            ticket_id: "TCK-9".to_string(),
            category: Category::from_str("Network"),
            sub_category: Some("DNS Issue".to_string()),
            priority: crate::domain::priority::Priority::from_str("P2"),
            status: TicketStatus::Open,
            description: "Resolver flapping".to_string(),
            detected_by: "Automated Alert".to_string(),
            opened: DateTimeField::from_local_minute("2025-05-01T08:15"),
            ..Ticket::default()
        };

        let mut form = IntakeForm::default();
        form.populate(&ticket);

        assert_eq!(form.sub_category, "DNS Issue");
        assert_eq!(form.opened, "2025-05-01T08:15");
        assert_eq!(form.detected_by.as_ref().unwrap().value, "Automated Alert");
        assert!(form.attachments.is_empty());

        let draft = form.to_draft();
        assert_eq!(draft.category, "Network");
        assert_eq!(draft.sub_category, "DNS Issue");
        assert_eq!(draft.description, "Resolver flapping");
        assert_eq!(draft.opened, ticket.opened);
        // enumはUIの選択肢を経由してもワイヤ値が保存される
        assert_eq!(draft.priority, "P2");
    }
}
