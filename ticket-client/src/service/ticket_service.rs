// src/service/ticket_service.rs

use crate::api::dto::ticket_dto::{ResolveTicketDto, TicketDraft, TicketDto, TicketPatch};
use crate::api::dto::ticket_query_dto::TicketSearchQuery;
use crate::domain::ticket_model::Ticket;
use crate::domain::ticket_status::TicketStatus;
use crate::error::{AppError, AppResult};
use crate::repository::TicketApi;
use crate::service::filter;
use crate::service::notifier::{Notification, Notifier};
use crate::types::DateTimeField;
use crate::utils::validation;
use std::sync::Arc;
use validator::Validate;

/// チケット一覧の状態と楽観的更新プロトコルを担うサービス。
///
/// ローカルコレクションは権威を持たないキャッシュで、各ミューテーションは
/// スナップショット取得 → ローカル即時反映 → PUT → 確認または完全巻き戻し、
/// の順で進む。並行編集の検出は行わない（後勝ち、既知のギャップ）。
pub struct TicketService {
    api: Arc<dyn TicketApi>,
    notifier: Arc<dyn Notifier>,
    tickets: Vec<Ticket>,
}

impl TicketService {
    pub fn new(api: Arc<dyn TicketApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            tickets: Vec::new(),
        }
    }

    /// バックエンドから全チケットを取得してローカルコレクションを置き換える
    pub async fn load(&mut self) -> AppResult<usize> {
        let dtos = self.api.fetch_all().await?;
        self.tickets = dtos.into_iter().map(Ticket::from).collect();
        for ticket in &self.tickets {
            // closed >= opened の不変条件はバックエンド側のデータに対しても監視する
            if !ticket.temporal_order_is_valid() {
                tracing::warn!(
                    ticket_id = %ticket.ticket_id,
                    "Ticket closed before it was opened; displaying as-is"
                );
            }
        }
        Ok(self.tickets.len())
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn find(&self, ticket_id: &str) -> Option<&Ticket> {
        self.tickets
            .iter()
            .find(|ticket| ticket.ticket_id == ticket_id)
    }

    /// 現在の条件でフィルタ済み・ソート済みビューを導出する
    pub fn view(&self, query: &TicketSearchQuery) -> Vec<Ticket> {
        filter::derive_view(&self.tickets, query)
    }

    /// ステータスのみの楽観的更新
    pub async fn change_status(&mut self, ticket_id: &str, status: TicketStatus) -> AppResult<()> {
        self.ensure_exists(ticket_id)?;
        let snapshot = self.tickets.clone();
        self.apply(ticket_id, |ticket| ticket.status = status);

        match self
            .api
            .update_fields(ticket_id, &TicketPatch::status_only(status))
            .await
        {
            Ok(_) => {
                self.notifier.notify(Notification::success(format!(
                    "Status updated for ticket {}",
                    ticket_id
                )));
                Ok(())
            }
            Err(err) => Err(self.rollback("Error updating status", snapshot, err)),
        }
    }

    /// 担当エンジニアのみの楽観的更新
    pub async fn assign(&mut self, ticket_id: &str, engineers: Vec<String>) -> AppResult<()> {
        validation::validate_assignees(&engineers)?;
        self.ensure_exists(ticket_id)?;
        let snapshot = self.tickets.clone();
        self.apply(ticket_id, |ticket| {
            ticket.assigned_to = engineers.clone();
        });

        match self
            .api
            .update_fields(ticket_id, &TicketPatch::assignment_only(&engineers))
            .await
        {
            Ok(_) => {
                self.notifier.notify(Notification::success(format!(
                    "Assignment updated for ticket {}",
                    ticket_id
                )));
                Ok(())
            }
            Err(err) => Err(self.rollback("Error updating assignment", snapshot, err)),
        }
    }

    /// 全体編集の保存。成功時は編集UIを閉じてよい（Okがその合図）。
    /// 失敗時は巻き戻した上でErrを返し、編集UIは開いたままにする。
    pub async fn apply_edit(&mut self, ticket_id: &str, draft: &TicketDraft) -> AppResult<()> {
        draft.validate()?;
        validation::validate_sub_category(&draft.category, &draft.sub_category)?;
        self.ensure_exists(ticket_id)?;

        let snapshot = self.tickets.clone();
        self.apply(ticket_id, |ticket| draft.apply_to(ticket));

        match self.api.update_draft(ticket_id, draft).await {
            Ok(_) => {
                self.notifier
                    .notify(Notification::success("Ticket updated successfully!"));
                Ok(())
            }
            Err(err) => Err(self.rollback("Error submitting ticket", snapshot, err)),
        }
    }

    /// 解決フロー。フォーム側の `status` に関係なく Resolved を強制する。
    pub async fn resolve(&mut self, ticket_id: &str, resolution: &ResolveTicketDto) -> AppResult<()> {
        self.ensure_exists(ticket_id)?;
        let snapshot = self.tickets.clone();
        self.apply(ticket_id, |ticket| {
            ticket.resolution_summary = resolution.resolution_summary.clone();
            ticket.resolution_time = DateTimeField::from_local_minute(&resolution.resolution_time);
            ticket.root_cause = resolution.root_cause.clone();
            ticket.post_review = resolution.post_review;
            ticket.sla_breach = resolution.sla_breach;
            // 解決アクションの不変条件。ユーザーが選べる値ではない。
            ticket.status = TicketStatus::Resolved;
        });

        // マージ済みの全レコードを送る（強制済みのResolvedを含む）
        let merged = match self.find(ticket_id) {
            Some(ticket) => TicketDto::from(ticket),
            None => {
                return Err(AppError::NotFound(format!(
                    "Ticket with id {} not found",
                    ticket_id
                )))
            }
        };

        match self.api.replace(ticket_id, &merged).await {
            Ok(_) => {
                self.notifier
                    .notify(Notification::success("Ticket resolved successfully!"));
                Ok(())
            }
            Err(err) => Err(self.rollback("Error resolving ticket", snapshot, err)),
        }
    }

    fn ensure_exists(&self, ticket_id: &str) -> AppResult<()> {
        if self.find(ticket_id).is_some() {
            Ok(())
        } else {
            Err(AppError::NotFound(format!(
                "Ticket with id {} not found",
                ticket_id
            )))
        }
    }

    fn apply<F>(&mut self, ticket_id: &str, mutate: F)
    where
        F: FnOnce(&mut Ticket),
    {
        if let Some(ticket) = self
            .tickets
            .iter_mut()
            .find(|ticket| ticket.ticket_id == ticket_id)
        {
            mutate(ticket);
        }
    }

    /// 確認済み状態へ完全に巻き戻す。部分適用状態は決して残さない。
    fn rollback(&mut self, context: &str, snapshot: Vec<Ticket>, err: AppError) -> AppError {
        self.tickets = snapshot;
        tracing::warn!(error = %err, context, "Ticket mutation failed; local state rolled back");
        self.notifier
            .notify(Notification::error(format!("{}: {}", context, err)));
        err
    }
}
