// src/repository/ticket_repository.rs

use crate::api::dto::ticket_dto::{TicketDraft, TicketDto, TicketPatch};
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::multipart;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Instant;
use uuid::Uuid;

/// フォームから添付するファイル（書き込み専用、編集時に再取得はしない）
#[derive(Debug, Clone)]
pub struct AttachmentUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl AttachmentUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: mime::APPLICATION_OCTET_STREAM.as_ref().to_string(),
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

/// チケットAPIへのアクセスを抽象化するトレイト。
/// テストではモック実装に差し替える。
#[async_trait]
pub trait TicketApi: Send + Sync {
    async fn fetch_all(&self) -> AppResult<Vec<TicketDto>>;
    async fn create(&self, draft: &TicketDraft) -> AppResult<TicketDto>;
    async fn create_with_attachments(
        &self,
        draft: &TicketDraft,
        attachments: &[AttachmentUpload],
    ) -> AppResult<TicketDto>;
    async fn update_fields(&self, ticket_id: &str, patch: &TicketPatch) -> AppResult<TicketDto>;
    async fn update_draft(&self, ticket_id: &str, draft: &TicketDraft) -> AppResult<TicketDto>;
    async fn replace(&self, ticket_id: &str, ticket: &TicketDto) -> AppResult<TicketDto>;
}

/// リモートのチケットAPIに対するHTTP実装。
pub struct TicketRepository {
    client: reqwest::Client,
    base_url: String,
}

impl TicketRepository {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            // タイムアウトは設定しない（未完のリクエストは楽観状態のまま、再試行は常に手動）
            client: reqwest::Client::new(),
            base_url: config.api_base_url.clone(),
        }
    }

    fn tickets_url(&self) -> String {
        format!("{}/tickets", self.base_url)
    }

    fn ticket_url(&self, ticket_id: &str) -> String {
        format!("{}/tickets/{}", self.base_url, ticket_id)
    }

    async fn put_json<B, T>(&self, ticket_id: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.ticket_url(ticket_id);
        let request = self.client.put(&url).json(body);
        self.dispatch(request, "PUT", &url).await
    }

    async fn dispatch<T>(
        &self,
        request: reqwest::RequestBuilder,
        method: &str,
        path: &str,
    ) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let request_id = Uuid::new_v4();
        let start = Instant::now();
        tracing::debug!(request_id = %request_id, method, path, "Ticket API request started");

        let response = request.send().await?;
        let status = response.status();
        tracing::info!(
            request_id = %request_id,
            method,
            path,
            status = status.as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Ticket API request completed"
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Api {
                status: status.as_u16(),
                message: extract_error_message(&body, status.as_u16()),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl TicketApi for TicketRepository {
    async fn fetch_all(&self) -> AppResult<Vec<TicketDto>> {
        let url = self.tickets_url();
        let request = self.client.get(&url);
        self.dispatch(request, "GET", &url).await
    }

    async fn create(&self, draft: &TicketDraft) -> AppResult<TicketDto> {
        let url = self.tickets_url();
        let request = self.client.post(&url).json(draft);
        self.dispatch(request, "POST", &url).await
    }

    async fn create_with_attachments(
        &self,
        draft: &TicketDraft,
        attachments: &[AttachmentUpload],
    ) -> AppResult<TicketDto> {
        let url = self.tickets_url();

        // JSONペイロードを `payload` パートに、ファイルを `attachments[]` パートに詰める
        let mut form = multipart::Form::new().text("payload", serde_json::to_string(draft)?);
        for attachment in attachments {
            let part = multipart::Part::bytes(attachment.bytes.clone())
                .file_name(attachment.file_name.clone())
                .mime_str(&attachment.content_type)?;
            form = form.part("attachments[]", part);
        }

        let request = self.client.post(&url).multipart(form);
        self.dispatch(request, "POST", &url).await
    }

    async fn update_fields(&self, ticket_id: &str, patch: &TicketPatch) -> AppResult<TicketDto> {
        self.put_json(ticket_id, patch).await
    }

    async fn update_draft(&self, ticket_id: &str, draft: &TicketDraft) -> AppResult<TicketDto> {
        self.put_json(ticket_id, draft).await
    }

    async fn replace(&self, ticket_id: &str, ticket: &TicketDto) -> AppResult<TicketDto> {
        self.put_json(ticket_id, ticket).await
    }
}

/// エラーレスポンスのボディからユーザー向けメッセージを取り出す。
/// `{"message": "..."}` → その文字列、JSON文字列 → その値、それ以外は原文。
fn extract_error_message(body: &str, status: u16) -> String {
    if body.trim().is_empty() {
        return format!("HTTP {}", status);
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::String(message)) => message,
        Ok(serde_json::Value::Object(map)) => map
            .get("message")
            .and_then(|value| value.as_str())
            .map(String::from)
            .unwrap_or_else(|| body.to_string()),
        _ => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message_variants() {
        assert_eq!(
            extract_error_message(r#"{"message":"ticket not found"}"#, 404),
            "ticket not found"
        );
        assert_eq!(extract_error_message(r#""plain text error""#, 400), "plain text error");
        assert_eq!(
            extract_error_message("database exploded", 500),
            "database exploded"
        );
        assert_eq!(extract_error_message("", 503), "HTTP 503");
        // messageキーを持たないオブジェクトは原文で返す
        assert_eq!(
            extract_error_message(r#"{"error":"nope"}"#, 422),
            r#"{"error":"nope"}"#
        );
    }

    #[test]
    fn test_attachment_upload_defaults_to_octet_stream() {
        let upload = AttachmentUpload::new("diagram.png", vec![1, 2, 3]);
        assert_eq!(upload.content_type, "application/octet-stream");

        let typed = upload.with_content_type("image/png");
        assert_eq!(typed.content_type, "image/png");
    }
}
