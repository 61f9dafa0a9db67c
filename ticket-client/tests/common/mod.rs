// tests/common/mod.rs

use axum::extract::{FromRequest, Multipart, Path, Request, State};
use axum::http::{header::CONTENT_TYPE, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Once};
use uuid::Uuid;

// テスト環境の初期化を一度だけ実行
static INIT: Once = Once::new();

/// テスト環境を初期化
pub fn init_test_env() {
    INIT.call_once(|| {
        dotenvy::dotenv().ok();

        // テスト用のログ設定
        let _ = tracing_subscriber::fmt()
            .with_env_filter("ticket_client=debug")
            .with_test_writer()
            .try_init();
    });
}

/// モックバックエンドの共有状態。
/// チケットはワイヤ表現（JSONオブジェクト）のまま保持する。
#[derive(Clone, Default)]
pub struct MockState {
    pub tickets: Arc<Mutex<Vec<Value>>>,
    /// trueの間、作成・更新リクエストをHTTP 500で失敗させる
    pub fail_requests: Arc<AtomicBool>,
    /// multipart作成で受け取った添付ファイル名
    pub received_attachments: Arc<Mutex<Vec<String>>>,
}

impl MockState {
    pub fn seed(&self, ticket: Value) {
        self.tickets.lock().unwrap().push(ticket);
    }

    pub fn stored(&self) -> Vec<Value> {
        self.tickets.lock().unwrap().clone()
    }

    pub fn stored_by_id(&self, ticket_id: &str) -> Option<Value> {
        self.stored()
            .into_iter()
            .find(|ticket| ticket["ticket_id"] == ticket_id)
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_requests.store(failing, Ordering::SeqCst);
    }
}

/// ワイヤ表現の最小チケットを組み立てるヘルパ
pub fn wire_ticket(ticket_id: &str, priority: &str, status: &str) -> Value {
    json!({
        "ticket_id": ticket_id,
        "category": "Network",
        "sub_category": "Router Failure",
        "opened": "2025-05-01T10:30:00Z",
        "priority": priority,
        "building": "LOS1",
        "description": format!("seeded ticket {}", ticket_id),
        "detectedBy": "Monitoring Tool",
        "status": status,
        "assigned_to": "",
        "post_review": "No",
        "sla_breach": false
    })
}

async fn list_tickets(State(state): State<MockState>) -> Json<Vec<Value>> {
    Json(state.stored())
}

async fn create_ticket(State(state): State<MockState>, request: Request) -> Response {
    if state.fail_requests.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "injected backend failure"})),
        )
            .into_response();
    }

    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("multipart/form-data"))
        .unwrap_or(false);

    let mut payload = if is_multipart {
        let mut multipart = Multipart::from_request(request, &())
            .await
            .expect("multipart body");
        let mut payload = Value::Null;
        let mut attachment_names = Vec::new();
        while let Some(field) = multipart.next_field().await.expect("multipart field") {
            match field.name() {
                Some("payload") => {
                    payload = serde_json::from_str(&field.text().await.expect("payload text"))
                        .expect("payload json");
                }
                Some("attachments[]") => {
                    attachment_names.push(field.file_name().unwrap_or_default().to_string());
                }
                _ => {}
            }
        }
        state
            .received_attachments
            .lock()
            .unwrap()
            .extend(attachment_names.clone());
        if let Value::Object(map) = &mut payload {
            map.insert(
                "attachments".to_string(),
                Value::String(attachment_names.join(", ")),
            );
        }
        payload
    } else {
        let Json(body): Json<Value> = Json::from_request(request, &()).await.expect("json body");
        body
    };

    if let Value::Object(map) = &mut payload {
        // サーバ採番の識別子
        map.insert(
            "ticket_id".to_string(),
            Value::String(Uuid::new_v4().to_string()),
        );
        if !map.contains_key("status") {
            map.insert("status".to_string(), Value::String("Open".to_string()));
        }
    }

    state.seed(payload.clone());
    Json(payload).into_response()
}

async fn update_ticket(
    State(state): State<MockState>,
    Path(ticket_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if state.fail_requests.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "injected backend failure"})),
        )
            .into_response();
    }

    let mut tickets = state.tickets.lock().unwrap();
    let Some(stored) = tickets
        .iter_mut()
        .find(|ticket| ticket["ticket_id"] == ticket_id.as_str())
    else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"message": format!("ticket {} not found", ticket_id)})),
        )
            .into_response();
    };

    // 部分・全体どちらのPUTも、送られてきたキーだけを上書きする
    if let (Value::Object(existing), Value::Object(incoming)) = (&mut *stored, &body) {
        for (key, value) in incoming {
            existing.insert(key.clone(), value.clone());
        }
    }

    Json(stored.clone()).into_response()
}

/// モックのチケットAPIを空きポートで起動し、オリジンと共有状態を返す
pub async fn spawn_mock_backend() -> (String, MockState) {
    let state = MockState::default();
    let app = Router::new()
        .route("/api/tickets", get(list_tickets).post(create_ticket))
        .route("/api/tickets/{id}", put(update_ticket))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock backend");
    });

    (format!("http://{}", addr), state)
}
