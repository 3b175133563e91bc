//! HTTP 接口
//!
//! - `GET /` 存活检查
//! - `POST /mark_attendance` 逐行流式返回每个账号的结果

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tracing::debug;

use crate::models::MarkAttendanceRequest;
use crate::orchestrator::{FanOutOrchestrator, ResultStreamer};
use crate::utils::logging::truncate_text;

/// 共享状态
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: FanOutOrchestrator,
}

/// 构建路由，前端页面来自其他源，所以放开 CORS
pub fn router(orchestrator: FanOutOrchestrator) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/mark_attendance", post(mark_attendance))
        .layer(CorsLayer::permissive())
        .with_state(AppState { orchestrator })
}

/// GET / - 存活检查
async fn health_check() -> &'static str {
    "Attendance relay is running!"
}

/// POST /mark_attendance
///
/// 响应状态总是 200，未知分组返回空响应体。
async fn mark_attendance(
    State(state): State<AppState>,
    Json(request): Json<MarkAttendanceRequest>,
) -> impl IntoResponse {
    debug!(
        "收到签到请求: 分组 {} | 二维码 {}",
        request.category,
        truncate_text(&request.qr_code, 12)
    );

    let rx = state.orchestrator.handle(&request.category, &request.qr_code);

    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        ResultStreamer::new(rx).into_body(),
    )
}
