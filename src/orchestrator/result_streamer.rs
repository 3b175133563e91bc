//! 结果流 - 编排层
//!
//! 把完成顺序的结果通道变成逐行输出的 HTTP 响应体。
//! 通道只有这一个消费者，写入天然串行，不会出现两行交错。

use std::convert::Infallible;

use axum::body::Body;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::models::{AttendanceOutcome, SuccessMarker};

/// 结果流
pub struct ResultStreamer {
    rx: mpsc::Receiver<AttendanceOutcome>,
}

impl ResultStreamer {
    pub fn new(rx: mpsc::Receiver<AttendanceOutcome>) -> Self {
        Self { rx }
    }

    /// 单个结果的输出格式：`<name>: <status>\n`
    pub fn emit(outcome: &AttendanceOutcome) -> String {
        format!("{}: {}\n", outcome.display_name, outcome.status)
    }

    /// 每个结果一个 chunk，到达即写出
    ///
    /// 客户端断开时 hyper 丢弃响应体，接收端随之关闭，
    /// 发送方只会得到一个被忽略的错误。
    pub fn into_body(self) -> Body {
        let stream = ReceiverStream::new(self.rx)
            .map(|outcome| Ok::<_, Infallible>(Self::emit(&outcome)));
        Body::from_stream(stream)
    }
}

/// 按客户端的方式解析一行输出
///
/// 在第一个 `:` 处分割，状态中包含成功标记即为成功。空行返回 `None`。
pub fn parse_line(line: &str, marker: &SuccessMarker) -> Option<AttendanceOutcome> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (name, status) = line.split_once(':').unwrap_or((line, ""));
    let status = status.trim();
    Some(AttendanceOutcome::new(
        name.trim(),
        status,
        marker.is_success(status),
    ))
}
