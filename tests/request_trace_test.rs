// Copyright 2025 The Rectifier Gateway Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Request tracing runs behind the gateway and records canonical paths.

#![allow(clippy::unwrap_used)]

mod test_support;

use std::io;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use rectifier_gateway::DeprecationPhase;
use test_support::{app, send};
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Collect `tower_http` trace output on the current thread until the
/// returned guard is dropped.
fn capture_request_traces() -> (CapturedLog, impl Sized) {
    let log = CapturedLog::default();
    let writer = log.clone();
    let guard = tracing_subscriber::fmt()
        .with_env_filter("tower_http=debug")
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish()
        .set_default();
    (log, guard)
}

#[tokio::test]
async fn test_trace_records_rewritten_path() {
    let (log, _guard) = capture_request_traces();

    let response = send(app(DeprecationPhase::ActiveWithWarning), "GET", "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let output = log.contents();
    assert!(
        output.contains("uri=/api/v1/health"),
        "trace should show the canonical path: {output}"
    );
    assert!(!output.contains("uri=/health "), "{output}");
}

#[tokio::test]
async fn test_redirect_handled_before_tracing() {
    let (log, _guard) = capture_request_traces();

    let response = send(app(DeprecationPhase::Redirect), "GET", "/health").await;
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);

    assert!(!log.contents().contains("uri=/health"));
}
