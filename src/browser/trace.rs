//! Console and page-error trace capture.
//!
//! A side channel per page: CDP console-API and exception events are
//! appended as JSON lines under the trace directory, started when the page
//! is created and stopped at teardown regardless of the check outcome.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

use chromiumoxide::cdp::js_protocol::runtime::{EventConsoleApiCalled, EventExceptionThrown};
use chromiumoxide::Page;
use futures::StreamExt;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Records console/page-error events for one page into a JSONL file.
pub struct TraceRecorder {
    tasks: Vec<JoinHandle<()>>,
}

impl TraceRecorder {
    /// Attach listeners to the page and start appending to `path`.
    pub async fn attach(page: &Page, path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = Arc::new(Mutex::new(
            OpenOptions::new().create(true).append(true).open(path)?,
        ));

        let mut tasks = Vec::new();

        match page.event_listener::<EventConsoleApiCalled>().await {
            Ok(mut events) => {
                let sink = Arc::clone(&file);
                tasks.push(tokio::spawn(async move {
                    while let Some(event) = events.next().await {
                        write_line(&sink, "console", &*event);
                    }
                }));
            }
            Err(error) => warn!("console trace unavailable: {error}"),
        }

        match page.event_listener::<EventExceptionThrown>().await {
            Ok(mut events) => {
                let sink = Arc::clone(&file);
                tasks.push(tokio::spawn(async move {
                    while let Some(event) = events.next().await {
                        write_line(&sink, "pageerror", &*event);
                    }
                }));
            }
            Err(error) => warn!("page-error trace unavailable: {error}"),
        }

        debug!("trace recording to {}", path.display());
        Ok(Self { tasks })
    }

    /// Stop recording. The file stays behind as a run artifact.
    pub fn stop(self) {
        for task in self.tasks {
            task.abort();
        }
    }
}

fn write_line<E: Serialize>(sink: &Mutex<File>, kind: &str, event: &E) {
    let line = serde_json::json!({
        "at": chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
        "kind": kind,
        "event": serde_json::to_value(event).unwrap_or_default(),
    });
    if let Ok(mut file) = sink.lock() {
        let _ = writeln!(file, "{line}");
    }
}
