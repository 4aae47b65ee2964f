//! Client-side error reporting
//!
//! Reports are enriched with the page context and handed to an [`ErrorSink`]
//! on a spawned task. Delivery is best effort: no retries, no acknowledgement.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use hubdash_core::domain::{ClientErrorReport, ReportKind};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ErrorSink: Send + Sync {
    async fn deliver(&self, report: &ClientErrorReport);
}

/// Where the reports originate.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub user_agent: String,
    pub page: String,
}

/// An uncaught exception.
#[derive(Debug, Clone, Default)]
pub struct ErrorEvent {
    pub message: String,
    pub filename: Option<String>,
    pub lineno: Option<u32>,
    pub colno: Option<u32>,
    pub stack: Option<String>,
}

/// Why a promise was rejected: an error object or any other value.
#[derive(Debug, Clone)]
pub enum RejectionReason {
    Error { message: String, stack: Option<String> },
    Value(Value),
}

impl RejectionReason {
    pub fn message(&self) -> String {
        match self {
            Self::Error { message, .. } => message.clone(),
            Self::Value(Value::String(s)) => s.clone(),
            Self::Value(other) => other.to_string(),
        }
    }

    pub fn stack(&self) -> Option<String> {
        match self {
            Self::Error { stack, .. } => stack.clone(),
            Self::Value(_) => None,
        }
    }
}

/// One argument of a console-style error call.
#[derive(Debug, Clone)]
pub enum ConsoleArg {
    Text(String),
    Error { message: String, stack: Option<String> },
    Json(Value),
}

/// Join arguments with spaces: errors use their stack (or message), JSON is
/// serialised, text is verbatim.
pub fn format_console_args(args: &[ConsoleArg]) -> String {
    args.iter()
        .map(|arg| match arg {
            ConsoleArg::Text(text) => text.clone(),
            ConsoleArg::Error { message, stack } => stack.clone().unwrap_or_else(|| message.clone()),
            ConsoleArg::Json(Value::String(s)) => s.clone(),
            ConsoleArg::Json(value) => value.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Clone)]
pub struct ClientErrorReporter {
    sink: Arc<dyn ErrorSink>,
    context: PageContext,
}

impl ClientErrorReporter {
    pub fn new(sink: Arc<dyn ErrorSink>, context: PageContext) -> Self {
        Self { sink, context }
    }

    /// Enrich and dispatch a report without waiting for delivery.
    ///
    /// Returns the delivery task, or `None` when called outside a Tokio runtime
    /// (the report is dropped).
    pub fn report(&self, mut report: ClientErrorReport) -> Option<JoinHandle<()>> {
        report.user_agent = Some(self.context.user_agent.clone());
        report.page = Some(self.context.page.clone());
        report.timestamp = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));

        let Ok(runtime) = Handle::try_current() else {
            debug!("No async runtime; dropping client error report");
            return None;
        };
        let sink = Arc::clone(&self.sink);
        Some(runtime.spawn(async move { sink.deliver(&report).await }))
    }

    pub fn report_uncaught(&self, event: ErrorEvent) -> Option<JoinHandle<()>> {
        self.report(ClientErrorReport {
            source: event.filename,
            lineno: event.lineno,
            colno: event.colno,
            stack: event.stack,
            ..ClientErrorReport::new(ReportKind::Uncaught, event.message)
        })
    }

    pub fn report_rejection(&self, reason: RejectionReason) -> Option<JoinHandle<()>> {
        self.report(ClientErrorReport {
            stack: reason.stack(),
            ..ClientErrorReport::new(ReportKind::Promise, reason.message())
        })
    }

    pub fn report_console(&self, args: &[ConsoleArg]) -> Option<JoinHandle<()>> {
        self.report(ClientErrorReport {
            source: Some("console.error".to_string()),
            ..ClientErrorReport::new(ReportKind::Console, format_console_args(args))
        })
    }
}

/// Logging interface used by page components.
pub trait Logger: Send + Sync {
    fn error(&self, args: &[ConsoleArg]);
    fn warn(&self, message: &str);
    fn info(&self, message: &str);
}

pub struct TracingLogger;

impl Logger for TracingLogger {
    fn error(&self, args: &[ConsoleArg]) {
        tracing::error!("{}", format_console_args(args));
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }
}

/// Logs through `inner` and forwards every `error` call to the reporter.
pub struct ForwardingLogger<L> {
    inner: L,
    reporter: ClientErrorReporter,
}

impl<L: Logger> ForwardingLogger<L> {
    pub fn new(inner: L, reporter: ClientErrorReporter) -> Self {
        Self { inner, reporter }
    }
}

impl<L: Logger> Logger for ForwardingLogger<L> {
    fn error(&self, args: &[ConsoleArg]) {
        self.inner.error(args);
        self.reporter.report_console(args);
    }

    fn warn(&self, message: &str) {
        self.inner.warn(message);
    }

    fn info(&self, message: &str) {
        self.inner.info(message);
    }
}
