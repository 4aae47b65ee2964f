//! # Hubdash Client
//!
//! Dashboard page components: navigation menu loader, client error
//! reporter, network-test panel, and the HTTP client they talk through.

pub mod error;
pub mod http;
pub mod nav_menu;
pub mod network_panel;
pub mod render;
pub mod reporter;

pub use error::ClientError;
pub use http::{DashboardClient, HttpErrorSink, SessionInfo, SessionStatus};
pub use nav_menu::{LoadState, MenuLink, MenuSource, MenuView, NavMenuLoader};
pub use network_panel::{DomainChoice, NetworkTestPanel, NetworkTestTransport, PanelResult, RunOutcome};
pub use render::Renderer;
pub use reporter::{
    ClientErrorReporter, ConsoleArg, ErrorEvent, ErrorSink, ForwardingLogger, Logger, PageContext,
    RejectionReason, TracingLogger,
};
