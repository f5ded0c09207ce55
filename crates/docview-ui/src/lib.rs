//! Browser-side controller for the docview document viewer.
//!
//! Owns everything between the rendered page and the native host:
//! - View state (dashboard <-> file list) and DOM update generation
//! - Bidirectional IPC (page interactions in, DOM ops out)
//! - The host capability bridge with deterministic hostless fallbacks
//! - Click-binding bookkeeping across wholesale content swaps
//!
//! [`Shell`] ties the pieces together; hosts that want a channel interface
//! spawn it and drive [`ShellHandle`].

pub mod bindings;
pub mod bridge;
pub mod config;
pub mod fallback;
pub mod ipc;
pub mod render;
pub mod shell;
pub mod timers;
pub mod view;

pub use bridge::{BridgeAdapter, HostCapabilities, RequestOutcome};
pub use config::UiConfig;
pub use ipc::{HostCallback, IpcMessage, IpcPayload, UiEvent, DOM_INIT_SCRIPT};
pub use shell::{Shell, ShellHandle};
pub use view::{DomUpdate, HandlerKind, ViewController};

/// Initialize logging for an embedding host. `RUST_LOG` overrides
/// `default_directive`; a bad directive falls back to `docview=info`.
pub fn init_logging(default_directive: &str) {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                default_directive
                    .parse()
                    .unwrap_or_else(|_| "docview=info".parse().expect("static directive")),
            ),
        )
        .init();
}
