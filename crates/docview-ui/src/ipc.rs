//! IPC protocol between the controller and the page.
//!
//! Messages flow in both directions:
//! - **DOM -> controller**: the injected shim calls
//!   `window.ipc.postMessage(JSON.stringify({...}))` for every interaction;
//!   the body parses into a [`UiEvent`].
//! - **controller -> DOM**: [`DomUpdate`] ops are serialized into
//!   `window.docview._apply(...)` calls for the host to evaluate.
//! - **host -> controller**: the native side invokes the three
//!   [`HostCallback`] entry points (`updateFileCounts`, `updateStorageInfo`,
//!   `displayFileList`).

use serde::{Deserialize, Serialize};
use tracing::warn;

use docview_common::types::{FileCategory, FileCounts, FileEntry, StorageVolume};

use crate::view::DomUpdate;

/// A typed IPC message from the page to the controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcMessage {
    /// The message type / interaction name.
    pub kind: String,
    /// The message payload (arbitrary JSON).
    pub payload: IpcPayload,
}

/// Payload of an IPC message — either a simple string or structured JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IpcPayload {
    Text(String),
    Json(serde_json::Value),
    None,
}

impl IpcMessage {
    /// Parse an IPC message from a raw JSON string (from postMessage).
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// A user interaction arriving from the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "camelCase")]
pub enum UiEvent {
    /// A dashboard card was clicked; carries the element's CSS classes and
    /// the card title text, if any.
    CardClicked {
        classes: Vec<String>,
        #[serde(default)]
        title: Option<String>,
    },
    /// A file-list row was clicked.
    FileRowClicked {
        path: String,
        name: String,
        #[serde(default, rename = "type")]
        kind: Option<String>,
    },
    /// A storage row was clicked.
    StorageRowClicked { path: String, name: String },
    /// The file-list back button.
    BackClicked,
    /// The settings button (opens the sidebar).
    SettingsClicked,
    /// The sidebar close button.
    CloseClicked,
    /// The sidebar overlay.
    OverlayClicked,
}

impl UiEvent {
    /// Convert a raw IPC message into a typed event.
    ///
    /// Unknown kinds and malformed payloads return `None` and are logged;
    /// a bad message from the page is never fatal.
    pub fn from_message(message: &IpcMessage) -> Option<Self> {
        let payload = match &message.payload {
            IpcPayload::Json(value) => value.clone(),
            IpcPayload::Text(text) => serde_json::Value::String(text.clone()),
            IpcPayload::None => serde_json::Value::Null,
        };
        let envelope = serde_json::json!({
            "kind": message.kind,
            "payload": payload,
        });
        match serde_json::from_value(envelope) {
            Ok(event) => Some(event),
            Err(err) => {
                warn!(kind = %message.kind, %err, "unroutable IPC message");
                None
            }
        }
    }
}

/// An inbound callback from the native host. Variant names on the wire match
/// the entry points the host invokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload")]
pub enum HostCallback {
    #[serde(rename = "updateFileCounts")]
    FileCounts(FileCounts),
    #[serde(rename = "updateStorageInfo")]
    StorageInfo(Vec<StorageVolume>),
    #[serde(rename = "displayFileList")]
    FileList {
        files: Vec<FileEntry>,
        category: FileCategory,
    },
}

/// Generate the JS call that applies a [`DomUpdate`] in the page.
pub fn apply_script(update: &DomUpdate) -> String {
    format!(
        "window.docview._apply({});",
        serde_json::to_string(update).unwrap_or_else(|_| "null".to_string())
    )
}

/// JavaScript shim injected into the page at load.
///
/// Applies [`DomUpdate`] ops, posts [`UiEvent`] messages for interactions,
/// and marks each element once a listener is attached so a bind instruction
/// never double-attaches to an element that persisted across renders.
pub const DOM_INIT_SCRIPT: &str = r#"
(function() {
    window.docview = window.docview || {};
    var send = function(kind, payload) {
        window.ipc.postMessage(JSON.stringify({ kind: kind, payload: payload === undefined ? null : payload }));
    };
    window.docview.send = send;

    var selectors = {
        card: '.card',
        fileRow: '.file-item',
        storageRow: '.storage-item',
        back: '#backToMainBtn'
    };

    function listener(handler, el) {
        return function() {
            if (handler === 'card') {
                var titleEl = el.querySelector('.card-title');
                send('cardClicked', {
                    classes: Array.prototype.slice.call(el.classList),
                    title: titleEl ? titleEl.textContent : null
                });
            } else if (handler === 'fileRow') {
                send('fileRowClicked', {
                    path: el.dataset.path || '',
                    name: el.dataset.name || '',
                    type: el.dataset.type || null
                });
            } else if (handler === 'storageRow') {
                send('storageRowClicked', {
                    path: el.dataset.path || '',
                    name: el.dataset.name || ''
                });
            } else if (handler === 'back') {
                send('backClicked');
            }
        };
    }

    function bind(handler) {
        var selector = selectors[handler];
        if (!selector) { return; }
        document.querySelectorAll(selector).forEach(function(el) {
            if (el.dataset.listenerAdded) { return; }
            el.dataset.listenerAdded = 'true';
            el.addEventListener('click', listener(handler, el));
        });
    }

    window.docview._apply = function(op) {
        if (!op) { return; }
        var el;
        switch (op.op) {
            case 'setText':
                el = document.getElementById(op.id);
                if (el) { el.textContent = op.text; }
                break;
            case 'setHtml':
                el = document.getElementById(op.id);
                if (el) { el.innerHTML = op.html; }
                break;
            case 'replaceMain':
                el = document.querySelector('main');
                if (el) { el.innerHTML = op.html; }
                break;
            case 'addClass':
                el = document.getElementById(op.id);
                if (el) { el.classList.add(op.class); }
                break;
            case 'removeClass':
                el = document.getElementById(op.id);
                if (el) { el.classList.remove(op.class); }
                break;
            case 'toast':
                var msg = document.createElement('div');
                msg.className = 'temporary-message';
                msg.textContent = op.message;
                document.body.appendChild(msg);
                setTimeout(function() { msg.remove(); }, 2500);
                break;
            case 'bind':
                bind(op.handler);
                break;
        }
    };

    function hook(id, kind) {
        var el = document.getElementById(id);
        if (el && !el.dataset.listenerAdded) {
            el.dataset.listenerAdded = 'true';
            el.addEventListener('click', function() { send(kind); });
        }
    }
    hook('settingsBtn', 'settingsClicked');
    hook('closeBtn', 'closeClicked');
    hook('overlay', 'overlayClicked');
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::HandlerKind;

    #[test]
    fn parse_card_click() {
        let raw = r#"{"kind":"cardClicked","payload":{"classes":["card","cat-pdf"],"title":null}}"#;
        let message = IpcMessage::from_json(raw).unwrap();
        let event = UiEvent::from_message(&message).unwrap();
        assert_eq!(
            event,
            UiEvent::CardClicked {
                classes: vec!["card".into(), "cat-pdf".into()],
                title: None,
            }
        );
    }

    #[test]
    fn parse_file_row_click_with_type_field() {
        let raw = r#"{"kind":"fileRowClicked","payload":{"path":"/a.pdf","name":"a.pdf","type":"pdf"}}"#;
        let message = IpcMessage::from_json(raw).unwrap();
        let event = UiEvent::from_message(&message).unwrap();
        assert_eq!(
            event,
            UiEvent::FileRowClicked {
                path: "/a.pdf".into(),
                name: "a.pdf".into(),
                kind: Some("pdf".into()),
            }
        );
    }

    #[test]
    fn parse_payloadless_events() {
        for (kind, expected) in [
            ("backClicked", UiEvent::BackClicked),
            ("settingsClicked", UiEvent::SettingsClicked),
            ("closeClicked", UiEvent::CloseClicked),
            ("overlayClicked", UiEvent::OverlayClicked),
        ] {
            let raw = format!(r#"{{"kind":"{kind}","payload":null}}"#);
            let message = IpcMessage::from_json(&raw).unwrap();
            assert_eq!(UiEvent::from_message(&message), Some(expected));
        }
    }

    #[test]
    fn unknown_kind_is_dropped() {
        let raw = r#"{"kind":"somethingNew","payload":{"x":1}}"#;
        let message = IpcMessage::from_json(raw).unwrap();
        assert_eq!(UiEvent::from_message(&message), None);
    }

    #[test]
    fn malformed_payload_is_dropped() {
        let raw = r#"{"kind":"storageRowClicked","payload":{"path":42}}"#;
        let message = IpcMessage::from_json(raw).unwrap();
        assert_eq!(UiEvent::from_message(&message), None);
    }

    #[test]
    fn invalid_json_is_not_a_message() {
        assert!(IpcMessage::from_json("not json").is_none());
        assert!(IpcMessage::from_json("").is_none());
    }

    #[test]
    fn host_callback_wire_names_match_entry_points() {
        let cb = HostCallback::FileCounts(FileCounts {
            all: 1,
            ..Default::default()
        });
        let json = serde_json::to_string(&cb).unwrap();
        assert!(json.contains("\"updateFileCounts\""));

        let raw = r#"{"kind":"displayFileList","payload":{"files":[],"category":"pdf"}}"#;
        let cb: HostCallback = serde_json::from_str(raw).unwrap();
        assert_eq!(
            cb,
            HostCallback::FileList {
                files: vec![],
                category: FileCategory::Pdf,
            }
        );
    }

    #[test]
    fn apply_script_wraps_serialized_op() {
        let script = apply_script(&DomUpdate::SetText {
            id: "count-pdf".into(),
            text: "3 files".into(),
        });
        assert_eq!(
            script,
            r#"window.docview._apply({"op":"setText","id":"count-pdf","text":"3 files"});"#
        );
    }

    #[test]
    fn apply_script_bind_op() {
        let script = apply_script(&DomUpdate::Bind {
            handler: HandlerKind::StorageRow,
            keys: vec!["storage#0".into()],
        });
        assert!(script.contains(r#""op":"bind""#));
        assert!(script.contains(r#""handler":"storageRow""#));
    }

    #[test]
    fn init_script_posts_through_ipc() {
        assert!(DOM_INIT_SCRIPT.contains("window.ipc.postMessage"));
        assert!(DOM_INIT_SCRIPT.contains("listenerAdded"));
        assert!(DOM_INIT_SCRIPT.contains("cardClicked"));
    }
}
