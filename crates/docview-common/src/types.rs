use serde::{Deserialize, Serialize};
use std::fmt;

/// A file category shown on the dashboard.
///
/// The first seven are countable (they appear in [`FileCounts`]); the
/// remaining three are virtual places that only back a file-list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    All,
    Pdf,
    Doc,
    Xls,
    Ppt,
    Txt,
    Archive,
    Recent,
    Favourites,
    Creation,
}

impl FileCategory {
    /// Parse a category from a dashboard card CSS class
    /// (`cat-pdf`, `place-recent`, ...).
    pub fn from_card_class(class: &str) -> Option<Self> {
        match class {
            "cat-all" => Some(Self::All),
            "cat-pdf" => Some(Self::Pdf),
            "cat-doc" => Some(Self::Doc),
            "cat-xls" => Some(Self::Xls),
            "cat-ppt" => Some(Self::Ppt),
            "cat-txt" => Some(Self::Txt),
            "cat-archive" => Some(Self::Archive),
            "place-recent" => Some(Self::Recent),
            "place-favourites" => Some(Self::Favourites),
            "place-creation" => Some(Self::Creation),
            _ => None,
        }
    }

    /// The lowercase wire name (`all`, `pdf`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pdf => "pdf",
            Self::Doc => "doc",
            Self::Xls => "xls",
            Self::Ppt => "ppt",
            Self::Txt => "txt",
            Self::Archive => "archive",
            Self::Recent => "recent",
            Self::Favourites => "favourites",
            Self::Creation => "creation",
        }
    }

    /// Categories that have a count label on the dashboard.
    pub const COUNTABLE: [FileCategory; 7] = [
        Self::All,
        Self::Pdf,
        Self::Doc,
        Self::Xls,
        Self::Ppt,
        Self::Txt,
        Self::Archive,
    ];
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category file counts pushed by the host.
///
/// Every field defaults to 0 so a partial payload deserializes cleanly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCounts {
    pub all: u64,
    pub pdf: u64,
    pub doc: u64,
    pub xls: u64,
    pub ppt: u64,
    pub txt: u64,
    pub archive: u64,
}

impl FileCounts {
    /// The count for a countable category; virtual places have no count.
    pub fn get(&self, category: FileCategory) -> Option<u64> {
        match category {
            FileCategory::All => Some(self.all),
            FileCategory::Pdf => Some(self.pdf),
            FileCategory::Doc => Some(self.doc),
            FileCategory::Xls => Some(self.xls),
            FileCategory::Ppt => Some(self.ppt),
            FileCategory::Txt => Some(self.txt),
            FileCategory::Archive => Some(self.archive),
            _ => None,
        }
    }
}

/// One storage volume reported by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageVolume {
    pub name: String,
    pub free: f64,
    pub total: f64,
    pub unit: String,
    pub path: String,
}

impl Default for StorageVolume {
    fn default() -> Self {
        Self {
            name: String::new(),
            free: 0.0,
            total: 0.0,
            unit: "GB".into(),
            path: String::new(),
        }
    }
}

impl StorageVolume {
    /// Used space as a percentage in [0, 100].
    ///
    /// A non-positive total is degenerate and treated as a denominator of 1;
    /// the result is clamped so a host reporting `free > total` cannot
    /// produce a negative ring offset.
    pub fn used_percentage(&self) -> f64 {
        let total = if self.total > 0.0 { self.total } else { 1.0 };
        (((total - self.free) / total) * 100.0).clamp(0.0, 100.0)
    }
}

/// One entry in a file-list view. `path` is the host's opaque identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEntry {
    pub name: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl FileEntry {
    /// Effective type: the explicit type, else the name's extension,
    /// lower-cased. Empty when neither yields anything.
    pub fn effective_kind(&self) -> String {
        match &self.kind {
            Some(kind) if !kind.is_empty() => kind.to_lowercase(),
            _ => self
                .name
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_lowercase())
                .unwrap_or_default(),
        }
    }
}

/// Which of the two main views is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Dashboard,
    FileList(FileCategory),
}

/// Sidebar open/closed, independent of [`ViewState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarState {
    Open,
    Closed,
}
