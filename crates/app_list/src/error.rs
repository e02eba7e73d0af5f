use std::fmt;

/// A snapshot that does not describe a well-formed app list.
#[derive(Debug)]
pub enum SnapshotError {
    Json(serde_json::Error),
    DuplicateId { id: String },
    NestedFolder { id: String },
    UnknownFolder { id: String, path: String },
    PathNotFolder { id: String, path: String },
    /// A child that is not part of its folder's contiguous run.
    DetachedChild { id: String, path: String },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Json(err) => write!(f, "invalid snapshot json: {err}"),
            SnapshotError::DuplicateId { id } => write!(f, "duplicate item id `{id}`"),
            SnapshotError::NestedFolder { id } => {
                write!(f, "folder `{id}` has a path; folders cannot be nested")
            }
            SnapshotError::UnknownFolder { id, path } => {
                write!(f, "item `{id}` points at unknown folder `{path}`")
            }
            SnapshotError::PathNotFolder { id, path } => {
                write!(f, "item `{id}` points at `{path}`, which is not a folder")
            }
            SnapshotError::DetachedChild { id, path } => write!(
                f,
                "item `{id}` is not inside the contiguous run below folder `{path}`"
            ),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        SnapshotError::Json(err)
    }
}

/// An administrative operation addressed an item that is not in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpError {
    message: String,
}

impl OpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn item_not_found(id: &str) -> Self {
        Self::new(format!("no item with id `{id}`"))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for OpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for OpError {}

/// Why a drop was refused. The store is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    FolderIntoFolder,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::FolderIntoFolder => f.write_str("cannot put a folder inside a folder"),
        }
    }
}
