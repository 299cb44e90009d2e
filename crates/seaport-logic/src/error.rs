//! Errors raised while parsing records, resolving parents, and loading worlds.

use std::path::PathBuf;

use crate::entity::EntityId;

/// What went wrong on a single record line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A required header field was absent.
    MissingField(&'static str),
    /// A field that must be numeric held something else.
    InvalidNumber { field: &'static str, token: String },
}

/// A record line that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line number in the source text.
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ParseErrorKind::MissingField(field) => {
                write!(f, "line {}: missing field `{}`", self.line, field)
            }
            ParseErrorKind::InvalidNumber { field, token } => {
                write!(
                    f,
                    "line {}: field `{}` expects a number, found `{}`",
                    self.line, field, token
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// A record whose declared parent could not be attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The id is already taken by an earlier record.
    DuplicateId(EntityId),
    /// A dock or person names a port that does not exist (yet).
    UnknownPort { id: EntityId, parent: EntityId },
    /// A ship's parent is neither a known dock nor a known port.
    UnknownShipParent { id: EntityId, parent: EntityId },
    /// A job's parent is neither a known ship nor a known dock.
    UnknownJobParent { id: EntityId, parent: EntityId },
    /// A job names a dock that has no ship moored.
    NoMooredShip { id: EntityId, dock: EntityId },
    /// A ship names a dock that already holds another ship.
    DockOccupied {
        id: EntityId,
        dock: EntityId,
        moored: EntityId,
    },
    /// A non-port record carries no parent id.
    MissingParent(EntityId),
}

impl ResolveError {
    /// The id of the record that failed to attach.
    pub fn entity(&self) -> EntityId {
        match *self {
            ResolveError::DuplicateId(id)
            | ResolveError::MissingParent(id)
            | ResolveError::UnknownPort { id, .. }
            | ResolveError::UnknownShipParent { id, .. }
            | ResolveError::UnknownJobParent { id, .. }
            | ResolveError::NoMooredShip { id, .. }
            | ResolveError::DockOccupied { id, .. } => id,
        }
    }
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::DuplicateId(id) => write!(f, "id {} is already in use", id),
            ResolveError::UnknownPort { id, parent } => {
                write!(f, "record {} names unknown port {}", id, parent)
            }
            ResolveError::UnknownShipParent { id, parent } => {
                write!(f, "ship {} names {} which is neither a dock nor a port", id, parent)
            }
            ResolveError::UnknownJobParent { id, parent } => {
                write!(f, "job {} names {} which is neither a ship nor a dock", id, parent)
            }
            ResolveError::NoMooredShip { id, dock } => {
                write!(f, "job {} names dock {} which has no moored ship", id, dock)
            }
            ResolveError::DockOccupied { id, dock, moored } => write!(
                f,
                "ship {} cannot moor at dock {}: ship {} is already moored there",
                id, dock, moored
            ),
            ResolveError::MissingParent(id) => write!(f, "record {} has no parent id", id),
        }
    }
}

impl std::error::Error for ResolveError {}

/// Errors that can occur while loading a world.
#[derive(Debug)]
pub enum LoadError {
    /// The source file does not exist.
    FileNotFound(PathBuf),
    Io(std::io::Error),
    /// No entity could be parsed; the file is empty or not a world file.
    Empty,
    Parse(ParseError),
    Resolve { line: usize, error: ResolveError },
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<ParseError> for LoadError {
    fn from(e: ParseError) -> Self {
        LoadError::Parse(e)
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::FileNotFound(path) => write!(f, "no such file: {}", path.display()),
            LoadError::Io(e) => write!(f, "IO error: {}", e),
            LoadError::Empty => write!(f, "file data may be empty or corrupted"),
            LoadError::Parse(e) => write!(f, "parse error: {}", e),
            LoadError::Resolve { line, error } => write!(f, "line {}: {}", line, error),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
            LoadError::Resolve { error, .. } => Some(error),
            LoadError::FileNotFound(_) | LoadError::Empty => None,
        }
    }
}
