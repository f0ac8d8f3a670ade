//! Error types for station and tree operations.

use thiserror::Error;

use crate::tree::PanelId;

/// Errors raised by docking operations.
///
/// Rejections by accept predicates are not errors; they surface as
/// `Ok(false)` from [`drop_with_hint`](crate::Container::drop_with_hint).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DockError {
    /// Index argument outside `[0, count)`.
    #[error("index {index} out of range for {count} children")]
    IndexOutOfRange { index: usize, count: usize },
    /// The panel is docked on another container.
    #[error("{panel} already belongs to {parent}")]
    InvalidParent { panel: PanelId, parent: PanelId },
    /// The panel is already a child of this station.
    #[error("{0} is already a child of this station")]
    AlreadyDocked(PanelId),
    /// A commit was requested without a matching prepared gap.
    #[error("no placement was prepared for this gesture")]
    NoPendingPlacement,
    /// Unknown panel, or not a child where one was required.
    #[error("{0} not found")]
    PanelNotFound(PanelId),
    /// The panel exists but is not a stack station.
    #[error("{0} is not a stack station")]
    NotAStack(PanelId),
    /// The station is already borrowed further up the call stack.
    #[error("station {0} is already in use")]
    StationBusy(PanelId),
    /// The panel still has a parent and cannot be removed from the tree.
    #[error("{0} is still docked")]
    PanelDocked(PanelId),
    /// The container still has children.
    #[error("{0} still has children")]
    StationNotEmpty(PanelId),
    /// The id mapping has no entry for a child while writing a layout.
    #[error("no layout id for {0}")]
    UnknownLayoutId(PanelId),
    /// Layout data ended early.
    #[error("layout data truncated: needed {needed} bytes, {remaining} remaining")]
    LayoutTruncated { needed: usize, remaining: usize },
    /// Layout data is structurally wrong.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
    /// Configuration could not be parsed or serialized.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for docking operations.
pub type DockResult<T> = Result<T, DockError>;
