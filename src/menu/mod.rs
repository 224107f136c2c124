//! Menu domain: declarative command table and the synchronizer that mirrors
//! the active context into the host's main menu.

pub mod commands;
pub mod synchronizer;

pub use commands::{default_command_table, CommandId, MenuCommand, MenuPlacement};
pub use synchronizer::MenuSynchronizer;

use crate::error::MenuError;

/// One entry inside a rendered menu node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    Command { label: String, id: CommandId },
    Submenu(MenuNode),
    Separator,
}

/// A rendered top-level menu entry: subtitle plus ordered contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuNode {
    pub subtitle: String,
    pub items: Vec<MenuItem>,
}

impl MenuNode {
    pub fn new(subtitle: impl Into<String>) -> Self {
        Self {
            subtitle: subtitle.into(),
            items: Vec::new(),
        }
    }
}

/// The host's mutable main-menu resource: an ordered sequence of
/// (subtitle, contents) nodes supporting remove-by-index and insertion.
pub trait MenuResource: Send + Sync {
    /// Subtitles of the current top-level entries, in menu order.
    fn entries(&self) -> Vec<String>;

    fn remove(&self, index: usize) -> Result<(), MenuError>;

    fn insert(&self, node: MenuNode) -> Result<(), MenuError>;

    /// Asks the host to redraw its menus after a mutation.
    fn refresh(&self);
}
