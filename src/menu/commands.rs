//! Declarative pipeline command table.
//!
//! Identifiers are stable across rebuilds so the host routes menu invocation
//! back to the registered command regardless of how often the menu has been
//! regenerated.

use serde::{Deserialize, Serialize};

/// Stable identifier the host uses to route a menu invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandId(pub u32);

/// Where a command lands in the rebuilt menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuPlacement {
    /// Directly under the pipeline menu entry.
    Main,
    /// Inside the context-labelled submenu.
    Submenu,
    /// A separator line in the main sequence.
    Separator,
    /// A separator line inside the context-labelled submenu.
    SubmenuSeparator,
}

/// One pipeline command and its menu placement. Static configuration,
/// read-only at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCommand {
    pub label: String,
    pub id: CommandId,
    pub placement: MenuPlacement,
}

impl MenuCommand {
    pub fn new(label: impl Into<String>, id: u32, placement: MenuPlacement) -> Self {
        Self {
            label: label.into(),
            id: CommandId(id),
            placement,
        }
    }
}

/// Default menu title.
pub const MENU_TITLE: &str = "Pipeline";

/// Alternate menu title, selectable when "Pipeline" collides with another
/// plugin's menu.
pub const ALTERNATE_MENU_TITLE: &str = "Stagelink";

/// Command id and label of the single entry shown while the integration is
/// disabled.
pub const DISABLED_COMMAND_ID: CommandId = CommandId(1);
pub const DISABLED_COMMAND_LABEL: &str = "Integration is disabled.";

/// Warning shown when the disabled-menu entry is invoked.
pub const DISABLED_MESSAGE: &str = "Pipeline integration is disabled because it cannot \
     recognize the currently opened file. Try opening another file or restarting the host.";

/// The standard pipeline command set, in menu order.
pub fn default_command_table() -> Vec<MenuCommand> {
    use MenuPlacement::*;
    vec![
        MenuCommand::new("Jump to Pipeline Tracker", 2701393, Submenu),
        MenuCommand::new("Jump to File System", 2158662, Submenu),
        MenuCommand::new("Separator", 0, SubmenuSeparator),
        MenuCommand::new("Jump to Screening Room", 2188709, Submenu),
        MenuCommand::new("Jump to Screening Room Web Player", 2419038, Submenu),
        MenuCommand::new("Open Log Folder", 3271712, Submenu),
        MenuCommand::new("Work Area Info...", 2574358, Submenu),
        MenuCommand::new("File Open...", 1760964, Main),
        MenuCommand::new("Snapshot...", 2436236, Main),
        MenuCommand::new("File Save...", 1825592, Main),
        MenuCommand::new("Publish...", 3378887, Main),
        MenuCommand::new("Load...", 3279052, Main),
        MenuCommand::new("Separator", 0, Separator),
        MenuCommand::new("Scene Breakdown...", 1506973, Main),
        MenuCommand::new("Snapshot History...", 3313077, Main),
        MenuCommand::new("Pipeline Tracker Panel...", 2399777, Main),
        MenuCommand::new("Sync Frame Range", 3366874, Main),
    ]
}
