//! Rebuilds the host's pipeline menu from the declarative command table.

use crate::context::Context;
use crate::error::MenuError;
use crate::menu::commands::{
    MenuCommand, MenuPlacement, DISABLED_COMMAND_ID, DISABLED_COMMAND_LABEL,
};
use crate::menu::{MenuItem, MenuNode, MenuResource};
use std::sync::Arc;
use tracing::debug;

/// Regenerates the pipeline menu entry whenever the active context changes.
///
/// The menu is never patched incrementally: every rebuild removes any prior
/// entry with the pipeline title and inserts a fresh one, which makes the
/// operation idempotent: rebuilding twice with the same context yields a
/// tree identical to one rebuild.
pub struct MenuSynchronizer {
    resource: Arc<dyn MenuResource>,
}

impl MenuSynchronizer {
    pub fn new(resource: Arc<dyn MenuResource>) -> Self {
        Self { resource }
    }

    /// Rebuilds the pipeline menu for `context`.
    ///
    /// Output order follows `table` exactly: a submenu labelled with the
    /// context display string holding the submenu-placement commands and
    /// separators, a separator, then the main-placement commands and
    /// separators.
    pub fn rebuild(
        &self,
        context: &Context,
        title: &str,
        table: &[MenuCommand],
    ) -> Result<(), MenuError> {
        self.remove_entries_titled(title)?;

        let mut submenu = MenuNode::new(context.to_string());
        let mut main_items = Vec::new();

        for command in table {
            match command.placement {
                MenuPlacement::Submenu => submenu.items.push(MenuItem::Command {
                    label: command.label.clone(),
                    id: command.id,
                }),
                MenuPlacement::Main => main_items.push(MenuItem::Command {
                    label: command.label.clone(),
                    id: command.id,
                }),
                MenuPlacement::Separator => main_items.push(MenuItem::Separator),
                MenuPlacement::SubmenuSeparator => submenu.items.push(MenuItem::Separator),
            }
        }

        let mut node = MenuNode::new(title);
        node.items.push(MenuItem::Submenu(submenu));
        node.items.push(MenuItem::Separator);
        node.items.extend(main_items);

        self.resource.insert(node)?;
        self.resource.refresh();
        debug!(title, context = %context, "rebuilt pipeline menu");
        Ok(())
    }

    /// Renders the single-entry menu shown while the integration cannot
    /// recognize the active file. The entry's command surfaces a warning
    /// explaining the state; the menu is never left blank.
    pub fn render_disabled(&self, title: &str) -> Result<(), MenuError> {
        self.remove_entries_titled(title)?;

        let mut node = MenuNode::new(title);
        node.items.push(MenuItem::Command {
            label: DISABLED_COMMAND_LABEL.to_string(),
            id: DISABLED_COMMAND_ID,
        });

        self.resource.insert(node)?;
        self.resource.refresh();
        debug!(title, "rendered disabled pipeline menu");
        Ok(())
    }

    /// Removes every top-level entry whose subtitle equals `title`.
    /// Indices are removed highest-first so earlier removals do not shift
    /// later ones.
    fn remove_entries_titled(&self, title: &str) -> Result<(), MenuError> {
        let mut stale: Vec<usize> = self
            .resource
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, subtitle)| subtitle.as_str() == title)
            .map(|(index, _)| index)
            .collect();

        for index in stale.drain(..).rev() {
            self.resource.remove(index)?;
        }
        Ok(())
    }
}
