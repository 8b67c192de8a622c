//! Action item use-case service.
//!
//! # Responsibility
//! - List action items with an optional note filter.
//! - Toggle completion state.

use crate::model::action_item::{ActionItem, ActionItemId};
use crate::model::note::NoteId;
use crate::repo::action_item_repo::{ActionItemListQuery, ActionItemRepository};
use crate::service::ServiceError;
use log::info;

/// List result envelope used by service callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionItemsListResult {
    /// Items sorted newest first.
    pub items: Vec<ActionItem>,
    pub count: usize,
}

/// Outcome of a completion toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkDoneResult {
    pub id: ActionItemId,
    pub done: bool,
}

/// Action item service facade over repository implementations.
pub struct ActionItemService<R: ActionItemRepository> {
    repo: R,
}

impl<R: ActionItemRepository> ActionItemService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists items, restricted to one note when `note_id` is set.
    pub fn list_action_items(
        &self,
        note_id: Option<NoteId>,
    ) -> Result<ActionItemsListResult, ServiceError> {
        let items = self
            .repo
            .list_action_items(&ActionItemListQuery { note_id })?;
        Ok(ActionItemsListResult {
            count: items.len(),
            items,
        })
    }

    /// Gets one item by id.
    pub fn get_action_item(&self, id: ActionItemId) -> Result<ActionItem, ServiceError> {
        self.repo
            .get_action_item(id)?
            .ok_or(ServiceError::ActionItemNotFound(id))
    }

    /// Marks one item done (or undone).
    ///
    /// # Errors
    /// - `ServiceError::ActionItemNotFound` when `id` does not exist.
    pub fn mark_done(&self, id: ActionItemId, done: bool) -> Result<MarkDoneResult, ServiceError> {
        self.repo.mark_done(id, done)?;
        info!(
            "event=action_item_mark_done module=service status=ok action_item_id={} done={}",
            id, done
        );
        Ok(MarkDoneResult { id, done })
    }
}
