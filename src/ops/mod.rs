//! # Operations
//!
//! Multi-item flows composed from store primitives: bulk move/copy/delete,
//! sharing, and the two ingestion flows (file batches and whole folder
//! structures). One module per operation.
//!
//! Every batch operation validates the *entire* batch against the current
//! state before applying the first mutation, so a failing batch leaves the
//! store exactly as it was. The ingestion flows are the exception by design:
//! they are sequences of independent creates, each atomic on its own, the
//! same way an upload queue hands items over one at a time.

use uuid::Uuid;

use crate::model::NewItem;

pub mod copy_items;
pub mod delete_items;
pub mod move_items;
pub mod share;
pub mod upload;

/// Where newly created items land: the current folder plus the classification
/// and association context active in the caller's view.
#[derive(Debug, Clone, Default)]
pub struct UploadContext {
    pub parent_id: Option<Uuid>,
    pub category: Option<String>,
    pub team_id: Option<String>,
    pub deal_id: Option<String>,
    pub owner_id: Option<String>,
}

impl UploadContext {
    pub fn in_folder(parent_id: Option<Uuid>) -> Self {
        Self {
            parent_id,
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_team(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }

    pub fn with_deal(mut self, deal_id: impl Into<String>) -> Self {
        self.deal_id = Some(deal_id.into());
        self
    }

    pub fn with_owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    /// Applies the classification/association context to creation attributes.
    /// The parent is the caller's business: ingestion resolves parents per
    /// entry, so it is never overridden here.
    pub(crate) fn apply(&self, mut new: NewItem) -> NewItem {
        if let Some(category) = &self.category {
            new.category = Some(category.clone());
        }
        if let Some(team_id) = &self.team_id {
            new.team_id = Some(team_id.clone());
        }
        if let Some(deal_id) = &self.deal_id {
            new.deal_id = Some(deal_id.clone());
        }
        if let Some(owner_id) = &self.owner_id {
            new.owner_id = Some(owner_id.clone());
        }
        new
    }
}
