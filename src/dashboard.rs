// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing::{debug, info, warn};

use crate::aggregate::{filter_by_type, DashboardView, TypeFilter};
use crate::api::TransactionStore;
use crate::error::{Error, Result};
use crate::models::{Transaction, TransactionDraft};
use crate::session::Session;

/// A write the store accepted. The follow-up reload may still have failed;
/// the write stands either way and the previous snapshot stays in place.
#[derive(Debug)]
pub struct Applied {
    pub notice: &'static str,
    pub reload_error: Option<Error>,
}

/// Holds the last loaded snapshot and the views derived from it. Every
/// confirmed write is followed by a full reload; the snapshot is never
/// patched in place.
pub struct Dashboard<S: TransactionStore> {
    store: S,
    session: Option<Session>,
    snapshot: Vec<Transaction>,
    view: DashboardView,
}

impl<S: TransactionStore> Dashboard<S> {
    pub fn new(store: S, session: Option<Session>) -> Self {
        Dashboard {
            store,
            session,
            snapshot: Vec::new(),
            view: DashboardView::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Forgets the session together with everything loaded under it.
    pub fn end_session(&mut self) -> Option<Session> {
        self.snapshot.clear();
        self.view = DashboardView::default();
        self.session.take()
    }

    pub fn snapshot(&self) -> &[Transaction] {
        &self.snapshot
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn filtered(&self, filter: TypeFilter) -> Vec<&Transaction> {
        filter_by_type(&self.snapshot, filter)
    }

    pub fn find(&self, id: &str) -> Option<&Transaction> {
        self.snapshot.iter().find(|t| t.id.as_deref() == Some(id))
    }

    fn owner(&self) -> Result<String> {
        self.session
            .as_ref()
            .map(|s| s.owner_id().to_string())
            .ok_or(Error::Unauthenticated)
    }

    /// Replaces the snapshot with the owner's transactions. A failed fetch
    /// leaves the previous snapshot and view untouched.
    pub fn load(&mut self) -> Result<&DashboardView> {
        let owner = self.owner()?;
        let records = self.store.list(&owner)?;
        debug!(count = records.len(), "snapshot loaded");
        self.view = DashboardView::compute(&records);
        self.snapshot = records;
        Ok(&self.view)
    }

    /// Creates the draft, or updates it when it carries an id, then reloads.
    pub fn submit(&mut self, draft: &TransactionDraft) -> Result<Applied> {
        let owner = self.owner()?;
        let record = draft.build(&owner)?;
        let notice = match record.id.as_deref() {
            Some(id) => {
                self.store.update(id, &record)?;
                info!(id, "transaction updated");
                "Updated!"
            }
            None => {
                self.store.create(&record)?;
                info!(title = %record.title, "transaction created");
                "Added!"
            }
        };
        Ok(self.reload_after(notice))
    }

    /// Deletes a stored transaction and reloads. A record that was never
    /// stored has nothing to delete: `Ok(None)` without a remote call.
    pub fn delete(&mut self, target: &Transaction) -> Result<Option<Applied>> {
        let Some(id) = target.id.as_deref() else {
            debug!(title = %target.title, "delete skipped, record has no id");
            return Ok(None);
        };
        self.owner()?;
        self.store.delete(id)?;
        info!(id, "transaction deleted");
        Ok(Some(self.reload_after("Deleted successfully!")))
    }

    fn reload_after(&mut self, notice: &'static str) -> Applied {
        let reload_error = self.load().err();
        if let Some(e) = &reload_error {
            warn!(error = %e, "write applied but reload failed, snapshot is stale");
        }
        Applied {
            notice,
            reload_error,
        }
    }
}
