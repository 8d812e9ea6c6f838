//! Recipient selection for a single broadcast.

use beasiswa_shared::{Recipient, WorkflowError};

use super::{matches_search, SelectionSet};
use crate::backend::Backend;
use crate::handoff::{PendingHandoff, SelectorQuery};
use crate::{log_debug, log_error};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipientSelector {
    broadcast_id: Option<i64>,
    recipients: Vec<Recipient>,
    selection: SelectionSet,
    pub loading: bool,
    pub error: Option<String>,
    /// Blocking message for a rejected confirmation.
    pub alert: Option<String>,
    pub search: String,
}

impl RecipientSelector {
    /// A selector for the broadcast named in the page's query.
    pub fn new(query: &SelectorQuery) -> Self {
        Self {
            broadcast_id: query.broadcast_id,
            ..Self::default()
        }
    }

    pub fn broadcast_id(&self) -> Option<i64> {
        self.broadcast_id
    }

    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Replace the directory. A failure keeps whatever was loaded before.
    pub fn finish_load(&mut self, result: Result<Vec<Recipient>, WorkflowError>) {
        self.loading = false;
        match result {
            Ok(recipients) => {
                log_debug!("loaded {} recipients", recipients.len());
                self.recipients = recipients;
                self.error = None;
            }
            Err(err) => {
                log_error!("Error fetching recipients: {err}");
                self.error = Some(err.user_message("Failed to fetch scholarship recipients"));
            }
        }
    }

    pub async fn load<B: Backend + ?Sized>(&mut self, backend: &B) {
        self.begin_load();
        let result = backend.list_recipients().await.map_err(WorkflowError::from);
        self.finish_load(result);
    }

    /// Recipients whose name matches the search box.
    pub fn filtered(&self) -> Vec<&Recipient> {
        self.recipients
            .iter()
            .filter(|r| matches_search(&r.name, &self.search))
            .collect()
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selection.contains(id)
    }

    pub fn toggle(&mut self, id: i64) -> bool {
        self.selection.toggle(id)
    }

    /// Finish selection. On success the returned hand-off is the query for the
    /// broadcast page; on failure nothing should navigate.
    pub fn confirm(&mut self) -> Result<PendingHandoff, WorkflowError> {
        let checked = match self.broadcast_id {
            None => Err(WorkflowError::Validation("Broadcast ID not found".to_string())),
            Some(_) if self.selection.is_empty() => Err(WorkflowError::Validation(
                "Select at least one recipient".to_string(),
            )),
            Some(id) => Ok(PendingHandoff::new(id, self.selection.clone())),
        };
        match &checked {
            Ok(_) => self.alert = None,
            Err(err) => self.alert = Some(err.to_string()),
        }
        checked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{recipient, FakeBackend};

    fn selector_for(id: Option<i64>) -> RecipientSelector {
        RecipientSelector::new(&SelectorQuery { broadcast_id: id })
    }

    #[tokio::test]
    async fn load_and_filter_by_name_only() {
        let mut ayu = recipient(1, "Ayu Lestari");
        ayu.department = "Teknik Sipil".to_string();
        let backend = FakeBackend::with_recipients(vec![ayu, recipient(2, "Budi Santoso")]);
        let mut selector = selector_for(Some(7));
        selector.load(&backend).await;
        assert_eq!(selector.recipients().len(), 2);

        selector.search = "ayu".to_string();
        let names: Vec<_> = selector.filtered().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ayu Lestari"]);

        selector.search = "sipil".to_string();
        assert!(selector.filtered().is_empty());
        // Filtering is local.
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn failed_load_sets_error() {
        let backend = FakeBackend::default();
        backend.fail_next_network("timed out");
        let mut selector = selector_for(Some(7));
        selector.load(&backend).await;
        assert!(selector.recipients().is_empty());
        assert_eq!(
            selector.error.as_deref(),
            Some("Failed to fetch scholarship recipients")
        );
        assert!(!selector.loading);
    }

    #[test]
    fn empty_selection_never_navigates() {
        let mut selector = selector_for(Some(7));
        assert!(selector.confirm().is_err());
        assert_eq!(selector.alert.as_deref(), Some("Select at least one recipient"));

        selector.toggle(2);
        selector.toggle(2);
        assert!(selector.confirm().is_err());
    }

    #[test]
    fn missing_broadcast_id_never_navigates() {
        let mut selector = selector_for(None);
        selector.toggle(1);
        assert_eq!(
            selector.confirm(),
            Err(WorkflowError::Validation("Broadcast ID not found".to_string()))
        );
    }

    #[test]
    fn confirm_encodes_the_handoff() {
        let mut selector = selector_for(Some(7));
        for id in [3, 1, 2] {
            selector.toggle(id);
        }
        let handoff = selector.confirm().unwrap();
        assert_eq!(handoff.to_string(), "broadcastId=7&recipients=1,2,3");
        assert!(selector.alert.is_none());
    }
}
