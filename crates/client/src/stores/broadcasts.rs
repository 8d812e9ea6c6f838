//! Broadcast list, create/edit form and delete confirmation.
//!
//! Mutations patch the local list instead of re-fetching it. Until the next
//! [`BroadcastStore::finish_refresh`] the local copy may differ from what the
//! backend stored (an update keeps the operator's text and a client-side
//! `updated_at`); a refresh always replaces the list with backend truth.

use beasiswa_shared::{Broadcast, BroadcastDraft, BroadcastStatus, WorkflowError};
use chrono::{DateTime, Utc};

use super::{matches_search, Notice};
use crate::auth_session::SessionContext;
use crate::backend::Backend;
use crate::handoff::SelectorQuery;
use crate::{log_debug, log_error};

/// Create/edit form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastForm {
    pub open: bool,
    pub title: String,
    pub content: String,
    /// Set while editing; routes the next submission to an update.
    pub editing: Option<i64>,
}

impl BroadcastForm {
    fn reset(&mut self) {
        self.title.clear();
        self.content.clear();
        self.editing = None;
    }

    fn draft(&self) -> BroadcastDraft {
        BroadcastDraft::new(self.title.clone(), self.content.clone())
    }
}

/// A validated form submission, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create {
        token: String,
        draft: BroadcastDraft,
    },
    Update {
        token: String,
        id: i64,
        draft: BroadcastDraft,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The backend's copy of the new broadcast, if it returned one.
    Created(Option<Broadcast>),
    Updated,
}

impl Submission {
    pub async fn run<B: Backend + ?Sized>(&self, backend: &B) -> Result<SubmitOutcome, WorkflowError> {
        match self {
            Submission::Create { token, draft } => {
                let created = backend.create_broadcast(token, draft).await?;
                Ok(SubmitOutcome::Created(created))
            }
            Submission::Update { token, id, draft } => {
                backend.update_broadcast(token, *id, draft).await?;
                Ok(SubmitOutcome::Updated)
            }
        }
    }

    fn is_update(&self) -> bool {
        matches!(self, Submission::Update { .. })
    }
}

/// A confirmed delete, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deletion {
    pub token: String,
    pub id: i64,
}

impl Deletion {
    pub async fn run<B: Backend + ?Sized>(&self, backend: &B) -> Result<(), WorkflowError> {
        backend.delete_broadcast(&self.token, self.id).await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BroadcastStore {
    broadcasts: Vec<Broadcast>,
    pub loading: bool,
    pub submitting: bool,
    /// Inline banner for failed loads and form submissions.
    pub error: Option<String>,
    pub notice: Option<Notice>,
    pub search: String,
    pub form: BroadcastForm,
    pending_delete: Option<i64>,
    /// Broadcast whose DELETE is in flight.
    deleting: Option<i64>,
}

impl BroadcastStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn broadcasts(&self) -> &[Broadcast] {
        &self.broadcasts
    }

    pub fn get(&self, id: i64) -> Option<&Broadcast> {
        self.broadcasts.iter().find(|b| b.id == id)
    }

    /// Broadcasts whose title matches the search box.
    pub fn filtered(&self) -> Vec<&Broadcast> {
        self.broadcasts
            .iter()
            .filter(|b| matches_search(&b.title, &self.search))
            .collect()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // --- List/refresh ---

    pub fn begin_refresh(&mut self) {
        self.loading = true;
    }

    /// Replace the list with backend truth. A failure keeps the previous list.
    pub fn finish_refresh(&mut self, result: Result<Vec<Broadcast>, WorkflowError>) {
        self.loading = false;
        match result {
            Ok(broadcasts) => {
                log_debug!("loaded {} broadcasts", broadcasts.len());
                self.broadcasts = broadcasts;
                self.error = None;
            }
            Err(err) => {
                log_error!("Error fetching broadcasts: {err}");
                self.error = Some(err.user_message("Failed to fetch broadcasts"));
            }
        }
    }

    pub async fn refresh<B: Backend + ?Sized>(&mut self, backend: &B) {
        self.begin_refresh();
        let result = backend.list_broadcasts().await.map_err(WorkflowError::from);
        self.finish_refresh(result);
    }

    // --- Form ---

    /// The "new broadcast" button: clears the form and flips its visibility.
    pub fn toggle_form(&mut self) {
        self.form.reset();
        self.form.open = !self.form.open;
    }

    pub fn close_form(&mut self) {
        self.form.open = false;
    }

    /// Load an existing broadcast into the form so the next submit updates it.
    pub fn start_edit(&mut self, id: i64) -> bool {
        let Some(broadcast) = self.get(id) else {
            return false;
        };
        let (title, content) = (broadcast.title.clone(), broadcast.content.clone());
        self.form = BroadcastForm {
            open: true,
            title,
            content,
            editing: Some(id),
        };
        true
    }

    /// Validate the form and check for a session. Nothing is sent on failure.
    pub fn begin_submit(&mut self, session: &SessionContext) -> Result<Submission, WorkflowError> {
        self.error = None;
        let draft = self.form.draft();
        let checked = draft
            .validate()
            .and_then(|()| session.require_token().map(str::to_string));
        let token = match checked {
            Ok(token) => token,
            Err(err) => {
                self.error = Some(err.to_string());
                return Err(err);
            }
        };

        self.submitting = true;
        Ok(match self.form.editing {
            Some(id) => Submission::Update { token, id, draft },
            None => Submission::Create { token, draft },
        })
    }

    pub fn finish_submit(
        &mut self,
        submission: &Submission,
        result: Result<SubmitOutcome, WorkflowError>,
    ) {
        self.submitting = false;
        match (submission, result) {
            (_, Ok(SubmitOutcome::Created(created))) => {
                if let Some(broadcast) = created {
                    self.broadcasts.retain(|b| b.id != broadcast.id);
                    self.broadcasts.insert(0, broadcast);
                }
                self.submitted(Notice::Success("Broadcast created!".to_string()));
            }
            (Submission::Update { id, draft, .. }, Ok(SubmitOutcome::Updated)) => {
                self.patch(*id, draft, Utc::now());
                self.submitted(Notice::Success("Broadcast updated!".to_string()));
            }
            (Submission::Create { .. }, Ok(SubmitOutcome::Updated)) => {
                log_error!("create submission answered as an update; ignoring");
            }
            (submission, Err(err)) => {
                let (verb, fallback) = if submission.is_update() {
                    ("updating", "Failed to update broadcast")
                } else {
                    ("creating", "Failed to create broadcast")
                };
                log_error!("Error {verb} broadcast: {err}");
                self.error = Some(err.user_message(fallback));
            }
        }
    }

    pub async fn submit<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        session: &SessionContext,
    ) -> Result<(), WorkflowError> {
        let submission = self.begin_submit(session)?;
        let result = submission.run(backend).await;
        let outcome = result.as_ref().map(|_| ()).map_err(Clone::clone);
        self.finish_submit(&submission, result);
        outcome
    }

    fn submitted(&mut self, notice: Notice) {
        self.form.reset();
        self.form.open = false;
        self.notice = Some(notice);
    }

    fn patch(&mut self, id: i64, draft: &BroadcastDraft, at: DateTime<Utc>) {
        if let Some(broadcast) = self.broadcasts.iter_mut().find(|b| b.id == id) {
            broadcast.title = draft.title.clone();
            broadcast.content = draft.content.clone();
            broadcast.updated_at = at;
        }
    }

    // --- Delete ---

    /// Ask the operator to confirm deleting `id`. Nothing is sent yet.
    /// Refused while a delete of the same broadcast is in flight.
    pub fn request_delete(&mut self, id: i64) -> bool {
        if self.deleting == Some(id) {
            return false;
        }
        self.pending_delete = Some(id);
        true
    }

    pub fn deleting(&self) -> Option<i64> {
        self.deleting
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// The operator answered "yes" to the prompt.
    pub fn confirm_delete(&mut self, session: &SessionContext) -> Result<Deletion, WorkflowError> {
        let Some(id) = self.pending_delete.take() else {
            return Err(WorkflowError::Validation(
                "No broadcast selected for deletion".to_string(),
            ));
        };
        if self.deleting == Some(id) {
            return Err(WorkflowError::Validation(
                "Broadcast is already being deleted".to_string(),
            ));
        }
        match session.require_token() {
            Ok(token) => {
                self.deleting = Some(id);
                Ok(Deletion {
                    token: token.to_string(),
                    id,
                })
            }
            Err(err) => {
                self.notice = Some(Notice::Error(err.to_string()));
                Err(err)
            }
        }
    }

    pub fn finish_delete(&mut self, deletion: &Deletion, result: Result<(), WorkflowError>) {
        if self.deleting == Some(deletion.id) {
            self.deleting = None;
        }
        match result {
            Ok(()) => {
                self.broadcasts.retain(|b| b.id != deletion.id);
                self.notice = Some(Notice::Success("Broadcast deleted!".to_string()));
            }
            Err(err) => {
                log_error!("Error deleting broadcast {}: {err}", deletion.id);
                self.notice = Some(Notice::Error(err.user_message("Failed to delete broadcast")));
            }
        }
    }

    pub async fn delete<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        session: &SessionContext,
    ) -> Result<(), WorkflowError> {
        let deletion = self.confirm_delete(session)?;
        let result = deletion.run(backend).await;
        let outcome = result.clone();
        self.finish_delete(&deletion, result);
        outcome
    }

    // --- Send ---

    /// Where the "send" action navigates: recipient selection for `id`.
    pub fn send_target(&self, id: i64) -> SelectorQuery {
        SelectorQuery::for_broadcast(id)
    }

    /// Record a successful delivery acknowledgement. Returns false if `id` is
    /// not in the list.
    pub fn mark_sent(&mut self, id: i64, at: DateTime<Utc>) -> bool {
        match self.broadcasts.iter_mut().find(|b| b.id == id) {
            Some(broadcast) => {
                broadcast.status = BroadcastStatus::Sent;
                broadcast.sent_at = Some(at);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{broadcast, logged_in, FakeBackend};

    fn store_with(ids: &[i64]) -> BroadcastStore {
        let mut store = BroadcastStore::new();
        store.finish_refresh(Ok(ids.iter().map(|id| broadcast(*id, &format!("Info {id}"))).collect()));
        store
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_list() {
        let backend = FakeBackend::with_broadcasts(vec![broadcast(1, "A"), broadcast(2, "B")]);
        let mut store = BroadcastStore::new();
        store.refresh(&backend).await;
        assert_eq!(store.broadcasts().len(), 2);
        assert!(store.error.is_none());

        backend.fail_next_with_status(500, r#"{"message":"db down"}"#);
        store.refresh(&backend).await;
        assert_eq!(store.broadcasts().len(), 2);
        assert_eq!(store.error.as_deref(), Some("db down"));
        assert!(!store.loading);

        store.refresh(&backend).await;
        assert!(store.error.is_none());
    }

    #[tokio::test]
    async fn empty_fields_never_reach_the_backend() {
        let backend = FakeBackend::default();
        let session = logged_in();
        let mut store = BroadcastStore::new();

        for (title, content) in [("", "body"), ("title", "   "), (" \t", "\n")] {
            store.form.title = title.to_string();
            store.form.content = content.to_string();
            let err = store.submit(&backend, &session).await.unwrap_err();
            assert!(matches!(err, WorkflowError::Validation(_)));
            assert!(store.error.is_some());
            assert!(!store.submitting);
        }
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_token_fails_before_request() {
        let backend = FakeBackend::default();
        let mut store = BroadcastStore::new();
        store.form.title = "Judul".to_string();
        store.form.content = "Isi".to_string();

        let err = store.submit(&backend, &SessionContext::anonymous()).await.unwrap_err();
        assert_eq!(err, WorkflowError::not_logged_in());
        assert_eq!(store.error.as_deref(), Some("You must log in first"));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn create_prepends_exactly_once() {
        let backend = FakeBackend::with_broadcasts(vec![broadcast(1, "Lama")]);
        let session = logged_in();
        let mut store = BroadcastStore::new();
        store.refresh(&backend).await;

        store.toggle_form();
        store.form.title = "Baru".to_string();
        store.form.content = "Isi pesan".to_string();
        store.submit(&backend, &session).await.unwrap();

        let titles: Vec<_> = store.broadcasts().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Baru", "Lama"]);
        assert!(!store.form.open);
        assert!(store.form.title.is_empty());
        assert_eq!(store.notice, Some(Notice::Success("Broadcast created!".to_string())));
    }

    #[test]
    fn created_broadcast_already_listed_is_not_duplicated() {
        let mut store = store_with(&[3, 1]);
        let submission = Submission::Create {
            token: "t".to_string(),
            draft: BroadcastDraft::new("Info 3", "x"),
        };
        store.finish_submit(&submission, Ok(SubmitOutcome::Created(Some(broadcast(3, "Info 3")))));
        let ids: Vec<_> = store.broadcasts().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[tokio::test]
    async fn edit_routes_to_update_and_patches_in_place() {
        let backend = FakeBackend::with_broadcasts(vec![broadcast(1, "A"), broadcast(2, "B")]);
        let session = logged_in();
        let mut store = BroadcastStore::new();
        store.refresh(&backend).await;
        let before = store.get(2).unwrap().updated_at;

        assert!(store.start_edit(2));
        assert_eq!(store.form.editing, Some(2));
        assert_eq!(store.form.title, "B");
        store.form.title = "B revisi".to_string();
        store.submit(&backend, &session).await.unwrap();

        let patched = store.get(2).unwrap();
        assert_eq!(patched.title, "B revisi");
        assert!(patched.updated_at > before);
        assert_eq!(store.get(1).unwrap().title, "A");
        assert_eq!(store.form.editing, None);
        // Only the update was sent; no re-fetch.
        assert_eq!(backend.calls().len(), 2);
    }

    #[tokio::test]
    async fn optimistic_patch_diverges_until_refresh() {
        let backend = FakeBackend::with_broadcasts(vec![broadcast(5, "Jadwal")]);
        let session = logged_in();
        let mut store = BroadcastStore::new();
        store.refresh(&backend).await;

        // The backend normalises whitespace; the local patch keeps what was typed.
        store.start_edit(5);
        store.form.title = "  Jadwal baru  ".to_string();
        store.submit(&backend, &session).await.unwrap();
        assert_eq!(store.get(5).unwrap().title, "  Jadwal baru  ");
        assert_eq!(backend.stored(5).unwrap().title, "Jadwal baru");

        store.refresh(&backend).await;
        assert_eq!(store.get(5), backend.stored(5).as_ref());
    }

    #[tokio::test]
    async fn failed_update_keeps_form_and_list() {
        let backend = FakeBackend::with_broadcasts(vec![broadcast(1, "A")]);
        let session = logged_in();
        let mut store = BroadcastStore::new();
        store.refresh(&backend).await;

        store.start_edit(1);
        store.form.title = "A2".to_string();
        backend.fail_next_with_status(404, "");
        assert!(store.submit(&backend, &session).await.is_err());
        assert_eq!(store.get(1).unwrap().title, "A");
        assert_eq!(store.error.as_deref(), Some("Failed to update broadcast"));
        assert!(store.form.open);
        assert_eq!(store.form.editing, Some(1));
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let backend = FakeBackend::with_broadcasts(vec![broadcast(3, "C"), broadcast(4, "D")]);
        let session = logged_in();
        let mut store = BroadcastStore::new();
        store.refresh(&backend).await;

        store.request_delete(4);
        store.cancel_delete();
        assert!(store.delete(&backend, &session).await.is_err());
        assert_eq!(store.broadcasts().len(), 2);
        assert_eq!(backend.calls().len(), 1);

        store.request_delete(4);
        store.delete(&backend, &session).await.unwrap();
        let ids: Vec<_> = store.broadcasts().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![3]);
        assert_eq!(store.pending_delete(), None);
    }

    #[tokio::test]
    async fn failed_delete_leaves_list() {
        let backend = FakeBackend::with_broadcasts(vec![broadcast(4, "D")]);
        let session = logged_in();
        let mut store = BroadcastStore::new();
        store.refresh(&backend).await;

        store.request_delete(4);
        backend.fail_next_network("connection reset");
        assert!(store.delete(&backend, &session).await.is_err());
        assert_eq!(store.broadcasts().len(), 1);
        assert_eq!(
            store.notice,
            Some(Notice::Error("Failed to delete broadcast".to_string()))
        );
    }

    #[test]
    fn in_flight_delete_blocks_a_second_one() {
        let session = logged_in();
        let mut store = store_with(&[4, 5]);

        assert!(store.request_delete(4));
        let deletion = store.confirm_delete(&session).unwrap();
        assert_eq!(store.deleting(), Some(4));
        assert_eq!(store.pending_delete(), None);

        // The row's delete trigger is dead until the first request settles
        assert!(!store.request_delete(4));
        assert!(store.confirm_delete(&session).is_err());
        // Other rows are unaffected
        assert!(store.request_delete(5));
        store.cancel_delete();

        store.finish_delete(&deletion, Ok(()));
        assert_eq!(store.deleting(), None);
        let ids: Vec<_> = store.broadcasts().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![5]);
    }

    #[tokio::test]
    async fn failed_delete_releases_the_row() {
        let backend = FakeBackend::with_broadcasts(vec![broadcast(4, "D")]);
        let session = logged_in();
        let mut store = BroadcastStore::new();
        store.refresh(&backend).await;

        store.request_delete(4);
        backend.fail_next_with_status(500, "");
        assert!(store.delete(&backend, &session).await.is_err());
        assert_eq!(store.deleting(), None);
        assert!(store.request_delete(4));
    }

    #[test]
    fn search_is_case_insensitive_on_title() {
        let mut store = BroadcastStore::new();
        store.finish_refresh(Ok(vec![
            broadcast(1, "Pencairan Dana"),
            broadcast(2, "Jadwal wawancara"),
        ]));
        store.search = "DANA".to_string();
        let ids: Vec<_> = store.filtered().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1]);
        store.search.clear();
        assert_eq!(store.filtered().len(), 2);
    }

    #[test]
    fn mark_sent_touches_only_the_target() {
        let mut store = store_with(&[6, 7, 8]);
        let at = Utc::now();
        assert!(store.mark_sent(7, at));
        assert!(!store.mark_sent(99, at));
        for b in store.broadcasts() {
            if b.id == 7 {
                assert_eq!(b.status, BroadcastStatus::Sent);
                assert_eq!(b.sent_at, Some(at));
            } else {
                assert_eq!(b.status, BroadcastStatus::Draft);
                assert!(b.sent_at.is_none());
            }
        }
    }

    #[test]
    fn toggle_form_resets_edit_mode() {
        let mut store = store_with(&[1]);
        store.start_edit(1);
        store.toggle_form();
        assert!(!store.form.open);
        assert_eq!(store.form.editing, None);
        store.toggle_form();
        assert!(store.form.open);
        assert!(store.form.title.is_empty());
    }
}
