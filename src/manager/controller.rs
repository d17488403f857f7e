use std::sync::Arc;

use chrono::Local;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::{
    api::{ApiError, SessionApi},
    forms::{FormField, SessionForm, ValidationError},
    models::{query::MAX_PAGE_SIZE, ListQuery, SortField, SortOrder},
};

use super::state::{DetailModal, Notice, NoticeLevel, ViewSnapshot, ViewState};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_error, log_info, log_warn};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Request(#[from] ApiError),
    #[error("session {0} is not on the current page")]
    UnknownSession(i64),
    #[error("no session is open")]
    NoDetail,
    #[error("the open session is not being edited")]
    NotEditing,
    #[error("no deletion is pending")]
    NothingToDelete,
    #[error("page size must be between 1 and {max}, got {0}", max = MAX_PAGE_SIZE)]
    InvalidPageSize(u32),
}

/// What happened to a list request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// A newer request started first; this response was dropped.
    Superseded,
    /// The query did not change, so nothing was sent.
    Skipped,
}

/// The session manager page: owns the view state and turns each user
/// interaction into local state changes plus, where needed, one API call.
///
/// Cloning is cheap and every clone drives the same page. The state lock is
/// never held while a request is in flight.
#[derive(Clone)]
pub struct SessionManager {
    api: Arc<dyn SessionApi>,
    state: Arc<Mutex<ViewState>>,
}

impl SessionManager {
    pub fn new(api: Arc<dyn SessionApi>, page_size: u32) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(ViewState::new(ListQuery::with_limit(page_size)))),
        }
    }

    pub async fn snapshot(&self) -> ViewSnapshot {
        self.state.lock().await.snapshot()
    }

    /// Drains the notices raised since the last call.
    pub async fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.state.lock().await.notices)
    }

    /// Fetches the page for the current query and replaces the list with it.
    /// On failure the previous list stays on screen. A page that comes back
    /// empty past the last page (e.g. after deleting its only row) is
    /// clamped to the last page and fetched once more.
    pub async fn refresh(&self) -> Result<FetchOutcome, ViewError> {
        let outcome = self.fetch_current().await?;
        if outcome != FetchOutcome::Applied {
            return Ok(outcome);
        }

        {
            let mut state = self.state.lock().await;
            let last = state.total_pages();
            if !(state.items.is_empty() && state.total > 0 && state.query.page > last) {
                return Ok(outcome);
            }
            log_debug!("page {} is past the last page, moving to {}", state.query.page, last);
            state.query.page = last;
        }
        self.fetch_current().await
    }

    async fn fetch_current(&self) -> Result<FetchOutcome, ViewError> {
        let (query, generation, token) = self.state.lock().await.begin_fetch();

        let result = tokio::select! {
            _ = token.cancelled() => {
                log_debug!("list request #{} superseded before it answered", generation);
                return Ok(FetchOutcome::Superseded);
            }
            result = self.api.list_sessions(&query) => result,
        };

        let mut state = self.state.lock().await;
        if !state.finish_fetch(generation) {
            log_debug!("dropping stale response for list request #{}", generation);
            return Ok(FetchOutcome::Superseded);
        }

        match result {
            Ok(page) => {
                log_debug!(
                    "list request #{}: {} of {} sessions",
                    generation,
                    page.items.len(),
                    page.total
                );
                state.items = page.items;
                state.total = page.total;
                Ok(FetchOutcome::Applied)
            }
            Err(err) => {
                notify(&mut state, Notice::error(format!("Failed to load sessions ({err})")));
                Err(err.into())
            }
        }
    }

    pub async fn set_search(&self, q: impl Into<String>) -> Result<FetchOutcome, ViewError> {
        {
            let mut state = self.state.lock().await;
            state.query.q = q.into();
            state.query.page = 1;
        }
        self.refresh().await
    }

    pub async fn set_sort_by(&self, sort_by: SortField) -> Result<FetchOutcome, ViewError> {
        self.state.lock().await.query.sort_by = sort_by;
        self.refresh().await
    }

    pub async fn set_order(&self, order: SortOrder) -> Result<FetchOutcome, ViewError> {
        self.state.lock().await.query.order = order;
        self.refresh().await
    }

    pub async fn set_page_size(&self, limit: u32) -> Result<FetchOutcome, ViewError> {
        if limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(ViewError::InvalidPageSize(limit));
        }
        {
            let mut state = self.state.lock().await;
            state.query.limit = limit;
            state.query.page = 1;
        }
        self.refresh().await
    }

    pub async fn next_page(&self) -> Result<FetchOutcome, ViewError> {
        let page = self.state.lock().await.query.page.saturating_add(1);
        self.go_to_page(page).await
    }

    pub async fn prev_page(&self) -> Result<FetchOutcome, ViewError> {
        let page = self.state.lock().await.query.page.saturating_sub(1);
        self.go_to_page(page).await
    }

    /// Moves to `page`, clamped to the pages that exist.
    pub async fn go_to_page(&self, page: u32) -> Result<FetchOutcome, ViewError> {
        {
            let mut state = self.state.lock().await;
            let page = page.clamp(1, state.total_pages());
            if page == state.query.page {
                return Ok(FetchOutcome::Skipped);
            }
            state.query.page = page;
        }
        self.refresh().await
    }

    /// Refresh after a successful write. A failure already raised its notice.
    async fn refresh_after_write(&self) {
        if let Err(err) = self.refresh().await {
            log_warn!("refresh after write failed: {}", err);
        }
    }

    pub async fn edit_create_form(&self, field: FormField, value: impl Into<String>) {
        self.state.lock().await.create_form.set(field, value);
    }

    pub async fn clear_create_form(&self) {
        self.state.lock().await.create_form.clear();
    }

    /// Validates and submits the create form. Nothing is sent when validation
    /// fails; the form is kept as-is when the server rejects it.
    pub async fn submit_create(&self) -> Result<(), ViewError> {
        let payload = {
            let mut state = self.state.lock().await;
            match state.create_form.to_payload(&Local) {
                Ok(payload) => payload,
                Err(err) => {
                    notify(&mut state, Notice::error(err.to_string()));
                    return Err(err.into());
                }
            }
        };

        if let Err(err) = self.api.create_session(&payload).await {
            let mut state = self.state.lock().await;
            notify(&mut state, Notice::error(format!("create failed ({err})")));
            return Err(err.into());
        }

        {
            let mut state = self.state.lock().await;
            log_info!("created session '{}'", payload.title);
            notify(&mut state, Notice::success("Session added"));
            state.create_form.clear();
            state.query.page = 1;
        }
        self.refresh_after_write().await;
        Ok(())
    }

    pub async fn open_detail(&self, id: i64) -> Result<(), ViewError> {
        let mut state = self.state.lock().await;
        let session = state.find(id).cloned().ok_or(ViewError::UnknownSession(id))?;
        state.modal = DetailModal::Viewing { session };
        Ok(())
    }

    pub async fn begin_edit(&self) -> Result<(), ViewError> {
        let mut state = self.state.lock().await;
        let session = state.modal.session().cloned().ok_or(ViewError::NoDetail)?;
        let draft = SessionForm::from_session(&session, &Local);
        state.modal = DetailModal::Editing { session, draft };
        Ok(())
    }

    pub async fn edit_draft(&self, field: FormField, value: impl Into<String>) -> Result<(), ViewError> {
        let mut state = self.state.lock().await;
        match &mut state.modal {
            DetailModal::Editing { draft, .. } => {
                draft.set(field, value);
                Ok(())
            }
            _ => Err(ViewError::NotEditing),
        }
    }

    /// Leaves edit mode, discarding the draft.
    pub async fn cancel_edit(&self) -> Result<(), ViewError> {
        let mut state = self.state.lock().await;
        match std::mem::take(&mut state.modal) {
            DetailModal::Editing { session, .. } => {
                state.modal = DetailModal::Viewing { session };
                Ok(())
            }
            other => {
                state.modal = other;
                Err(ViewError::NotEditing)
            }
        }
    }

    pub async fn close_detail(&self) {
        self.state.lock().await.modal = DetailModal::Closed;
    }

    /// Sends the draft as a partial update. On success the dialog closes and
    /// the list reloads; on failure the draft stays open for another try.
    pub async fn save_draft(&self) -> Result<(), ViewError> {
        let (id, payload) = {
            let mut state = self.state.lock().await;
            let prepared = match &state.modal {
                DetailModal::Editing { session, draft } => {
                    draft.to_payload(&Local).map(|payload| (session.id, payload))
                }
                _ => return Err(ViewError::NotEditing),
            };
            match prepared {
                Ok(prepared) => prepared,
                Err(err) => {
                    notify(&mut state, Notice::error(err.to_string()));
                    return Err(err.into());
                }
            }
        };

        if let Err(err) = self.api.update_session(id, &payload).await {
            let mut state = self.state.lock().await;
            notify(&mut state, Notice::error(format!("update failed ({err})")));
            return Err(err.into());
        }

        {
            let mut state = self.state.lock().await;
            log_info!("updated session {}", id);
            notify(&mut state, Notice::success("Session updated"));
            if state.modal.session().map(|session| session.id) == Some(id) {
                state.modal = DetailModal::Closed;
            }
        }
        self.refresh_after_write().await;
        Ok(())
    }

    pub async fn request_delete(&self, id: i64) -> Result<(), ViewError> {
        let mut state = self.state.lock().await;
        let session = state.find(id).cloned().ok_or(ViewError::UnknownSession(id))?;
        state.pending_delete = Some(session);
        Ok(())
    }

    pub async fn cancel_delete(&self) {
        self.state.lock().await.pending_delete = None;
    }

    /// Closes the confirmation and deletes its target.
    pub async fn confirm_delete(&self) -> Result<(), ViewError> {
        let target = self
            .state
            .lock()
            .await
            .pending_delete
            .take()
            .ok_or(ViewError::NothingToDelete)?;

        if let Err(err) = self.api.delete_session(target.id).await {
            let mut state = self.state.lock().await;
            notify(&mut state, Notice::error(format!("delete failed ({err})")));
            return Err(err.into());
        }

        {
            let mut state = self.state.lock().await;
            log_info!("deleted session {} '{}'", target.id, target.title);
            notify(&mut state, Notice::info("Session deleted"));
            if state.modal.session().map(|session| session.id) == Some(target.id) {
                state.modal = DetailModal::Closed;
            }
        }
        self.refresh_after_write().await;
        Ok(())
    }
}

fn notify(state: &mut ViewState, notice: Notice) {
    match notice.level {
        NoticeLevel::Error => log_error!("{}", notice.message),
        _ => log_debug!("notice: {}", notice.message),
    }
    state.notices.push(notice);
}
