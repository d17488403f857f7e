use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::{
    forms::SessionForm,
    models::{total_pages, ListQuery, Session},
};

/// The detail dialog. Editing carries both the stored record and the draft so
/// a cancelled edit can fall back to the unchanged detail view.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum DetailModal {
    #[default]
    Closed,
    Viewing {
        session: Session,
    },
    Editing {
        session: Session,
        draft: SessionForm,
    },
}

impl DetailModal {
    pub fn is_open(&self) -> bool {
        !matches!(self, DetailModal::Closed)
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            DetailModal::Closed => None,
            DetailModal::Viewing { session } | DetailModal::Editing { session, .. } => {
                Some(session)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A transient message for the user, the terminal equivalent of a toast.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Everything the page owns. Only [`super::SessionManager`] mutates it.
#[derive(Debug)]
pub struct ViewState {
    pub query: ListQuery,
    pub items: Vec<Session>,
    pub total: u64,
    pub loading: bool,
    pub create_form: SessionForm,
    pub modal: DetailModal,
    /// Target of the open delete confirmation; `None` means the dialog is closed.
    pub pending_delete: Option<Session>,
    pub notices: Vec<Notice>,
    /// Bumped by every list request; only the newest may write `items`.
    generation: u64,
    inflight: Option<CancellationToken>,
}

impl ViewState {
    pub fn new(query: ListQuery) -> Self {
        Self {
            query,
            items: Vec::new(),
            total: 0,
            loading: true,
            create_form: SessionForm::default(),
            modal: DetailModal::Closed,
            pending_delete: None,
            notices: Vec::new(),
            generation: 0,
            inflight: None,
        }
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.query.limit)
    }

    pub fn find(&self, id: i64) -> Option<&Session> {
        self.items.iter().find(|session| session.id == id)
    }

    /// Starts a list request: cancels the one in flight, if any, and returns
    /// what the new request needs.
    pub fn begin_fetch(&mut self) -> (ListQuery, u64, CancellationToken) {
        if let Some(previous) = self.inflight.take() {
            previous.cancel();
        }
        self.generation += 1;
        self.loading = true;

        let token = CancellationToken::new();
        self.inflight = Some(token.clone());
        (self.query.clone(), self.generation, token)
    }

    /// Returns false when a newer request has started since `generation`.
    pub fn finish_fetch(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.loading = false;
        self.inflight = None;
        true
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            query: self.query.clone(),
            items: self.items.clone(),
            total: self.total,
            total_pages: self.total_pages(),
            loading: self.loading,
            is_empty: !self.loading && self.items.is_empty(),
            create_form: self.create_form.clone(),
            modal: self.modal.clone(),
            pending_delete: self.pending_delete.clone(),
        }
    }
}

/// Read-only copy of the page handed to the renderer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub query: ListQuery,
    pub items: Vec<Session>,
    pub total: u64,
    pub total_pages: u32,
    pub loading: bool,
    /// Loaded and nothing matched: show the empty-state message.
    pub is_empty: bool,
    pub create_form: SessionForm,
    pub modal: DetailModal,
    pub pending_delete: Option<Session>,
}
