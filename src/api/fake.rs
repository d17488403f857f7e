//! In-memory `SessionApi` used by the unit tests.

use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc, Mutex as StdMutex,
};

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::models::{ListQuery, Session, SessionPage, SessionPayload, SortField, SortOrder};

use super::{ApiError, ApiResult, SessionApi};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    List(ListQuery),
    Create(SessionPayload),
    Update(i64, SessionPayload),
    Delete(i64),
}

/// In-memory stand-in for the session API with the server's search, sort
/// and paging rules. Records every call it receives.
#[derive(Default)]
pub(crate) struct FakeApi {
    sessions: StdMutex<Vec<Session>>,
    next_id: AtomicI64,
    calls: StdMutex<Vec<Call>>,
    fail_next: StdMutex<Option<ApiError>>,
    list_gate: StdMutex<Option<oneshot::Receiver<()>>>,
}

impl FakeApi {
    pub(crate) fn seeded(rows: &[(&str, &str)]) -> Arc<Self> {
        let api = Arc::new(Self::default());
        for (title, system) in rows {
            api.insert(&payload(title, system));
        }
        api
    }

    pub(crate) fn insert(&self, payload: &SessionPayload) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.sessions.lock().unwrap().push(Session {
            id,
            title: payload.title.clone(),
            system: payload.system.clone(),
            players: payload.players.clone(),
            date: payload.date.clone(),
            memo: payload.memo.clone(),
            log_url: payload.log_url.clone(),
        });
        id
    }

    pub(crate) fn fail_next(&self, err: ApiError) {
        *self.fail_next.lock().unwrap() = Some(err);
    }

    pub(crate) fn gate_next_list(&self, gate: oneshot::Receiver<()>) {
        *self.list_gate.lock().unwrap() = Some(gate);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn write_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| !matches!(call, Call::List(_)))
            .count()
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.calls().len() - self.write_calls()
    }

    fn record(&self, call: Call) -> ApiResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.fail_next.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SessionApi for FakeApi {
    async fn list_sessions(&self, query: &ListQuery) -> ApiResult<SessionPage> {
        self.record(Call::List(query.clone()))?;

        let gate = self.list_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        let needle = query.q.to_lowercase();
        let mut matches: Vec<Session> = self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| {
                needle.is_empty()
                    || s.title.to_lowercase().contains(&needle)
                    || s.system.to_lowercase().contains(&needle)
                    || s.players.as_deref().unwrap_or("").to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();

        matches.sort_by(|a, b| match query.sort_by {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Title => a.title.cmp(&b.title),
            SortField::System => a.system.cmp(&b.system),
            SortField::Date => a.date.cmp(&b.date),
        });
        if query.order == SortOrder::Desc {
            matches.reverse();
        }

        let total = matches.len() as u64;
        let offset = ((query.page - 1) * query.limit) as usize;
        let items = matches
            .into_iter()
            .skip(offset)
            .take(query.limit as usize)
            .collect();
        Ok(SessionPage { items, total })
    }

    async fn create_session(&self, payload: &SessionPayload) -> ApiResult<()> {
        self.record(Call::Create(payload.clone()))?;
        self.insert(payload);
        Ok(())
    }

    async fn update_session(&self, id: i64, payload: &SessionPayload) -> ApiResult<()> {
        self.record(Call::Update(id, payload.clone()))?;
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(ApiError::Status { status: 404 })?;
        session.title = payload.title.clone();
        session.system = payload.system.clone();
        if payload.players.is_some() {
            session.players = payload.players.clone();
        }
        if payload.memo.is_some() {
            session.memo = payload.memo.clone();
        }
        if payload.log_url.is_some() {
            session.log_url = payload.log_url.clone();
        }
        if payload.date.is_some() {
            session.date = payload.date.clone();
        }
        Ok(())
    }

    async fn delete_session(&self, id: i64) -> ApiResult<()> {
        self.record(Call::Delete(id))?;
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|s| s.id != id);
        if sessions.len() == before {
            return Err(ApiError::Status { status: 404 });
        }
        Ok(())
    }
}

pub(crate) fn payload(title: &str, system: &str) -> SessionPayload {
    SessionPayload {
        title: title.into(),
        system: system.into(),
        players: None,
        memo: None,
        log_url: None,
        date: None,
    }
}
