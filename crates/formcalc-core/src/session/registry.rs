//! Per-user session lookup.
//!
//! Each session owns its own store and its own lock. The registry map is
//! only held long enough to clone a handle out of it.

use dashmap::DashMap;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{Draft, Session, SubmitOutcome};
use crate::error::{FormcalcError, Result};

/// Opaque handle for one open session.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Concurrent map of open sessions.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<SessionId, Arc<Mutex<Session>>>,
    next_id: AtomicU64,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new session seeded with the default table.
    pub fn open(&self) -> SessionId {
        let id = SessionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.sessions
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(Session::new())));
        log::debug!("opened session {}", id);
        id
    }

    /// Run `f` with exclusive access to one session.
    ///
    /// Only that session is locked while `f` runs. Other sessions and the
    /// registry itself stay usable, but `f` must not re-enter `id`.
    pub fn with_session<T>(&self, id: SessionId, f: impl FnOnce(&mut Session) -> T) -> Result<T> {
        let session = self
            .sessions
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(FormcalcError::UnknownSession(id))?;
        let mut guard = session.lock();
        Ok(f(&mut guard))
    }

    pub fn submit(&self, id: SessionId, draft: &Draft) -> Result<SubmitOutcome> {
        self.with_session(id, |session| session.submit(draft))?
    }

    /// Discard a session and its table. Returns false for unknown ids.
    pub fn close(&self, id: SessionId) -> bool {
        let removed = self.sessions.remove(&id).is_some();
        if removed {
            log::debug!("closed session {}", id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::seed_table;
    use formcalc_engine::engine::Column;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_sessions_are_isolated() {
        let registry = SessionRegistry::new();
        let first = registry.open();
        let second = registry.open();
        assert_ne!(first, second);

        let mut draft = registry.with_session(first, |s| s.draft()).unwrap();
        draft.set_field(0, Column::A, "1").unwrap();
        registry.submit(first, &draft).unwrap();

        let first_table = registry.with_session(first, |s| s.table()).unwrap();
        let second_table = registry.with_session(second, |s| s.table()).unwrap();
        assert_eq!(first_table.rows()[0].c, Some(10.0));
        assert_eq!(second_table, seed_table());
    }

    #[test]
    fn test_closed_session_is_unknown() {
        let registry = SessionRegistry::new();
        let id = registry.open();
        assert!(registry.close(id));
        assert!(!registry.close(id));
        assert!(registry.is_empty());

        let err = registry.with_session(id, |s| s.table()).unwrap_err();
        assert!(matches!(err, FormcalcError::UnknownSession(unknown) if unknown == id));
    }

    #[test]
    fn test_concurrent_submits_touch_only_their_session() {
        let registry = Arc::new(SessionRegistry::new());
        let ids: Vec<SessionId> = (0..8).map(|_| registry.open()).collect();

        let handles: Vec<_> = ids
            .iter()
            .enumerate()
            .map(|(n, &id)| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    let mut draft = registry.with_session(id, |s| s.draft()).unwrap();
                    draft.push_row();
                    let last = draft.len() - 1;
                    draft.set_field(last, Column::A, &n.to_string()).unwrap();
                    draft.set_field(last, Column::B, "1").unwrap();
                    registry.submit(id, &draft).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 8);
        for (n, id) in ids.into_iter().enumerate() {
            let table = registry.with_session(id, |s| s.table()).unwrap();
            assert_eq!(table.len(), 5);
            assert_eq!(table.rows()[4].a, n as f64);
        }
    }

    #[test]
    fn test_registry_is_usable_inside_a_session_closure() {
        let registry = SessionRegistry::new();
        let first = registry.open();
        let second = registry.open();

        let (len, other_rows) = registry
            .with_session(first, |_| {
                let len = registry.len();
                let other = registry.with_session(second, |s| s.table().len()).unwrap();
                (len, other)
            })
            .unwrap();
        assert_eq!(len, 2);
        assert_eq!(other_rows, 4);

        let opened = registry.with_session(first, |_| registry.open()).unwrap();
        assert!(registry.with_session(first, |_| registry.close(opened)).unwrap());
    }

    #[test]
    fn test_slow_session_does_not_block_others() {
        let registry = Arc::new(SessionRegistry::new());
        let slow = registry.open();
        let fast = registry.open();

        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let holder = {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                registry
                    .with_session(slow, |_| {
                        entered_tx.send(()).unwrap();
                        let _ = release_rx.recv();
                    })
                    .unwrap();
            })
        };
        entered_rx.recv().unwrap();

        let (done_tx, done_rx) = mpsc::channel();
        {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                let rows = registry.with_session(fast, |s| s.table().len()).unwrap();
                let _ = done_tx.send(rows);
            });
        }
        let rows = done_rx.recv_timeout(Duration::from_secs(5));
        release_tx.send(()).unwrap();
        holder.join().unwrap();
        assert_eq!(rows, Ok(4));
    }
}
