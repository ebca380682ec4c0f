//! Per-player session store
//!
//! Players are identified by a random id carried in a signed cookie
//! (`<uuid>.<hex sha1(secret:uuid)>`). Sessions live in memory only, in an
//! LRU bounded by `max_sessions`, and are dropped after `ttl` without use.

use crate::game::RoundSession;
use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use lru::LruCache;
use sha1::{Digest, Sha1};
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use uuid::Uuid;

pub const COOKIE_NAME: &str = "songdle_session";

#[derive(Debug)]
struct Entry {
    session: RoundSession,
    touched: Instant,
}

#[derive(Debug)]
pub struct SessionStore {
    sessions: Mutex<LruCache<Uuid, Entry>>,
    ttl: Duration,
    secret: String,
    max_attempts: usize,
}

impl SessionStore {
    pub fn new(capacity: usize, ttl: Duration, secret: impl Into<String>, max_attempts: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            sessions: Mutex::new(LruCache::new(capacity)),
            ttl,
            secret: secret.into(),
            max_attempts,
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<Uuid, Entry>> {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run `f` on the player's session as one atomic step.
    ///
    /// Unknown or expired players get a fresh idle session, which is only
    /// stored if `f` leaves it active.
    pub fn with_session<T>(&self, id: Uuid, f: impl FnOnce(&mut RoundSession) -> T) -> T {
        let now = Instant::now();
        let mut sessions = self.lock();

        if sessions
            .peek(&id)
            .is_some_and(|e| now.duration_since(e.touched) > self.ttl)
        {
            sessions.pop(&id);
            tracing::debug!(%id, "session expired");
        }

        if let Some(entry) = sessions.get_mut(&id) {
            entry.touched = now;
            return f(&mut entry.session);
        }

        let mut session = RoundSession::new(self.max_attempts);
        let out = f(&mut session);
        if session.is_active() {
            if let Some((evicted, _)) = sessions.push(id, Entry { session, touched: now })
                && evicted != id
            {
                tracing::debug!(id = %evicted, "session evicted");
            }
        }
        out
    }

    pub fn remove(&self, id: &Uuid) -> bool {
        self.lock().pop(id).is_some()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    fn signature(&self, id: &Uuid) -> String {
        let mut hasher = Sha1::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(b":");
        hasher.update(id.as_hyphenated().to_string().as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn cookie_value(&self, id: &Uuid) -> String {
        format!("{}.{}", id.as_hyphenated(), self.signature(id))
    }

    /// `Set-Cookie` header value for a newly issued id.
    pub fn set_cookie(&self, id: &Uuid) -> String {
        format!(
            "{COOKIE_NAME}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.cookie_value(id),
            self.ttl.as_secs()
        )
    }

    /// Id from a cookie value, if the signature checks out.
    pub fn verify(&self, value: &str) -> Option<Uuid> {
        let (id, sig) = value.split_once('.')?;
        let id = Uuid::parse_str(id).ok()?;
        (self.signature(&id) == sig).then_some(id)
    }

    /// Player id carried by the request's cookies.
    pub fn player_from_headers(&self, headers: &HeaderMap) -> Option<Uuid> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .filter(|(name, _)| *name == COOKIE_NAME)
            .find_map(|(_, value)| self.verify(value))
    }
}
