//! Client-side session model and its on-disk store.
//!
//! The browser original kept the token, user JSON, remembered email and
//! pending verification contact as loose localStorage keys read from all
//! over the app. Here the same state is one JSON file and every reader and
//! writer goes through [`SessionStore`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::User;

/// An established session: the opaque bearer token plus the verified user.
///
/// Overwritten on re-login, deleted on logout. A stored token is treated
/// as valid until a request using it fails; there is no client-side expiry
/// check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Which verify endpoint a pending OTP belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationMode {
    Login,
    Registration,
}

/// Contact state carried from login/registration into the OTP step.
/// Destroyed when verification succeeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingVerification {
    pub user_id: Option<String>,
    pub phone_number: Option<String>,
    pub mode: VerificationMode,
}

impl PendingVerification {
    /// True when at least one contact value is known. Resend needs one.
    pub fn has_contact(&self) -> bool {
        self.user_id.is_some() || self.phone_number.is_some()
    }
}

/// Everything the client persists between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredState {
    session: Option<Session>,
    pending: Option<PendingVerification>,
    remembered_email: Option<String>,
}

/// Single accessor for the persisted state file.
///
/// Plain JSON on disk: no encryption, no expiry, no locking against
/// concurrent processes. Every mutation writes through immediately.
pub struct SessionStore {
    path: PathBuf,
    state: StoredState,
}

impl SessionStore {
    /// Open the store at the platform config location
    /// (e.g. `~/.config/limpiar/state.json` on Linux).
    pub fn open_default() -> io::Result<Self> {
        let dirs = directories::ProjectDirs::from("com", "limpiar", "limpiar")
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?;
        Self::open(dirs.config_dir().join("state.json"))
    }

    /// Open a store backed by an explicit file path. A missing or corrupt
    /// file starts empty rather than failing; the worst case is a forced
    /// re-login.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let state = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_default(),
            Err(err) if err.kind() == io::ErrorKind::NotFound => StoredState::default(),
            Err(err) => return Err(err),
        };
        Ok(Self { path, state })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&self.state).map_err(io::Error::other)?;
        fs::write(&self.path, text)
    }

    pub fn session(&self) -> Option<&Session> {
        self.state.session.as_ref()
    }

    /// Store a freshly issued session and drop the pending verification it
    /// completed.
    pub fn set_session(&mut self, session: Session) -> io::Result<()> {
        self.state.session = Some(session);
        self.state.pending = None;
        self.save()
    }

    /// Remove token and user. Called on logout whether or not the server
    /// acknowledged it.
    pub fn clear_session(&mut self) -> io::Result<()> {
        self.state.session = None;
        self.save()
    }

    pub fn pending(&self) -> Option<&PendingVerification> {
        self.state.pending.as_ref()
    }

    pub fn set_pending(&mut self, pending: PendingVerification) -> io::Result<()> {
        self.state.pending = Some(pending);
        self.save()
    }

    pub fn clear_pending(&mut self) -> io::Result<()> {
        self.state.pending = None;
        self.save()
    }

    pub fn remembered_email(&self) -> Option<&str> {
        self.state.remembered_email.as_deref()
    }

    pub fn remember_email(&mut self, email: Option<String>) -> io::Result<()> {
        self.state.remembered_email = email;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;
    use chrono::Utc;

    fn sample_user() -> User {
        User {
            id: "u-1".into(),
            full_name: "Ada Admin".into(),
            email: "ada@limpiar.online".into(),
            phone_number: "+15551230000".into(),
            role: Role::Admin,
            is_verified: true,
            availability: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_pending() -> PendingVerification {
        PendingVerification {
            user_id: Some("u-1".into()),
            phone_number: Some("+15551230000".into()),
            mode: VerificationMode::Login,
        }
    }

    #[test]
    fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path().join("state.json")).unwrap();
        assert!(store.session().is_none());
        assert!(store.pending().is_none());
        assert!(store.remembered_email().is_none());
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{not json").unwrap();
        let store = SessionStore::open(&path).unwrap();
        assert!(store.session().is_none());
    }

    #[test]
    fn set_session_persists_and_clears_pending() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut store = SessionStore::open(&path).unwrap();
        store.set_pending(sample_pending()).unwrap();
        store
            .set_session(Session {
                token: "tok-123".into(),
                user: sample_user(),
            })
            .unwrap();

        // A fresh open sees the session and no pending contact.
        let reopened = SessionStore::open(&path).unwrap();
        let session = reopened.session().expect("session should persist");
        assert_eq!(session.token, "tok-123");
        assert_eq!(session.user.email, "ada@limpiar.online");
        assert!(reopened.pending().is_none());
    }

    #[test]
    fn clear_session_keeps_remembered_email() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut store = SessionStore::open(&path).unwrap();
        store.remember_email(Some("ada@limpiar.online".into())).unwrap();
        store
            .set_session(Session {
                token: "tok-123".into(),
                user: sample_user(),
            })
            .unwrap();
        store.clear_session().unwrap();

        let reopened = SessionStore::open(&path).unwrap();
        assert!(reopened.session().is_none());
        assert_eq!(reopened.remembered_email(), Some("ada@limpiar.online"));
    }

    #[test]
    fn pending_contact_check() {
        let mut pending = sample_pending();
        assert!(pending.has_contact());
        pending.user_id = None;
        assert!(pending.has_contact());
        pending.phone_number = None;
        assert!(!pending.has_contact());
    }
}
