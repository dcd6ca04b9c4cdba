use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::warn;

use crate::auth::password::verify_password;
use crate::error::{DomainError, DomainResult};
use crate::model::employee::{Employee, EmployeeProfile};
use crate::model::role::Role;

/// Key under which the current user's profile is persisted.
const SESSION_KEY: &str = "user";

/// Key-value persistence for the session blob. The store is the only thing
/// the identity layer writes outside of memory.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Session store backed by a single JSON object file.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Result<serde_json::Map<String, Value>> {
        if !self.path.exists() {
            return Ok(serde_json::Map::new());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("reading session file {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing session file {}", self.path.display()))
    }

    fn write_map(&self, map: &serde_json::Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(map)?)
            .with_context(|| format!("writing session file {}", self.path.display()))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.read_map()?;
        Ok(map.get(key).and_then(Value::as_str).map(str::to_string))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// The roster of known employees and the login/session lifecycle around it.
pub struct IdentityStore {
    roster: Vec<Employee>,
    sessions: Box<dyn SessionStore>,
}

impl IdentityStore {
    pub fn new(roster: Vec<Employee>, sessions: Box<dyn SessionStore>) -> Self {
        Self { roster, sessions }
    }

    /// Resolves a login attempt. On success the credential-free profile is
    /// returned and persisted as the current session.
    pub fn authenticate(&self, employee_id: &str, password: &str) -> DomainResult<EmployeeProfile> {
        let employee = self
            .roster
            .iter()
            .find(|e| e.id == employee_id)
            .ok_or(DomainError::InvalidCredentials)?;

        if !verify_password(password, &employee.password_hash) {
            return Err(DomainError::InvalidCredentials);
        }

        let profile = employee.profile();
        match serde_json::to_string(&profile) {
            Ok(blob) => {
                if let Err(e) = self.sessions.set(SESSION_KEY, &blob) {
                    // intentionally not failing login
                    warn!(error = %e, employee_id, "Failed to persist session");
                }
            }
            Err(e) => warn!(error = %e, employee_id, "Failed to serialize session"),
        }
        Ok(profile)
    }

    /// Restores the previously persisted session, if any.
    pub fn current_session(&self) -> Option<EmployeeProfile> {
        let blob = match self.sessions.get(SESSION_KEY) {
            Ok(blob) => blob?,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted session");
                return None;
            }
        };
        match serde_json::from_str(&blob) {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable session blob");
                None
            }
        }
    }

    pub fn end_session(&self) -> Result<()> {
        self.sessions.remove(SESSION_KEY)
    }

    pub fn find(&self, employee_id: &str) -> Option<&Employee> {
        self.roster.iter().find(|e| e.id == employee_id)
    }

    pub fn roster(&self) -> &[Employee] {
        &self.roster
    }

    /// The manager whose team the employee belongs to, falling back to the
    /// first admin. Used when an application names no approver.
    pub fn default_approver_for(&self, employee_id: &str) -> Option<&Employee> {
        self.roster
            .iter()
            .find(|e| {
                e.role == Role::Manager && e.team_members.iter().any(|m| m == employee_id)
            })
            .or_else(|| self.roster.iter().find(|e| e.role == Role::Admin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MemorySessionStore(Mutex<HashMap<String, String>>);

    impl MemorySessionStore {
        fn new() -> Self {
            Self(Mutex::new(HashMap::new()))
        }
    }

    impl SessionStore for MemorySessionStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.0.lock().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.0.lock().unwrap().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.0.lock().unwrap().remove(key);
            Ok(())
        }
    }

    fn store() -> IdentityStore {
        IdentityStore::new(seed::demo_roster(), Box::new(MemorySessionStore::new()))
    }

    #[test]
    fn authenticate_returns_credential_free_profile() {
        let store = store();
        let profile = store.authenticate("EMP001", "password123").unwrap();
        assert_eq!(profile.id, "EMP001");
        assert_eq!(profile.name, "Sarah Johnson");

        let blob = serde_json::to_value(&profile).unwrap();
        assert!(blob.get("password").is_none());
        assert!(blob.get("password_hash").is_none());
    }

    #[test]
    fn wrong_password_and_unknown_id_both_fail_the_same_way() {
        let store = store();
        assert!(matches!(
            store.authenticate("EMP001", "wrong").unwrap_err(),
            DomainError::InvalidCredentials
        ));
        assert!(matches!(
            store.authenticate("EMP999", "password123").unwrap_err(),
            DomainError::InvalidCredentials
        ));
    }

    #[test]
    fn session_round_trips_through_the_store() {
        let store = store();
        assert!(store.current_session().is_none());

        store.authenticate("EMP002", "manager123").unwrap();
        let restored = store.current_session().unwrap();
        assert_eq!(restored.id, "EMP002");
        assert_eq!(restored.team_members, vec!["EMP001", "EMP003", "EMP004"]);

        store.end_session().unwrap();
        assert!(store.current_session().is_none());
    }

    #[test]
    fn file_store_round_trips_and_clears() {
        let path = std::env::temp_dir().join(format!("attendly-session-{}.json", uuid::Uuid::new_v4()));
        let files = FileSessionStore::new(&path);
        assert_eq!(files.get("user").unwrap(), None);
        files.set("user", "{\"id\":\"EMP001\"}").unwrap();
        assert_eq!(files.get("user").unwrap().as_deref(), Some("{\"id\":\"EMP001\"}"));
        files.remove("user").unwrap();
        assert_eq!(files.get("user").unwrap(), None);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn default_approver_prefers_the_team_manager() {
        let store = store();
        assert_eq!(store.default_approver_for("EMP001").unwrap().id, "EMP002");
        // ADMIN001 reports to no manager, falls back to an admin
        assert_eq!(store.default_approver_for("ADMIN001").unwrap().id, "ADMIN001");
    }
}
