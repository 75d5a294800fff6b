//! File-backed token store.
//!
//! The token lives in a single file under the platform data directory.
//! Storage failures are logged and swallowed: at worst the user has to log
//! in again.

use leafscan_application::TokenStore;
use leafscan_domain::AuthToken;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<data dir>/leafscan/token`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("leafscan").join("token"))
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<AuthToken> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let token = contents.trim();
        if token.is_empty() {
            return None;
        }
        Some(AuthToken::new(token))
    }

    fn save(&self, token: &AuthToken) {
        if let Some(parent) = self.path.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warn!("could not create token directory {}: {e}", parent.display());
            return;
        }
        if let Err(e) = fs::write(&self.path, token.as_str()) {
            warn!("could not persist token to {}: {e}", self.path.display());
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("could not remove token file {}: {e}", self.path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_load_clear_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("token"));

        assert!(store.load().is_none());

        store.save(&AuthToken::new("tok-abc"));
        assert_eq!(store.load().unwrap().as_str(), "tok-abc");

        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn clear_on_missing_file_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token"));
        store.clear();
    }

    #[test]
    fn whitespace_only_file_counts_as_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        fs::write(&path, "  \n").unwrap();

        let store = FileTokenStore::new(path);
        assert!(store.load().is_none());
    }
}
