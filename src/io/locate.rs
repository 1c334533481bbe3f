//! Default data-file discovery.
//!
//! Lookup order when no explicit `--data` path is given:
//!
//! 1. `DATA_PATH` (as-is, then relative to the working directory)
//! 2. the container image path
//! 3. `data/bens-imoveis.json` under the working directory

use std::path::{Path, PathBuf};

use tracing::debug;

/// File name the audit export ships with.
pub const DEFAULT_FILE_NAME: &str = "bens-imoveis.json";

/// Where the container image mounts the data volume.
pub const CONTAINER_DATA_PATH: &str = "/pega_safado/data/bens-imoveis.json";

/// Environment variable overriding the data file location.
pub const DATA_PATH_ENV: &str = "DATA_PATH";

/// Resolve the data file from the process environment.
///
/// A `.env` file in the working directory is honored.
pub fn locate_data_file() -> Option<PathBuf> {
    dotenvy::dotenv().ok();
    let env_path = std::env::var(DATA_PATH_ENV).ok();
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve_data_file(env_path.as_deref(), &cwd, Path::new(CONTAINER_DATA_PATH))
}

/// Pure resolution step behind [`locate_data_file`].
pub fn resolve_data_file(
    env_path: Option<&str>,
    cwd: &Path,
    container_path: &Path,
) -> Option<PathBuf> {
    if let Some(raw) = env_path.map(str::trim).filter(|s| !s.is_empty()) {
        let direct = PathBuf::from(raw);
        if direct.exists() {
            debug!(path = %direct.display(), "data file from {DATA_PATH_ENV}");
            return Some(direct);
        }
        let joined = cwd.join(raw);
        if joined.exists() {
            debug!(path = %joined.display(), "data file from {DATA_PATH_ENV} (relative)");
            return Some(joined);
        }
        debug!(value = raw, "{DATA_PATH_ENV} set but no file found; trying defaults");
    }

    if container_path.exists() {
        return Some(container_path.to_path_buf());
    }

    let local = cwd.join("data").join(DEFAULT_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "[]").unwrap();
    }

    #[test]
    fn env_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("custom.json");
        touch(&explicit);
        touch(&dir.path().join("data").join(DEFAULT_FILE_NAME));

        let got = resolve_data_file(explicit.to_str(), dir.path(), &dir.path().join("nope.json"));
        assert_eq!(got, Some(explicit));
    }

    #[test]
    fn env_path_relative_to_cwd() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("exports").join("a.json"));

        let got = resolve_data_file(
            Some("exports/a.json"),
            dir.path(),
            &dir.path().join("nope.json"),
        );
        assert_eq!(got, Some(dir.path().join("exports/a.json")));
    }

    #[test]
    fn container_path_before_local() {
        let dir = tempfile::tempdir().unwrap();
        let container = dir.path().join("mnt").join(DEFAULT_FILE_NAME);
        touch(&container);
        touch(&dir.path().join("data").join(DEFAULT_FILE_NAME));

        let got = resolve_data_file(Some("missing.json"), dir.path(), &container);
        assert_eq!(got, Some(container));
    }

    #[test]
    fn local_data_dir_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("data").join(DEFAULT_FILE_NAME);
        touch(&local);

        let got = resolve_data_file(None, dir.path(), &dir.path().join("nope.json"));
        assert_eq!(got, Some(local));
    }

    #[test]
    fn nothing_found() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve_data_file(None, dir.path(), &dir.path().join("nope.json")), None);
    }
}
