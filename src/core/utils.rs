use dirs::home_dir;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

const HOME_ENV: &str = "FUNDRAISING_HOME";
const DEFAULT_DIR_NAME: &str = ".fundraising";
const BACKUP_DIR: &str = "backups";
const CONFIG_FILE: &str = "config.json";

/// Creates `path` and any missing parents.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Resolves the on-disk layout of the application data directory.
pub struct PathResolver;

impl PathResolver {
    /// `$FUNDRAISING_HOME` when set, otherwise `~/.fundraising`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_base(root: Option<PathBuf>) -> PathBuf {
        root.unwrap_or_else(Self::base_dir)
    }

    pub fn backup_dir_in(base: &Path) -> PathBuf {
        base.join(BACKUP_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_root_wins() {
        let root = PathBuf::from("/tmp/fundraising-test");
        assert_eq!(PathResolver::resolve_base(Some(root.clone())), root);
        assert_eq!(
            PathResolver::backup_dir_in(&root),
            root.join("backups")
        );
        assert_eq!(
            PathResolver::config_file_in(&root),
            root.join("config.json")
        );
    }
}
