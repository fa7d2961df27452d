use std::{env, path::PathBuf};

pub const DEFAULT_SUBDIR: &str = ".closet";

#[derive(Debug, thiserror::Error)]
pub enum HomeDirError {
    #[error("HOME environment variable is not set")]
    HomeMissing,
    #[error("home_dir must be an absolute path (after ~ expansion): {0}")]
    AbsoluteRequired(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn user_home() -> Result<PathBuf, HomeDirError> {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .ok_or(HomeDirError::HomeMissing)
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(raw: &str) -> Result<PathBuf, HomeDirError> {
    if raw == "~" {
        user_home()
    } else if let Some(rest) = raw.strip_prefix("~/") {
        Ok(user_home()?.join(rest))
    } else {
        Ok(PathBuf::from(raw))
    }
}

/// Resolve the closet home: the configured path after `~` expansion, or
/// `$HOME/.closet`. The result is always absolute.
///
/// If `create` is true, the directory is created if missing.
pub fn resolve_home_dir(
    config_home: Option<&str>,
    create: bool,
) -> Result<PathBuf, HomeDirError> {
    let path = match config_home {
        Some(raw) => {
            let expanded = expand_tilde(raw)?;
            if !expanded.is_absolute() {
                return Err(HomeDirError::AbsoluteRequired(raw.to_owned()));
            }
            expanded
        }
        None => user_home()?.join(DEFAULT_SUBDIR),
    };
    if create {
        std::fs::create_dir_all(&path)?;
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_paths_pass_through() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().join("home");
        let resolved = resolve_home_dir(raw.to_str(), true).unwrap();
        assert_eq!(resolved, raw);
        assert!(resolved.is_dir());
    }

    #[test]
    fn relative_paths_are_rejected() {
        assert!(matches!(
            resolve_home_dir(Some("relative/closet"), false),
            Err(HomeDirError::AbsoluteRequired(_))
        ));
    }

    #[test]
    fn plain_paths_are_not_expanded() {
        assert_eq!(expand_tilde("/srv/closet").unwrap(), PathBuf::from("/srv/closet"));
    }
}
