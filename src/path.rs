use std::env;
use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR_STR};

use log::debug;

use crate::env::Environment;

pub const SEARCH_PATH_VAR: &str = "PATH";

/// Finds the first executable named `name` in the search path.
///
/// Directories are tried in order and empty segments are skipped. Relative
/// entries are taken relative to the session's current directory. With no
/// search path set, nothing resolves. The candidate is the directory, a
/// separator and `name` glued together, so a name such as `/bin/sh` is
/// looked up beneath each directory rather than taken as-is.
pub fn find_executable(env: &Environment, name: &str) -> Option<PathBuf> {
    let search_path = env.get_var(SEARCH_PATH_VAR)?;
    let found = env::split_paths(&search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| candidate(&env.absolute(dir), name))
        .find(|candidate| is_executable(candidate));
    debug!("resolved {name:?} to {found:?}");
    found
}

fn candidate(dir: &Path, name: &str) -> PathBuf {
    let mut path = dir.as_os_str().to_os_string();
    path.push(MAIN_SEPARATOR_STR);
    path.push(name);
    PathBuf::from(path)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    match fs::metadata(path) {
        Ok(metadata) => metadata.is_file() && metadata.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn touch(dir: &Path, name: &str, mode: u32) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    fn env_with_path(dirs: &[&Path]) -> Environment {
        let mut env = Environment::with_current_dir("/");
        env.set_var(SEARCH_PATH_VAR, env::join_paths(dirs).unwrap());
        env
    }

    #[test]
    fn first_match_in_path_order_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        touch(second.path(), "tool", 0o755);
        let expected = touch(first.path(), "tool", 0o755);

        let env = env_with_path(&[first.path(), second.path()]);
        assert_eq!(find_executable(&env, "tool"), Some(expected));
    }

    #[test]
    fn skips_files_without_execute_permission() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        touch(first.path(), "tool", 0o644);
        let expected = touch(second.path(), "tool", 0o700);

        let env = env_with_path(&[first.path(), second.path()]);
        assert_eq!(find_executable(&env, "tool"), Some(expected));
    }

    #[test]
    fn skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("tool")).unwrap();

        let env = env_with_path(&[dir.path()]);
        assert_eq!(find_executable(&env, "tool"), None);
    }

    #[test]
    fn empty_segments_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let expected = touch(dir.path(), "tool", 0o755);

        let mut env = Environment::with_current_dir("/");
        env.set_var(
            SEARCH_PATH_VAR,
            format!("::{}:", dir.path().display()),
        );
        assert_eq!(find_executable(&env, "tool"), Some(expected));
    }

    #[test]
    fn absolute_names_are_searched_beneath_path_entries() {
        let dir = tempfile::tempdir().unwrap();
        let env = env_with_path(&[dir.path()]);
        assert_eq!(find_executable(&env, "/bin/sh"), None);

        fs::create_dir(dir.path().join("bin")).unwrap();
        touch(&dir.path().join("bin"), "sh", 0o755);
        let found = find_executable(&env, "/bin/sh").unwrap();
        assert!(found.starts_with(dir.path()));
        assert!(found.is_file());
    }

    #[test]
    fn unset_search_path_never_resolves() {
        let mut env = Environment::with_current_dir("/");
        env.remove_var(SEARCH_PATH_VAR);
        assert_eq!(find_executable(&env, "sh"), None);
    }

    #[test]
    fn missing_command_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let env = env_with_path(&[dir.path()]);
        assert_eq!(find_executable(&env, "nonexistent_cmd_xyz"), None);
    }

    #[test]
    fn relative_entries_follow_current_dir() {
        let root = tempfile::tempdir().unwrap();
        let bin = root.path().join("bin");
        fs::create_dir(&bin).unwrap();
        let expected = touch(&bin, "tool", 0o755);

        let mut env = Environment::with_current_dir(root.path());
        env.set_var(SEARCH_PATH_VAR, "bin");
        assert_eq!(find_executable(&env, "tool"), Some(expected));
    }
}
