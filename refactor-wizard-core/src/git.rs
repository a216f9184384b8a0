// git awareness - warn before rewriting a dirty working tree

use std::path::Path;

use anyhow::{Context, Result};
use git2::{Repository, StatusOptions};

/// number of uncommitted changes (including untracked files) in the
/// repository containing `path`, or None when the path is not in a repository
pub fn uncommitted_change_count(path: &Path) -> Result<Option<usize>> {
    let repo = match Repository::discover(path) {
        Ok(repo) => repo,
        Err(_) => return Ok(None),
    };

    let mut status_opts = StatusOptions::new();
    status_opts.include_untracked(true).recurse_untracked_dirs(true);

    let statuses = repo
        .statuses(Some(&mut status_opts))
        .context("failed to read git status")?;

    Ok(Some(statuses.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn paths_outside_a_repository_are_none() {
        let dir = tempdir().unwrap();
        assert_eq!(uncommitted_change_count(dir.path()).unwrap(), None);
    }

    #[test]
    fn untracked_files_count_as_changes() {
        let dir = tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "untracked").unwrap();
        let count = uncommitted_change_count(dir.path()).unwrap();
        assert!(count.unwrap() >= 1);
    }
}
