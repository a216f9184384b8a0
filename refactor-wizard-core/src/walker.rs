// tree walker - recursive rename/rewrite of a directory tree

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs;

use crate::error::{RefactorError, Result};
use crate::refactor::{refactor_string, CompiledPair};

/// one file whose transformed path differs from its original
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Rename {
    pub from: String,
    pub to: String,
}

/// outcome of one directory application
#[derive(Debug, Default, Serialize)]
pub struct WalkSummary {
    pub files_visited: usize,
    pub files_written: usize,
    pub renames: Vec<Rename>,
}

/// recursively rewrite every file under `root`
///
/// both the file content and the root-relative path go through the
/// substitution pairs; the transformed content is written under the
/// transformed path, creating intermediate directories as needed. originals
/// are kept when the transformed path differs, so a rename-style refactor
/// leaves old and new files side by side. there is no rollback: the first
/// failure aborts the walk and leaves the tree partially transformed.
pub async fn rewrite_tree(
    root: &Path,
    pairs: &[CompiledPair],
    verbose: bool,
) -> Result<WalkSummary> {
    let meta = match fs::metadata(root).await {
        Ok(meta) => meta,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(RefactorError::NotADirectory {
                path: root.to_path_buf(),
            });
        }
        Err(err) => return Err(err.into()),
    };
    if !meta.is_dir() {
        return Err(RefactorError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut summary = WalkSummary::default();

    // explicit work-stack instead of recursion: deep trees don't grow the
    // call stack and entries are processed strictly one at a time. no cycle
    // detection; symlinked directories are followed.
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        // snapshot the listing before rewriting anything in this directory,
        // so files written during the walk don't feed back into it
        let mut entries: Vec<PathBuf> = Vec::new();
        let mut reader = fs::read_dir(&dir).await?;
        while let Some(entry) = reader.next_entry().await? {
            entries.push(entry.path());
        }
        entries.sort();

        for path in entries {
            if fs::metadata(&path).await?.is_dir() {
                pending.push(path);
            } else {
                rewrite_file(root, &path, pairs, verbose, &mut summary).await?;
            }
        }
    }

    Ok(summary)
}

/// read one file, transform content and relative path, write the result
async fn rewrite_file(
    root: &Path,
    path: &Path,
    pairs: &[CompiledPair],
    verbose: bool,
    summary: &mut WalkSummary,
) -> Result<()> {
    summary.files_visited += 1;

    let bytes = fs::read(path).await?;
    let content =
        match encoding_rs::UTF_8.decode_without_bom_handling_and_without_replacement(&bytes) {
            Some(content) => content,
            None => {
                return Err(RefactorError::NonUtf8Content {
                    path: path.to_path_buf(),
                });
            }
        };

    // entries always live under root, so strip_prefix cannot miss
    let relative = path.strip_prefix(root).unwrap_or(path);
    let relative = relative.to_str().ok_or_else(|| RefactorError::NonUtf8Path {
        path: path.to_path_buf(),
    })?;

    let new_relative = refactor_string(pairs, relative);
    let new_content = refactor_string(pairs, &content);

    let destination = root.join(&new_relative);
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(&destination, new_content.as_bytes()).await?;
    summary.files_written += 1;

    if new_relative != relative {
        if verbose {
            println!("renamed {relative} -> {new_relative}");
        }
        summary.renames.push(Rename {
            from: relative.to_string(),
            to: new_relative,
        });
    } else if verbose {
        println!("rewrote {relative}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refactor::{compile_pairs, parse_input};
    use tempfile::tempdir;

    fn pairs_for(input: &str) -> Vec<CompiledPair> {
        compile_pairs(&parse_input(input).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn renames_are_additive() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("channel.txt"), "the channel is empty").unwrap();

        let summary = rewrite_tree(dir.path(), &pairs_for("channel group"), false)
            .await
            .unwrap();

        assert_eq!(summary.files_visited, 1);
        assert_eq!(summary.files_written, 1);
        assert_eq!(
            summary.renames,
            vec![Rename {
                from: "channel.txt".to_string(),
                to: "group.txt".to_string(),
            }]
        );

        // the transformed copy exists and the original is untouched
        assert_eq!(
            std::fs::read_to_string(dir.path().join("group.txt")).unwrap(),
            "the group is empty"
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("channel.txt")).unwrap(),
            "the channel is empty"
        );
    }

    #[tokio::test]
    async fn empty_directory_writes_nothing() {
        let dir = tempdir().unwrap();
        let summary = rewrite_tree(dir.path(), &pairs_for("channel group"), false)
            .await
            .unwrap();
        assert_eq!(summary.files_visited, 0);
        assert_eq!(summary.files_written, 0);
        assert!(summary.renames.is_empty());
    }

    #[tokio::test]
    async fn path_substitution_creates_missing_directories() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("channel")).unwrap();
        std::fs::write(dir.path().join("channel").join("notes.txt"), "channel notes").unwrap();

        let summary = rewrite_tree(dir.path(), &pairs_for("channel group"), false)
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join("group").join("notes.txt")).unwrap(),
            "group notes"
        );
        assert!(dir.path().join("channel").join("notes.txt").exists());
        assert_eq!(
            summary.renames,
            vec![Rename {
                from: "channel/notes.txt".to_string(),
                to: "group/notes.txt".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn unchanged_paths_are_rewritten_in_place() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("readme.md"), "channels and more channels").unwrap();

        let summary = rewrite_tree(dir.path(), &pairs_for("channels groups"), false)
            .await
            .unwrap();

        assert_eq!(summary.files_written, 1);
        assert!(summary.renames.is_empty());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("readme.md")).unwrap(),
            "groups and more groups"
        );
    }

    #[tokio::test]
    async fn missing_target_is_not_a_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            rewrite_tree(&missing, &pairs_for("a b"), false).await,
            Err(RefactorError::NotADirectory { .. })
        ));
    }

    #[tokio::test]
    async fn file_target_is_not_a_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        assert!(matches!(
            rewrite_tree(&file, &pairs_for("a b"), false).await,
            Err(RefactorError::NotADirectory { .. })
        ));
    }

    #[tokio::test]
    async fn non_utf8_content_aborts_the_walk() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("blob.bin"), [0xff, 0xfe, 0x00, 0x9f]).unwrap();
        assert!(matches!(
            rewrite_tree(dir.path(), &pairs_for("a b"), false).await,
            Err(RefactorError::NonUtf8Content { .. })
        ));
    }
}
