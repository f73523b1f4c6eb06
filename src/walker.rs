use ignore::WalkBuilder;
use std::io;
use std::path::PathBuf;

/// Expand the given paths into the files to resolve.
///
/// Directories are walked recursively, respecting gitignore and skipping
/// hidden entries. Any other path is yielded unchanged: a file does not
/// have to exist for its properties to be resolved.
pub fn walk_paths(paths: &[PathBuf]) -> impl Iterator<Item = io::Result<PathBuf>> {
    let mut all_files = vec![];

    for path in paths {
        if !path.is_dir() {
            all_files.push(Ok(path.clone()));
            continue;
        }

        let walker = WalkBuilder::new(path)
            .hidden(true) // Skip hidden files, including .editorconfig itself
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .build();

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
                        all_files.push(Ok(entry.into_path()));
                    }
                }
                Err(e) => {
                    all_files.push(Err(io::Error::other(e.to_string())));
                }
            }
        }
    }

    all_files.into_iter()
}
