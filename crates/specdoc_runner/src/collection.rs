//! Discovery of the Ansible collections root.
//!
//! Provider commands that import the module need the directory above
//! `ansible_collections/` on their import path. It is found from the module
//! location: either a directory that contains `ansible_collections`, or the
//! parent of an `ansible_collections` ancestor.

use std::path::{Path, PathBuf};

use tracing::debug;

pub const COLLECTIONS_DIR: &str = "ansible_collections";

/// Find the collections root for a file or directory.
pub fn find_collections_root(start: &Path) -> Option<PathBuf> {
    let start = if start.is_absolute() {
        start.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(start)
    };

    let dir = if start.is_dir() {
        start.as_path()
    } else {
        start.parent()?
    };

    if dir.join(COLLECTIONS_DIR).is_dir() {
        debug!("Collections root found at {:?}", dir);
        return Some(dir.to_path_buf());
    }

    dir.ancestors()
        .find(|ancestor| ancestor.file_name().map_or(false, |name| name == COLLECTIONS_DIR))
        .and_then(Path::parent)
        .map(|root| {
            debug!("Collections root found at {:?}", root);
            root.to_path_buf()
        })
}
