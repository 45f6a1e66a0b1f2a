//! Flat-file export of a [`SpanningTree`].
//!
//! One file per tree, `tree{t}.txt`:
//!
//! ```text
//! Spanning Tree 1
//! Node	Parent	Level	Children
//! 123	123	0	213
//! 132	312	5
//! ```
//!
//! Rows follow universe order. Every row has four tab-separated fields; the level
//! of an unreached vertex is written as `-1` and an empty children list leaves the
//! last field empty.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use itertools::Itertools;
use thiserror::Error;
use tracing::debug;

use crate::{ist::TreeIndex, tree::SpanningTree, universe::Universe};

/// Written in the level column for vertices the root never reaches.
pub const UNREACHED_LEVEL: i64 = -1;

/// Separator between children in the last column.
pub const CHILD_SEPARATOR: &str = ", ";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Error opening file: {}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Error writing file: {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The file name of tree `index`, e.g. `tree3.txt`.
pub fn file_name(index: TreeIndex) -> String {
    format!("tree{index}.txt")
}

/// Writes the header lines and one row per vertex to `out`.
pub fn write_tree<W: Write>(
    mut out: W,
    tree: &SpanningTree,
    universe: &Universe,
) -> io::Result<()> {
    writeln!(out, "Spanning Tree {}", tree.index())?;
    writeln!(out, "Node\tParent\tLevel\tChildren")?;

    for record in tree.records(universe) {
        let level = record.level.map_or(UNREACHED_LEVEL, i64::from);
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            record.node,
            record.parent,
            level,
            record.children.iter().join(CHILD_SEPARATOR)
        )?;
    }
    out.flush()
}

/// Writes `tree` to `dir/tree{t}.txt` and returns the path.
pub fn export_tree(
    dir: &Path,
    tree: &SpanningTree,
    universe: &Universe,
) -> Result<PathBuf, ExportError> {
    let path = dir.join(file_name(tree.index()));
    let file = File::create(&path).map_err(|source| ExportError::Create {
        path: path.clone(),
        source,
    })?;

    write_tree(BufWriter::new(file), tree, universe).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;

    debug!(path = %path.display(), rows = tree.len(), "tree exported");
    Ok(path)
}
