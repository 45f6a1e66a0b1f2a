//! The per-run pipeline: generate the universe once, then build, check and export
//! every tree.
//!
//! Each tree is an independent task over the shared, read-only universe. A tree
//! that fails the reachability check is still exported, and a tree that cannot be
//! written is skipped; neither stops the remaining trees.

use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use rayon::prelude::*;
use tracing::{error, info, info_span, warn};

use crate::{
    config::{ConfigError, RunConfig},
    export::export_tree,
    ist::{BubbleSortRule, ParentRule, TreeIndex},
    tree::{Integrity, SpanningTree},
    universe::Universe,
};

/// What happened to one tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeReport {
    pub index: TreeIndex,
    /// `None` if the tree could not be assembled.
    pub integrity: Option<Integrity>,
    pub depth: Option<u32>,
    /// `None` if nothing was written.
    pub exported: Option<PathBuf>,
    pub elapsed: Duration,
}

impl TreeReport {
    pub fn is_spanning(&self) -> bool {
        self.integrity.as_ref().is_some_and(Integrity::is_spanning)
    }
}

/// Progress notifications, in tree-index order.
#[derive(Debug, Clone, Copy)]
pub enum Progress<'a> {
    Universe { vertices: usize, elapsed: Duration },
    Tree(&'a TreeReport),
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub vertices: usize,
    pub generation: Duration,
    pub trees: Vec<TreeReport>,
    /// Wall time for all trees.
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn spanning(&self) -> usize {
        self.trees.iter().filter(|t| t.is_spanning()).count()
    }

    pub fn exported(&self) -> usize {
        self.trees.iter().filter(|t| t.exported.is_some()).count()
    }
}

/// Runs the whole pipeline for `config` with the bubble-sort rule.
///
/// Only a missing output directory that cannot be created is fatal.
pub fn run(
    config: &RunConfig,
    mut progress: impl FnMut(Progress<'_>),
) -> Result<RunSummary, ConfigError> {
    let out_dir = config.prepare_out_dir()?;

    let start = Instant::now();
    let universe = Universe::new(config.dimension);
    let generation = start.elapsed();
    info!(
        n = %config.dimension,
        vertices = universe.len(),
        ms = generation.as_millis(),
        "generated permutations"
    );
    progress(Progress::Universe {
        vertices: universe.len(),
        elapsed: generation,
    });

    let rule = BubbleSortRule::new(config.dimension);
    let start = Instant::now();
    let trees = process_trees(&universe, &rule, out_dir, config.parallel, |report| {
        progress(Progress::Tree(report))
    });
    let elapsed = start.elapsed();
    info!(trees = trees.len(), ms = elapsed.as_millis(), "all trees done");

    Ok(RunSummary {
        vertices: universe.len(),
        generation,
        trees,
        elapsed,
    })
}

/// Builds, checks and exports every tree `1..=n-1` of `universe`.
///
/// With `parallel` the trees are built as rayon tasks and joined; `on_tree` is
/// still called in tree-index order once they are all done.
pub fn process_trees<R: ParentRule + Sync + ?Sized>(
    universe: &Universe,
    rule: &R,
    out_dir: &Path,
    parallel: bool,
    mut on_tree: impl FnMut(&TreeReport),
) -> Vec<TreeReport> {
    let indices = universe.dimension().tree_indices();
    if parallel {
        let reports: Vec<_> = indices
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|index| process_tree(universe, rule, index, out_dir))
            .collect();
        reports.iter().for_each(&mut on_tree);
        reports
    } else {
        indices
            .map(|index| {
                let report = process_tree(universe, rule, index, out_dir);
                on_tree(&report);
                report
            })
            .collect()
    }
}

/// Builds tree `index`, reports its integrity and writes it to `out_dir`.
pub fn process_tree<R: ParentRule + ?Sized>(
    universe: &Universe,
    rule: &R,
    index: TreeIndex,
    out_dir: &Path,
) -> TreeReport {
    let _span = info_span!("tree", t = %index).entered();
    let start = Instant::now();

    let tree = match SpanningTree::build(universe, rule, index) {
        Ok(tree) => tree,
        Err(err) => {
            error!(%err, "tree not built");
            return TreeReport {
                index,
                integrity: None,
                depth: None,
                exported: None,
                elapsed: start.elapsed(),
            };
        }
    };

    let integrity = tree.integrity();
    if let Integrity::Incomplete {
        unreached,
        ref orphans,
        first,
    } = integrity
    {
        warn!(
            unreached,
            orphans = orphans.len(),
            first = %universe[first.ordinal()],
            "Tree {index} is not a valid spanning tree!"
        );
    }

    let exported = match export_tree(out_dir, &tree, universe) {
        Ok(path) => {
            info!(path = %path.display(), "Tree {index} info saved");
            Some(path)
        }
        Err(err) => {
            let cause = std::error::Error::source(&err).map(ToString::to_string);
            error!(%err, ?cause, "export skipped");
            None
        }
    };

    TreeReport {
        index,
        integrity: Some(integrity),
        depth: tree.depth(),
        exported,
        elapsed: start.elapsed(),
    }
}
