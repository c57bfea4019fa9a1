use std::io::Write;
use std::time::{Duration, Instant};

use rand::Rng;
use rand_distr::{Distribution, Uniform};
use tracing::{debug, info};

use crate::binary_search_tree::{BinarySearchTree, NodeId};
use crate::config::RunConfig;
use crate::error::Result;
use crate::Key;

/// Outcome of a single driver run.
#[derive(Debug)]
pub struct RunReport {
    pub tree: BinarySearchTree,
    pub target: Key,
    pub found: Option<NodeId>,
    pub elapsed: Duration,
}

impl RunReport {
    /// Key of the found node's parent, `None` when the target is missing or is the root.
    pub fn target_parent(&self) -> Option<Key> {
        let found = self.tree.node(self.found?);
        found.parent().map(|parent| self.tree.node(parent).key())
    }
}

/// Draw a root and then `node_count` further keys from `[0, node_count)`.
///
/// Repeated draws are dropped by the tree, so the result holds between 1 and
/// `node_count + 1` nodes.
pub fn build_random_tree<R: Rng + ?Sized>(config: &RunConfig, rng: &mut R) -> Result<BinarySearchTree> {
    let keys = Uniform::new(0, config.key_upper_bound()?);

    let mut tree = BinarySearchTree::with_root(keys.sample(rng));
    for _ in 0..config.node_count() {
        tree.insert(keys.sample(rng));
    }

    debug!(
        attempts = config.node_count() + 1,
        stored = tree.len(),
        "built random tree"
    );
    Ok(tree)
}

/// Build a random tree, print it with the target highlighted, then search for
/// the target and report the result to `out`.
pub fn run<R: Rng + ?Sized, W: Write>(config: &RunConfig, rng: &mut R, out: &mut W) -> Result<RunReport> {
    let start = Instant::now();
    info!(node_count = config.node_count(), seed = ?config.seed(), "starting run");

    let tree = build_random_tree(config, rng)?;
    let target = Uniform::new(0, config.key_upper_bound()?).sample(rng);

    let children = tree.root_node().map_or(0, |root| root.child_count());
    writeln!(out, "root has {children} children.")?;
    write!(out, "{}", tree.render(Some(target)))?;

    if config.print_df() {
        let mut dump = String::new();
        // writing into a String cannot fail
        let _ = tree.write_df_values(&mut dump);
        write!(out, "{dump}")?;
    }

    let found = tree.find(target);
    let mut report = RunReport {
        tree,
        target,
        found,
        elapsed: Duration::ZERO,
    };

    match (report.found, report.target_parent()) {
        (Some(_), Some(parent)) => writeln!(out, "found target node {target} after node {parent}")?,
        (Some(_), None) => writeln!(out, "found target node {target} at the root")?,
        (None, _) => writeln!(out, "{target} not found.")?,
    }
    debug!(target_key = target, found = report.found.is_some(), "searched for target");

    report.elapsed = start.elapsed();
    writeln!(out, "execution time took {:?}", report.elapsed)?;
    Ok(report)
}
