use insta::assert_snapshot;
use itertools::Itertools;

use super::*;
use crate::{ist::BubbleSortRule, universe::Dimension};

fn setup(n: i64) -> (Universe, BubbleSortRule) {
    let d = Dimension::new(n).unwrap();
    (Universe::new(d), BubbleSortRule::new(d))
}

fn build(universe: &Universe, rule: &impl ParentRule, t: u8) -> SpanningTree {
    SpanningTree::build(universe, rule, TreeIndex(t)).unwrap()
}

fn id(universe: &Universe, one_line: &str) -> TreeNodeId {
    let symbols = one_line.bytes().map(|b| b - b'0').collect();
    let p = Permutation::from_one_line(symbols).unwrap();
    TreeNodeId(universe.ordinal(&p).unwrap())
}

fn names(universe: &Universe, ids: impl IntoIterator<Item = TreeNodeId>) -> String {
    ids.into_iter().map(|i| universe[i.0].to_string()).join(" ")
}

#[test]
fn n3_tree1_is_a_path() {
    let (u, rule) = setup(3);
    let tree = build(&u, &rule, 1);

    assert_eq!(tree.root(), id(&u, "123"));
    assert_eq!(tree.integrity(), Integrity::Spanning);
    assert_eq!(tree.depth(), Some(5));

    let bfs = tree.iter_bfs(tree.root()).map(|(n, _)| n);
    assert_snapshot!(names(&u, bfs), @"123 213 231 321 312 132");

    let levels: Vec<_> = tree.iter_node_ids().map(|n| tree.level(n)).collect();
    assert_eq!(
        levels,
        [Some(0), Some(5), Some(1), Some(2), Some(4), Some(3)]
    );
    assert_eq!(tree.children(id(&u, "312")), &[id(&u, "132")]);
    assert!(tree.children(id(&u, "132")).is_empty());
}

#[test]
fn n3_tree2_is_a_path() {
    let (u, rule) = setup(3);
    let tree = build(&u, &rule, 2);

    let bfs = tree.iter_bfs(tree.root()).map(|(n, _)| n);
    assert_snapshot!(names(&u, bfs), @"123 132 312 321 231 213");
    assert_eq!(tree.level(id(&u, "123")), Some(0));
    assert_eq!(tree.level(id(&u, "213")), Some(5));
    assert_eq!(tree.parent(id(&u, "123")), id(&u, "123"));
    assert_eq!(tree.parent_id(id(&u, "123")), ParentId::Root);
    assert_eq!(tree.parent(id(&u, "213")), id(&u, "231"));
}

#[test]
fn n3_records() {
    let (u, rule) = setup(3);
    let tree = build(&u, &rule, 1);
    let records: Vec<_> = tree.records(&u).collect();

    assert_eq!(records.len(), 6);
    assert_eq!(records[0].node, u.identity());
    assert_eq!(records[0].parent, u.identity());
    assert_eq!(records[0].level, Some(0));
    assert_eq!(records[0].children, [&u[2]]);
    assert_eq!(records[1].node.to_string(), "132");
    assert_eq!(records[1].parent.to_string(), "312");
    assert!(records[1].children.is_empty());
    assert!(records.iter().all(|r| r.level.is_some()));
}

#[test]
fn small_dimensions_span() {
    for n in 2..=4 {
        let (u, rule) = setup(n);
        for t in u.dimension().tree_indices() {
            let tree = SpanningTree::build(&u, &rule, t).unwrap();
            assert!(tree.integrity().is_spanning(), "n = {n}, tree {t}");
            assert_eq!(tree.unreached().count_ones(), 0);
        }
    }
}

#[test]
fn middle_trees_span_up_to_six() {
    for n in 5..=6 {
        let (u, rule) = setup(n);
        for t in u.dimension().tree_indices() {
            if t.get() == 2 || t.get() == n as u8 - 1 {
                continue;
            }
            let tree = SpanningTree::build(&u, &rule, t).unwrap();
            assert_eq!(tree.integrity(), Integrity::Spanning, "n = {n}, tree {t}");
        }
    }
}

#[test]
fn literal_rule_leaves_vertices_unreached() {
    let expected = [(5, 2, 3), (5, 4, 60), (6, 2, 9), (6, 5, 600)];
    for (n, t, unreached) in expected {
        let (u, rule) = setup(n);
        let tree = build(&u, &rule, t);
        match tree.integrity() {
            Integrity::Incomplete {
                unreached: count,
                orphans,
                first,
            } => {
                assert_eq!(count, unreached, "n = {n}, tree {t}");
                assert!(orphans.is_empty());
                assert_eq!(tree.level(first), None);
                assert_eq!(tree.path_to_root(first), None);
            }
            Integrity::Spanning => panic!("n = {n}, tree {t} should be incomplete"),
        }
        // every node still has a parent one swap away
        for node in tree.iter_node_ids().filter(|&i| i != tree.root()) {
            assert!(u[node.0].is_adjacent(&u[tree.parent(node).0]));
        }
    }
}

#[test]
fn levels_follow_parent_links() {
    let (u, rule) = setup(5);
    for t in u.dimension().tree_indices() {
        let tree = SpanningTree::build(&u, &rule, t).unwrap();
        for node in tree.iter_node_ids() {
            let Some(level) = tree.level(node) else {
                continue;
            };
            let path = tree.path_to_root(node).unwrap();
            assert_eq!(path.len(), level as usize + 1);
            assert_eq!(path[0], node);
            if node != tree.root() {
                assert_eq!(tree.level(tree.parent(node)), Some(level - 1));
                assert!(tree.children(tree.parent(node)).contains(&node));
            }
        }
    }
}

#[test]
fn children_partition_non_root_nodes() {
    let (u, rule) = setup(4);
    for t in u.dimension().tree_indices() {
        let tree = SpanningTree::build(&u, &rule, t).unwrap();
        let mut all: Vec<_> = tree
            .iter_node_ids()
            .flat_map(|n| tree.children(n).iter().copied())
            .collect();
        all.sort();
        let expected: Vec<_> = tree.iter_node_ids().filter(|&n| n != tree.root()).collect();
        assert_eq!(all, expected);
        // children are listed in universe order
        for n in tree.iter_node_ids() {
            assert!(tree.children(n).windows(2).all(|w| w[0] < w[1]));
        }
    }
}

/// Moves symbol 1 one step right; vertices ending in 1 become their own parent.
struct DriftRight;

impl ParentRule for DriftRight {
    fn parent(&self, vertex: &Permutation, _tree: TreeIndex) -> Permutation {
        if vertex.is_identity() {
            vertex.clone()
        } else {
            vertex.swap_symbol(1)
        }
    }
}

/// Exchanges the first two positions, pairing most vertices into 2-cycles.
struct FlipFront;

impl ParentRule for FlipFront {
    fn parent(&self, vertex: &Permutation, _tree: TreeIndex) -> Permutation {
        if vertex.is_identity() {
            vertex.clone()
        } else {
            vertex.neighbours().next().unwrap()
        }
    }
}

#[test]
fn orphan_roots_are_reported() {
    let (u, _) = setup(3);
    let tree = build(&u, &DriftRight, 1);

    assert_eq!(
        tree.integrity(),
        Integrity::Incomplete {
            unreached: 5,
            orphans: vec![id(&u, "231"), id(&u, "321")],
            first: id(&u, "132"),
        }
    );
    assert_eq!(tree.parent(id(&u, "231")), id(&u, "231"));
    assert_eq!(
        tree.path_to_root(id(&u, "231")),
        None,
        "an orphan is its own chain"
    );
    let records: Vec<_> = tree.records(&u).collect();
    assert_eq!(records[3].node, records[3].parent);
    assert_eq!(records[3].level, None);
}

#[test]
fn parent_cycles_terminate() {
    let (u, _) = setup(3);
    let tree = build(&u, &FlipFront, 1);

    let reached: Vec<_> = tree
        .iter_node_ids()
        .filter(|&n| tree.level(n).is_some())
        .collect();
    assert_eq!(reached, [id(&u, "123"), id(&u, "213")]);

    let cyclic = id(&u, "132");
    assert_eq!(tree.parent(tree.parent(cyclic)), cyclic);
    assert_eq!(tree.iter_ancestors(cyclic).count(), 2);
    assert_eq!(tree.iter_bfs(cyclic).count(), 2);
    assert_eq!(tree.path_to_root(cyclic), None);
}

#[test]
fn foreign_rules_are_rejected() {
    struct Outside;
    impl ParentRule for Outside {
        fn parent(&self, vertex: &Permutation, _tree: TreeIndex) -> Permutation {
            if vertex.is_identity() {
                vertex.clone()
            } else {
                Permutation::id(vertex.len() as u8 + 1)
            }
        }
    }

    struct Rootless;
    impl ParentRule for Rootless {
        fn parent(&self, vertex: &Permutation, _tree: TreeIndex) -> Permutation {
            vertex.neighbours().next().unwrap()
        }
    }

    let (u, _) = setup(3);
    assert_eq!(
        SpanningTree::build(&u, &Outside, TreeIndex(1)),
        Err(TreeError::ForeignParent {
            tree: TreeIndex(1),
            vertex: "132".into(),
            parent: "1234".into(),
        })
    );
    assert_eq!(
        SpanningTree::build(&u, &Rootless, TreeIndex(2)),
        Err(TreeError::MissingRoot(TreeIndex(2)))
    );
}
