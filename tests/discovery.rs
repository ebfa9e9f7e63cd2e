use std::collections::BTreeSet;
use std::io::Cursor;

use iterscan::data::edgelist::parse_edge_list;
use iterscan::{
    iterative_scan, AverageDegree, ClusterError, ClusteringDriver, Graph, MetricKind,
    SeededClusteringDriver, UnitWeight, WeightProbability,
};
use petgraph::graph::{NodeIndex, UnGraph};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn smoke_discovery_on_two_communities() {
    // Two 5-cliques joined by a single bridge e-f
    let text = "\
# community one
a b\na c\na d\na e\nb c\nb d\nb e\nc d\nc e\nd e
# bridge
e f
# community two
f g\nf h\nf i\nf j\ng h\ng i\ng j\nh i\nh j\ni j
";
    let g = parse_edge_list(Cursor::new(text)).unwrap();
    assert_eq!(g.vertex_count(), 10);
    assert_eq!(g.edge_count(), 21);

    let driver = ClusteringDriver::new(AverageDegree).with_failure_threshold(50);
    let found = driver.run(&g, &g, ChaCha8Rng::seed_from_u64(1)).unwrap();

    let mut labelled: Vec<Vec<String>> = found
        .clusters
        .iter()
        .map(|c| c.members.iter().map(|&v| g.label(v)).collect())
        .collect();
    labelled.sort();
    assert_eq!(
        labelled,
        vec![
            vec!["a", "b", "c", "d", "e"],
            vec!["f", "g", "h", "i", "j"],
        ]
    );
    for cluster in &found.clusters {
        assert_eq!(cluster.density, 4.0);
        assert_eq!(cluster.weight_in, 10.0);
        assert_eq!(cluster.weight_out, 1.0);
    }
}

#[test]
fn petgraph_input_works_end_to_end() {
    let mut g: UnGraph<(), f64> = UnGraph::new_undirected();
    let nodes: Vec<NodeIndex> = (0..6).map(|_| g.add_node(())).collect();
    // Heavy triangle 0-1-2, light tail 2-3-4-5
    for &(u, v, w) in &[(0, 1, 3.0), (0, 2, 3.0), (1, 2, 3.0), (2, 3, 0.5), (3, 4, 0.5), (4, 5, 0.5)] {
        g.add_edge(nodes[u], nodes[v], w);
    }

    let cluster = iterative_scan(&g, &g, &MetricKind::AverageDegree, [nodes[0], nodes[1]]).unwrap();
    let expected: BTreeSet<NodeIndex> = nodes[..3].iter().copied().collect();
    assert_eq!(cluster.members, expected);
    assert_eq!(cluster.weight_in, 9.0);
    assert_eq!(cluster.weight_out, 0.5);

    let unit = iterative_scan(&g, &UnitWeight, &WeightProbability, [nodes[0], nodes[1]]).unwrap();
    assert_eq!(unit.density, 1.0);
}

#[test]
fn seeded_driver_keeps_repeats() {
    let g = parse_edge_list(Cursor::new("0 1\n1 2\n2 0\n2 3\n3 4\n4 5\n5 3\n")).unwrap();
    let seeds: Vec<Vec<u32>> = vec![vec![0, 1], vec![0, 1], vec![4, 5], vec![]];
    let clusters = SeededClusteringDriver::new(AverageDegree)
        .run(&g, &UnitWeight, seeds.clone())
        .unwrap();

    assert_eq!(clusters.len(), seeds.len());
    assert_eq!(clusters.get(0).unwrap().members, clusters.get(1).unwrap().members);
    assert!(clusters.get(3).unwrap().is_empty());
}

#[test]
fn discovery_refuses_edgeless_graphs() {
    let mut g: UnGraph<(), f64> = UnGraph::new_undirected();
    g.add_node(());
    g.add_node(());
    let result = ClusteringDriver::new(AverageDegree).run(&g, &g, ChaCha8Rng::seed_from_u64(9));
    assert_eq!(result.err(), Some(ClusterError::NoEdges));
}
