//! 随机图上的最小生成树与最短路径性质测试

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use routegraph::{Graph, MstAlgorithm, PathFinder, UnionFind, Weight};

/// 生成随机无向图，边权可能重复，包含自环与平行边
fn random_graph(rng: &mut StdRng, vertices: u32, edges: usize, max_weight: Weight) -> Graph<u32> {
    let mut graph = Graph::undirected();
    for v in 0..vertices {
        graph.add_vertex(v);
    }
    for _ in 0..edges {
        let u = rng.gen_range(0..vertices);
        let v = rng.gen_range(0..vertices);
        graph.add_edge(u, v, rng.gen_range(0..=max_weight));
    }
    graph
}

/// 连通分量数
fn component_count(graph: &Graph<u32>) -> usize {
    let mut components = UnionFind::new(graph.vertex_count());
    for (u, neighbors) in graph.adjacency() {
        for (v, _) in neighbors.iter() {
            components.union(*u as usize, *v as usize);
        }
    }
    components.component_count()
}

/// 保证图连通：依次连接相邻编号的顶点
fn connect(graph: &mut Graph<u32>, rng: &mut StdRng, max_weight: Weight) {
    let n = graph.vertex_count() as u32;
    for v in 1..n {
        graph.add_edge(v - 1, v, rng.gen_range(0..=max_weight));
    }
}

#[test]
fn test_mst_weight_invariance_on_connected_graphs() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..50 {
        let n = rng.gen_range(2..30);
        let m = rng.gen_range(0..(n as usize * 3));
        let mut graph = random_graph(&mut rng, n, m, 5);
        connect(&mut graph, &mut rng, 5);

        let prim = graph.mst_prim(false);
        let kruskal = graph.mst_kruskal(false);
        let boruvka = graph.mst_boruvka(false);

        assert_eq!(prim.total_weight, kruskal.total_weight);
        assert_eq!(kruskal.total_weight, boruvka.total_weight);
        for tree in [&prim, &kruskal, &boruvka] {
            assert_eq!(tree.len(), n as usize - 1);
            assert!(tree.edges.iter().all(|(u, v)| u != v));
        }
    }
}

#[test]
fn test_spanning_forest_size_on_disconnected_graphs() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..50 {
        let n = rng.gen_range(1..25);
        let m = rng.gen_range(0..(n as usize));
        let graph = random_graph(&mut rng, n, m, 9);
        let components = component_count(&graph);

        let kruskal = graph.mst_kruskal(false);
        let boruvka = graph.mst_boruvka(false);

        assert_eq!(kruskal.len(), n as usize - components);
        assert_eq!(boruvka.len(), n as usize - components);
        assert_eq!(kruskal.total_weight, boruvka.total_weight);
    }
}

#[test]
fn test_self_loops_never_change_mst() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut graph = random_graph(&mut rng, 12, 30, 20);
    connect(&mut graph, &mut rng, 20);

    let before: Vec<Weight> = MstAlgorithm::ALL
        .iter()
        .map(|&a| graph.mst(a, false).total_weight)
        .collect();

    for v in 0..12 {
        graph.add_edge(v, v, 0);
    }

    for (i, &algorithm) in MstAlgorithm::ALL.iter().enumerate() {
        let tree = graph.mst(algorithm, false);
        assert_eq!(tree.total_weight, before[i]);
        assert!(tree.edges.iter().all(|(u, v)| u != v));
    }
}

#[test]
fn test_shortest_path_is_consistent_with_distances() {
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..20 {
        let mut graph = Graph::directed();
        let n = rng.gen_range(2..20u32);
        for v in 0..n {
            graph.add_vertex(v);
        }
        for _ in 0..(n * 3) {
            let u = rng.gen_range(0..n);
            let v = rng.gen_range(0..n);
            graph.add_edge(u, v, rng.gen_range(0..10));
        }

        let finder = PathFinder::new(&graph);
        let distances = finder.distances_from(&0).unwrap();

        for target in 0..n {
            let path = finder.shortest_path(&0, &target).unwrap();
            match distances.get(&target) {
                Some(&d) => {
                    assert_eq!(path.distance, d);
                    assert_eq!(path.vertices.first(), Some(&0));
                    assert_eq!(path.vertices.last(), Some(&target));

                    // 路径上每一步都是真实存在的边，且权重之和等于距离
                    let total: Weight = path
                        .vertices
                        .windows(2)
                        .map(|step| {
                            graph.neighbors(&step[0]).unwrap()
                                .iter()
                                .filter(|(to, _)| *to == step[1])
                                .map(|(_, w)| *w)
                                .min()
                                .unwrap()
                        })
                        .sum();
                    assert_eq!(total, d);
                }
                None => {
                    assert!(!path.is_reachable());
                    assert!(path.vertices.is_empty());
                }
            }
        }
    }
}
