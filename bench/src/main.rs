use graph_rank_core::{Graph, GraphError, Metric, RankedScores, MAX_CAPACITY};
use std::time::Instant;

type Generator = fn(usize) -> Result<Graph, GraphError>;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: graph-rank-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  tree        Ternary branching tree (deep paths, no cycles)");
        println!("  smallworld  Watts-Strogatz ring lattice + shortcuts");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  barbell     Two dense clusters connected by a thin bridge");
        println!();
        println!("Default node_count: 1000 (the adjacency matrix is node_count²)");
        return;
    }

    if !(16..=MAX_CAPACITY).contains(&node_count) {
        eprintln!(
            "node_count must be between 16 and {}, got {}",
            MAX_CAPACITY, node_count
        );
        return;
    }

    println!("graph-rank-bench");
    println!("================");
    println!();

    let generators: Vec<(&str, Generator)> = match mode {
        "tree" => vec![("Ternary tree", gen_tree)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "barbell" => vec![("Barbell (cluster-bridge-cluster)", gen_barbell)],
        "all" => vec![
            ("Ternary tree", gen_tree as Generator),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (cluster-bridge-cluster)", gen_barbell),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        if let Err(e) = run_benchmark(name, generator, node_count) {
            eprintln!("{}: {}", name, e);
        }
    }
}

fn run_benchmark(name: &str, generator: Generator, node_count: usize) -> Result<(), GraphError> {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let graph = generator(node_count)?;
    let gen_time = t.elapsed();
    println!(
        "Generated in {:.2}s: {} nodes, {} edges, ~{:.1}MB",
        gen_time.as_secs_f64(),
        graph.vertex_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    // Route: first node to last node
    let far_node = graph.vertex_count() - 1;
    let t = Instant::now();
    let route = graph_rank_core::shortest_path_indices(&graph, 0, far_node);
    let elapsed = t.elapsed();
    match route {
        Some(r) => println!(
            "Shortest path 0 → {}: {} hops in {:.2}ms",
            far_node,
            r.len() - 1,
            elapsed.as_secs_f64() * 1000.0
        ),
        None => println!(
            "Shortest path 0 → {}: no path ({:.2}ms)",
            far_node,
            elapsed.as_secs_f64() * 1000.0
        ),
    }

    println!();
    println!("{:>12} {:>10} {:>14} {:>12} {:>10}", "metric", "ranked", "top node", "score", "time");
    println!("{:->12} {:->10} {:->14} {:->12} {:->10}", "", "", "", "", "");

    for metric in Metric::ALL {
        let t = Instant::now();
        let table: RankedScores = metric.rank(&graph);
        let elapsed = t.elapsed();
        let (label, score) = table
            .highest()
            .map(|e| (graph.label(e.index).unwrap_or("?"), e.score))
            .unwrap_or(("-", 0.0));
        println!(
            "{:>12} {:>10} {:>14} {:>12.6} {:>8.1}ms",
            metric.name(),
            table.len(),
            label,
            score,
            elapsed.as_secs_f64() * 1000.0
        );
    }
    println!();
    Ok(())
}

// ---------------------------------------------------------------------------
// Generators: deterministic, single-threaded, labels "c_<n>"
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.0 >> 33) % max as u64) as usize
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn link(graph: &mut Graph, a: usize, b: usize) -> Result<(), GraphError> {
    graph.add_edge(&format!("c_{}", a), &format!("c_{}", b))
}

/// Ternary tree: every node gets 3 children, breadth-first.
///
/// Deep unique paths and a single root with high closeness.
fn gen_tree(node_count: usize) -> Result<Graph, GraphError> {
    let mut graph = Graph::new(node_count)?;
    for child in 1..node_count {
        link(&mut graph, (child - 1) / 3, child)?;
    }
    Ok(graph)
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
///
/// Each node links to its K nearest ring neighbors; each link is rewired
/// with probability p. High clustering with short path lengths.
fn gen_small_world(node_count: usize) -> Result<Graph, GraphError> {
    let k = 4usize;
    let p = 0.05f64;
    let mut graph = Graph::new(node_count)?;
    let mut rng = FastRng::new(67890);

    // register nodes in ring order so index == ring position
    for i in 0..node_count {
        link(&mut graph, i, (i + 1) % node_count)?;
    }

    for i in 0..node_count {
        for j in 2..=k {
            let neighbor = (i + j) % node_count;
            if rng.next_f64() < p {
                let rewired = rng.next(node_count);
                link(&mut graph, i, if rewired != i { rewired } else { neighbor })?;
            } else {
                link(&mut graph, i, neighbor)?;
            }
        }
    }

    Ok(graph)
}

/// Erdos-Renyi: uniform random edges, ~4 per node on average.
///
/// A spanning chain is laid first so every node is registered.
fn gen_random(node_count: usize) -> Result<Graph, GraphError> {
    let mut graph = Graph::new(node_count)?;
    let mut rng = FastRng::new(54321);

    for i in 1..node_count {
        link(&mut graph, i - 1, i)?;
    }
    for _ in 0..node_count * 3 {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        if from != to {
            link(&mut graph, from, to)?;
        }
    }

    Ok(graph)
}

/// Barbell: two dense clusters joined by a chain of bridge nodes.
///
/// Bridge nodes carry every cross-cluster route and should dominate
/// betweenness while the clusters dominate nothing.
fn gen_barbell(node_count: usize) -> Result<Graph, GraphError> {
    let bridge_len = 10usize;
    let cluster = (node_count - bridge_len) / 2;
    let mut graph = Graph::new(node_count)?;
    let mut rng = FastRng::new(99999);

    let mut dense = |graph: &mut Graph, base: usize| -> Result<(), GraphError> {
        for i in 1..cluster {
            link(graph, base + i - 1, base + i)?;
        }
        for i in 0..cluster {
            for _ in 0..8usize.min(cluster - 1) {
                let target = rng.next(cluster);
                if target != i {
                    link(graph, base + i, base + target)?;
                }
            }
        }
        Ok(())
    };

    dense(&mut graph, 0)?;
    // bridge: last node of A → chain → first node of B
    for i in 0..bridge_len {
        link(&mut graph, cluster + i - 1, cluster + i)?;
    }
    let b_start = cluster + bridge_len;
    link(&mut graph, b_start - 1, b_start)?;
    dense(&mut graph, b_start)?;

    Ok(graph)
}
