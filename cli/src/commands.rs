use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use graph_rank_core::{
    centrality_report, highest, shortest_path, CentralityReport, Graph, Metric, VertexScore,
};
use serde::Serialize;

use crate::load::load_graph;
use crate::settings::{OutputFormat, Settings};

/// Largest graph whose adjacency matrix `show` prints in full.
const MATRIX_PRINT_LIMIT: usize = 40;

/// Plain-text rendering of a command result.
pub trait TextOutput {
    fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()>;
}

/// Print a command result to stdout in the configured format.
pub fn emit<T: Serialize + TextOutput>(settings: &Settings, value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match settings.format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(value)?)?,
        OutputFormat::Text => value.write_text(&mut out)?,
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct RouteOutput {
    pub from: String,
    pub to: String,
    /// `None` when `to` cannot be reached from `from`.
    pub route: Option<Vec<String>>,
    pub hops: Option<usize>,
}

impl TextOutput for RouteOutput {
    fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Breadth-first search from {} to {}:", self.from, self.to)?;
        match (&self.route, self.hops) {
            (Some(r), Some(hops)) => writeln!(out, "{} ({} hops)", r.join(" -> "), hops),
            _ => writeln!(out, "no path"),
        }
    }
}

pub fn path(settings: &Settings, edges: &Path, from: &str, to: &str) -> Result<RouteOutput> {
    let loaded = load_graph(edges, settings.capacity)?;
    let route = shortest_path(&loaded.graph, from, to)?;

    Ok(RouteOutput {
        from: from.to_string(),
        to: to.to_string(),
        hops: route.as_ref().map(|r| r.len() - 1),
        route,
    })
}

impl TextOutput for CentralityReport {
    fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "Top {} by {} centrality ({} of {} vertices ranked)",
            self.entries.len(),
            self.metric,
            self.ranked,
            self.vertex_count
        )?;
        writeln!(out, "{:>6} {:>16} {:>14}", "rank", "node", "score")?;
        writeln!(out, "{:->6} {:->16} {:->14}", "", "", "")?;
        for v in &self.entries {
            writeln!(out, "{:>6} {:>16} {:>14.6}", v.rank, v.label, v.score)?;
        }
        Ok(())
    }
}

pub fn rank(settings: &Settings, edges: &Path, metric: Metric) -> Result<CentralityReport> {
    let loaded = load_graph(edges, settings.capacity)?;
    Ok(centrality_report(&loaded.graph, metric, settings.top_n))
}

#[derive(Debug, Serialize)]
pub struct SummaryOutput {
    pub source: PathBuf,
    pub vertex_count: usize,
    pub edge_count: usize,
    pub load_time_ms: f64,
    pub betweenness: Option<VertexScore>,
    pub closeness: Option<VertexScore>,
}

impl TextOutput for Vec<SummaryOutput> {
    fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for s in self {
            writeln!(
                out,
                "-- {} ({} vertices, {} edges) --",
                s.source.display(),
                s.vertex_count,
                s.edge_count
            )?;
            for (metric, best) in [
                (Metric::Betweenness, &s.betweenness),
                (Metric::Closeness, &s.closeness),
            ] {
                match best {
                    Some(v) => writeln!(
                        out,
                        "Highest node by {} centrality: {} (score {})",
                        metric, v.label, v.score
                    )?,
                    None => writeln!(out, "No vertex ranked by {} centrality", metric)?,
                }
            }
        }
        Ok(())
    }
}

/// One summary per file, in argument order. The first unreadable file aborts.
pub fn summary(settings: &Settings, files: &[PathBuf]) -> Result<Vec<SummaryOutput>> {
    let mut outputs = Vec::with_capacity(files.len());
    for file in files {
        let loaded = load_graph(file, settings.capacity)?;
        let graph = &loaded.graph;
        outputs.push(SummaryOutput {
            source: loaded.source.clone(),
            vertex_count: graph.vertex_count(),
            edge_count: graph.edge_count(),
            load_time_ms: loaded.load_time_ms,
            betweenness: highest(graph, &Metric::Betweenness.rank(graph)),
            closeness: highest(graph, &Metric::Closeness.rank(graph)),
        });
    }
    Ok(outputs)
}

#[derive(Debug, Serialize)]
pub struct GraphOutput {
    pub vertices: Vec<String>,
    pub edges: Vec<(String, String)>,
    pub edge_count: usize,
    /// Adjacency rows over `vertices`; `None` above `MATRIX_PRINT_LIMIT`.
    #[serde(skip)]
    pub matrix: Option<Vec<Vec<bool>>>,
}

impl TextOutput for GraphOutput {
    fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match &self.matrix {
            Some(rows) => {
                let header: String = self.vertices.iter().map(|v| format!("\t({})", v)).collect();
                writeln!(out, "{}", header)?;
                for (name, row) in self.vertices.iter().zip(rows) {
                    let cells: String = row
                        .iter()
                        .map(|&linked| if linked { "\t1" } else { "\t0" })
                        .collect();
                    writeln!(out, "({}){}", name, cells)?;
                }
            }
            None => writeln!(
                out,
                "({} vertices; adjacency matrix omitted above {})",
                self.vertices.len(),
                MATRIX_PRINT_LIMIT
            )?,
        }
        writeln!(out)?;
        writeln!(out, "Edges")?;
        for (a, b) in &self.edges {
            writeln!(out, "{}-{}", a, b)?;
        }
        writeln!(out, "Total {} edges.", self.edge_count)
    }
}

pub fn show(settings: &Settings, edges: &Path) -> Result<GraphOutput> {
    let loaded = load_graph(edges, settings.capacity)?;
    Ok(graph_output(&loaded.graph))
}

fn graph_output(graph: &Graph) -> GraphOutput {
    let names = graph.vertices();
    let n = names.len();
    let matrix = (n <= MATRIX_PRINT_LIMIT).then(|| {
        (0..n)
            .map(|i| (0..n).map(|j| graph.has_edge(i, j)).collect())
            .collect()
    });
    let edges: Vec<(String, String)> = graph
        .edges()
        .map(|(a, b)| (names[a].clone(), names[b].clone()))
        .collect();

    GraphOutput {
        vertices: names.to_vec(),
        edge_count: edges.len(),
        edges,
        matrix,
    }
}
