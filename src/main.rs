use anyhow::{Context, Result};
use graph_enumeration::{Graph, GeneratorConfig, GraphGenerator};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

type LabeledGraph = Graph<String>;

fn progress_style(template: &str) -> Result<ProgressStyle> {
  Ok(
    ProgressStyle::with_template(template)
      .context("invalid progress bar template")?
      .progress_chars("█▉▊▋▌▍▎▏  "),
  )
}

fn enumerate_graphs(generator: &mut GraphGenerator<String>) -> Result<Vec<LabeledGraph>> {
  let node_lists: Vec<Vec<String>> = generator.node_lists().collect();
  let pb = ProgressBar::new(node_lists.len() as u64);
  pb.set_style(progress_style("[enum ] {pos}/{len} {elapsed_precise} {wide_msg}")?);

  let mut graphs = Vec::new();
  for node_list in node_lists {
    pb.set_message(node_list.join(","));
    let configurations = generator
      .edge_configurations(&node_list)
      .with_context(|| format!("enumerating edges for nodes {:?}", node_list))?;
    for edges in configurations {
      graphs.push(Graph::new(node_list.clone(), edges));
    }
    pb.inc(1);
  }
  pb.finish_with_message("✔ Enumeration complete");

  info!(graphs = graphs.len(), "enumeration complete");
  Ok(graphs)
}

fn save_graphs(path: &Path, graphs: &[LabeledGraph]) -> Result<()> {
  info!(count = graphs.len(), path = %path.display(), "saving graphs");
  let pb = ProgressBar::new(graphs.len() as u64);
  pb.set_style(progress_style("[save ] [{elapsed_precise}] {wide_bar:.green/white} {pos}/{len}")?);

  let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
  let mut writer = BufWriter::new(file);
  // stream the array graph-by-graph so progress tracks the write
  writer.write_all(b"[")?;
  for (i, g) in graphs.iter().enumerate() {
    if i > 0 {
      writer.write_all(b",\n")?;
    }
    serde_json::to_writer(&mut writer, g).with_context(|| format!("writing {}", path.display()))?;
    pb.inc(1);
  }
  writer.write_all(b"]\n")?;
  writer.flush()?;
  pb.finish_with_message("Finished saving graphs");
  Ok(())
}

fn run(config: &GeneratorConfig) -> Result<()> {
  let mut generator = GraphGenerator::from_config(config).context("invalid generator configuration")?;
  let graphs = enumerate_graphs(&mut generator)?;
  save_graphs(&config.output, &graphs)
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .init();

  let config_path = std::env::args()
    .nth(1)
    .context("usage: graph-enumeration <config.json>")?;
  let config = GeneratorConfig::from_path(&config_path)
    .with_context(|| format!("reading configuration from {}", config_path))?;
  info!(path = %config_path, "configuration loaded");

  match config.threads {
    Some(threads) => {
      let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("building the worker pool")?;
      info!(threads, "running on a dedicated worker pool");
      pool.install(|| run(&config))
    }
    None => run(&config),
  }
}
