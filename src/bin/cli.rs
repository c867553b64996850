//! page-catalog CLI
//!
//! Scans an HTML file (or stdin) and writes the element catalog as namespaced XML.

use anyhow::Context;
use clap::Parser;
use page_catalog::{CatalogConfig, CatalogWriter, PageScanner};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "page-catalog")]
#[command(version)]
#[command(about = "Catalogue every element of an HTML page for test automation", long_about = None)]
struct Cli {
    /// HTML file to scan; reads stdin when omitted
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Directory to write the catalog into
    #[arg(long, short = 'o', value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Output file name (".xml" is added when missing)
    #[arg(long, short = 'n', default_value = "page-catalog")]
    name: String,

    /// Namespace URI of the root element
    #[arg(long, default_value = "http://example.org/page-catalog")]
    namespace: String,

    /// Label stored on the root element
    #[arg(long, short = 'l', default_value = "main")]
    label: String,

    /// Only keep these tags (comma separated)
    #[arg(long, short = 't', value_delimiter = ',')]
    tags: Vec<String>,

    /// Leave out script, style and noscript elements
    #[arg(long)]
    skip_scripts: bool,

    /// JSON file with "scan" and "writer" options
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the catalog as JSON to stdout as well
    #[arg(long)]
    json: bool,

    /// Print one line per entry with the locator to use for it
    #[arg(long)]
    list: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => CatalogConfig::from_file(path).with_context(|| format!("Failed to load {}", path.display()))?,
        None => CatalogConfig::default(),
    };
    if cli.skip_scripts {
        config.scan = config.scan.without_scripts();
    }

    let html = match &cli.input {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
            buf
        }
    };

    let scanner = PageScanner::new(config.scan);
    let mut catalog = scanner.scan_page(&html).context("Failed to scan page")?;
    if !cli.tags.is_empty() {
        catalog = catalog.filter_by_tags(&cli.tags);
    }
    log::info!("Catalogued {} elements", catalog.len());

    if cli.json {
        println!("{}", catalog.to_json()?);
    }
    if cli.list {
        for entry in &catalog {
            println!("{:<32} {}  {}", entry.object_name(), entry.best_locator(), entry.to_simple_string());
        }
    }

    let mut writer = CatalogWriter::new(config.writer);
    writer.create_document(&catalog, &cli.namespace, &cli.label)?;
    let path = writer
        .output_document(&cli.out_dir, &cli.name)
        .with_context(|| format!("Failed to write catalog to {}", cli.out_dir.display()))?;

    eprintln!("Wrote {} entries to {}", catalog.len(), path.display());
    Ok(())
}
