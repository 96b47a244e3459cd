use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;
use treemap_chart::{ChartConfig, ChartScene, document_svg};

/// Render a treemap dataset to a standalone SVG or PNG.
#[derive(Parser, Debug)]
#[command(name = "treemap-export", version, about)]
struct Cli {
    /// Hierarchical dataset (JSON).
    input: PathBuf,
    /// Output file; the extension picks the format (.svg or .png).
    output: PathBuf,
    /// Chart configuration overrides (JSON).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Title drawn above the chart.
    #[arg(long)]
    title: Option<String>,
    /// Pixel scale for PNG output.
    #[arg(long, default_value_t = 1.0)]
    scale: f32,
    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    fn from_path(path: &Path) -> Result<OutputFormat> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("svg") => Ok(OutputFormat::Svg),
            Some("png") => Ok(OutputFormat::Png),
            _ => bail!("unsupported output {}: expected .svg or .png", path.display()),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);
    tracing_subscriber::registry().with(fmt_layer).init();
}

fn run(cli: &Cli) -> Result<()> {
    let format = OutputFormat::from_path(&cli.output)?;
    let config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            ChartConfig::from_json(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ChartConfig::default(),
    };
    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let scene = ChartScene::from_json(&text, &config)
        .with_context(|| format!("building treemap from {}", cli.input.display()))?;
    info!(
        tiles = scene.tiles.len(),
        categories = scene.categories.len(),
        "laid out {}",
        scene.title
    );

    let (svg, w_px, h_px) = document_svg(&scene, cli.title.as_deref());
    match format {
        OutputFormat::Svg => fs::write(&cli.output, svg)
            .with_context(|| format!("writing {}", cli.output.display()))?,
        OutputFormat::Png => {
            let pixmap = rasterize(&svg, w_px, h_px, cli.scale)?;
            let file = fs::File::create(&cli.output)
                .with_context(|| format!("creating {}", cli.output.display()))?;
            encode_png_deterministic(&pixmap, file)?;
        }
    }
    info!("wrote {}", cli.output.display());
    Ok(())
}

/// Rasterize document markup at `scale` pixels per unit, using system fonts.
fn rasterize(svg: &str, w_px: u32, h_px: u32, scale: f32) -> Result<tiny_skia::Pixmap> {
    if !scale.is_finite() || scale <= 0.0 {
        bail!("scale must be a positive number, got {scale}");
    }
    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_system_fonts();
    debug!(faces = fontdb.len(), "loaded system fonts");
    let opt = usvg::Options {
        fontdb: Arc::new(fontdb),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(svg, &opt).map_err(|e| anyhow!("SVG parse error: {e:?}"))?;

    let w = (w_px as f32 * scale).ceil() as u32;
    let h = (h_px as f32 * scale).ceil() as u32;
    let mut pixmap = tiny_skia::Pixmap::new(w, h)
        .ok_or_else(|| anyhow!("cannot allocate a {w}x{h} pixmap"))?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

// Fixed filter and compression so identical input gives identical bytes.
fn encode_png_deterministic<W: Write>(pixmap: &tiny_skia::Pixmap, out: W) -> Result<()> {
    let mut enc = Encoder::new(out, pixmap.width(), pixmap.height());
    enc.set_color(ColorType::Rgba);
    enc.set_depth(BitDepth::Eight);
    enc.set_filter(FilterType::NoFilter);
    enc.set_compression(Compression::Default);
    let mut writer = enc.write_header()?;
    writer.write_image_data(pixmap.data())?;
    writer.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use treemap_core::{Hierarchy, RawNode};

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn output_format_from_extension() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out.svg")).unwrap(),
            OutputFormat::Svg
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("OUT.PNG")).unwrap(),
            OutputFormat::Png
        );
        assert!(OutputFormat::from_path(Path::new("out.pdf")).is_err());
        assert!(OutputFormat::from_path(Path::new("out")).is_err());
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::parse_from([
            "treemap-export",
            "games.json",
            "games.png",
            "--title",
            "Video Game Sales",
            "--scale",
            "2",
            "-vv",
        ]);
        assert_eq!(cli.title.as_deref(), Some("Video Game Sales"));
        assert_eq!(cli.scale, 2.0);
        assert_eq!(cli.verbose, 2);
        assert!(cli.config.is_none());
    }

    fn small_document() -> (String, u32, u32) {
        let h = Hierarchy::build(&RawNode::group(
            "Sales",
            vec![RawNode::leaf("a", "X", 2.0), RawNode::leaf("b", "Y", 1.0)],
        ))
        .unwrap();
        let scene = ChartScene::build(&h, &ChartConfig::default());
        document_svg(&scene, None)
    }

    #[test]
    fn png_is_scaled_and_deterministic() {
        let (svg, w, h) = small_document();
        let pixmap = rasterize(&svg, w, h, 0.5).unwrap();
        assert_eq!(pixmap.width(), w.div_ceil(2));
        assert_eq!(pixmap.height(), h.div_ceil(2));

        let mut first = Vec::new();
        let mut second = Vec::new();
        encode_png_deterministic(&pixmap, &mut first).unwrap();
        encode_png_deterministic(&pixmap, &mut second).unwrap();
        assert_eq!(&first[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_bad_scale() {
        let (svg, w, h) = small_document();
        assert!(rasterize(&svg, w, h, 0.0).is_err());
        assert!(rasterize(&svg, w, h, f32::NAN).is_err());
    }
}
