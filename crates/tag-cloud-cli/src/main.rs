use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tag_cloud_core::render::CloudDrawer;
use tag_cloud_core::{
    CircularCloudLayouter, CloudConfig, Size, SpiralGenerator, layout_cloud_with, to_json,
};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "tag-cloud",
    about = "Lay out rectangles in a circular tag cloud",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --no-progress or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lay out rectangles and render the cloud to a PNG
    Render(RenderArgs),
    /// Layout-only export (no PNG): write placements as JSON
    Layout(LayoutArgs),
    /// Simple timing bench (random sizes, prints time + density)
    Bench(BenchArgs),
}

#[derive(Args, Debug, Clone)]
struct SizeSource {
    /// Rectangle size as WxH (repeatable, placed in the given order)
    #[arg(short, long = "size", help_heading = "Sizes")]
    sizes: Vec<String>,
    /// File with one WxH per line ('#' starts a comment)
    #[arg(short, long, help_heading = "Sizes")]
    input: Option<PathBuf>,
    /// Generate this many random sizes
    #[arg(long, help_heading = "Sizes")]
    random: Option<usize>,
    /// Smallest random side
    #[arg(long, default_value_t = 10, help_heading = "Sizes")]
    min_side: u32,
    /// Largest random side
    #[arg(long, default_value_t = 60, help_heading = "Sizes")]
    max_side: u32,
    /// Seed for random sizes
    #[arg(long, help_heading = "Sizes")]
    seed: Option<u64>,
}

#[derive(Args, Debug, Clone)]
struct CloudArgs {
    /// YAML config file path (overrides layout options)
    #[arg(long, help_heading = "Layout")]
    config: Option<PathBuf>,
    /// Cloud center x
    #[arg(long, default_value_t = 0, allow_negative_numbers = true, help_heading = "Layout")]
    center_x: i32,
    /// Cloud center y
    #[arg(long, default_value_t = 0, allow_negative_numbers = true, help_heading = "Layout")]
    center_y: i32,
    /// Spiral step (radians per candidate)
    #[arg(long, default_value_t = 0.1, help_heading = "Layout")]
    step: f64,
    /// Give up on a rectangle after this many candidates
    #[arg(long, help_heading = "Limits")]
    max_attempts: Option<u64>,
    /// Give up on a rectangle once candidates pass this radius
    #[arg(long, help_heading = "Limits")]
    max_radius: Option<f64>,
}

#[derive(Parser, Debug, Clone)]
struct RenderArgs {
    /// Output PNG path
    #[arg(help_heading = "Output")]
    out: PathBuf,
    #[command(flatten)]
    sizes: SizeSource,
    #[command(flatten)]
    cloud: CloudArgs,
    /// Pixels around the cloud
    #[arg(long, default_value_t = 64, help_heading = "Rendering")]
    margin: u32,
    /// Draw rectangle outlines
    #[arg(long, default_value_t = true, action=ArgAction::Set, help_heading = "Rendering")]
    outlines: bool,
    /// Seed for fill colors (random when omitted)
    #[arg(long, help_heading = "Rendering")]
    color_seed: Option<u64>,
    /// Also write layout JSON to this file
    #[arg(long, help_heading = "Output")]
    json: Option<PathBuf>,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Output")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Output")]
    print_config_format: String,
}

#[derive(Parser, Debug, Clone)]
struct LayoutArgs {
    #[command(flatten)]
    sizes: SizeSource,
    #[command(flatten)]
    cloud: CloudArgs,
    /// Output JSON path (stdout when omitted)
    #[arg(short, long, help_heading = "Output")]
    out: Option<PathBuf>,
    /// Pretty-print JSON
    #[arg(long, default_value_t = false, help_heading = "Output")]
    pretty: bool,
}

#[derive(Parser, Debug, Clone)]
struct BenchArgs {
    /// Number of rectangles
    #[arg(long, default_value_t = 200)]
    count: usize,
    /// Smallest side
    #[arg(long, default_value_t = 8)]
    min_side: u32,
    /// Largest side
    #[arg(long, default_value_t = 48)]
    max_side: u32,
    /// Spiral step
    #[arg(long, default_value_t = 0.1)]
    step: f64,
    /// Seed for sizes
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    let progress = cli.progress && !cli.quiet;
    match &cli.command {
        Commands::Render(args) => run_render(args, progress),
        Commands::Layout(args) => run_layout(args),
        Commands::Bench(b) => run_bench(b),
    }
}

fn run_render(args: &RenderArgs, show_progress: bool) -> anyhow::Result<()> {
    let mut cfg = build_config(&args.cloud);
    cfg.margin = args.margin;
    cfg.outlines = args.outlines;
    if let Some(path) = &args.cloud.config {
        // config file keys override CLI values
        cfg = load_yaml(path)?.into_cloud_config(cfg);
    }
    cfg.validate()?;

    if args.print_config {
        match args.print_config_format.as_str() {
            "yaml" => println!("{}", serde_yaml::to_string(&cfg)?),
            _ => println!("{}", serde_json::to_string_pretty(&cfg)?),
        }
        return Ok(());
    }

    let sizes = gather_sizes(&args.sizes)?;
    info!(count = sizes.len(), "loaded sizes");
    let layouter = place_with_progress(&sizes, &cfg, show_progress)?;
    let stats = layouter.stats();
    info!("{}", stats.summary());

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output dir {}", parent.display()))?;
    }
    let drawer = CloudDrawer::with_rng(layouter.rectangles(), color_rng(args.color_seed));
    drawer
        .with_config(&cfg)
        .draw_to_file(&args.out)
        .with_context(|| format!("write {}", args.out.display()))?;

    if let Some(json_path) = &args.json {
        let v = to_json(layouter.center(), layouter.rectangles());
        fs::write(json_path, serde_json::to_string_pretty(&v)?)
            .with_context(|| format!("write {}", json_path.display()))?;
        info!(path = %json_path.display(), "layout json written");
    }
    Ok(())
}

fn run_layout(args: &LayoutArgs) -> anyhow::Result<()> {
    let mut cfg = build_config(&args.cloud);
    if let Some(path) = &args.cloud.config {
        cfg = load_yaml(path)?.into_cloud_config(cfg);
    }
    cfg.validate()?;
    let sizes = gather_sizes(&args.sizes)?;
    let layouter = place_with_progress(&sizes, &cfg, false)?;
    let v = to_json(layouter.center(), layouter.rectangles());
    let text = if args.pretty {
        serde_json::to_string_pretty(&v)?
    } else {
        serde_json::to_string(&v)?
    };
    match &args.out {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), count = layouter.len(), "layout json written");
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn run_bench(b: &BenchArgs) -> anyhow::Result<()> {
    let source = SizeSource {
        sizes: Vec::new(),
        input: None,
        random: Some(b.count),
        min_side: b.min_side,
        max_side: b.max_side,
        seed: Some(b.seed),
    };
    let sizes = gather_sizes(&source)?;
    let cfg = CloudConfig {
        step: b.step,
        ..Default::default()
    };
    let start = Instant::now();
    let layouter = place_with_progress(&sizes, &cfg, false)?;
    let dur = start.elapsed();
    let stats = layouter.stats();
    println!(
        "rects={} density={:.2}% max_radius={:.1} time={}",
        stats.count,
        stats.density * 100.0,
        stats.max_center_distance,
        fmt_dur(dur)
    );
    Ok(())
}

fn build_config(a: &CloudArgs) -> CloudConfig {
    CloudConfig {
        center_x: a.center_x,
        center_y: a.center_y,
        step: a.step,
        max_attempts: a.max_attempts,
        max_radius: a.max_radius,
        ..Default::default()
    }
}

fn place_with_progress(
    sizes: &[Size],
    cfg: &CloudConfig,
    progress: bool,
) -> anyhow::Result<CircularCloudLayouter<SpiralGenerator>> {
    use indicatif::{ProgressBar, ProgressStyle};
    if sizes.is_empty() {
        warn!("no sizes given; the cloud will be empty");
    }
    let bar = if progress {
        let b = ProgressBar::new(sizes.len() as u64);
        b.set_style(
            ProgressStyle::with_template("{spinner} placing [{bar:40}] {pos}/{len} ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(b)
    } else {
        None
    };
    let mut placed = 0usize;
    let result = layout_cloud_with(sizes.iter().copied(), cfg, |_, _| {
        placed += 1;
        if let Some(b) = &bar {
            b.inc(1);
        }
    });
    if let Some(b) = bar {
        b.finish_and_clear();
    }
    result.with_context(|| match sizes.get(placed) {
        Some(s) => format!("place rectangle #{placed} ({s})"),
        None => "lay out cloud".to_string(),
    })
}

fn gather_sizes(src: &SizeSource) -> anyhow::Result<Vec<Size>> {
    let mut out = Vec::new();
    for s in &src.sizes {
        out.push(s.parse::<Size>().with_context(|| format!("--size {s}"))?);
    }
    if let Some(path) = &src.input {
        out.extend(read_sizes_file(path)?);
    }
    if let Some(n) = src.random {
        anyhow::ensure!(
            src.min_side <= src.max_side,
            "--min-side ({}) must not exceed --max-side ({})",
            src.min_side,
            src.max_side
        );
        let mut rng = match src.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        out.extend((0..n).map(|_| {
            Size::new(
                rng.gen_range(src.min_side..=src.max_side),
                rng.gen_range(src.min_side..=src.max_side),
            )
        }));
    }
    Ok(out)
}

fn read_sizes_file(path: &Path) -> anyhow::Result<Vec<Size>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read sizes {}", path.display()))?;
    let mut out = Vec::new();
    for (no, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let size = line
            .parse::<Size>()
            .with_context(|| format!("{}:{}", path.display(), no + 1))?;
        out.push(size);
    }
    Ok(out)
}

fn color_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

fn load_yaml(path: &Path) -> anyhow::Result<YamlConfig> {
    let file = fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let y: YamlConfig =
        serde_yaml::from_str(&file).with_context(|| format!("parse config {}", path.display()))?;
    Ok(y)
}

fn fmt_dur(d: Duration) -> String {
    let ms = d.as_secs_f64() * 1000.0;
    if ms < 1000.0 {
        format!("{ms:.2}ms")
    } else {
        format!("{:.3}s", d.as_secs_f64())
    }
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Debug, Deserialize)]
struct YamlConfig {
    center_x: Option<i32>,
    center_y: Option<i32>,
    step: Option<f64>,
    max_attempts: Option<u64>,
    max_radius: Option<f64>,
    margin: Option<u32>,
    empty_canvas_size: Option<u32>,
    outlines: Option<bool>,
    background: Option<[u8; 4]>,
    outline_color: Option<[u8; 4]>,
}

impl YamlConfig {
    fn into_cloud_config(self, mut cfg: CloudConfig) -> CloudConfig {
        if let Some(v) = self.center_x {
            cfg.center_x = v;
        }
        if let Some(v) = self.center_y {
            cfg.center_y = v;
        }
        if let Some(v) = self.step {
            cfg.step = v;
        }
        if let Some(v) = self.max_attempts {
            cfg.max_attempts = Some(v);
        }
        if let Some(v) = self.max_radius {
            cfg.max_radius = Some(v);
        }
        if let Some(v) = self.margin {
            cfg.margin = v;
        }
        if let Some(v) = self.empty_canvas_size {
            cfg.empty_canvas_size = v;
        }
        if let Some(v) = self.outlines {
            cfg.outlines = v;
        }
        if let Some(v) = self.background {
            cfg.background = v;
        }
        if let Some(v) = self.outline_color {
            cfg.outline_color = v;
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_overrides_only_given_keys() {
        let y: YamlConfig = serde_yaml::from_str("step: 0.25\nmargin: 8\nmax_radius: 300.0\n").unwrap();
        let cfg = y.into_cloud_config(CloudConfig {
            center_x: 7,
            ..Default::default()
        });
        assert_eq!(cfg.step, 0.25);
        assert_eq!(cfg.margin, 8);
        assert_eq!(cfg.max_radius, Some(300.0));
        assert_eq!(cfg.center_x, 7);
        assert!(cfg.outlines);
    }

    #[test]
    fn random_sizes_respect_bounds_and_seed() {
        let src = SizeSource {
            sizes: vec!["5x6".into()],
            input: None,
            random: Some(20),
            min_side: 3,
            max_side: 9,
            seed: Some(11),
        };
        let a = gather_sizes(&src).unwrap();
        let b = gather_sizes(&src).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 21);
        assert_eq!(a[0], Size::new(5, 6));
        assert!(a[1..].iter().all(|s| (3..=9).contains(&s.width) && (3..=9).contains(&s.height)));
    }

    #[test]
    fn bad_size_argument_is_reported() {
        let src = SizeSource {
            sizes: vec!["oops".into()],
            input: None,
            random: None,
            min_side: 1,
            max_side: 1,
            seed: None,
        };
        assert!(gather_sizes(&src).is_err());
    }

    #[test]
    fn failed_placement_names_the_rectangle() {
        let cfg = CloudConfig {
            max_radius: Some(3.0),
            ..Default::default()
        };
        let sizes = [Size::new(10, 10), Size::new(4, 2)];
        let err = place_with_progress(&sizes, &cfg, false).unwrap_err();
        assert_eq!(err.to_string(), "place rectangle #1 (4x2)");
        let ok = place_with_progress(&sizes[..1], &cfg, false).unwrap();
        assert_eq!(ok.len(), 1);
    }

    #[test]
    fn cli_parses_render_command() {
        let cli = Cli::try_parse_from([
            "tag-cloud", "render", "out.png", "-s", "50x30", "-s", "40x40", "--step", "0.2",
            "--center-x", "-5",
        ])
        .unwrap();
        match cli.command {
            Commands::Render(a) => {
                assert_eq!(a.sizes.sizes, vec!["50x30", "40x40"]);
                assert_eq!(a.cloud.step, 0.2);
                assert_eq!(a.cloud.center_x, -5);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
