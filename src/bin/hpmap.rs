use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use house_price_maps::format::{format_price, format_si_price};
use house_price_maps::pipeline::{self, BuiltMap};
use house_price_maps::{AppConfig, MapConfig, Source, load_inputs, storage, viz};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "hpmap",
    version,
    about = "Render England and London house-price choropleth maps"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load prices and boundaries, then write the HTML page (and optional extras).
    Render(RenderArgs),
    /// Print the legend of one map.
    Legend(LegendArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum MapChoice {
    England,
    London,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum SnapshotFormat {
    #[default]
    Svg,
    Png,
}

impl SnapshotFormat {
    fn extension(self) -> &'static str {
        match self {
            SnapshotFormat::Svg => "svg",
            SnapshotFormat::Png => "png",
        }
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// TOML file overriding the built-in map settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Price table (path or http(s) URL, .json or .csv).
    #[arg(long)]
    prices: Option<String>,
    /// England regions GeoJSON (path or URL).
    #[arg(long)]
    england: Option<String>,
    /// London boroughs GeoJSON (path or URL).
    #[arg(long)]
    london: Option<String>,
    /// Output HTML page.
    #[arg(long, default_value = "house-prices.html")]
    out: PathBuf,
    /// Page heading.
    #[arg(long, default_value = "Average house prices")]
    title: String,
    /// Also write a static snapshot of each map into this directory.
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,
    /// Snapshot format (svg or png).
    #[arg(long, value_enum, default_value_t = SnapshotFormat::Svg)]
    snapshot_format: SnapshotFormat,
    /// Export the joined tables; `x.csv` becomes `x-england.csv` and `x-london.csv`.
    #[arg(long)]
    export: Option<PathBuf>,
    /// Print a join report per map to stdout.
    #[arg(long, default_value_t = false)]
    report: bool,
}

#[derive(Args, Debug)]
struct LegendArgs {
    /// Which map's legend to print.
    #[arg(long, value_enum)]
    map: MapChoice,
    /// TOML file overriding the built-in map settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Legend height in pixels (default from config).
    #[arg(long)]
    height: Option<f64>,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => format_price(x),
        _ => "NA".to_string(),
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(p) => AppConfig::load_from_file(p),
        None => Ok(AppConfig::default()),
    }
}

/// `dir/joined.csv` + `london` → `dir/joined-london.csv`.
fn per_map_path(path: &Path, map: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("joined");
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}-{map}.{ext}"),
        None => format!("{stem}-{map}"),
    };
    path.with_file_name(name)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Legend(args) => cmd_legend(args),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(s) = args.prices {
        config.prices.source = Source::from(s);
    }
    if let Some(s) = args.england {
        config.england.geometry = Source::from(s);
    }
    if let Some(s) = args.london {
        config.london.geometry = Source::from(s);
    }

    let inputs = load_inputs(&config);
    let maps = pipeline::build_maps(&config, &inputs);
    viz::write_page(&args.out, &args.title, &maps.panels(&config))?;
    eprintln!("Wrote page to {}", args.out.display());

    let built = [("england", &maps.england), ("london", &maps.london)];
    for (key, map) in built {
        let Ok(map) = map else { continue };
        if let Some(dir) = args.snapshot_dir.as_ref() {
            if map.map.shapes.is_empty() {
                log::warn!("{}: no regions loaded, skipping snapshot", map.title);
            } else {
                std::fs::create_dir_all(dir)?;
                let path = dir.join(format!("{key}.{}", args.snapshot_format.extension()));
                viz::render_snapshot(&map.map, &map.legend, &path, map.width, map.height)?;
                eprintln!("Wrote snapshot to {}", path.display());
            }
        }
        if let Some(export) = args.export.as_ref() {
            let path = per_map_path(export, key);
            let rows = map.map.joined_rows();
            storage::save_rows(&rows, &path)?;
            eprintln!("Saved {} rows to {}", rows.len(), path.display());
        }
        if args.report {
            print_report(map);
        }
    }

    if maps.any_failed() {
        bail!(
            "one or more maps failed to load; see the error panels in {}",
            args.out.display()
        );
    }
    Ok(())
}

fn print_report(map: &BuiltMap) {
    let r = &map.report;
    println!(
        "{}  regions={} matched={}  min={} max={} mean={} median={}",
        map.title,
        r.regions,
        r.matched,
        fmt_opt(r.min),
        fmt_opt(r.max),
        fmt_opt(r.mean),
        fmt_opt(r.median)
    );
    if !r.unmatched_regions.is_empty() {
        println!("  no price: {}", r.unmatched_regions.join(", "));
    }
    if !r.unused_prices.is_empty() {
        println!("  unused prices: {}", r.unused_prices.join(", "));
    }
}

fn cmd_legend(args: LegendArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let map: &MapConfig = match args.map {
        MapChoice::England => &config.england,
        MapChoice::London => &config.london,
    };
    let scale = map.scale()?;
    let legend = viz::build_legend(&scale, &map.domain, args.height.unwrap_or(map.legend_height));
    println!("{} ({})", map.title, map.year);
    for e in &legend.entries {
        println!(
            "{}  {} to {}  y={:.1} h={:.1}",
            e.color,
            format_si_price(e.lower),
            format_si_price(e.upper),
            e.y,
            e.height
        );
    }
    let labels: Vec<&str> = legend.ticks.iter().map(|t| t.label.as_str()).collect();
    println!("ticks: {}", labels.join(" "));
    Ok(())
}
