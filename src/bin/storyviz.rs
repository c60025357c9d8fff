use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use storyviz::data::source::{read_boundaries, read_table};
use storyviz::{FlowMap, LineChart, RasterOpts, Scene, TimeMs, VizConfig};

#[derive(Parser, Debug)]
#[command(name = "storyviz", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the time-series line chart.
    Line(LineArgs),
    /// Render the flow map for one year.
    Flow(FlowArgs),
    /// Run the flow-map playback loop and write one SVG per tick.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct LineArgs {
    /// Indicator CSV (year and value columns).
    #[arg(long)]
    csv: PathBuf,

    /// Output path; `.png` rasterizes, anything else writes SVG.
    #[arg(long)]
    out: PathBuf,

    /// JSON configuration overriding the defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Milliseconds after load to capture; defaults to the end of the draw-in.
    #[arg(long)]
    at_ms: Option<u64>,
}

#[derive(Parser, Debug)]
struct FlowArgs {
    /// Flow CSV.
    #[arg(long)]
    csv: PathBuf,

    /// GeoJSON feature collection of country boundaries.
    #[arg(long)]
    geojson: PathBuf,

    /// Output path; `.png` rasterizes, anything else writes SVG.
    #[arg(long)]
    out: PathBuf,

    /// Year to show; defaults to the first year in the data.
    #[arg(long)]
    year: Option<i32>,

    /// JSON configuration overriding the defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Flow CSV.
    #[arg(long)]
    csv: PathBuf,

    /// GeoJSON feature collection of country boundaries.
    #[arg(long)]
    geojson: PathBuf,

    /// Directory receiving `frame_NNN_YYYY.svg` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Number of frames to write.
    #[arg(long, default_value_t = 10)]
    frames: u32,

    /// JSON configuration overriding the defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Line(args) => cmd_line(args),
        Command::Flow(args) => cmd_flow(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<VizConfig> {
    match path {
        Some(p) => VizConfig::from_path(p).with_context(|| format!("load config '{}'", p.display())),
        None => Ok(VizConfig::default()),
    }
}

fn write_scene(scene: &Scene, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let is_png = out
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));
    if is_png {
        let frame = storyviz::rasterize(scene, &RasterOpts::default())?;
        frame
            .save_png(out)
            .with_context(|| format!("write png '{}'", out.display()))?;
    } else {
        std::fs::write(out, scene.to_svg())
            .with_context(|| format!("write svg '{}'", out.display()))?;
    }
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_line(args: LineArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?.line_chart;
    let settle_ms = cfg.draw_in_ms + cfg.point_fade_ms;

    let mut chart = LineChart::mount(cfg, TimeMs(0))?;
    chart.on_table(TimeMs(0), read_table(&args.csv));
    anyhow::ensure!(
        chart.status().is_ready(),
        "line chart not ready: {:?}",
        chart.status()
    );

    let scene = chart.frame(TimeMs(args.at_ms.unwrap_or(settle_ms)));
    write_scene(&scene, &args.out)?;
    chart.unmount();
    Ok(())
}

fn mount_flow(
    cfg: storyviz::FlowMapConfig,
    csv: &Path,
    geojson: &Path,
) -> anyhow::Result<FlowMap> {
    let mut map = FlowMap::mount(cfg, TimeMs(0))?;
    map.on_table(read_table(csv));
    map.on_geometry(read_boundaries(geojson));
    anyhow::ensure!(
        map.status().is_ready(),
        "flow map not ready: {:?}",
        map.status()
    );
    Ok(map)
}

fn cmd_flow(args: FlowArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?.flow_map;
    let mut map = mount_flow(cfg, &args.csv, &args.geojson)?;
    if let Some(year) = args.year {
        map.select_year(year);
    }

    let scene = map.frame(TimeMs(0));
    write_scene(&scene, &args.out)?;
    if let (Some(view), Some(total)) = (map.view_state(), map.year_total()) {
        println!("{}\t{}", view.selected_year, total);
    }
    map.unmount();
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?.flow_map;
    let mut map = mount_flow(cfg, &args.csv, &args.geojson)?;

    let mut now = TimeMs(0);
    map.toggle_play(now);
    for i in 0..args.frames {
        let year = map.view_state().map_or(0, |v| v.selected_year);
        let out = args.out_dir.join(format!("frame_{i:03}_{year}.svg"));
        write_scene(&map.frame(now), &out)?;

        let Some(next) = map.next_wakeup() else {
            break;
        };
        now = next;
        map.advance(now);
    }
    map.unmount();
    Ok(())
}
