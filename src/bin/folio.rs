use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use folio::{
    DriverCommand, EventLoop, Millis, OrbitSystem, PageConfig, PageSession, PageSnapshot,
    PlacedItem, Point, RecordingDriver, Vec2, Viewport, document_height,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "folio", version)]
struct Cli {
    /// Log debug events to stderr (overridden by RUST_LOG).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and validate a page config.
    Validate(ValidateArgs),
    /// Print orbit placements at an instant, or render them as a PNG.
    Orbit(OrbitArgs),
    /// Run the loading screen, then sweep the page, printing JSON-lines snapshots.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Page config JSON (defaults to the built-in portfolio).
    #[arg(long = "in")]
    in_path: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct OrbitArgs {
    /// Page config JSON (defaults to the built-in portfolio).
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Time since mount.
    #[arg(long, default_value_t = 0)]
    at_ms: u64,

    /// Write a PNG preview here instead of printing JSON.
    #[arg(long)]
    png: Option<PathBuf>,

    /// Preview edge length in pixels.
    #[arg(long, default_value_t = 512, value_parser = clap::value_parser!(u32).range(16..=4096))]
    size: u32,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Page config JSON (defaults to the built-in portfolio).
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Clock step between snapshots.
    #[arg(long, default_value_t = 100)]
    step_ms: u64,

    /// Scroll distance per step once the page is ready.
    #[arg(long, default_value_t = 200.0)]
    scroll_step_px: f64,

    /// Viewport height.
    #[arg(long, default_value_t = 800.0)]
    viewport_px: f64,

    /// Platform prefers a dark color scheme.
    #[arg(long)]
    dark: bool,

    /// Give up if the loading screen has not finished after this long.
    #[arg(long, default_value_t = 60_000)]
    max_load_ms: u64,

    /// Output file (defaults to stdout).
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Orbit(args) => cmd_orbit(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "folio=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    // A subscriber may already be installed when embedded.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<PageConfig> {
    let cfg = match path {
        Some(p) => PageConfig::from_path(p)?,
        None => PageConfig::builtin().context("load built-in portfolio")?,
    };
    Ok(cfg)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.in_path.as_deref())?;
    let orbit = cfg.orbit_system()?;
    println!(
        "ok: {} sections, {} skills on {} rings, {} projects",
        cfg.sections.len(),
        orbit.len(),
        orbit.rings().len(),
        cfg.projects.len()
    );
    Ok(())
}

fn cmd_orbit(args: OrbitArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.in_path.as_deref())?;
    let orbit = cfg.orbit_system()?;
    let items = orbit.frame(Millis(args.at_ms))?;

    let Some(out) = args.png else {
        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &items).context("write placements")?;
        writeln!(stdout)?;
        return Ok(());
    };

    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    draw_orbit(&orbit, &items, args.size)
        .save_with_format(&out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

const BACKGROUND: [u8; 4] = [15, 18, 28, 255];
const RING_COLOR: [u8; 4] = [70, 78, 100, 255];
const HUB_COLOR: [u8; 4] = [240, 240, 245, 255];
const RING_PALETTE: [[u8; 4]; 4] = [
    [99, 179, 237, 255],
    [246, 173, 85, 255],
    [104, 211, 145, 255],
    [237, 100, 166, 255],
];
const DOT_RADIUS_PX: f64 = 6.0;

fn draw_orbit(orbit: &OrbitSystem, items: &[PlacedItem], size: u32) -> image::RgbaImage {
    let mut img = image::RgbaImage::from_pixel(size, size, image::Rgba(BACKGROUND));
    let half = f64::from(size) / 2.0;
    let center = Point::new(half, half);
    let max_radius = orbit.rings().iter().map(|r| r.radius).fold(0.0, f64::max);
    let scale = (half - 2.0 * DOT_RADIUS_PX).max(1.0) / max_radius.max(f64::EPSILON);

    for ring in orbit.rings() {
        let r = ring.radius * scale;
        let steps = (std::f64::consts::TAU * r).ceil().max(8.0) as usize;
        for i in 0..steps {
            let a = std::f64::consts::TAU * i as f64 / steps as f64;
            plot(&mut img, center + Vec2::from_angle(a) * r, RING_COLOR);
        }
    }
    fill_disc(&mut img, center, DOT_RADIUS_PX * 1.5, HUB_COLOR);
    for item in items {
        let color = RING_PALETTE[item.ring % RING_PALETTE.len()];
        fill_disc(&mut img, center + item.placement.offset * scale, DOT_RADIUS_PX, color);
    }
    img
}

fn plot(img: &mut image::RgbaImage, p: Point, color: [u8; 4]) {
    if p.x < 0.0 || p.y < 0.0 {
        return;
    }
    let (x, y) = (p.x as u32, p.y as u32);
    if x < img.width() && y < img.height() {
        img.put_pixel(x, y, image::Rgba(color));
    }
}

fn fill_disc(img: &mut image::RgbaImage, c: Point, r: f64, color: [u8; 4]) {
    let (x0, x1) = ((c.x - r).floor().max(0.0), (c.x + r).ceil());
    let (y0, y1) = ((c.y - r).floor().max(0.0), (c.y + r).ceil());
    let mut y = y0;
    while y <= y1 {
        let mut x = x0;
        while x <= x1 {
            let px = Point::new(x + 0.5, y + 0.5);
            if (px - c).hypot() <= r {
                plot(img, px, color);
            }
            x += 1.0;
        }
        y += 1.0;
    }
}

#[derive(serde::Serialize)]
struct SimLine {
    scroll_top: f64,
    #[serde(flatten)]
    snapshot: PageSnapshot,
    commands: Vec<DriverCommand>,
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.step_ms > 0, "--step-ms must be > 0");
    anyhow::ensure!(
        args.scroll_step_px.is_finite() && args.scroll_step_px > 0.0,
        "--scroll-step-px must be > 0"
    );
    anyhow::ensure!(
        args.viewport_px.is_finite() && args.viewport_px > 0.0,
        "--viewport-px must be > 0"
    );

    let cfg = load_config(args.in_path.as_deref())?;
    let layout = cfg.stacked_layout()?;
    let max_scroll = (document_height(&layout) - args.viewport_px).max(0.0);

    let ev = EventLoop::new();
    let mut page = PageSession::mount(&cfg, &ev, Some(layout), args.dark)?;
    let mut driver = RecordingDriver::new();
    let mut out: Box<dyn Write> = match &args.out {
        Some(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("create '{}'", p.display()))?,
        )),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };

    let step = Millis(args.step_ms);
    let load = cfg.motion.load;
    let deadline = Millis(load.duration_ms)
        .after(Millis(load.display_delay_ms))
        .after(Millis(load.tick_ms))
        .after(step)
        .min(Millis(args.max_load_ms));
    let mut scroll_top = 0.0;
    let mut lines = 0usize;

    page.scroll(Viewport::new(scroll_top, args.viewport_px), &mut driver);
    while !page.ui().is_ready.get() {
        anyhow::ensure!(ev.now() <= deadline, "page was not ready by {deadline}");
        page.advance(step, &mut driver);
        emit(&mut out, &page, scroll_top, &mut driver)?;
        lines += 1;
    }

    while scroll_top < max_scroll {
        scroll_top = (scroll_top + args.scroll_step_px).min(max_scroll);
        page.scroll(Viewport::new(scroll_top, args.viewport_px), &mut driver);
        page.advance(step, &mut driver);
        emit(&mut out, &page, scroll_top, &mut driver)?;
        lines += 1;
    }
    out.flush().context("flush snapshots")?;

    tracing::info!(lines, at = %ev.now(), "simulation finished");
    page.unmount();
    Ok(())
}

fn emit(
    out: &mut dyn Write,
    page: &PageSession,
    scroll_top: f64,
    driver: &mut RecordingDriver,
) -> anyhow::Result<()> {
    let line = SimLine {
        scroll_top,
        snapshot: page.snapshot(),
        commands: driver.take(),
    };
    serde_json::to_writer(&mut *out, &line).context("write snapshot")?;
    writeln!(out)?;
    Ok(())
}
