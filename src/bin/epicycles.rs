use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use epicycles::{
    CpuBackend, CpuBackendOpts, EpicycleSession, FrameClock, FrameIndex, FrameRGBA, FrameSink,
    PngSequenceOpts, PngSequenceSink, RenderTicksOpts, Settings, SinkConfig,
};

#[derive(Parser, Debug)]
#[command(name = "epicycles", version)]
struct Cli {
    /// Log pipeline progress to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute Fourier coefficients and write them as JSON.
    Analyze(AnalyzeArgs),
    /// Render the epicycles after a number of ticks as a PNG.
    Frame(FrameArgs),
    /// Render a PNG sequence of the animation.
    Animate(AnimateArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Outline image (any format `image` decodes) or stroke JSON `[[x, y], ...]`.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Settings JSON; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Highest frequency |n| kept in the series.
    #[arg(long)]
    accuracy: Option<u32>,

    /// Phase increment per tick, in radians.
    #[arg(long)]
    speed: Option<f64>,

    /// Plane width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Plane height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Refine the greedy tour with 2-opt.
    #[arg(long, default_value_t = false)]
    two_opt: bool,

    /// Clear the trace each time the phase wraps.
    #[arg(long, default_value_t = false)]
    clear_on_wrap: bool,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Ticks to advance before rendering.
    #[arg(long, default_value_t = 0)]
    ticks: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Draw only the trace, without circles.
    #[arg(long, default_value_t = false)]
    trace_only: bool,
}

#[derive(Args, Debug)]
struct AnimateArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Ticks to advance.
    #[arg(long)]
    ticks: u64,

    /// Write a frame after every N ticks.
    #[arg(long, default_value_t = 1)]
    every: u64,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Emit frames at the configured fps instead of as fast as possible.
    #[arg(long, default_value_t = false)]
    realtime: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match cli.cmd {
        Command::Analyze(args) => cmd_analyze(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Animate(args) => cmd_animate(args),
    }
}

fn load_settings(input: &InputArgs) -> anyhow::Result<Settings> {
    let mut settings = match &input.config {
        Some(path) => Settings::from_path(path)?,
        None => Settings::default(),
    };
    if let Some(a) = input.accuracy {
        settings.accuracy = a;
    }
    if let Some(s) = input.speed {
        settings.rotation_speed = s;
    }
    if let Some(w) = input.width {
        settings.plane.width = w;
    }
    if let Some(h) = input.height {
        settings.plane.height = h;
    }
    settings.tour.two_opt |= input.two_opt;
    settings.clear_on_wrap |= input.clear_on_wrap;
    settings.validate()?;
    Ok(settings)
}

fn read_stroke_json(path: &Path) -> anyhow::Result<Vec<[f64; 2]>> {
    let f = File::open(path).with_context(|| format!("open stroke '{}'", path.display()))?;
    let samples: Vec<[f64; 2]> =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse stroke JSON")?;
    Ok(samples)
}

/// Build a session from the input and commit it, so it is animating on return.
fn open_session(input: &InputArgs) -> anyhow::Result<EpicycleSession> {
    let settings = load_settings(input)?;
    let mut session = EpicycleSession::new(settings)?;

    let is_json = input
        .in_path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        let samples = read_stroke_json(&input.in_path)?;
        let Some((&[x0, y0], rest)) = samples.split_first() else {
            anyhow::bail!("stroke '{}' has no samples", input.in_path.display());
        };
        session.begin_capture(x0, y0)?;
        for &[x, y] in rest {
            session.extend_capture(x, y)?;
        }
        session.end_capture()?;
    } else {
        let image = epicycles::load_outline(&input.in_path)?;
        session
            .load_image(&image)
            .with_context(|| format!("load outline '{}'", input.in_path.display()))?;
    }
    Ok(session)
}

fn cmd_analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let session = open_session(&args.input)?;
    let coeffs = session
        .coefficients()
        .context("session committed without coefficients (bug)")?;
    let json = serde_json::to_string_pretty(coeffs.as_ref()).context("serialize coefficients")?;

    match args.out {
        Some(out) => {
            ensure_parent_dir(&out)?;
            std::fs::write(&out, json).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.input)?;
    for _ in 0..args.ticks {
        session.tick();
    }

    let style = epicycles::RenderStyle {
        clear_rgba: Some([0, 0, 0, 255]),
        draw_circles: !args.trace_only,
        ..Default::default()
    };
    let mut backend = CpuBackend::new(
        session.settings().plane,
        CpuBackendOpts::default().with_style(style),
    );
    let frame = epicycles::render_current(&session, &mut backend)?;

    ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.input)?;
    let mut backend = CpuBackend::new(
        session.settings().plane,
        CpuBackendOpts::default().with_clear_rgba(Some([0, 0, 0, 255])),
    );
    let png = PngSequenceSink::new(PngSequenceOpts::new(&args.out_dir));
    let mut sink: Box<dyn FrameSink> = if args.realtime {
        Box::new(PacedSink::new(png, session.settings().fps))
    } else {
        Box::new(png)
    };

    let stats = epicycles::render_ticks(
        &mut session,
        RenderTicksOpts {
            ticks: args.ticks,
            every: args.every,
        },
        &mut backend,
        sink.as_mut(),
    )?;

    eprintln!(
        "wrote {} frames ({} ticks, {} wraps) to {}",
        stats.frames_written,
        stats.ticks,
        stats.wraps,
        args.out_dir.display()
    );
    Ok(())
}

/// Holds each frame back until the frame clock says it is due.
struct PacedSink<S> {
    inner: S,
    clock: FrameClock,
}

impl<S: FrameSink> PacedSink<S> {
    fn new(inner: S, fps: epicycles::Fps) -> Self {
        Self {
            inner,
            clock: FrameClock::new(fps),
        }
    }
}

impl<S: FrameSink> FrameSink for PacedSink<S> {
    fn begin(&mut self, cfg: SinkConfig) -> epicycles::EpicycleResult<()> {
        self.clock.start(Instant::now());
        self.inner.begin(cfg)
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> epicycles::EpicycleResult<()> {
        loop {
            let now = Instant::now();
            if self.clock.poll(now) {
                break;
            }
            std::thread::sleep(
                self.clock
                    .until_next(now)
                    .max(std::time::Duration::from_millis(1)),
            );
        }
        self.inner.push_frame(idx, frame)
    }

    fn end(&mut self) -> epicycles::EpicycleResult<()> {
        self.clock.stop();
        self.inner.end()
    }
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
