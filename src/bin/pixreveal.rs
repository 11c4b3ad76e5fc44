use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{ArgAction, Args, Parser, Subcommand};
use rand::{SeedableRng, rngs::StdRng};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use pixreveal::{
    BlockRenderer, Canvas, Event, LandscapeLibrary, PresentationHost, Raster, RevealAnimator,
    RevealConfig, Session, StageCurve, fit_to_surface, open_image, run_reveal,
};

#[derive(Parser, Debug)]
#[command(name = "pixreveal", version, about = "Render pixelated study-timer frames")]
struct Cli {
    /// Increase log verbosity (repeatable).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the pixelated image for one point of the countdown.
    Frame(FrameArgs),
    /// Render one PNG per pixelation stage.
    Stages(OutDirArgs),
    /// Render the terminal wipe as a PNG sequence.
    Reveal(RevealArgs),
    /// Simulate a whole study session, writing every presented frame.
    Session(SessionArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Landscape image, or a directory to pick one from at random.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// JSON config overriding the defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Surface width (defaults to the image width, clamped to max_surface).
    #[arg(long)]
    width: Option<u32>,

    /// Surface height (defaults to the image height, clamped to max_surface).
    #[arg(long)]
    height: Option<u32>,

    /// Seed for picking a landscape from a directory.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Elapsed fraction of the countdown, 0..=1.
    #[arg(long, default_value_t = 0.0)]
    fraction: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct OutDirArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output directory for the PNG files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct RevealArgs {
    #[command(flatten)]
    dir: OutDirArgs,

    /// Display refresh rate used to step the wipe.
    #[arg(long, default_value_t = 30)]
    fps: u32,
}

#[derive(Args, Debug)]
struct SessionArgs {
    #[command(flatten)]
    reveal: RevealArgs,

    /// Study time in minutes.
    #[arg(long)]
    minutes: u32,
}

fn init_tracing(verbosity: u8) -> anyhow::Result<()> {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env().add_directive(
        format!("pixreveal={level}")
            .parse()
            .context("build log filter")?,
    );
    fmt().with_env_filter(filter).with_target(true).init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Stages(args) => cmd_stages(args),
        Command::Reveal(args) => cmd_reveal(args),
        Command::Session(args) => cmd_session(args),
    }
}

/// Config, chosen image path, decoded image and the surface it is shown on.
struct Prepared {
    cfg: RevealConfig,
    path: PathBuf,
    image: image::RgbaImage,
    canvas: Canvas,
}

fn prepare(args: &SourceArgs) -> anyhow::Result<Prepared> {
    let cfg = match &args.config {
        Some(path) => RevealConfig::from_path(path)?,
        None => RevealConfig::default(),
    };

    let library = LandscapeLibrary::resolve(&args.in_path)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let path = library.pick(&mut rng)?.to_path_buf();
    let image = open_image(&path)?;
    info!(path = %path.display(), "loaded landscape");

    let canvas = Canvas::new(
        args.width.unwrap_or(image.width()),
        args.height.unwrap_or(image.height()),
    )
    .clamp_to(cfg.max_surface);
    if canvas.is_empty() {
        anyhow::bail!("surface size must be non-zero");
    }

    Ok(Prepared {
        cfg,
        path,
        image,
        canvas,
    })
}

fn write_png(path: &Path, raster: &Raster) -> anyhow::Result<()> {
    image::save_buffer_with_format(
        path,
        &raster.data,
        raster.width,
        raster.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn ensure_dir(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("create output dir '{}'", dir.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let p = prepare(&args.source)?;
    let source = fit_to_surface(&p.image, p.canvas);
    let curve = StageCurve::from_config(&p.cfg);
    let stage = curve.stage_of(args.fraction);
    let block_size = curve.block_size_of(stage);
    let out = BlockRenderer::new(p.cfg.saturation).render(&source, block_size);

    if let Some(parent) = args.out.parent() {
        ensure_dir(parent)?;
    }
    write_png(&args.out, &out)?;
    info!(stage, block_size, "wrote {}", args.out.display());
    Ok(())
}

fn cmd_stages(args: OutDirArgs) -> anyhow::Result<()> {
    let p = prepare(&args.source)?;
    let source = fit_to_surface(&p.image, p.canvas);
    let curve = StageCurve::from_config(&p.cfg);
    let renderer = BlockRenderer::new(p.cfg.saturation);
    ensure_dir(&args.out_dir)?;

    let mut out = Raster::empty();
    for stage in 0..curve.stages() {
        let block_size = curve.block_size_of(stage);
        renderer.render_into(&mut out, &source, block_size);
        let path = args.out_dir.join(format!("stage_{stage:02}.png"));
        write_png(&path, &out)?;
        info!(stage, block_size, "wrote {}", path.display());
    }
    Ok(())
}

fn cmd_reveal(args: RevealArgs) -> anyhow::Result<()> {
    let p = prepare(&args.dir.source)?;
    let source = fit_to_surface(&p.image, p.canvas);
    ensure_dir(&args.dir.out_dir)?;

    let frame_ms = 1000 / u64::from(args.fps.max(1));
    let mut clock = (0u64..).map(|i| i * frame_ms.max(1));
    let mut animator = RevealAnimator::from_config(&p.cfg);
    let mut index = 0usize;
    let mut write_err = None;

    let finished = run_reveal(
        &mut animator,
        &source,
        || clock.next(),
        |frame| {
            if write_err.is_some() {
                return;
            }
            let path = args.dir.out_dir.join(format!("reveal_{index:05}.png"));
            index += 1;
            if let Err(err) = write_png(&path, frame) {
                write_err = Some(err);
            }
        },
        || info!("reveal finished"),
    );

    if let Some(err) = write_err {
        return Err(err);
    }
    info!(
        frames = index,
        finished,
        "wrote reveal for {}",
        p.path.display()
    );
    Ok(())
}

/// Offline host: every presented frame becomes a numbered PNG, and frame or
/// countdown requests are recorded for the simulation loop to answer.
struct PngHost {
    canvas: Canvas,
    out_dir: PathBuf,
    written: usize,
    write_err: Option<anyhow::Error>,
    load_requested: bool,
    countdown_running: bool,
    pending_frame: Option<u64>,
    complete: bool,
}

impl PresentationHost for PngHost {
    fn surface_size(&self) -> Canvas {
        self.canvas
    }

    fn present(&mut self, frame: &Raster) {
        if self.write_err.is_some() {
            return;
        }
        let path = self.out_dir.join(format!("frame_{:05}.png", self.written));
        self.written += 1;
        if let Err(err) = write_png(&path, frame) {
            self.write_err = Some(err);
        }
    }

    fn request_next_frame(&mut self, generation: u64) {
        self.pending_frame = Some(generation);
    }

    fn load_image(&mut self) {
        self.load_requested = true;
    }

    fn show_clock(&mut self, label: &str) {
        if !label.is_empty() {
            tracing::debug!(label, "clock");
        }
    }

    fn set_countdown_running(&mut self, running: bool) {
        self.countdown_running = running;
    }

    fn reveal_complete(&mut self) {
        self.complete = true;
    }
}

fn cmd_session(args: SessionArgs) -> anyhow::Result<()> {
    let out_dir = args.reveal.dir.out_dir.clone();
    let p = prepare(&args.reveal.dir.source)?;
    ensure_dir(&out_dir)?;

    let host = PngHost {
        canvas: p.canvas,
        out_dir,
        written: 0,
        write_err: None,
        load_requested: false,
        countdown_running: false,
        pending_frame: None,
        complete: false,
    };
    let mut session = Session::new(&p.cfg, host);

    session.dispatch(Event::LoadRequested);
    if session.host().load_requested {
        session.dispatch(Event::ImageLoaded(Arc::new(p.image)));
    }

    let total_seconds = args
        .minutes
        .checked_mul(60)
        .context("session length overflows")?;
    let mut now_ms = 0u64;
    session.dispatch(Event::Start {
        total_seconds,
        now_ms,
    });

    while session.host().countdown_running {
        now_ms += 1000;
        session.dispatch(Event::ClockTick { now_ms });
    }

    let frame_ms = (1000 / u64::from(args.reveal.fps.max(1))).max(1);
    while let Some(generation) = session.host_mut().pending_frame.take() {
        now_ms += frame_ms;
        session.dispatch(Event::Frame {
            generation,
            now_ms,
        });
    }

    let host = session.into_host();
    if let Some(err) = host.write_err {
        return Err(err);
    }
    if !host.complete {
        anyhow::bail!("session ended before the reveal completed");
    }
    info!(frames = host.written, "session complete");
    Ok(())
}
