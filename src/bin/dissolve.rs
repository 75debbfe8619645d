use std::{
    io::Write as _,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "dissolve", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every frame of a dissolve as numbered PNGs.
    Frames(FramesArgs),
    /// Render the dissolve at one point in time as a PNG.
    Frame(FrameArgs),
    /// Print the reveal order for a grid as JSON.
    Order(OrderArgs),
}

#[derive(Args, Debug)]
struct TransitionArgs {
    /// Image to transition from.
    #[arg(long)]
    from: PathBuf,

    /// Image to transition to (same size as --from).
    #[arg(long)]
    to: PathBuf,

    /// JSON transition spec; flags below override its fields.
    #[arg(long)]
    spec: Option<PathBuf>,

    /// Transition duration in seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// Seed for the reveal order.
    #[arg(long)]
    seed: Option<u64>,

    /// Reveal order.
    #[arg(long, value_enum)]
    order: Option<OrderChoice>,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    transition: TransitionArgs,

    /// Frames per second of the output sequence.
    #[arg(long)]
    fps: Option<f64>,

    /// Output directory for frame_NNNNN.png files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    transition: TransitionArgs,

    /// Time into the transition, in seconds.
    #[arg(long)]
    at: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct OrderArgs {
    /// Grid width in pixels.
    #[arg(long)]
    width: u32,

    /// Grid height in pixels.
    #[arg(long)]
    height: u32,

    /// Seed for the reveal order.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Reveal order.
    #[arg(long, value_enum, default_value_t = OrderChoice::Lfsr)]
    order: OrderChoice,

    /// Print at most this many coordinates.
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrderChoice {
    Lfsr,
    PrimeField,
}

impl From<OrderChoice> for dissolve::SequenceKind {
    fn from(choice: OrderChoice) -> Self {
        match choice {
            OrderChoice::Lfsr => dissolve::SequenceKind::Lfsr,
            OrderChoice::PrimeField => dissolve::SequenceKind::PrimeField,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frames(args) => cmd_frames(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Order(args) => cmd_order(args),
    }
}

fn read_spec(path: &Path) -> anyhow::Result<dissolve::DissolveSpec> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read spec '{}'", path.display()))?;
    let spec = dissolve::DissolveSpec::from_json_str(&text)
        .with_context(|| format!("parse spec '{}'", path.display()))?;
    Ok(spec)
}

fn resolve_spec(args: &TransitionArgs, fps: Option<f64>) -> anyhow::Result<dissolve::DissolveSpec> {
    let mut spec = match &args.spec {
        Some(path) => read_spec(path)?,
        None => dissolve::DissolveSpec::default(),
    };
    if let Some(d) = args.duration {
        spec.duration_secs = d;
    }
    if let Some(seed) = args.seed {
        spec.seed = seed;
    }
    if let Some(order) = args.order {
        spec.order = order.into();
    }
    if let Some(fps) = fps {
        spec.fps = fps;
    }
    spec.validate()?;
    Ok(spec)
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let spec = resolve_spec(&args.transition, args.fps)?;
    let (outgoing, incoming) =
        dissolve::load_image_pair(&args.transition.from, &args.transition.to)?;

    let mut transition =
        dissolve::DissolveTransition::from_spec(&spec, outgoing.width(), outgoing.height())?;
    let mut output = outgoing.clone();
    let mut frames = transition.bind(&outgoing, &incoming, &mut output)?;
    let clock = dissolve::FrameClock::new(spec.fps)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let out_dir = args.out_dir.clone();
    let stats = dissolve::run_to_completion(&mut transition, &mut frames, clock, |i, report, out| {
        if let Some(anomaly) = &report.anomaly {
            eprintln!("frame {i}: {anomaly}");
        }
        dissolve::write_png(&out_dir.join(format!("frame_{i:05}.png")), out)
    })?;

    eprintln!(
        "wrote {} frames to {}",
        stats.frames,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let spec = resolve_spec(&args.transition, None)?;
    let (outgoing, incoming) =
        dissolve::load_image_pair(&args.transition.from, &args.transition.to)?;

    if !args.at.is_finite() || args.at < 0.0 {
        anyhow::bail!("--at must be a finite, non-negative number of seconds");
    }
    let at = Duration::try_from_secs_f64(args.at).context("convert --at to a duration")?;

    let mut transition =
        dissolve::DissolveTransition::from_spec(&spec, outgoing.width(), outgoing.height())?;
    let mut output = outgoing.clone();
    let mut frames = transition.bind(&outgoing, &incoming, &mut output)?;
    let report = dissolve::render_at(&mut transition, &mut frames, at)?;

    dissolve::write_png(&args.out, frames.output())?;
    eprintln!(
        "wrote {} ({} of {} pixels revealed)",
        args.out.display(),
        report.revealed,
        report.total
    );
    Ok(())
}

fn cmd_order(args: OrderArgs) -> anyhow::Result<()> {
    let domain = dissolve::Domain::new(args.width, args.height)?;
    let order = dissolve::reveal_order(args.order.into(), domain, args.seed)?;
    let coords: Vec<dissolve::Coord> = match args.limit {
        Some(n) => order.take(n).collect(),
        None => order.collect(),
    };

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer(&mut stdout, &coords).context("write reveal order JSON")?;
    writeln!(stdout)?;
    Ok(())
}
