use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use swoop::{
    FrameClock, IntervalTimer, ManualClock, Monotonic as _, Player, PlayerOpts, Presentation, Rect,
    Size, SvgDocument,
};

/// Highest sampling rate `sample` accepts.
const MAX_FPS: f64 = 1000.0;

#[derive(Parser, Debug)]
#[command(name = "swoop", version)]
struct Cli {
    /// Log engine diagnostics to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a presentation (and optionally its SVG references).
    Validate(ValidateArgs),
    /// Play one transition headlessly and dump the camera of every tick as JSON.
    Sample(SampleArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input presentation JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// SVG drawing whose elements `fit_to` references must resolve in.
    #[arg(long)]
    svg: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input presentation JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame to start from (index or id).
    #[arg(long)]
    from: String,

    /// Frame to move to (index or id).
    #[arg(long)]
    to: String,

    /// Samples per second.
    #[arg(long, default_value_t = 25.0)]
    fps: f64,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// SVG drawing used to fit cameras to their reference elements.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(serde::Serialize)]
struct SampleDump {
    from: usize,
    to: usize,
    fps: f64,
    viewport: [f64; 2],
    samples: Vec<Sample>,
}

#[derive(serde::Serialize)]
struct Sample {
    t_ms: f64,
    layers: Vec<LayerSample>,
}

#[derive(serde::Serialize)]
struct LayerSample {
    center: [f64; 2],
    scale: [f64; 2],
    rotation: f64,
    affine: [f64; 6],
    clip: Option<Rect>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Sample(args) => cmd_sample(args),
    }
}

fn load(in_path: &Path, svg: Option<&Path>, viewport: Size) -> anyhow::Result<Presentation> {
    let mut presentation = Presentation::from_path(in_path)
        .with_context(|| format!("load presentation '{}'", in_path.display()))?;
    if let Some(svg_path) = svg {
        let doc = SvgDocument::from_path(svg_path)?;
        presentation
            .fit_references(&doc, viewport)
            .with_context(|| format!("resolve references in '{}'", svg_path.display()))?;
    }
    Ok(presentation)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let p = load(&args.in_path, args.svg.as_deref(), Size::new(1280.0, 720.0))?;
    println!(
        "ok: {} frames, {} layers",
        p.frames.len(),
        p.layers.len()
    );
    Ok(())
}

fn frame_arg(p: &Presentation, arg: &str) -> anyhow::Result<usize> {
    let index = match p.frame_index(arg) {
        Some(i) => i,
        None => arg
            .parse::<usize>()
            .with_context(|| format!("'{arg}' is neither a frame id nor an index"))?,
    };
    anyhow::ensure!(
        index < p.frames.len(),
        "frame index {index} out of range (presentation has {} frames)",
        p.frames.len()
    );
    Ok(index)
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.fps.is_finite() && args.fps > 0.0 && args.fps <= MAX_FPS,
        "--fps must be in (0, {MAX_FPS}]"
    );
    anyhow::ensure!(
        args.width > 0.0 && args.height > 0.0,
        "--width/--height must be > 0"
    );
    let viewport = Size::new(args.width, args.height);
    let presentation = load(&args.in_path, args.svg.as_deref(), viewport)?;
    let from = frame_arg(&presentation, &args.from)?;
    let to = frame_arg(&presentation, &args.to)?;

    let time = Rc::new(ManualClock::new(0.0));
    let clock = FrameClock::new(Box::new(IntervalTimer::new(1000.0 / args.fps)), time.clone());
    let player = Player::new(presentation, viewport, &clock, PlayerOpts::default())?;
    player.jump_to_frame(from);

    player.move_to_frame(to);
    let mut samples = vec![sample(&player, &time)];
    while player.is_transitioning() {
        let Some(deadline) = clock.next_deadline_ms() else {
            break;
        };
        time.set(deadline);
        if clock.pump() {
            samples.push(sample(&player, &time));
        }
    }

    let dump = SampleDump {
        from,
        to,
        fps: args.fps,
        viewport: [args.width, args.height],
        samples,
    };
    write_json(args.out.as_deref(), &dump)
}

fn sample(player: &Player, time: &ManualClock) -> Sample {
    let viewport = player.viewport();
    let layers = viewport
        .cameras()
        .iter()
        .enumerate()
        .map(|(i, cam)| LayerSample {
            center: [cam.center.x, cam.center.y],
            scale: [cam.scale.x, cam.scale.y],
            rotation: cam.rotation,
            affine: viewport
                .transform(i)
                .map(|t| t.affine.as_coeffs())
                .unwrap_or_default(),
            clip: cam.clip,
        })
        .collect();
    Sample {
        t_ms: time.now_ms(),
        layers,
    }
}

fn write_json(out: Option<&Path>, dump: &SampleDump) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            let f = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            let mut w = BufWriter::new(f);
            serde_json::to_writer_pretty(&mut w, dump).context("write samples")?;
            w.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut w = stdout.lock();
            serde_json::to_writer_pretty(&mut w, dump).context("write samples")?;
            writeln!(w)?;
        }
    }
    Ok(())
}
