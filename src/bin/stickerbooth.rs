use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "stickerbooth", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the configured filter catalog.
    Filters(FiltersArgs),
    /// Apply one filter to an image.
    Apply(ApplyArgs),
    /// Run a still-image editing session driven by an event script.
    Edit(EditArgs),
    /// Run a camera session (requires `ffmpeg` on PATH).
    Camera(CameraArgs),
}

#[derive(Parser, Debug)]
struct FiltersArgs {
    /// Editor config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ApplyArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Catalog index, or a filter name such as `sepia` or `kodak`.
    #[arg(long)]
    filter: String,

    /// Output image. PNG when the path has no extension.
    #[arg(long)]
    out: PathBuf,

    /// Editor config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct EditArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Sticker directory (default set) or manifest JSON.
    #[arg(long)]
    stickers: PathBuf,

    /// Event script JSON.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Write the final working image here.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Editor config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CameraArgs {
    /// Capture device.
    #[arg(long)]
    device: Option<String>,

    /// Capture width.
    #[arg(long)]
    width: Option<u32>,

    /// Capture height.
    #[arg(long)]
    height: Option<u32>,

    /// Stop after this many frames.
    #[arg(long)]
    frames: Option<u64>,

    /// Record the session to this MP4 from the first frame.
    #[arg(long)]
    record: Option<PathBuf>,

    /// Initial filter index.
    #[arg(long)]
    filter: Option<usize>,

    /// Event script JSON.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Sticker directory (default set) or manifest JSON.
    #[arg(long)]
    stickers: Option<PathBuf>,

    /// Editor config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Filters(args) => cmd_filters(args),
        Command::Apply(args) => cmd_apply(args),
        Command::Edit(args) => cmd_edit(args),
        Command::Camera(args) => cmd_camera(args),
    }
}

fn load_opts(path: Option<&Path>) -> anyhow::Result<stickerbooth::EditorOpts> {
    match path {
        Some(p) => Ok(stickerbooth::EditorOpts::from_json_file(p)?),
        None => Ok(stickerbooth::EditorOpts::default()),
    }
}

fn load_script(path: Option<&Path>) -> anyhow::Result<stickerbooth::Script> {
    match path {
        Some(p) => Ok(stickerbooth::Script::load(p)?),
        None => Ok(stickerbooth::Script::default()),
    }
}

fn cmd_filters(args: FiltersArgs) -> anyhow::Result<()> {
    let opts = load_opts(args.config.as_deref())?;
    for (i, entry) in opts.filter_catalog().entries().iter().enumerate() {
        println!("{i:>2}  {}", entry.name);
    }
    Ok(())
}

fn cmd_apply(args: ApplyArgs) -> anyhow::Result<()> {
    let opts = load_opts(args.config.as_deref())?;
    let img = stickerbooth::load_image(&args.in_path)?;

    let out = match args.filter.parse::<usize>() {
        Ok(idx) => {
            let catalog = opts.filter_catalog();
            if idx >= catalog.len() {
                anyhow::bail!(
                    "filter index {idx} out of range (catalog has {})",
                    catalog.len()
                );
            }
            catalog.apply(&img, idx)?
        }
        Err(_) => stickerbooth::parse_filter(&args.filter)?.apply(&img)?,
    };

    stickerbooth::save_image(&out, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_edit(args: EditArgs) -> anyhow::Result<()> {
    let opts = load_opts(args.config.as_deref())?;
    let catalog = Arc::new(opts.filter_catalog());
    let stickers = Arc::new(stickerbooth::StickerSheet::load(&args.stickers)?);
    let (mut surface, mut prompt) = load_script(args.script.as_deref())?.into_parts();

    let mut source = stickerbooth::StillSource::open(&args.in_path)?;
    let mut editor =
        stickerbooth::Editor::new(stickerbooth::Mode::Still, catalog, stickers, opts)?;
    let summary = editor.run(&mut source, &mut surface, &mut prompt)?;
    eprintln!(
        "session: {} iterations, {} frames presented",
        summary.iterations, summary.presented
    );

    if let Some(out) = args.out {
        let working = editor
            .working()
            .context("session ended without an image")?;
        stickerbooth::save_image(working, &out)?;
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn cmd_camera(args: CameraArgs) -> anyhow::Result<()> {
    let mut opts = load_opts(args.config.as_deref())?;
    if let Some(device) = args.device {
        opts.camera.device = device;
    }
    if let Some(w) = args.width {
        opts.camera.width = w;
    }
    if let Some(h) = args.height {
        opts.camera.height = h;
    }
    let start_recording = args.record.is_some();
    if args.record.is_some() {
        opts.record.path = args.record;
    }

    let catalog = Arc::new(opts.filter_catalog());
    let stickers = match &args.stickers {
        Some(p) => stickerbooth::StickerSheet::load(p)?,
        None => stickerbooth::StickerSheet::default(),
    };
    let (surface, mut prompt) = load_script(args.script.as_deref())?.into_parts();
    let mut surface = surface.keep_open();

    let camera = stickerbooth::CameraSource::open(opts.camera.clone())?;
    let mut source = FrameLimit {
        inner: camera,
        left: args.frames,
    };

    let mut editor =
        stickerbooth::Editor::new(stickerbooth::Mode::Camera, catalog, Arc::new(stickers), opts)?;
    if let Some(idx) = args.filter {
        editor.select_filter(idx)?;
    }
    if start_recording {
        editor.toggle_recording(&mut prompt)?;
    }

    let result = editor.run(&mut source, &mut surface, &mut prompt);
    source.inner.shutdown();
    let summary = result?;
    eprintln!(
        "session: {} frames, {} recorded",
        summary.frames, summary.recorded
    );
    Ok(())
}

/// Ends a live source after a fixed number of frames.
struct FrameLimit<S> {
    inner: S,
    left: Option<u64>,
}

impl<S: stickerbooth::FrameSource> stickerbooth::FrameSource for FrameLimit<S> {
    fn next_frame(&mut self) -> stickerbooth::BoothResult<Option<stickerbooth::PixelBuffer>> {
        match &mut self.left {
            Some(0) => Ok(None),
            Some(n) => {
                *n -= 1;
                self.inner.next_frame()
            }
            None => self.inner.next_frame(),
        }
    }

    fn is_live(&self) -> bool {
        self.inner.is_live()
    }
}
