use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Channels, PixelBuffer};
use crate::foundation::error::{BoothError, BoothResult};

/// Video codec used for MP4 output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoCodec {
    /// H.264 through `libx264`.
    #[default]
    H264,
    /// MPEG-4 part 2, available in minimal ffmpeg builds.
    Mpeg4,
}

impl VideoCodec {
    /// Encoder name passed to `-c:v`.
    pub fn encoder(self) -> &'static str {
        match self {
            Self::H264 => "libx264",
            Self::Mpeg4 => "mpeg4",
        }
    }
}

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 path.
    pub out_path: PathBuf,
    /// Overwrite the output file if it exists.
    pub overwrite: bool,
    /// Video codec.
    pub codec: VideoCodec,
}

impl FfmpegSinkOpts {
    /// Options for writing an H.264 MP4 to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            codec: VideoCodec::default(),
        }
    }
}

/// Sink that spawns the system `ffmpeg` and streams `rgb24` frames to its stdin.
///
/// Odd frame sizes are padded to even on the ffmpeg side so the output can use yuv420p.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,
    cfg: Option<SinkConfig>,
}

impl FfmpegSink {
    /// Create a sink; `ffmpeg` is not spawned until `begin`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            cfg: None,
        }
    }
}

/// Arguments for an `ffmpeg` run reading `rgb24` rawvideo from stdin.
pub fn ffmpeg_args(cfg: &SinkConfig, opts: &FfmpegSinkOpts) -> Vec<String> {
    let mut args: Vec<String> = vec![if opts.overwrite { "-y" } else { "-n" }.into()];
    args.extend(
        [
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgb24",
            "-s",
        ]
        .map(String::from),
    );
    args.push(format!("{}x{}", cfg.width, cfg.height));
    args.push("-r".into());
    args.push(cfg.fps.to_string());
    args.extend(["-i", "pipe:0", "-an"].map(String::from));
    if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
        args.push("-vf".into());
        args.push("pad=ceil(iw/2)*2:ceil(ih/2)*2".into());
    }
    args.push("-c:v".into());
    args.push(opts.codec.encoder().into());
    args.extend(["-pix_fmt", "yuv420p", "-movflags", "+faststart"].map(String::from));
    args.push(opts.out_path.display().to_string());
    args
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> BoothResult<()> {
        if cfg.fps == 0 {
            return Err(BoothError::validation("fps must be non-zero"));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(BoothError::validation(
                "ffmpeg sink width/height must be non-zero",
            ));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(BoothError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(BoothError::encode(
                "ffmpeg is required for MP4 recording, but was not found on PATH",
            ));
        }

        let mut child = Command::new("ffmpeg")
            .args(ffmpeg_args(&cfg, &self.opts))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| BoothError::encode(format!("failed to spawn ffmpeg: {e}")))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| BoothError::encode("failed to open ffmpeg stdin"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| BoothError::encode("failed to open ffmpeg stderr"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            stderr.read_to_end(&mut bytes)?;
            Ok(bytes)
        });

        tracing::debug!(out = %self.opts.out_path.display(), codec = self.opts.codec.encoder(), "spawned ffmpeg encoder");
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        Ok(())
    }

    fn push_frame(&mut self, frame: &PixelBuffer) -> BoothResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| BoothError::encode("ffmpeg sink not started"))?;
        if frame.width() != cfg.width || frame.height() != cfg.height {
            return Err(BoothError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                cfg.width,
                cfg.height
            )));
        }
        let Some(stdin) = self.stdin.as_mut() else {
            return Err(BoothError::encode("ffmpeg sink is already finalized"));
        };

        use std::io::Write as _;
        let res = match frame.channels() {
            Channels::Rgb => stdin.write_all(frame.as_raw()),
            Channels::Rgba => stdin.write_all(frame.to_rgb().as_raw()),
        };
        res.map_err(|e| BoothError::encode(format!("failed to write frame to ffmpeg stdin: {e}")))
    }

    fn end(&mut self) -> BoothResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| BoothError::encode("ffmpeg sink not started"))?;
        let status = child
            .wait()
            .map_err(|e| BoothError::encode(format!("failed to wait for ffmpeg: {e}")))?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| BoothError::encode("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| BoothError::encode(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };
        self.cfg = None;
        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(BoothError::encode(format!(
                "ffmpeg exited with status {status}: {}",
                stderr.trim()
            )));
        }
        Ok(())
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.wait();
        }
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> BoothResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
