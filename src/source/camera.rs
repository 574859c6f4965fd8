use std::io::{BufReader, Read};
use std::process::{Child, ChildStdout, Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, SyncSender};
use std::thread::JoinHandle;

use crate::encode::ffmpeg::is_ffmpeg_on_path;
use crate::foundation::core::{Channels, PixelBuffer};
use crate::foundation::error::{BoothError, BoothResult};
use crate::source::FrameSource;

/// Blocking frame producer driven by the capture thread.
pub trait FrameGrabber: Send {
    /// Block until the next frame is available. `Ok(None)` is end-of-stream.
    fn grab(&mut self) -> BoothResult<Option<PixelBuffer>>;
}

/// Capture device settings.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CameraOpts {
    /// Device path or name handed to ffmpeg's `-i`.
    pub device: String,
    /// ffmpeg input format (`v4l2`, `avfoundation`, `dshow`, ...).
    pub input_format: String,
    /// Frame width delivered to the editor.
    pub width: u32,
    /// Frame height delivered to the editor.
    pub height: u32,
}

impl Default for CameraOpts {
    fn default() -> Self {
        Self {
            device: "/dev/video0".to_string(),
            input_format: "v4l2".to_string(),
            width: 640,
            height: 480,
        }
    }
}

impl CameraOpts {
    /// ffmpeg arguments that decode the device into `rgb24` rawvideo on stdout.
    pub fn ffmpeg_args(&self) -> Vec<String> {
        vec![
            "-loglevel".into(),
            "error".into(),
            "-f".into(),
            self.input_format.clone(),
            "-i".into(),
            self.device.clone(),
            "-vf".into(),
            format!("scale={}:{}", self.width, self.height),
            "-f".into(),
            "rawvideo".into(),
            "-pix_fmt".into(),
            "rgb24".into(),
            "pipe:1".into(),
        ]
    }
}

/// Grabber reading `rgb24` frames from a system `ffmpeg` process.
pub struct FfmpegGrabber {
    opts: CameraOpts,
    child: Child,
    stdout: BufReader<ChildStdout>,
}

impl FfmpegGrabber {
    /// Spawn ffmpeg on the configured device. Failure to start is a device error.
    pub fn open(opts: CameraOpts) -> BoothResult<Self> {
        if opts.width == 0 || opts.height == 0 {
            return Err(BoothError::validation("camera width/height must be non-zero"));
        }
        if !is_ffmpeg_on_path() {
            return Err(BoothError::device(
                "ffmpeg is required for camera capture, but was not found on PATH",
            ));
        }
        let mut child = Command::new("ffmpeg")
            .args(opts.ffmpeg_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                BoothError::device(format!("failed to open camera '{}': {e}", opts.device))
            })?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| BoothError::device("failed to open ffmpeg stdout"))?;
        tracing::info!(device = %opts.device, width = opts.width, height = opts.height, "camera opened");
        Ok(Self {
            opts,
            child,
            stdout: BufReader::new(stdout),
        })
    }
}

impl FrameGrabber for FfmpegGrabber {
    fn grab(&mut self) -> BoothResult<Option<PixelBuffer>> {
        let mut data = vec![0u8; self.opts.width as usize * self.opts.height as usize * 3];
        match self.stdout.read_exact(&mut data) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => {
                return Err(BoothError::device(format!("camera read failed: {e}")));
            }
        }
        PixelBuffer::from_raw(self.opts.width, self.opts.height, Channels::Rgb, data).map(Some)
    }
}

impl Drop for FfmpegGrabber {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Live source fed by a capture thread through a single-slot channel.
///
/// The editor side never shares mutable state with the capture side. A stream that ends before
/// delivering its first frame is reported as a device error.
pub struct CameraSource {
    rx: Option<Receiver<BoothResult<PixelBuffer>>>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    received: u64,
}

impl CameraSource {
    /// Start capturing from `grabber` on a dedicated thread.
    pub fn spawn<G: FrameGrabber + 'static>(grabber: G) -> BoothResult<Self> {
        let (tx, rx) = std::sync::mpsc::sync_channel(1);
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();
        let handle = std::thread::Builder::new()
            .name("stickerbooth-capture".into())
            .spawn(move || capture_loop(grabber, tx, running_clone))
            .map_err(|e| BoothError::device(format!("failed to start capture thread: {e}")))?;
        Ok(Self {
            rx: Some(rx),
            running,
            handle: Some(handle),
            received: 0,
        })
    }

    /// Open the system camera through ffmpeg and start capturing.
    pub fn open(opts: CameraOpts) -> BoothResult<Self> {
        Self::spawn(FfmpegGrabber::open(opts)?)
    }

    /// Frames delivered to the editor so far.
    pub fn frames_received(&self) -> u64 {
        self.received
    }

    /// Stop the capture thread and wait for it to exit.
    pub fn shutdown(mut self) {
        self.stop();
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            tracing::warn!("capture thread panicked");
        }
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.rx = None;
    }
}

impl FrameSource for CameraSource {
    fn next_frame(&mut self) -> BoothResult<Option<PixelBuffer>> {
        let Some(rx) = self.rx.as_ref() else {
            return Ok(None);
        };
        match rx.recv() {
            Ok(Ok(frame)) => {
                self.received += 1;
                Ok(Some(frame))
            }
            Ok(Err(e)) => {
                self.stop();
                Err(e)
            }
            Err(_) => {
                self.stop();
                if self.received == 0 {
                    return Err(BoothError::device("camera stream ended before the first frame"));
                }
                tracing::info!(frames = self.received, "camera stream ended");
                Ok(None)
            }
        }
    }

    fn is_live(&self) -> bool {
        true
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        self.stop();
    }
}

fn capture_loop<G: FrameGrabber>(
    mut grabber: G,
    tx: SyncSender<BoothResult<PixelBuffer>>,
    running: Arc<AtomicBool>,
) {
    while running.load(Ordering::SeqCst) {
        let msg = match grabber.grab() {
            Ok(Some(frame)) => Ok(frame),
            Ok(None) => break,
            Err(e) => Err(e),
        };
        let failed = msg.is_err();
        // Blocks while the previous frame is still in the slot.
        if tx.send(msg).is_err() || failed {
            break;
        }
    }
    tracing::debug!("capture thread exiting");
}

#[cfg(test)]
#[path = "../../tests/unit/source/camera.rs"]
mod tests;
