use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{BoothError, BoothResult};
use crate::session::editor::{DisplayFrame, PathPrompt, Surface};
use crate::session::input::InputEvent;

/// Headless input script.
///
/// ```json
/// {"steps": [[{"type": "pointer_down", "x": 500, "y": 300}], []], "save_paths": ["out.png"]}
/// ```
///
/// Each step is the batch of events delivered in one loop iteration.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Script {
    /// Event batches, one per iteration.
    pub steps: Vec<Vec<InputEvent>>,
    /// Answers to successive save prompts; an exhausted list means "cancelled".
    pub save_paths: Vec<PathBuf>,
}

impl Script {
    /// Parse a script from JSON text.
    pub fn from_json_str(text: &str) -> BoothResult<Self> {
        serde_json::from_str(text).map_err(|e| BoothError::validation(format!("invalid script: {e}")))
    }

    /// Load a script file.
    pub fn load(path: &Path) -> BoothResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read script '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Split into the surface and prompt collaborators.
    pub fn into_parts(self) -> (ScriptedSurface, ScriptedPrompt) {
        (
            ScriptedSurface::new(self.steps),
            ScriptedPrompt::new(self.save_paths),
        )
    }
}

/// Surface that replays scripted event batches and keeps what it was shown.
#[derive(Debug, Default)]
pub struct ScriptedSurface {
    steps: VecDeque<Vec<InputEvent>>,
    keep_open: bool,
    presented: u64,
    last: Option<DisplayFrame>,
}

impl ScriptedSurface {
    /// Surface that closes once `steps` are used up.
    pub fn new(steps: Vec<Vec<InputEvent>>) -> Self {
        Self {
            steps: steps.into(),
            ..Self::default()
        }
    }

    /// Keep reporting empty batches after the script ends instead of closing.
    pub fn keep_open(mut self) -> Self {
        self.keep_open = true;
        self
    }

    /// Number of frames presented.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Most recently presented frame.
    pub fn last_frame(&self) -> Option<&DisplayFrame> {
        self.last.as_ref()
    }
}

impl Surface for ScriptedSurface {
    fn present(&mut self, frame: &DisplayFrame) -> BoothResult<()> {
        self.presented += 1;
        self.last = Some(frame.clone());
        Ok(())
    }

    fn poll_events(&mut self) -> BoothResult<Option<Vec<InputEvent>>> {
        match self.steps.pop_front() {
            Some(batch) => Ok(Some(batch)),
            None if self.keep_open => Ok(Some(Vec::new())),
            None => Ok(None),
        }
    }
}

/// Prompt that answers from a fixed list of paths, then cancels.
#[derive(Clone, Debug, Default)]
pub struct ScriptedPrompt {
    paths: VecDeque<PathBuf>,
    asked: usize,
}

impl ScriptedPrompt {
    /// Prompt answering with `paths` in order.
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            paths: paths.into(),
            asked: 0,
        }
    }

    /// How many times the prompt was shown.
    pub fn asked(&self) -> usize {
        self.asked
    }
}

impl PathPrompt for ScriptedPrompt {
    fn save_path(&mut self) -> Option<PathBuf> {
        self.asked += 1;
        self.paths.pop_front()
    }
}
