use std::path::Path;

use crate::assets::decode::load_image;
use crate::foundation::core::PixelBuffer;
use crate::foundation::error::BoothResult;
use crate::source::FrameSource;

/// Yields one image exactly once.
#[derive(Clone, Debug)]
pub struct StillSource {
    frame: Option<PixelBuffer>,
}

impl StillSource {
    /// Wrap an already decoded image.
    pub fn new(frame: PixelBuffer) -> Self {
        Self { frame: Some(frame) }
    }

    /// Load an image file as a 3-channel frame.
    pub fn open(path: &Path) -> BoothResult<Self> {
        Ok(Self::new(load_image(path)?))
    }
}

impl FrameSource for StillSource {
    fn next_frame(&mut self) -> BoothResult<Option<PixelBuffer>> {
        Ok(self.frame.take())
    }

    fn is_live(&self) -> bool {
        false
    }
}
