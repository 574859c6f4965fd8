/// Editor commands bound to keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// Quit the session.
    Escape,
    /// Save the image (still) or toggle recording (camera).
    Save,
    /// Advance to the next filter.
    NextFilter,
    /// Select the next sticker.
    CycleSticker,
    /// Undo the last edit.
    Undo,
}

impl Key {
    /// Map a raw key code (as delivered by typical GUI toolkits) to a command.
    ///
    /// Escape is 27, Ctrl+Z arrives as 26, letters as their ASCII code in either case.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            27 => Some(Self::Escape),
            26 => Some(Self::Undo),
            _ => match char::from_u32(code)?.to_ascii_lowercase() {
                's' => Some(Self::Save),
                'f' => Some(Self::NextFilter),
                'c' => Some(Self::CycleSticker),
                'z' => Some(Self::Undo),
                _ => None,
            },
        }
    }
}

/// One input event in window coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Primary button pressed.
    PointerDown {
        /// Window x.
        x: i64,
        /// Window y.
        y: i64,
    },
    /// Scroll wheel; only the sign of `delta` matters.
    Wheel {
        /// Positive selects the next sticker, negative the previous one.
        delta: i32,
    },
    /// Command key.
    Key {
        /// The command.
        key: Key,
    },
}
