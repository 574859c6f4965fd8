use crate::effects::bilateral::bilateral_filter;
use crate::effects::blur::gaussian_blur;
use crate::effects::colormap::{ColorRamp, apply_color_ramp};
use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{BoothError, BoothResult};
use crate::foundation::math::{luma_u8, round_clamp_u8};

/// Channel-mixing matrix of the vintage filter. Rows and columns are in (B, G, R) order.
pub const SEPIA_BGR: [[f32; 3]; 3] = [
    [0.272, 0.534, 0.131],
    [0.349, 0.686, 0.168],
    [0.393, 0.769, 0.189],
];

/// A pure pixel transform.
///
/// Every variant maps a buffer to a new buffer of the same dimensions and layout; alpha, when
/// present, is never touched.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Filter {
    /// Copy.
    Identity,
    /// Luma re-expanded to three identical channels.
    Grayscale,
    /// `255 - v` per channel.
    Invert,
    /// Separable Gaussian; `sigma <= 0` derives sigma from `ksize`.
    Blur {
        /// Odd kernel size.
        ksize: u32,
        /// Standard deviation in pixels.
        sigma: f32,
    },
    /// Luma mapped through a fixed colour ramp.
    Ramp {
        /// Ramp to apply.
        ramp: ColorRamp,
    },
    /// [`SEPIA_BGR`] channel mix, rounded and clamped.
    Sepia,
    /// Saturating `v + amount` per channel.
    Lift {
        /// Constant added to every sample.
        amount: u8,
    },
    /// Bilateral smoothing.
    Smooth {
        /// Neighbourhood diameter.
        diameter: u32,
        /// Range sigma.
        sigma_color: f32,
        /// Spatial sigma.
        sigma_space: f32,
    },
    /// Unsharp mask: `(1 + amount) * img - amount * blur(img)`, saturating.
    Sharpen {
        /// Weight of the subtracted blur.
        amount: f32,
        /// Odd kernel size of the blur.
        ksize: u32,
    },
    /// RGB → HSV → RGB round trip. Kept as a catalog entry; it is a no-op by construction and
    /// returns a copy.
    HsvRoundTrip,
}

impl Filter {
    /// Check parameters so that [`Filter::apply`] cannot fail on valid buffers.
    pub fn validate(&self) -> BoothResult<()> {
        match *self {
            Self::Blur { ksize, sigma } => {
                if ksize == 0 || ksize.is_multiple_of(2) {
                    return Err(BoothError::validation("Blur.ksize must be odd and > 0"));
                }
                if !sigma.is_finite() {
                    return Err(BoothError::validation("Blur.sigma must be finite"));
                }
            }
            Self::Smooth {
                sigma_color,
                sigma_space,
                ..
            } => {
                if !(sigma_color.is_finite() && sigma_color > 0.0) {
                    return Err(BoothError::validation("Smooth.sigma_color must be > 0"));
                }
                if !(sigma_space.is_finite() && sigma_space > 0.0) {
                    return Err(BoothError::validation("Smooth.sigma_space must be > 0"));
                }
            }
            Self::Sharpen { amount, ksize } => {
                if !amount.is_finite() || amount < 0.0 {
                    return Err(BoothError::validation(
                        "Sharpen.amount must be finite and >= 0",
                    ));
                }
                if ksize == 0 || ksize.is_multiple_of(2) {
                    return Err(BoothError::validation("Sharpen.ksize must be odd and > 0"));
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Apply the transform, producing a new buffer.
    pub fn apply(&self, src: &PixelBuffer) -> BoothResult<PixelBuffer> {
        match *self {
            Self::Identity | Self::HsvRoundTrip => Ok(src.clone()),
            Self::Grayscale => Ok(map_rgb(src, |[r, g, b]| {
                let y = luma_u8(r, g, b);
                [y, y, y]
            })),
            Self::Invert => Ok(map_rgb(src, |px| px.map(|v| 255 - v))),
            Self::Blur { ksize, sigma } => blur_rgb(src, ksize, sigma),
            Self::Ramp { ramp } => Ok(apply_color_ramp(src, ramp)),
            Self::Sepia => Ok(map_rgb(src, sepia_px)),
            Self::Lift { amount } => {
                let lut = lift_table(amount);
                Ok(map_rgb(src, |px| px.map(|v| lut[v as usize])))
            }
            Self::Smooth {
                diameter,
                sigma_color,
                sigma_space,
            } => bilateral_filter(src, diameter, sigma_color, sigma_space),
            Self::Sharpen { amount, ksize } => {
                let blurred = blur_rgb(src, ksize, 0.0)?;
                let n = src.channels().count();
                let mut out = src.clone();
                for (o, b) in out
                    .as_raw_mut()
                    .chunks_exact_mut(n)
                    .zip(blurred.as_raw().chunks_exact(n))
                {
                    for c in 0..3 {
                        let v = (1.0 + amount) * f32::from(o[c]) - amount * f32::from(b[c]);
                        o[c] = round_clamp_u8(v);
                    }
                }
                Ok(out)
            }
        }
    }
}

/// Per-sample lookup `min(i + amount, 255)`.
pub fn lift_table(amount: u8) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (i, v) in lut.iter_mut().enumerate() {
        *v = (i as u8).saturating_add(amount);
    }
    lut
}

fn sepia_px([r, g, b]: [u8; 3]) -> [u8; 3] {
    let src = [f32::from(b), f32::from(g), f32::from(r)];
    let mix = |row: [f32; 3]| round_clamp_u8(row[0] * src[0] + row[1] * src[1] + row[2] * src[2]);
    let out_b = mix(SEPIA_BGR[0]);
    let out_g = mix(SEPIA_BGR[1]);
    let out_r = mix(SEPIA_BGR[2]);
    [out_r, out_g, out_b]
}

fn map_rgb(src: &PixelBuffer, f: impl Fn([u8; 3]) -> [u8; 3]) -> PixelBuffer {
    let n = src.channels().count();
    let mut out = src.clone();
    for px in out.as_raw_mut().chunks_exact_mut(n) {
        let mapped = f([px[0], px[1], px[2]]);
        px[..3].copy_from_slice(&mapped);
    }
    out
}

fn blur_rgb(src: &PixelBuffer, ksize: u32, sigma: f32) -> BoothResult<PixelBuffer> {
    let mut out = gaussian_blur(src, ksize, sigma)?;
    if src.channels().has_alpha() {
        for (o, s) in out
            .as_raw_mut()
            .chunks_exact_mut(4)
            .zip(src.as_raw().chunks_exact(4))
        {
            o[3] = s[3];
        }
    }
    Ok(out)
}

/// Resolve a filter by (case-insensitive) name, accepting the usual aliases.
pub fn parse_filter(name: &str) -> BoothResult<Filter> {
    let key = name.trim().to_ascii_lowercase().replace(['-', ' '], "_");
    if key.is_empty() {
        return Err(BoothError::validation("filter name must be non-empty"));
    }
    let f = match key.as_str() {
        "original" | "identity" | "none" => Filter::Identity,
        "grayscale" | "greyscale" | "gray" | "black_and_white" | "bw" => Filter::Grayscale,
        "invert" | "negative" => Filter::Invert,
        "blur" => standard_blur(),
        "tumblr" | "pink" => Filter::Ramp {
            ramp: ColorRamp::Pink,
        },
        "prism" | "rainbow" => Filter::Ramp {
            ramp: ColorRamp::Rainbow,
        },
        "vintage" | "sepia" => Filter::Sepia,
        "silly_face" | "brighten" => Filter::Lift { amount: 30 },
        "slim" | "smooth" => standard_smooth(),
        "kodak" => Filter::Lift { amount: 20 },
        "clarendon" | "sharpen" => Filter::Sharpen {
            amount: 0.2,
            ksize: 15,
        },
        "pretty_freckles" | "hsv_round_trip" => Filter::HsvRoundTrip,
        _ => {
            return Err(BoothError::validation(format!(
                "unknown filter '{name}'"
            )));
        }
    };
    Ok(f)
}

fn standard_blur() -> Filter {
    Filter::Blur {
        ksize: 15,
        sigma: 0.0,
    }
}

fn standard_smooth() -> Filter {
    Filter::Smooth {
        diameter: 15,
        sigma_color: 80.0,
        sigma_space: 80.0,
    }
}

/// Named catalog entry.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CatalogEntry {
    /// Display name.
    pub name: String,
    /// Transform.
    pub filter: Filter,
}

/// Which preset catalog to load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogPreset {
    /// The eleven-entry catalog.
    #[default]
    Standard,
    /// The thirteen-entry catalog with Clarendon, Pretty Freckles and Black & White.
    Extended,
}

/// Ordered, read-only list of named filters. Index 0 is always the identity.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterCatalog {
    entries: Vec<CatalogEntry>,
}

impl FilterCatalog {
    /// Build a catalog from explicit entries.
    pub fn new(entries: Vec<CatalogEntry>) -> BoothResult<Self> {
        match entries.first() {
            Some(e) if e.filter == Filter::Identity => {}
            _ => {
                return Err(BoothError::validation(
                    "filter catalog must start with the identity filter",
                ));
            }
        }
        for e in &entries {
            e.filter.validate()?;
        }
        Ok(Self { entries })
    }

    /// Load one of the preset catalogs.
    pub fn preset(preset: CatalogPreset) -> Self {
        match preset {
            CatalogPreset::Standard => Self::standard(),
            CatalogPreset::Extended => Self::extended(),
        }
    }

    /// Original, Grayscale, Invert, Blur, Tumblr, Prism, Vintage, Silly Face, Slim, Kodak,
    /// Negative.
    pub fn standard() -> Self {
        Self::from_static(&[
            ("Original", Filter::Identity),
            ("Grayscale", Filter::Grayscale),
            ("Invert", Filter::Invert),
            ("Blur", standard_blur()),
            (
                "Tumblr",
                Filter::Ramp {
                    ramp: ColorRamp::Pink,
                },
            ),
            (
                "Prism",
                Filter::Ramp {
                    ramp: ColorRamp::Rainbow,
                },
            ),
            ("Vintage", Filter::Sepia),
            ("Silly Face", Filter::Lift { amount: 30 }),
            ("Slim", standard_smooth()),
            ("Kodak", Filter::Lift { amount: 20 }),
            ("Negative", Filter::Invert),
        ])
    }

    /// The richest variant, with Clarendon, Pretty Freckles and Black & White.
    pub fn extended() -> Self {
        Self::from_static(&[
            ("Original", Filter::Identity),
            ("Grayscale", Filter::Grayscale),
            ("Invert", Filter::Invert),
            ("Blur", standard_blur()),
            (
                "Clarendon",
                Filter::Sharpen {
                    amount: 0.2,
                    ksize: 15,
                },
            ),
            (
                "Tumblr",
                Filter::Ramp {
                    ramp: ColorRamp::Pink,
                },
            ),
            (
                "Prism",
                Filter::Ramp {
                    ramp: ColorRamp::Rainbow,
                },
            ),
            ("Pretty Freckles", Filter::HsvRoundTrip),
            ("Vintage", Filter::Sepia),
            ("Silly Face", Filter::Lift { amount: 30 }),
            ("Slim", standard_smooth()),
            ("Black & White", Filter::Grayscale),
            ("Kodak", Filter::Lift { amount: 20 }),
        ])
    }

    /// First `n` entries of the standard catalog (at least the identity).
    pub fn truncated(n: usize) -> Self {
        let mut c = Self::standard();
        c.truncate(n);
        c
    }

    /// Keep the first `n` entries (never fewer than the identity).
    pub fn truncate(&mut self, n: usize) {
        self.entries.truncate(n.max(1));
    }

    fn from_static(entries: &[(&str, Filter)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(name, filter)| CatalogEntry {
                    name: (*name).to_string(),
                    filter: filter.clone(),
                })
                .collect(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: a catalog holds at least the identity.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    /// Name of the entry at `index`.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.name.as_str())
    }

    /// All entries in order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Apply the filter at `index`. Out-of-range indices return an unchanged copy.
    pub fn apply(&self, src: &PixelBuffer, index: usize) -> BoothResult<PixelBuffer> {
        match self.entries.get(index) {
            Some(e) => e.filter.apply(src),
            None => Ok(src.clone()),
        }
    }
}

impl Default for FilterCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Apply the standard catalog's filter `index` to `src`.
pub fn apply(src: &PixelBuffer, index: usize) -> BoothResult<PixelBuffer> {
    FilterCatalog::standard().apply(src, index)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/filters.rs"]
mod tests;
