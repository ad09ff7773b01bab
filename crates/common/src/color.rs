//! Surface formats and color space types used in conversion negotiation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hardware surface format, as understood by the video processor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceFormat {
    /// NV12: 8-bit Y plane + interleaved UV at half resolution (HW decoder output).
    Nv12,
    /// P010: 10-bit NV12 variant (HDR content).
    P010,
    /// P016: 16-bit NV12 variant.
    P016,
    /// YUY2: packed 4:2:2, 8-bit.
    Yuy2,
    /// BGRA8 (SDR swap chain surfaces).
    Bgra8,
    /// RGBA8.
    Rgba8,
    /// RGB10A2: 10-bit RGB (HDR10 swap chain surfaces).
    Rgb10a2,
    /// RGBA16F: half-float RGB (scRGB surfaces).
    Rgba16f,
}

impl SurfaceFormat {
    /// Every format the processor can be asked about, in probe order.
    pub const ALL: [SurfaceFormat; 8] = [
        Self::Nv12,
        Self::P010,
        Self::P016,
        Self::Yuy2,
        Self::Bgra8,
        Self::Rgba8,
        Self::Rgb10a2,
        Self::Rgba16f,
    ];

    /// Bits per color component.
    pub fn bit_depth(self) -> u32 {
        match self {
            Self::Nv12 | Self::Yuy2 | Self::Bgra8 | Self::Rgba8 => 8,
            Self::P010 | Self::Rgb10a2 => 10,
            Self::P016 | Self::Rgba16f => 16,
        }
    }

    pub fn is_planar(self) -> bool {
        matches!(self, Self::Nv12 | Self::P010 | Self::P016)
    }

    pub fn is_rgb(self) -> bool {
        matches!(
            self,
            Self::Bgra8 | Self::Rgba8 | Self::Rgb10a2 | Self::Rgba16f
        )
    }
}

impl fmt::Display for SurfaceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Nv12 => "NV12",
            Self::P010 => "P010",
            Self::P016 => "P016",
            Self::Yuy2 => "YUY2",
            Self::Bgra8 => "BGRA8",
            Self::Rgba8 => "RGBA8",
            Self::Rgb10a2 => "RGB10A2",
            Self::Rgba16f => "RGBA16F",
        };
        write!(f, "{name}")
    }
}

/// Color primaries of a source or target space.
///
/// Sources report ITU-T H.273 codes; [`ColorPrimaries::from_code`] collapses
/// them onto the standard spaces the processor negotiates with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorPrimaries {
    /// BT.601 (SD video, both 525- and 625-line variants).
    Bt601,
    /// BT.709 (HD video).
    Bt709,
    /// BT.2020 (UHD / HDR video).
    Bt2020,
}

impl ColorPrimaries {
    /// Map an H.273 primaries code to the nearest standard primaries.
    ///
    /// Unknown or unspecified codes fall back to BT.709, the dominant
    /// primaries for video content.
    pub fn from_code(code: u32) -> Self {
        match code {
            5 | 6 => Self::Bt601,
            9 => Self::Bt2020,
            _ => Self::Bt709,
        }
    }
}

impl fmt::Display for ColorPrimaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bt601 => "BT.601",
            Self::Bt709 => "BT.709",
            Self::Bt2020 => "BT.2020",
        };
        write!(f, "{name}")
    }
}

/// Transfer characteristic (gamma curve) of a source or target space.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferCharacteristic {
    /// BT.709 camera transfer.
    Bt709,
    /// Display gamma 2.2 (standard video processing spaces).
    Gamma22,
    /// sRGB (IEC 61966-2-1).
    Srgb,
    /// Linear light.
    Linear,
    /// PQ / SMPTE ST 2084 (HDR10).
    Pq,
    /// HLG / ARIB STD-B67 (broadcast HDR).
    Hlg,
}

impl TransferCharacteristic {
    /// Map an H.273 transfer code to the nearest known transfer.
    ///
    /// Unknown or unspecified codes fall back to BT.709.
    pub fn from_code(code: u32) -> Self {
        match code {
            4 => Self::Gamma22,
            8 => Self::Linear,
            13 => Self::Srgb,
            16 => Self::Pq,
            18 => Self::Hlg,
            _ => Self::Bt709,
        }
    }

    /// True for the transfers that mark HDR material.
    pub fn is_hdr(self) -> bool {
        matches!(self, Self::Pq | Self::Hlg)
    }
}

impl fmt::Display for TransferCharacteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bt709 => "BT.709",
            Self::Gamma22 => "gamma2.2",
            Self::Srgb => "sRGB",
            Self::Linear => "linear",
            Self::Pq => "PQ",
            Self::Hlg => "HLG",
        };
        write!(f, "{name}")
    }
}

/// Quantization range of pixel values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorRange {
    /// Studio/limited range (16-235 for 8-bit luma).
    Limited,
    /// Full range (0-255 for 8-bit).
    Full,
}

impl ColorRange {
    /// Decode-pipeline convention: 0 = limited, 1 = full.
    pub fn from_code(code: u32) -> Self {
        if code == 1 {
            Self::Full
        } else {
            Self::Limited
        }
    }

    pub fn is_full(self) -> bool {
        self == Self::Full
    }
}

impl fmt::Display for ColorRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Limited => "limited",
            Self::Full => "full",
        };
        write!(f, "{name}")
    }
}

/// A complete color space: primaries + transfer + range.
///
/// Fully describes how pixel values map to perceptual color. Whether the
/// values are RGB or YCbCr follows from the surface format they are paired
/// with, so it is not part of the space itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorSpace {
    pub primaries: ColorPrimaries,
    pub transfer: TransferCharacteristic,
    pub range: ColorRange,
}

impl ColorSpace {
    pub const fn new(
        primaries: ColorPrimaries,
        transfer: TransferCharacteristic,
        range: ColorRange,
    ) -> Self {
        Self {
            primaries,
            transfer,
            range,
        }
    }

    // Standard video spaces the negotiation policies draw from.
    pub const BT601_STUDIO: Self = Self::new(
        ColorPrimaries::Bt601,
        TransferCharacteristic::Gamma22,
        ColorRange::Limited,
    );
    pub const BT601_FULL: Self = Self::new(
        ColorPrimaries::Bt601,
        TransferCharacteristic::Gamma22,
        ColorRange::Full,
    );
    pub const BT709_STUDIO: Self = Self::new(
        ColorPrimaries::Bt709,
        TransferCharacteristic::Gamma22,
        ColorRange::Limited,
    );
    pub const BT709_FULL: Self = Self::new(
        ColorPrimaries::Bt709,
        TransferCharacteristic::Gamma22,
        ColorRange::Full,
    );
    pub const BT2020_STUDIO: Self = Self::new(
        ColorPrimaries::Bt2020,
        TransferCharacteristic::Gamma22,
        ColorRange::Limited,
    );
    pub const BT2020_FULL: Self = Self::new(
        ColorPrimaries::Bt2020,
        TransferCharacteristic::Gamma22,
        ColorRange::Full,
    );
    pub const BT2020_PQ_STUDIO: Self = Self::new(
        ColorPrimaries::Bt2020,
        TransferCharacteristic::Pq,
        ColorRange::Limited,
    );
    pub const BT2020_PQ_FULL: Self = Self::new(
        ColorPrimaries::Bt2020,
        TransferCharacteristic::Pq,
        ColorRange::Full,
    );
    pub const BT2020_HLG_STUDIO: Self = Self::new(
        ColorPrimaries::Bt2020,
        TransferCharacteristic::Hlg,
        ColorRange::Limited,
    );
    pub const BT2020_HLG_FULL: Self = Self::new(
        ColorPrimaries::Bt2020,
        TransferCharacteristic::Hlg,
        ColorRange::Full,
    );

    /// The SDR render target space (full-range BT.709, display gamma).
    pub const SDR_DISPLAY: Self = Self::BT709_FULL;
    /// The HDR10 render target space (full-range BT.2020 PQ).
    pub const HDR10_DISPLAY: Self = Self::BT2020_PQ_FULL;

    /// True when this space carries HDR material.
    pub fn is_hdr(self) -> bool {
        self.transfer.is_hdr()
    }

    /// Same primaries and transfer, different range.
    pub fn with_range(self, range: ColorRange) -> Self {
        Self { range, ..self }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.primaries, self.transfer, self.range)
    }
}
