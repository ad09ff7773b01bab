//! Static description of probe-able video processor capabilities.
//!
//! Pure data: the prober fills these structs from hardware queries and the
//! rendering pipeline reads them. The raw `u32` bitfields carry the driver's
//! capability flags unchanged; only the filter bits have a meaning this crate
//! interprets itself (see [`FilterKind::cap_bit`]).

use serde::{Deserialize, Serialize};

use crate::color::SurfaceFormat;

/// Processor filter kinds (ProcAmp and enhancement filters).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKind {
    Brightness,
    Contrast,
    Hue,
    Saturation,
    NoiseReduction,
    EdgeEnhancement,
    AnamorphicScaling,
    StereoAdjustment,
}

impl FilterKind {
    /// All filter kinds, in hardware bit order.
    pub const ALL: [FilterKind; 8] = [
        Self::Brightness,
        Self::Contrast,
        Self::Hue,
        Self::Saturation,
        Self::NoiseReduction,
        Self::EdgeEnhancement,
        Self::AnamorphicScaling,
        Self::StereoAdjustment,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Brightness => "Brightness",
            Self::Contrast => "Contrast",
            Self::Hue => "Hue",
            Self::Saturation => "Saturation",
            Self::NoiseReduction => "Noise Reduction",
            Self::EdgeEnhancement => "Edge Enhancement",
            Self::AnamorphicScaling => "Anamorphic Scaling",
            Self::StereoAdjustment => "Stereo Adjustment",
        }
    }

    /// Bit advertising this filter in [`HwProcessorCaps::filter_caps`].
    pub const fn cap_bit(self) -> u32 {
        1 << self as u32
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Value range of a processor filter, as reported by the hardware.
///
/// The effective filter value is `value * multiplier`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterRange {
    pub minimum: i32,
    pub maximum: i32,
    pub default: i32,
    pub multiplier: f32,
}

/// Support state of a single processor filter.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterInfo {
    pub supported: bool,
    pub range: FilterRange,
}

/// Per-filter capability map, keyed by [`FilterKind`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterCaps([FilterInfo; FilterKind::COUNT]);

impl FilterCaps {
    pub fn get(&self, kind: FilterKind) -> &FilterInfo {
        &self.0[kind.index()]
    }

    pub fn set(&mut self, kind: FilterKind, info: FilterInfo) {
        self.0[kind.index()] = info;
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterKind, &FilterInfo)> {
        FilterKind::ALL.iter().map(|&kind| (kind, self.get(kind)))
    }
}

impl Default for FilterCaps {
    fn default() -> Self {
        Self([FilterInfo::default(); FilterKind::COUNT])
    }
}

/// Raw general capability bitfields of a video processor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HwProcessorCaps {
    /// Device-level capability flags.
    pub device_caps: u32,
    /// Feature capability flags.
    pub feature_caps: u32,
    /// Filter capability flags, one bit per [`FilterKind`].
    pub filter_caps: u32,
    /// Number of rate-conversion capability sets the processor exposes.
    pub rate_conversion_caps_count: u32,
}

/// Rate-conversion capability set of one processor index.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateConversionCaps {
    pub past_frames: u32,
    pub future_frames: u32,
    /// Deinterlace/frame-rate conversion capability flags.
    pub processor_caps: u32,
}

/// Immutable snapshot of the probed processor capabilities.
///
/// Produced by the capability prober. `valid` is false when the snapshot was
/// taken without an open enumerator; callers must check it before trusting
/// any other field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessorCapabilities {
    pub valid: bool,
    /// Index of the rate converter the caps were probed for.
    pub processor_index: u32,
    pub caps: HwProcessorCaps,
    pub rate_caps: RateConversionCaps,
    pub filters: FilterCaps,
    /// HDR10 metadata pass-through support (extended interface only).
    pub hdr10_metadata: bool,
}

/// Surface formats a processor accepts, split by usage.
///
/// Queried on demand so it always reflects the current enumerator; never
/// cached across calls.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorFormats {
    pub input: Vec<SurfaceFormat>,
    pub output: Vec<SurfaceFormat>,
    pub valid: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_bits_unique() {
        for (i, a) in FilterKind::ALL.iter().enumerate() {
            for b in FilterKind::ALL.iter().skip(i + 1) {
                assert_ne!(a.cap_bit(), b.cap_bit());
            }
        }
    }

    #[test]
    fn filter_bits_are_low_byte() {
        // Eight filters, one bit each, packed from bit 0.
        let mask: u32 = FilterKind::ALL.iter().map(|f| f.cap_bit()).sum();
        assert_eq!(mask, 0xFF);
    }

    #[test]
    fn filter_caps_default_unsupported() {
        let caps = FilterCaps::default();
        for (_, info) in caps.iter() {
            assert!(!info.supported);
        }
    }

    #[test]
    fn filter_caps_set_get() {
        let mut caps = FilterCaps::default();
        caps.set(
            FilterKind::Hue,
            FilterInfo {
                supported: true,
                range: FilterRange {
                    minimum: -180,
                    maximum: 180,
                    default: 0,
                    multiplier: 0.25,
                },
            },
        );
        assert!(caps.get(FilterKind::Hue).supported);
        assert!(!caps.get(FilterKind::Brightness).supported);
        assert_eq!(caps.get(FilterKind::Hue).range.maximum, 180);
    }

    #[test]
    fn default_snapshot_is_invalid() {
        let caps = ProcessorCapabilities::default();
        assert!(!caps.valid);
        assert!(!caps.hdr10_metadata);
        for (_, info) in caps.filters.iter() {
            assert!(!info.supported);
        }
    }

    #[test]
    fn default_formats_are_invalid_and_empty() {
        let formats = ProcessorFormats::default();
        assert!(!formats.valid);
        assert!(formats.input.is_empty());
        assert!(formats.output.is_empty());
    }
}
