//! Value types describing format/color-space conversion pairings.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::{ColorPrimaries, ColorSpace, SurfaceFormat, TransferCharacteristic};

/// One (input format, input color space) -> (output format, output color
/// space) pairing the processor may or may not support.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Conversion {
    pub input_format: SurfaceFormat,
    pub input_cs: ColorSpace,
    pub output_format: SurfaceFormat,
    pub output_cs: ColorSpace,
}

impl Conversion {
    pub fn new(
        input_format: SurfaceFormat,
        input_cs: ColorSpace,
        output_format: SurfaceFormat,
        output_cs: ColorSpace,
    ) -> Self {
        Self {
            input_format,
            input_cs,
            output_format,
            output_cs,
        }
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} -> {} / {}",
            self.input_format, self.input_cs, self.output_format, self.output_cs
        )
    }
}

/// Ordered conversion list. The order is the enumeration/priority order the
/// negotiation engine produced; consumers never re-sort it.
pub type Conversions = Vec<Conversion>;

/// Color metadata of a decoded video picture.
///
/// The decode pipeline hands these over as raw ITU-T H.273 codes plus the
/// usual range convention (0 = limited, 1 = full); the descriptor itself is
/// otherwise opaque to this crate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoPictureInfo {
    pub color_primaries: u32,
    pub color_transfer: u32,
    pub color_range: u32,
}

/// Parameters of a supported-conversions query.
///
/// Built once per query, never mutated afterwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SupportedConversionsArgs {
    pub primaries: ColorPrimaries,
    pub transfer: TransferCharacteristic,
    pub full_range: bool,
    /// Whether the render target wants HDR output.
    pub hdr_output: bool,
}

impl SupportedConversionsArgs {
    pub fn new(
        primaries: ColorPrimaries,
        transfer: TransferCharacteristic,
        full_range: bool,
        hdr_output: bool,
    ) -> Self {
        Self {
            primaries,
            transfer,
            full_range,
            hdr_output,
        }
    }

    /// Derive the query parameters from a decoded picture's color metadata.
    pub fn from_picture(picture: &VideoPictureInfo, hdr_output: bool) -> Self {
        Self {
            primaries: ColorPrimaries::from_code(picture.color_primaries),
            transfer: TransferCharacteristic::from_code(picture.color_transfer),
            full_range: picture.color_range == 1,
            hdr_output,
        }
    }

    /// True when the source material is HDR (BT.2020 + PQ/HLG).
    pub fn is_hdr_source(&self) -> bool {
        self.primaries == ColorPrimaries::Bt2020 && self.transfer.is_hdr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_display() {
        let conversion = Conversion::new(
            SurfaceFormat::Nv12,
            ColorSpace::BT709_STUDIO,
            SurfaceFormat::Bgra8,
            ColorSpace::SDR_DISPLAY,
        );
        assert_eq!(
            conversion.to_string(),
            "NV12 / BT.709 gamma2.2 limited -> BGRA8 / BT.709 gamma2.2 full"
        );
    }

    #[test]
    fn args_from_hdr10_picture() {
        // BT.2020 primaries (9), PQ transfer (16), limited range.
        let picture = VideoPictureInfo {
            color_primaries: 9,
            color_transfer: 16,
            color_range: 0,
        };
        let args = SupportedConversionsArgs::from_picture(&picture, true);
        assert_eq!(args.primaries, ColorPrimaries::Bt2020);
        assert_eq!(args.transfer, TransferCharacteristic::Pq);
        assert!(!args.full_range);
        assert!(args.hdr_output);
        assert!(args.is_hdr_source());
    }

    #[test]
    fn args_from_sdr_picture() {
        // BT.709 primaries/transfer (1), full range.
        let picture = VideoPictureInfo {
            color_primaries: 1,
            color_transfer: 1,
            color_range: 1,
        };
        let args = SupportedConversionsArgs::from_picture(&picture, false);
        assert_eq!(args.primaries, ColorPrimaries::Bt709);
        assert!(args.full_range);
        assert!(!args.is_hdr_source());
    }

    #[test]
    fn bt2020_sdr_is_not_hdr_source() {
        // BT.2020 primaries with an SDR transfer is wide-gamut SDR.
        let args = SupportedConversionsArgs::new(
            ColorPrimaries::Bt2020,
            TransferCharacteristic::Gamma22,
            false,
            false,
        );
        assert!(!args.is_hdr_source());
    }
}
