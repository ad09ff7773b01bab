//! Candidate sets and color-space mapping for the negotiation policies.
//!
//! Pure data and functions: the enumerator feeds these candidates to the
//! hardware check. The asymmetry between the SDR and HDR paths is
//! deliberate. Without the extended enumerator interface the definitive
//! conversion check does not exist, so SDR conversions are assumed to work
//! (every platform can render SDR) while HDR conversions are reported
//! unsupported (guessing wrong would light up a broken HDR path).

use vproc_common::{
    ColorPrimaries, ColorRange, ColorSpace, Conversion, SurfaceFormat, TransferCharacteristic,
};

/// Output surface formats of the standard (SDR) rendering path.
pub const RENDERING_OUTPUT_FORMATS: [SurfaceFormat; 2] =
    [SurfaceFormat::Bgra8, SurfaceFormat::Rgb10a2];

/// Output surface formats usable for HDR presentation (10 bit and up).
pub const HDR_OUTPUT_FORMATS: [SurfaceFormat; 2] =
    [SurfaceFormat::Rgb10a2, SurfaceFormat::Rgba16f];

/// Output color spaces of the standard rendering path.
pub const SDR_OUTPUT_COLOR_SPACES: [ColorSpace; 1] = [ColorSpace::SDR_DISPLAY];

/// Output color spaces for HDR10 presentation.
pub const HDR_OUTPUT_COLOR_SPACES: [ColorSpace; 1] = [ColorSpace::HDR10_DISPLAY];

/// Input color spaces an HDR source may be tagged with, for the given
/// source range. PQ first: it is the dominant HDR variant.
pub fn hdr_input_color_spaces(range: ColorRange) -> [ColorSpace; 2] {
    [
        ColorSpace::new(ColorPrimaries::Bt2020, TransferCharacteristic::Pq, range),
        ColorSpace::new(ColorPrimaries::Bt2020, TransferCharacteristic::Hlg, range),
    ]
}

/// Map a source's primaries/transfer/range triple to the nearest standard
/// video color space.
///
/// SDR sources are negotiated through the gamma 2.2 family regardless of
/// their coded transfer; PQ/HLG material never reaches this path (it
/// dispatches to the HDR policies instead).
pub fn sdr_input_color_space(
    primaries: ColorPrimaries,
    _transfer: TransferCharacteristic,
    range: ColorRange,
) -> ColorSpace {
    ColorSpace::new(primaries, TransferCharacteristic::Gamma22, range)
}

/// The fail-open membership test: conversions inside the standard SDR
/// rendering set are assumed supported when no definitive check exists.
pub fn is_standard_sdr_conversion(conversion: &Conversion) -> bool {
    RENDERING_OUTPUT_FORMATS.contains(&conversion.output_format)
        && SDR_OUTPUT_COLOR_SPACES.contains(&conversion.output_cs)
        && !conversion.input_cs.is_hdr()
}
