//! Hardware video-processing abstraction traits.
//!
//! These traits define the seam between the enumerator core and the GPU
//! backend that owns the actual driver objects. The core programs against
//! the traits only; backends hand out reference-counted trait objects and
//! opaque handles, never raw platform pointers.

use std::sync::Arc;

use crate::caps::{FilterKind, FilterRange, HwProcessorCaps, RateConversionCaps};
use crate::color::SurfaceFormat;
use crate::config::ContentDesc;
use crate::conversion::Conversion;
use crate::error::DeviceError;

/// External GPU device factory.
///
/// Implemented by the device subsystem. The device may come and go (device
/// loss, adapter change); its absence is a routine state, not an error.
pub trait VideoDevice: Send + Sync {
    /// Whether a usable GPU device currently exists.
    fn is_available(&self) -> bool;

    /// Open a processor enumerator bound to the given content description.
    fn open_enumerator(&self, desc: &ContentDesc) -> Result<Arc<dyn HwEnumerator>, DeviceError>;
}

/// The driver's processor-enumerator object for one content description.
///
/// All methods are read-only driver queries and safe to call concurrently.
/// The object stays valid for as long as a holder keeps the `Arc`, even
/// across a device loss; queries may then fail with a driver error.
pub trait HwEnumerator: Send + Sync {
    /// General capability bitfields of the processor.
    fn caps(&self) -> Result<HwProcessorCaps, DeviceError>;

    /// Rate-conversion caps of one processor index
    /// (`0..caps().rate_conversion_caps_count`).
    fn rate_conversion_caps(&self, index: u32) -> Result<RateConversionCaps, DeviceError>;

    /// Value range of a filter. Only meaningful when the matching
    /// [`FilterKind::cap_bit`] is set in [`HwProcessorCaps::filter_caps`].
    fn filter_range(&self, filter: FilterKind) -> Result<FilterRange, DeviceError>;

    /// Input/output usage support for a surface format.
    fn format_support(&self, format: SurfaceFormat) -> Result<FormatSupport, DeviceError>;

    /// The extended capability interface, when the platform/driver exposes
    /// it. Older platforms return `None`; HDR-aware queries must degrade
    /// per policy instead of failing.
    fn extended(&self) -> Option<Arc<dyn HwEnumeratorExt>>;

    /// Create a video processor for the given rate-conversion index.
    fn create_processor(&self, rate_conversion_index: u32)
        -> Result<ProcessorHandle, DeviceError>;

    /// Create an input view of a decode surface.
    fn create_input_view(
        &self,
        resource: &ResourceHandle,
        desc: &InputViewDesc,
    ) -> Result<InputViewHandle, DeviceError>;

    /// Create an output view of a render surface.
    fn create_output_view(
        &self,
        resource: &ResourceHandle,
        desc: &OutputViewDesc,
    ) -> Result<OutputViewHandle, DeviceError>;
}

/// Extended enumerator interface (capability-richer platforms only).
pub trait HwEnumeratorExt: Send + Sync {
    /// Definitive hardware check of a single conversion.
    fn check_format_conversion(&self, conversion: &Conversion) -> Result<bool, DeviceError>;

    /// Whether the processor passes HDR10 metadata through to the display.
    fn hdr10_metadata_supported(&self) -> Result<bool, DeviceError>;
}

/// Per-format usage support reported by the enumerator.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FormatSupport {
    pub input: bool,
    pub output: bool,
}

/// Opaque backend handle to a created video processor.
#[derive(Debug)]
pub struct ProcessorHandle {
    /// Backend-specific handle.
    pub handle: u64,
    /// Rate-conversion index the processor was created with.
    pub rate_conversion_index: u32,
    /// Backend identifier for dispatch.
    pub backend_id: u32,
}

/// Opaque backend handle to a surface owned by the caller.
#[derive(Copy, Clone, Debug)]
pub struct ResourceHandle {
    pub handle: u64,
    pub backend_id: u32,
}

/// Opaque backend handle to a processor input view.
#[derive(Debug)]
pub struct InputViewHandle {
    pub handle: u64,
    pub backend_id: u32,
}

/// Opaque backend handle to a processor output view.
#[derive(Debug)]
pub struct OutputViewHandle {
    pub handle: u64,
    pub backend_id: u32,
}

/// Descriptor for creating a processor input view.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InputViewDesc {
    pub mip_slice: u32,
    /// Index into a texture array (decoder surface pools).
    pub array_slice: u32,
}

/// Descriptor for creating a processor output view.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OutputViewDesc {
    pub mip_slice: u32,
}
