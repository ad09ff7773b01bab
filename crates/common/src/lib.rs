//! `vproc-common` - Shared types, traits, and errors for the video
//! processor negotiator.
//!
//! This crate is the foundation the processor crate depends on. It defines
//! the core abstractions:
//!
//! - **Types**: `Resolution`, `ContentDesc` (enumerator binding)
//! - **Color**: `SurfaceFormat`, `ColorSpace` and its components
//! - **Caps**: `ProcessorCapabilities`, `FilterKind`, `ProcessorFormats`
//! - **Conversions**: `Conversion`, `SupportedConversionsArgs`
//! - **HW traits**: `VideoDevice`, `HwEnumerator`, `HwEnumeratorExt`
//!   (backend abstraction) and the opaque handle types
//! - **Errors**: `DeviceError` (thiserror-based, hardware boundary only)

pub mod caps;
pub mod color;
pub mod config;
pub mod conversion;
pub mod error;
pub mod hw;
pub mod types;

// Re-export commonly used items at crate root
pub use caps::{
    FilterCaps, FilterInfo, FilterKind, FilterRange, HwProcessorCaps, ProcessorCapabilities,
    ProcessorFormats, RateConversionCaps,
};
pub use color::{ColorPrimaries, ColorRange, ColorSpace, SurfaceFormat, TransferCharacteristic};
pub use config::ContentDesc;
pub use conversion::{Conversion, Conversions, SupportedConversionsArgs, VideoPictureInfo};
pub use error::DeviceError;
pub use hw::{
    FormatSupport, HwEnumerator, HwEnumeratorExt, InputViewDesc, InputViewHandle, OutputViewDesc,
    OutputViewHandle, ProcessorHandle, ResourceHandle, VideoDevice,
};
pub use types::Resolution;
