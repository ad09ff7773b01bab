//! `vproc-processor` - Hardware video-processor capability enumeration and
//! conversion negotiation.
//!
//! # Architecture
//!
//! [`ProcessorEnumerator`] sits between the rendering pipeline and a GPU
//! video-processing backend (the `VideoDevice`/`HwEnumerator` traits from
//! `vproc-common`). Given a source's pixel format and color metadata and a
//! render target's constraints, it answers which input -> output
//! (format, color space) conversions the hardware processor actually
//! supports, probes the processor's capability set, and hands out the
//! handles needed to create the processor and its views.
//!
//! The hardware processor is allowed to be absent at any time (no device
//! yet, device lost): every query then returns a safe default instead of an
//! error, and the enumerator re-opens itself when the device subsystem
//! reports a new device.
//!
//! ## Module Overview
//!
//! - [`enumerator`] - lifecycle, negotiation, and capability probing
//! - [`policy`] - candidate color-space/format sets per negotiation policy
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use vproc_common::{SupportedConversionsArgs, SurfaceFormat, VideoPictureInfo};
//! use vproc_processor::ProcessorEnumerator;
//!
//! let enumerator = ProcessorEnumerator::new(device);
//! if enumerator.open(1920, 1080, SurfaceFormat::Nv12) {
//!     let caps = enumerator.probe_processor_caps();
//!     let args = SupportedConversionsArgs::from_picture(&picture, hdr_display);
//!     let conversions = enumerator.supported_conversions(&args);
//!     // Pick the first conversion and create the processor...
//! }
//! ```

pub mod enumerator;
pub mod policy;

pub use enumerator::ProcessorEnumerator;
