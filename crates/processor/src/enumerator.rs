//! Processor enumerator: device-resource lifecycle, conversion negotiation,
//! and capability probing.
//!
//! `ProcessorEnumerator` owns the hardware enumerator handle pair for one
//! (width, height, input format) binding and answers the rendering
//! pipeline's "can the processor do this conversion" questions. Two call
//! sites use it concurrently: the rendering pipeline issuing queries and the
//! device subsystem delivering created/lost notifications from its own
//! thread. A single mutex serializes handle access.
//!
//! Lock discipline: the lock is never held across a call into the
//! [`VideoDevice`] factory (the device subsystem takes its own locks during
//! enumerator creation, and holding ours would invert the order its
//! notification path uses). The open path snapshots the binding and an epoch
//! counter, calls the factory unlocked, and installs the result only if the
//! epoch is unchanged. Driver queries run on `Arc` snapshots taken under the
//! lock, so a concurrent teardown can never free an object mid-call.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use vproc_common::{
    ColorPrimaries, ColorRange, ColorSpace, ContentDesc, Conversion, Conversions, FilterCaps,
    FilterInfo, FilterKind, FormatSupport, HwEnumerator, HwEnumeratorExt, InputViewDesc,
    InputViewHandle, OutputViewDesc, OutputViewHandle, ProcessorCapabilities, ProcessorFormats,
    ProcessorHandle, ResourceHandle, SupportedConversionsArgs, SurfaceFormat,
    TransferCharacteristic, VideoDevice,
};

use crate::policy;

/// State guarded by the lifecycle lock.
struct EnumeratorState {
    /// Bound content description; survives device loss so a later
    /// device-created notification can restore the enumerator.
    desc: Option<ContentDesc>,
    hw: Option<Arc<dyn HwEnumerator>>,
    ext: Option<Arc<dyn HwEnumeratorExt>>,
    /// Bumped on every open/close/loss. An open that raced a lifecycle
    /// change detects the stale epoch and discards its result.
    epoch: u64,
}

/// Hardware video-processor capability enumerator and conversion negotiator.
///
/// Queries made while no hardware enumerator is open return safe defaults
/// (empty lists, `false`, invalid snapshots); a missing processor is a
/// routine transient state during device loss, never an error.
pub struct ProcessorEnumerator {
    device: Arc<dyn VideoDevice>,
    state: Mutex<EnumeratorState>,
}

impl fmt::Debug for ProcessorEnumerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ProcessorEnumerator")
            .field("desc", &state.desc)
            .field("initialized", &state.hw.is_some())
            .field("extended", &state.ext.is_some())
            .finish()
    }
}

impl ProcessorEnumerator {
    pub fn new(device: Arc<dyn VideoDevice>) -> Self {
        Self {
            device,
            state: Mutex::new(EnumeratorState {
                desc: None,
                hw: None,
                ext: None,
                epoch: 0,
            }),
        }
    }

    // -- Lifecycle --

    /// Bind the enumerator to a content description and try to open it.
    ///
    /// Returns false when the hardware open did not happen (no device yet,
    /// or the driver rejected the parameters). Failure is non-fatal: the
    /// binding is kept and the next device-created notification retries.
    pub fn open(&self, width: u32, height: u32, input_format: SurfaceFormat) -> bool {
        if width == 0 || height == 0 {
            warn!(width, height, "rejecting enumerator open with empty dimensions");
            return false;
        }
        let desc = ContentDesc::new(width, height, input_format);
        let epoch = {
            let mut state = self.state.lock();
            state.hw = None;
            state.ext = None;
            state.desc = Some(desc);
            state.epoch += 1;
            state.epoch
        };
        if !self.device.is_available() {
            debug!(%desc, "no GPU device yet, enumerator open deferred");
            return false;
        }
        self.open_enumerator(desc, epoch)
    }

    /// Release the enumerator and clear the binding. Idempotent.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.hw = None;
        state.ext = None;
        state.desc = None;
        state.epoch += 1;
    }

    /// Device subsystem notification: a new device is usable.
    pub fn on_device_created(&self) {
        let binding = {
            let mut state = self.state.lock();
            match state.desc {
                Some(desc) => {
                    state.hw = None;
                    state.ext = None;
                    state.epoch += 1;
                    Some((desc, state.epoch))
                }
                None => None,
            }
        };
        let Some((desc, epoch)) = binding else {
            return;
        };
        self.open_enumerator(desc, epoch);
    }

    /// Device subsystem notification: the device is going away.
    ///
    /// Keeps the binding so [`ProcessorEnumerator::on_device_created`] can
    /// restore the enumerator, unless this is the final teardown (where the
    /// owner is expected to call [`ProcessorEnumerator::close`] anyway).
    pub fn on_device_lost(&self, is_final: bool) {
        let mut state = self.state.lock();
        state.hw = None;
        state.ext = None;
        state.epoch += 1;
        if is_final {
            debug!("device teardown, enumerator released");
        } else {
            debug!("device lost, enumerator released until re-creation");
        }
    }

    /// True while a hardware enumerator is open.
    pub fn is_initialized(&self) -> bool {
        self.state.lock().hw.is_some()
    }

    /// True when the last open also obtained the extended capability
    /// interface (required for HDR negotiation and the definitive
    /// conversion check).
    pub fn is_extended_available(&self) -> bool {
        self.state.lock().ext.is_some()
    }

    /// Open the hardware enumerator for `desc`.
    ///
    /// Called without the state lock held. The result is installed only if
    /// `epoch` still matches; otherwise a concurrent close/open/device-loss
    /// won the race and the fresh handles are dropped.
    fn open_enumerator(&self, desc: ContentDesc, epoch: u64) -> bool {
        let hw = match self.device.open_enumerator(&desc) {
            Ok(hw) => hw,
            Err(e) => {
                warn!(%desc, error = %e, "hardware enumerator open failed");
                return false;
            }
        };
        // The extended interface is optional; older platforms lack it.
        let ext = hw.extended();
        let has_ext = ext.is_some();

        let mut state = self.state.lock();
        if state.epoch != epoch {
            debug!(%desc, "discarding enumerator opened for a stale binding");
            return false;
        }
        state.hw = Some(hw);
        state.ext = ext;
        info!(%desc, extended = has_ext, "hardware enumerator open");
        true
    }

    /// Snapshot the binding and handles in one lock acquisition, so each
    /// query sees a consistent view.
    fn snapshot(
        &self,
    ) -> (
        Option<ContentDesc>,
        Option<Arc<dyn HwEnumerator>>,
        Option<Arc<dyn HwEnumeratorExt>>,
    ) {
        let state = self.state.lock();
        (state.desc, state.hw.clone(), state.ext.clone())
    }

    // -- Capability probing --

    /// Probe the full capability set of the processor.
    ///
    /// Returns a snapshot with `valid = false` when the enumerator is not
    /// open or a driver query fails; callers must check the flag before
    /// trusting any field.
    pub fn probe_processor_caps(&self) -> ProcessorCapabilities {
        let (_, hw, ext) = self.snapshot();
        let Some(hw) = hw else {
            return ProcessorCapabilities::default();
        };

        let caps = match hw.caps() {
            Ok(caps) => caps,
            Err(e) => {
                warn!(error = %e, "processor caps query failed");
                return ProcessorCapabilities::default();
            }
        };

        // Probe the default rate converter: the first index the enumerator
        // exposes.
        let processor_index = 0;
        let rate_caps = match hw.rate_conversion_caps(processor_index) {
            Ok(rate_caps) => rate_caps,
            Err(e) => {
                warn!(processor_index, error = %e, "rate conversion caps query failed");
                return ProcessorCapabilities::default();
            }
        };

        let mut filters = FilterCaps::default();
        for kind in FilterKind::ALL {
            if caps.filter_caps & kind.cap_bit() == 0 {
                continue;
            }
            match hw.filter_range(kind) {
                Ok(range) => filters.set(
                    kind,
                    FilterInfo {
                        supported: true,
                        range,
                    },
                ),
                Err(e) => {
                    warn!(filter = kind.display_name(), error = %e, "filter range query failed")
                }
            }
        }

        let hdr10_metadata = match &ext {
            Some(ext) => ext.hdr10_metadata_supported().unwrap_or_else(|e| {
                warn!(error = %e, "HDR10 metadata support query failed");
                false
            }),
            None => false,
        };

        ProcessorCapabilities {
            valid: true,
            processor_index,
            caps,
            rate_caps,
            filters,
            hdr10_metadata,
        }
    }

    // -- Format support --

    /// The surface formats the processor currently accepts, split by usage.
    /// Queried fresh on every call; an invalid result means the enumerator
    /// is not open or the driver failed.
    pub fn processor_formats(&self) -> ProcessorFormats {
        let (_, hw, _) = self.snapshot();
        let Some(hw) = hw else {
            return ProcessorFormats::default();
        };

        let mut formats = ProcessorFormats {
            valid: true,
            ..ProcessorFormats::default()
        };
        for format in SurfaceFormat::ALL {
            match hw.format_support(format) {
                Ok(support) => {
                    if support.input {
                        formats.input.push(format);
                    }
                    if support.output {
                        formats.output.push(format);
                    }
                }
                Err(e) => {
                    warn!(%format, error = %e, "format support query failed");
                    return ProcessorFormats::default();
                }
            }
        }
        formats
    }

    /// RGB subset of the supported output formats.
    pub fn rgb_output_formats(&self) -> Vec<SurfaceFormat> {
        self.processor_formats()
            .output
            .into_iter()
            .filter(|format| format.is_rgb())
            .collect()
    }

    /// Whether the processor accepts `format` as input. False while the
    /// enumerator is not open.
    pub fn is_format_supported_input(&self, format: SurfaceFormat) -> bool {
        self.format_support(format).input
    }

    /// Whether the processor accepts `format` as output. False while the
    /// enumerator is not open.
    pub fn is_format_supported_output(&self, format: SurfaceFormat) -> bool {
        self.format_support(format).output
    }

    fn format_support(&self, format: SurfaceFormat) -> FormatSupport {
        let (_, hw, _) = self.snapshot();
        let Some(hw) = hw else {
            return FormatSupport::default();
        };
        hw.format_support(format).unwrap_or_else(|e| {
            warn!(%format, error = %e, "format support query failed");
            FormatSupport::default()
        })
    }

    // -- Conversion negotiation --

    /// The conversions the processor supports for the given source metadata
    /// and output intent.
    pub fn supported_conversions(&self, args: &SupportedConversionsArgs) -> Conversions {
        if args.is_hdr_source() {
            if args.hdr_output {
                self.query_hdr_conversions(args.full_range)
            } else {
                self.query_hdr_to_sdr_conversions(args.full_range)
            }
        } else {
            self.query_sdr_conversions(args.full_range, args.primaries, args.transfer)
        }
    }

    /// Conversions for playing HDR material as HDR.
    ///
    /// Requires the extended interface; without it the result is empty
    /// (fail closed) rather than guessed.
    pub fn query_hdr_conversions(&self, is_source_full_range: bool) -> Conversions {
        let (desc, hw, ext) = self.snapshot();
        let (Some(desc), Some(_hw)) = (desc, hw) else {
            return Conversions::new();
        };
        let Some(ext) = ext else {
            debug!("extended enumerator unavailable, no HDR conversions");
            return Conversions::new();
        };

        let range = Self::range_of(is_source_full_range);
        Self::list_conversions(
            &ext,
            desc.input_format,
            &policy::hdr_input_color_spaces(range),
            &policy::HDR_OUTPUT_COLOR_SPACES,
            &policy::HDR_OUTPUT_FORMATS,
        )
    }

    /// Conversions for playing HDR material as SDR.
    ///
    /// The input color spaces still reflect the HDR source, so downstream
    /// tonemapping receives correct metadata; the outputs are the SDR
    /// rendering set. Requires the extended interface (fail closed).
    pub fn query_hdr_to_sdr_conversions(&self, is_source_full_range: bool) -> Conversions {
        let (desc, hw, ext) = self.snapshot();
        let (Some(desc), Some(_hw)) = (desc, hw) else {
            return Conversions::new();
        };
        let Some(ext) = ext else {
            debug!("extended enumerator unavailable, no HDR-to-SDR conversions");
            return Conversions::new();
        };

        let range = Self::range_of(is_source_full_range);
        Self::list_conversions(
            &ext,
            desc.input_format,
            &policy::hdr_input_color_spaces(range),
            &policy::SDR_OUTPUT_COLOR_SPACES,
            &policy::RENDERING_OUTPUT_FORMATS,
        )
    }

    /// Conversions for SDR material.
    ///
    /// On platforms without the extended interface the full candidate set is
    /// assumed supported (fail open): SDR rendering predates the definitive
    /// check and has always worked there.
    pub fn query_sdr_conversions(
        &self,
        is_source_full_range: bool,
        primaries: ColorPrimaries,
        transfer: TransferCharacteristic,
    ) -> Conversions {
        let (desc, hw, ext) = self.snapshot();
        let (Some(desc), Some(_hw)) = (desc, hw) else {
            return Conversions::new();
        };

        let range = Self::range_of(is_source_full_range);
        let input_cs = policy::sdr_input_color_space(primaries, transfer, range);

        match ext {
            Some(ext) => Self::list_conversions(
                &ext,
                desc.input_format,
                &[input_cs],
                &policy::SDR_OUTPUT_COLOR_SPACES,
                &policy::RENDERING_OUTPUT_FORMATS,
            ),
            None => {
                let mut conversions = Conversions::new();
                for &output_cs in &policy::SDR_OUTPUT_COLOR_SPACES {
                    for &output_format in &policy::RENDERING_OUTPUT_FORMATS {
                        conversions.push(Conversion::new(
                            desc.input_format,
                            input_cs,
                            output_format,
                            output_cs,
                        ));
                    }
                }
                conversions
            }
        }
    }

    /// Check a single conversion.
    ///
    /// Delegates to the extended interface when present. Without it
    /// (including while fully uninitialized) the conservative default
    /// applies: supported iff the combination lies within the standard SDR
    /// rendering set.
    pub fn check_conversion(
        &self,
        input_format: SurfaceFormat,
        input_cs: ColorSpace,
        output_format: SurfaceFormat,
        output_cs: ColorSpace,
    ) -> bool {
        let conversion = Conversion::new(input_format, input_cs, output_format, output_cs);
        let (_, _, ext) = self.snapshot();
        match ext {
            Some(ext) => ext.check_format_conversion(&conversion).unwrap_or_else(|e| {
                warn!(%conversion, error = %e, "conversion check failed");
                false
            }),
            None => policy::is_standard_sdr_conversion(&conversion),
        }
    }

    /// Iterate all combinations of the candidate sets and keep the ones the
    /// hardware reports as supported.
    ///
    /// Result order is part of the contract: input color spaces (outer),
    /// output color spaces (middle), output formats (inner). Diagnostics
    /// rely on it being stable.
    fn list_conversions(
        ext: &Arc<dyn HwEnumeratorExt>,
        input_format: SurfaceFormat,
        input_css: &[ColorSpace],
        output_css: &[ColorSpace],
        output_formats: &[SurfaceFormat],
    ) -> Conversions {
        let mut conversions = Conversions::new();
        for &input_cs in input_css {
            for &output_cs in output_css {
                for &output_format in output_formats {
                    let conversion =
                        Conversion::new(input_format, input_cs, output_format, output_cs);
                    let supported =
                        ext.check_format_conversion(&conversion).unwrap_or_else(|e| {
                            warn!(%conversion, error = %e, "conversion check failed");
                            false
                        });
                    if supported {
                        conversions.push(conversion);
                    }
                }
            }
        }
        conversions
    }

    fn range_of(is_full: bool) -> ColorRange {
        if is_full {
            ColorRange::Full
        } else {
            ColorRange::Limited
        }
    }

    // -- Diagnostics --

    /// Log the processor's format lists and every conversion it supports
    /// for `input_format`, under both limited and full source-range
    /// assumptions. Side effect only.
    ///
    /// `input_native_cs` is the color space a direct mapping of the source
    /// metadata would give, without any negotiation.
    pub fn log_supported_conversions(
        &self,
        input_format: SurfaceFormat,
        input_native_cs: ColorSpace,
    ) {
        let (_, hw, ext) = self.snapshot();
        if hw.is_none() {
            debug!("enumerator not initialized, no conversions to log");
            return;
        }

        let formats = self.processor_formats();
        debug!(
            input = %Self::format_list(&formats.input),
            output = %Self::format_list(&formats.output),
            "processor surface formats"
        );

        let Some(ext) = ext else {
            debug!(%input_format, "extended enumerator unavailable, conversion support cannot be enumerated");
            return;
        };

        // Wide candidate sets: both output paths, deduplicated.
        let mut output_css: Vec<ColorSpace> = Vec::new();
        output_css.extend(policy::SDR_OUTPUT_COLOR_SPACES);
        output_css.extend(policy::HDR_OUTPUT_COLOR_SPACES);
        let mut output_formats: Vec<SurfaceFormat> = Vec::new();
        for format in policy::RENDERING_OUTPUT_FORMATS
            .into_iter()
            .chain(policy::HDR_OUTPUT_FORMATS)
        {
            if !output_formats.contains(&format) {
                output_formats.push(format);
            }
        }

        for range in [ColorRange::Limited, ColorRange::Full] {
            let input_cs = input_native_cs.with_range(range);
            let input_css: Vec<ColorSpace> = if input_cs.is_hdr() {
                policy::hdr_input_color_spaces(range).to_vec()
            } else {
                vec![input_cs]
            };

            let conversions = Self::list_conversions(
                &ext,
                input_format,
                &input_css,
                &output_css,
                &output_formats,
            );
            debug!(
                %input_format,
                %range,
                count = conversions.len(),
                "supported processor conversions"
            );
            for conversion in &conversions {
                debug!(%conversion, "supported");
            }
        }
    }

    fn format_list(formats: &[SurfaceFormat]) -> String {
        formats
            .iter()
            .map(|format| format.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    // -- Processor and view creation --

    /// Create a video processor for the given rate-conversion index.
    /// None when the enumerator is not open or the driver refuses.
    pub fn create_video_processor(&self, rate_conversion_index: u32) -> Option<ProcessorHandle> {
        let (_, hw, _) = self.snapshot();
        let Some(hw) = hw else {
            warn!("cannot create video processor, enumerator not initialized");
            return None;
        };
        match hw.create_processor(rate_conversion_index) {
            Ok(processor) => Some(processor),
            Err(e) => {
                warn!(rate_conversion_index, error = %e, "video processor creation failed");
                None
            }
        }
    }

    /// Create an input view of a decode surface for this enumerator's
    /// processor family.
    pub fn create_video_processor_input_view(
        &self,
        resource: &ResourceHandle,
        desc: &InputViewDesc,
    ) -> Option<InputViewHandle> {
        let (_, hw, _) = self.snapshot();
        let Some(hw) = hw else {
            warn!("cannot create input view, enumerator not initialized");
            return None;
        };
        match hw.create_input_view(resource, desc) {
            Ok(view) => Some(view),
            Err(e) => {
                warn!(error = %e, "input view creation failed");
                None
            }
        }
    }

    /// Create an output view of a render surface for this enumerator's
    /// processor family.
    pub fn create_video_processor_output_view(
        &self,
        resource: &ResourceHandle,
        desc: &OutputViewDesc,
    ) -> Option<OutputViewHandle> {
        let (_, hw, _) = self.snapshot();
        let Some(hw) = hw else {
            warn!("cannot create output view, enumerator not initialized");
            return None;
        };
        match hw.create_output_view(resource, desc) {
            Ok(view) => Some(view),
            Err(e) => {
                warn!(error = %e, "output view creation failed");
                None
            }
        }
    }
}
