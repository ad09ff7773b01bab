//! Enumerator binding descriptors.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::SurfaceFormat;
use crate::types::Resolution;

/// The (width, height, input format) triple a processor enumerator is bound
/// to. The hardware validates the whole triple when the enumerator is opened.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDesc {
    pub width: u32,
    pub height: u32,
    pub input_format: SurfaceFormat,
}

impl ContentDesc {
    pub fn new(width: u32, height: u32, input_format: SurfaceFormat) -> Self {
        Self {
            width,
            height,
            input_format,
        }
    }

    pub fn resolution(self) -> Resolution {
        Resolution::new(self.width, self.height)
    }
}

impl fmt::Display for ContentDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} {}", self.width, self.height, self.input_format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desc_display() {
        let desc = ContentDesc::new(1920, 1080, SurfaceFormat::Nv12);
        assert_eq!(desc.to_string(), "1920x1080 NV12");
    }

    #[test]
    fn desc_resolution() {
        let desc = ContentDesc::new(3840, 2160, SurfaceFormat::P010);
        assert_eq!(desc.resolution(), Resolution::UHD);
    }
}
