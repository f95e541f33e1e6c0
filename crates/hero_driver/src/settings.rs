//! Driver settings, loaded from an optional JSON file.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chaos_order::breakpoint::{Breakpoint, BreakpointConfigs};
use chaos_order::shapes::ContainerSize;
use serde::{Deserialize, Serialize};

use crate::error::DriverError;

pub const MAX_FPS: u32 = 240;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverSettings {
    /// Frame rate of the driver's display clock.
    pub fps: u32,
    /// Initial viewport width used to pick the breakpoint.
    pub viewport_width: u32,
    /// Initial workspace size. Derived from the breakpoint when absent.
    pub container: Option<ContainerSize>,
    pub reduced_motion: bool,
    /// Include idle jitter offsets in every frame until complete.
    pub emit_jitter: bool,
    /// Host has a touch screen; enables the "tap to organize" hint.
    pub touch_device: bool,
    pub configs: BreakpointConfigs,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            fps: 60,
            viewport_width: 1280,
            container: None,
            reduced_motion: false,
            emit_jitter: false,
            touch_device: false,
            configs: BreakpointConfigs::default(),
        }
    }
}

impl DriverSettings {
    /// Read settings from `path`. A missing file yields the defaults only
    /// when `required` is false.
    pub fn load(path: &Path, required: bool) -> Result<Self, DriverError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound && !required => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(DriverError::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let settings: Self = serde_json::from_str(&text).map_err(|source| DriverError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), DriverError> {
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(DriverError::InvalidConfig("fps must be in 1..=240"));
        }
        if let Some(c) = self.container {
            if !c.width.is_finite() || !c.height.is_finite() || c.width < 0.0 || c.height < 0.0 {
                return Err(DriverError::InvalidConfig("container must be finite and non-negative"));
            }
        }
        self.configs.validate().map_err(DriverError::InvalidConfig)
    }

    /// Workspace size to start with: the configured one, or the viewport
    /// width by the breakpoint's workspace height.
    pub fn initial_container(&self) -> ContainerSize {
        self.container.unwrap_or_else(|| {
            let bp = Breakpoint::from_viewport_width(self.viewport_width);
            ContainerSize::new(self.viewport_width as f32, bp.workspace_height())
        })
    }

    pub fn frame_millis(&self) -> u64 {
        (1000 / self.fps.clamp(1, MAX_FPS)).max(1) as u64
    }
}
