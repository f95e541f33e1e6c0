//! Viewport breakpoints and the per-breakpoint shape set / tuning.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ProximityConfig;
use crate::shapes::{Shape, SHAPES};

pub const TABLET_MIN_WIDTH: u32 = 768;
pub const DESKTOP_MIN_WIDTH: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum Breakpoint {
    Mobile,
    Tablet,
    #[default]
    Desktop,
}

impl Breakpoint {
    pub fn from_viewport_width(width: u32) -> Self {
        if width < TABLET_MIN_WIDTH {
            Breakpoint::Mobile
        } else if width < DESKTOP_MIN_WIDTH {
            Breakpoint::Tablet
        } else {
            Breakpoint::Desktop
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Breakpoint::Mobile => "mobile",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Desktop => "desktop",
        }
    }

    pub fn all() -> &'static [Breakpoint] {
        &[Breakpoint::Mobile, Breakpoint::Tablet, Breakpoint::Desktop]
    }

    pub fn includes(self, shape: &Shape) -> bool {
        match self {
            Breakpoint::Desktop => true,
            Breakpoint::Tablet => shape.tablet_visible,
            Breakpoint::Mobile => shape.mobile_visible,
        }
    }

    /// Shapes on screen at this breakpoint, in table order.
    pub fn visible_shapes(self) -> Vec<Shape> {
        SHAPES.iter().copied().filter(|s| self.includes(s)).collect()
    }

    /// Influence radius in pixels. Only the radius varies; mobile uses a
    /// touch-sized radius.
    pub fn influence_radius(self) -> f32 {
        match self {
            Breakpoint::Desktop => 150.0,
            Breakpoint::Tablet => 120.0,
            Breakpoint::Mobile => 150.0,
        }
    }

    pub fn config(self) -> ProximityConfig {
        ProximityConfig::default().with_influence_radius(self.influence_radius())
    }

    /// Height of the hero workspace in pixels.
    pub fn workspace_height(self) -> f32 {
        match self {
            Breakpoint::Mobile => 300.0,
            Breakpoint::Tablet | Breakpoint::Desktop => 400.0,
        }
    }
}

/// Tuning per breakpoint. Missing entries fall back to [`Breakpoint::config`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct BreakpointConfigs {
    pub mobile: ProximityConfig,
    pub tablet: ProximityConfig,
    pub desktop: ProximityConfig,
}

impl Default for BreakpointConfigs {
    fn default() -> Self {
        Self {
            mobile: Breakpoint::Mobile.config(),
            tablet: Breakpoint::Tablet.config(),
            desktop: Breakpoint::Desktop.config(),
        }
    }
}

impl BreakpointConfigs {
    pub fn get(&self, bp: Breakpoint) -> ProximityConfig {
        match bp {
            Breakpoint::Mobile => self.mobile,
            Breakpoint::Tablet => self.tablet,
            Breakpoint::Desktop => self.desktop,
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        self.mobile.validate()?;
        self.tablet.validate()?;
        self.desktop.validate()
    }
}
