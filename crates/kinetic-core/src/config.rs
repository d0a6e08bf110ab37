use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::motion::CubicBezierEase;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// How a release chooses its destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollMode {
    /// Continuous scrolling, flings project along the release velocity
    Free,
    /// Flings and wheel steps snap to whole pages
    #[default]
    Paging,
}

/// Which pointer axis drives the offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Page shown when a view first gets a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultPage {
    #[default]
    First,
    Last,
    Custom(u32),
}

/// Scroll physics configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Free scrolling or page snapping
    #[serde(default)]
    pub mode: ScrollMode,
    /// Axis the pointer is read along
    #[serde(default)]
    pub orientation: Orientation,
    /// Page size in offset units (0 = use the viewport size)
    #[serde(default)]
    pub page_size: f64,
    /// Pointer travel before a press becomes a drag
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: f64,
    /// Release speed (units/s) above which a paging fling advances a page
    #[serde(default = "default_fling_velocity_threshold")]
    pub fling_velocity_threshold: f64,
    /// Seconds of release velocity projected in free mode
    #[serde(default = "default_fling_momentum_factor")]
    pub fling_momentum_factor: f64,
    /// Accept pointer drags
    #[serde(default = "default_true")]
    pub drag_enabled: bool,
    /// Accept mouse wheel input
    #[serde(default = "default_true")]
    pub wheel_enabled: bool,
    /// Page applied on the first layout
    #[serde(default)]
    pub default_page: DefaultPage,
    /// Overscroll damping constant (smaller is stiffer)
    #[serde(default = "default_elastic_damping")]
    pub elastic_damping: f64,
    /// Offset change per wheel notch in free mode
    #[serde(default = "default_wheel_step")]
    pub wheel_step: f64,
    /// Wheel animation duration in free mode
    #[serde(default = "default_wheel_duration")]
    pub wheel_duration_ms: f64,
    /// Wheel animation duration in paging mode
    #[serde(default = "default_wheel_page_duration")]
    pub wheel_page_duration_ms: f64,
    /// Boundary spring-back duration
    #[serde(default = "default_spring_duration")]
    pub spring_duration_ms: f64,
    /// Programmatic scroll duration
    #[serde(default = "default_scroll_duration")]
    pub scroll_duration_ms: f64,
    /// Shortest fling animation
    #[serde(default = "default_min_fling_duration")]
    pub min_fling_duration_ms: f64,
    /// Longest fling animation
    #[serde(default = "default_max_fling_duration")]
    pub max_fling_duration_ms: f64,
    /// Fling duration per unit of travel, before clamping
    #[serde(default = "default_duration_per_unit")]
    pub duration_per_unit: f64,
    /// Curve for flings, page snaps and programmatic scrolls
    #[serde(default = "default_friction_curve")]
    pub friction: CubicBezierEase,
    /// Curve for boundary spring-back
    #[serde(default = "default_spring_curve")]
    pub spring: CubicBezierEase,
    /// Curve for free-mode wheel steps
    #[serde(default = "default_wheel_curve")]
    pub wheel: CubicBezierEase,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            mode: ScrollMode::default(),
            orientation: Orientation::default(),
            page_size: 0.0,
            drag_threshold: default_drag_threshold(),
            fling_velocity_threshold: default_fling_velocity_threshold(),
            fling_momentum_factor: default_fling_momentum_factor(),
            drag_enabled: default_true(),
            wheel_enabled: default_true(),
            default_page: DefaultPage::default(),
            elastic_damping: default_elastic_damping(),
            wheel_step: default_wheel_step(),
            wheel_duration_ms: default_wheel_duration(),
            wheel_page_duration_ms: default_wheel_page_duration(),
            spring_duration_ms: default_spring_duration(),
            scroll_duration_ms: default_scroll_duration(),
            min_fling_duration_ms: default_min_fling_duration(),
            max_fling_duration_ms: default_max_fling_duration(),
            duration_per_unit: default_duration_per_unit(),
            friction: default_friction_curve(),
            spring: default_spring_curve(),
            wheel: default_wheel_curve(),
        }
    }
}

impl ScrollConfig {
    /// Page size actually used: the configured one, else the viewport, else 1
    pub fn effective_page_size(&self, viewport_size: f64) -> f64 {
        let size = if self.page_size > 0.0 {
            self.page_size
        } else {
            viewport_size
        };
        if size > 0.0 {
            size
        } else {
            1.0
        }
    }

    /// Fling duration for a travel of `distance` units
    pub fn fling_duration_ms(&self, distance: f64) -> f64 {
        let min = self.min_fling_duration_ms;
        let max = self.max_fling_duration_ms.max(min);
        (distance.abs() * self.duration_per_unit).clamp(min, max)
    }

    /// Wheel step curve and duration for the current mode
    pub fn wheel_motion(&self) -> (CubicBezierEase, f64) {
        match self.mode {
            ScrollMode::Free => (self.wheel, self.wheel_duration_ms),
            ScrollMode::Paging => (self.friction, self.wheel_page_duration_ms),
        }
    }
}

/// Terminal host settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Idle tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while something is moving
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Offset units per terminal cell
    #[serde(default = "default_cell_scale")]
    pub cell_scale: f64,
    /// Number of demo pages
    #[serde(default = "default_pages")]
    pub pages: u32,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            cell_scale: default_cell_scale(),
            pages: default_pages(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_drag_threshold() -> f64 {
    6.0
}

fn default_fling_velocity_threshold() -> f64 {
    600.0
}

fn default_fling_momentum_factor() -> f64 {
    0.4
}

fn default_elastic_damping() -> f64 {
    crate::motion::elastic::DEFAULT_DAMPING
}

fn default_wheel_step() -> f64 {
    100.0
}

fn default_wheel_duration() -> f64 {
    300.0
}

fn default_wheel_page_duration() -> f64 {
    500.0
}

fn default_spring_duration() -> f64 {
    500.0
}

fn default_scroll_duration() -> f64 {
    500.0
}

fn default_min_fling_duration() -> f64 {
    400.0
}

fn default_max_fling_duration() -> f64 {
    800.0
}

fn default_duration_per_unit() -> f64 {
    1.5
}

fn default_friction_curve() -> CubicBezierEase {
    CubicBezierEase::FRICTION
}

fn default_spring_curve() -> CubicBezierEase {
    CubicBezierEase::SMOOTH
}

fn default_wheel_curve() -> CubicBezierEase {
    CubicBezierEase::EASE_OUT
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_cell_scale() -> f64 {
    8.0 // roughly one terminal column in pixels
}

fn default_pages() -> u32 {
    6
}

impl AppConfig {
    /// Load configuration from the default location or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, defaults if the file does not exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Write configuration to `path`, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/kinetic/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("kinetic")
            .join("config.toml")
    }
}
