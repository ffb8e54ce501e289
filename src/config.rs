use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { title: "glTF Testbench".to_string(), width: 1280, height: 720, vsync: true, fullscreen: false }
    }
}

/// Unscaled layout constants; [`crate::overlay::OverlayLayout`] multiplies
/// them by the DPI scale factor once at startup.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub bar_height: f32,
    pub button_width: f32,
    pub list_width: f32,
    pub list_item_height: f32,
    pub font_size: f32,
}

impl OverlayConfig {
    const fn default_bar_height() -> f32 {
        25.0
    }

    const fn default_button_width() -> f32 {
        50.0
    }

    const fn default_list_width() -> f32 {
        150.0
    }

    const fn default_list_item_height() -> f32 {
        25.0
    }

    const fn default_font_size() -> f32 {
        14.0
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            bar_height: Self::default_bar_height(),
            button_width: Self::default_button_width(),
            list_width: Self::default_list_width(),
            list_item_height: Self::default_list_item_height(),
            font_size: Self::default_font_size(),
        }
    }
}

/// Platform capabilities, resolved once at startup and injected into the
/// overlay. Defaults come from the compile target; the config file can
/// override each one.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PlatformCaps {
    /// Rewrite local sample locators with a `file://` scheme marker.
    pub local_file_scheme: bool,
    /// Render an "Open" button backed by the native file dialog.
    pub native_file_dialog: bool,
    /// Keep the overlay hidden on constrained targets.
    pub suppress_overlay: bool,
}

impl PlatformCaps {
    const fn default_local_file_scheme() -> bool {
        cfg!(not(any(target_os = "android", target_family = "wasm")))
    }

    const fn default_native_file_dialog() -> bool {
        cfg!(any(target_os = "windows", target_os = "macos", target_os = "linux"))
    }

    const fn default_suppress_overlay() -> bool {
        cfg!(target_family = "wasm")
    }
}

impl Default for PlatformCaps {
    fn default() -> Self {
        Self {
            local_file_scheme: Self::default_local_file_scheme(),
            native_file_dialog: Self::default_native_file_dialog(),
            suppress_overlay: Self::default_suppress_overlay(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SampleSetConfig {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub overlay: OverlayConfig,
    pub platform: PlatformCaps,
    pub sample_sets: Vec<SampleSetConfig>,
    pub start_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AppConfigOverrides {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub vsync: Option<bool>,
    pub start_url: Option<String>,
    pub sample_set: Option<PathBuf>,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let cfg = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(cfg)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!("Config load error: {err:?}. Falling back to defaults.");
                Self::default()
            }
        }
    }

    pub fn apply_overrides(&mut self, overrides: &AppConfigOverrides) {
        if let Some(width) = overrides.width {
            self.window.width = width;
        }
        if let Some(height) = overrides.height {
            self.window.height = height;
        }
        if let Some(vsync) = overrides.vsync {
            self.window.vsync = vsync;
        }
        if let Some(url) = &overrides.start_url {
            self.start_url = Some(url.clone());
        }
        if let Some(path) = &overrides.sample_set {
            let name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "cli".to_string());
            self.sample_sets.push(SampleSetConfig { name, path: path.clone() });
        }
    }
}

impl AppConfigOverrides {
    pub fn is_empty(&self) -> bool {
        self.width.is_none()
            && self.height.is_none()
            && self.vsync.is_none()
            && self.start_url.is_none()
            && self.sample_set.is_none()
    }

    pub fn applied_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.width.is_some() {
            fields.push("width");
        }
        if self.height.is_some() {
            fields.push("height");
        }
        if self.vsync.is_some() {
            fields.push("vsync");
        }
        if self.start_url.is_some() {
            fields.push("url");
        }
        if self.sample_set.is_some() {
            fields.push("samples");
        }
        fields
    }
}
