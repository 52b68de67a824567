//! Emulated device descriptions.
//!
//! The private API only answers clients that present a plausible Android
//! user-agent, e.g.
//! `Instagram 195.0.0.31.123 Android (29/10; 420dpi; 1080x2118; samsung; SM-N960W; crownqltecs; qcom; en_US; 302733750)`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// App build identifier: five version numbers plus the app and OS names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppVersion {
    pub version: [u32; 5],
    #[serde(default = "default_os")]
    pub os: String,
    #[serde(default = "default_app_name")]
    pub name: String,
}

fn default_os() -> String {
    "Android".to_string()
}

fn default_app_name() -> String {
    "Instagram".to_string()
}

impl AppVersion {
    /// Creates an Android Instagram build with the given version numbers.
    pub fn new(version: [u32; 5]) -> Self {
        Self {
            version,
            os: default_os(),
            name: default_app_name(),
        }
    }

    /// Dotted version only, e.g. `195.0.0.31.123`.
    pub fn version_str(&self) -> String {
        self.version
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for AppVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.version_str(), self.os)
    }
}

/// Screen resolution in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneResolution {
    pub width: u32,
    pub height: u32,
}

impl PhoneResolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for PhoneResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A phone the client pretends to be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDevice {
    pub app: AppVersion,
    pub android_version: u32,
    /// Release name as reported by the OS (`10`, `7.0`).
    pub android_release: String,
    pub dpi: u32,
    pub resolution: PhoneResolution,
    pub brand: String,
    pub device: String,
    pub model: String,
    pub chipset: String,
    pub version_code: u64,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en_US".to_string()
}

impl UserDevice {
    /// Renders the user-agent string for this device.
    pub fn user_agent(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for UserDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}/{}; {}dpi; {}; {}; {}; {}; {}; {}; {})",
            self.app,
            self.android_version,
            self.android_release,
            self.dpi,
            self.resolution,
            self.brand,
            self.device,
            self.model,
            self.chipset,
            self.language,
            self.version_code,
        )
    }
}

static VERSIONS: LazyLock<Vec<AppVersion>> = LazyLock::new(|| {
    vec![
        AppVersion::new([196, 0, 0, 0, 54]),
        AppVersion::new([195, 0, 0, 31, 123]),
        AppVersion::new([76, 0, 0, 15, 395]),
    ]
});

static DEVICES: LazyLock<Vec<UserDevice>> = LazyLock::new(|| {
    vec![
        // Samsung Galaxy Note 9, August 2018
        UserDevice {
            app: AppVersion::new([195, 0, 0, 31, 123]),
            android_version: 29,
            android_release: "10".to_string(),
            dpi: 420,
            resolution: PhoneResolution::new(1080, 2118),
            brand: "samsung".to_string(),
            device: "SM-N960W".to_string(),
            model: "crownqltecs".to_string(),
            chipset: "qcom".to_string(),
            version_code: 302_733_750,
            language: default_language(),
        },
        // Samsung Galaxy S7
        UserDevice {
            app: AppVersion::new([76, 0, 0, 15, 395]),
            android_version: 24,
            android_release: "7.0".to_string(),
            dpi: 640,
            resolution: PhoneResolution::new(1440, 2560),
            brand: "samsung".to_string(),
            device: "SM-G930F".to_string(),
            model: "herolte".to_string(),
            chipset: "samsungexynos8890".to_string(),
            version_code: 138_226_743,
            language: default_language(),
        },
    ]
});

/// Known app builds, newest first.
pub fn versions() -> &'static [AppVersion] {
    &VERSIONS
}

/// Built-in device table. The first entry is the default device.
pub fn devices() -> &'static [UserDevice] {
    &DEVICES
}
