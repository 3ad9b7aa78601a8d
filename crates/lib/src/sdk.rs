//! Build targets and SDK selection.
//!
//! The SDK selector on a module decides which library forms its boot
//! classpath, and whether the implicit default libraries are added.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Libraries every device module compiles against unless it opts out of
/// standard libraries or selects an SDK.
pub const DEFAULT_JAVA_LIBRARIES: &[&str] = &["core-libart", "core-junit", "ext", "framework"];

/// Boot library of device modules without an SDK selector, and of
/// dex-flagged host modules.
pub const CORE_LIBRARY: &str = "core-libart";

/// Whether a module variant is built for the device or the build host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
  Device,
  Host,
}

impl Target {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Device => "device",
      Self::Host => "host",
    }
  }
}

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid sdk_version {0:?}: expected \"\", \"current\", \"system_current\" or a number")]
pub struct InvalidSdkVersion(pub String);

/// The `sdk_version` property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SdkVersion {
  /// No selector: build against the platform itself.
  #[default]
  None,
  /// Public API stubs.
  Current,
  /// System API stubs.
  SystemCurrent,
  /// A released API level.
  Pinned(u32),
}

impl SdkVersion {
  pub fn is_none(&self) -> bool {
    matches!(self, SdkVersion::None)
  }
}

impl TryFrom<String> for SdkVersion {
  type Error = InvalidSdkVersion;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    match value.as_str() {
      "" => Ok(SdkVersion::None),
      "current" => Ok(SdkVersion::Current),
      "system_current" => Ok(SdkVersion::SystemCurrent),
      other => other.parse().map(SdkVersion::Pinned).map_err(|_| InvalidSdkVersion(value)),
    }
  }
}

impl From<SdkVersion> for String {
  fn from(value: SdkVersion) -> Self {
    match value {
      SdkVersion::None => String::new(),
      SdkVersion::Current => "current".to_string(),
      SdkVersion::SystemCurrent => "system_current".to_string(),
      SdkVersion::Pinned(level) => level.to_string(),
    }
  }
}

/// Name of the module providing the boot classpath, if any.
///
/// `dex` marks host variants of device libraries, which still compile
/// against the core library.
pub fn boot_classpath(target: Target, sdk: &SdkVersion, dex: bool) -> Option<String> {
  match target {
    Target::Device => Some(match sdk {
      SdkVersion::None => CORE_LIBRARY.to_string(),
      SdkVersion::Current => "android_stubs_current".to_string(),
      SdkVersion::SystemCurrent => "android_system_stubs_current".to_string(),
      SdkVersion::Pinned(level) => format!("sdk_v{}", level),
    }),
    Target::Host => dex.then(|| CORE_LIBRARY.to_string()),
  }
}

/// Whether the implicit default libraries apply.
pub fn uses_default_libraries(target: Target, sdk: &SdkVersion) -> bool {
  target == Target::Device && sdk.is_none()
}
