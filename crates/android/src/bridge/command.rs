//! Typed commands parsed from raw channel calls

use super::error::BridgeError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

pub const GET_INSTALLER_PACKAGE_NAME: &str = "getInstallerPackageName";
pub const OPEN_INSTALL_PERMISSION_SETTINGS: &str = "openInstallPermissionSettings";
pub const INSTALL_APK: &str = "installApk";

/// A method invocation as it arrives over a channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl MethodCall {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            arguments: Map::new(),
        }
    }

    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// String argument; `None` when absent, null, or not a string
    pub fn argument_str(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(Value::as_str)
    }
}

/// The two channels served by the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    InstallSource,
    InstallApk,
}

/// Channel names for one application id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelNames {
    pub install_source: String,
    pub install_apk: String,
}

impl ChannelNames {
    pub fn for_app(app_id: &str) -> Self {
        Self {
            install_source: format!("{}/install_source", app_id),
            install_apk: format!("{}/install_apk", app_id),
        }
    }

    pub fn resolve(&self, name: &str) -> Option<Channel> {
        if name == self.install_source {
            Some(Channel::InstallSource)
        } else if name == self.install_apk {
            Some(Channel::InstallApk)
        } else {
            None
        }
    }
}

/// A validated bridge operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeCommand {
    GetInstallerPackageName,
    OpenInstallPermissionSettings,
    InstallApk { file_path: PathBuf, authority: String },
}

impl BridgeCommand {
    /// Map a call on `channel` to a command, validating its arguments
    pub fn parse(channel: Channel, call: &MethodCall) -> Result<Self, BridgeError> {
        match (channel, call.method.as_str()) {
            (Channel::InstallSource, GET_INSTALLER_PACKAGE_NAME) => {
                Ok(Self::GetInstallerPackageName)
            }
            (Channel::InstallSource, OPEN_INSTALL_PERMISSION_SETTINGS) => {
                Ok(Self::OpenInstallPermissionSettings)
            }
            (Channel::InstallApk, INSTALL_APK) => {
                match (call.argument_str("filePath"), call.argument_str("authority")) {
                    (Some(file_path), Some(authority)) => Ok(Self::InstallApk {
                        file_path: PathBuf::from(file_path),
                        authority: authority.to_string(),
                    }),
                    _ => Err(BridgeError::InvalidArgument(
                        "Missing filePath or authority".to_string(),
                    )),
                }
            }
            (_, method) => Err(BridgeError::NotImplemented(method.to_string())),
        }
    }

    pub fn method(&self) -> &'static str {
        match self {
            Self::GetInstallerPackageName => GET_INSTALLER_PACKAGE_NAME,
            Self::OpenInstallPermissionSettings => OPEN_INSTALL_PERMISSION_SETTINGS,
            Self::InstallApk { .. } => INSTALL_APK,
        }
    }
}
