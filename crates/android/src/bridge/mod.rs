//! Install bridge for the Flutter app
//!
//! Serves two platform channels:
//!
//! - `<app_id>/install_source`: `getInstallerPackageName`, `openInstallPermissionSettings`
//! - `<app_id>/install_apk`: `installApk(filePath, authority)`
//!
//! Raw calls are parsed into a [`BridgeCommand`], then executed against an
//! [`InstallHost`]. Every call is independent and answered synchronously with
//! a [`BridgeReply`] or a [`BridgeError`]; nothing is retried.
//!
//! # Example
//!
//! ```rust,ignore
//! use findeasy_android::bridge::{InstallBridge, MethodCall};
//!
//! let bridge = InstallBridge::new("com.example.image_edge_extractor", host);
//! let reply = bridge.handle(
//!     "com.example.image_edge_extractor/install_apk",
//!     &MethodCall::new("installApk")
//!         .with_argument("filePath", "/data/user/0/app/cache/update.apk")
//!         .with_argument("authority", "com.example.image_edge_extractor.fileprovider"),
//! );
//! ```

mod command;
mod error;
mod host;
mod intent;

pub use command::{
    BridgeCommand, Channel, ChannelNames, MethodCall, GET_INSTALLER_PACKAGE_NAME, INSTALL_APK,
    OPEN_INSTALL_PERMISSION_SETTINGS,
};
pub use error::{BridgeError, BridgeFailure};
pub use host::{HostError, InstallHost};
pub use intent::{
    actions, Intent, APK_MIME_TYPE, FLAG_ACTIVITY_NEW_TASK, FLAG_GRANT_READ_URI_PERMISSION,
    SDK_PER_APP_UNKNOWN_SOURCES,
};

use serde::Serialize;
use std::path::Path;

/// Success value of a bridge call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BridgeReply {
    Bool(bool),
    Text(Option<String>),
}

impl BridgeReply {
    pub fn to_value(&self) -> serde_json::Value {
        match self {
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Text(Some(s)) => serde_json::Value::String(s.clone()),
            Self::Text(None) => serde_json::Value::Null,
        }
    }
}

/// Stateless dispatcher from channel calls to host operations
pub struct InstallBridge<H> {
    host: H,
    channels: ChannelNames,
}

impl<H: InstallHost> InstallBridge<H> {
    pub fn new(app_id: &str, host: H) -> Self {
        Self {
            host,
            channels: ChannelNames::for_app(app_id),
        }
    }

    pub fn channels(&self) -> &ChannelNames {
        &self.channels
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Answer one call received on `channel`
    pub fn handle(&self, channel: &str, call: &MethodCall) -> Result<BridgeReply, BridgeError> {
        let Some(resolved) = self.channels.resolve(channel) else {
            tracing::warn!(channel, method = %call.method, "Call on unknown channel");
            return Err(BridgeError::NotImplemented(call.method.clone()));
        };

        let result = BridgeCommand::parse(resolved, call).and_then(|cmd| self.execute(cmd));
        if let Err(e) = &result {
            tracing::warn!(channel, method = %call.method, code = e.code(), error = %e, "Bridge call failed");
        }
        result
    }

    /// Run an already validated command
    pub fn execute(&self, command: BridgeCommand) -> Result<BridgeReply, BridgeError> {
        tracing::debug!(method = command.method(), "Bridge call");
        match command {
            BridgeCommand::GetInstallerPackageName => self.installer_package_name(),
            BridgeCommand::OpenInstallPermissionSettings => self.open_install_permission_settings(),
            BridgeCommand::InstallApk {
                file_path,
                authority,
            } => self.install_apk(&file_path, &authority),
        }
    }

    fn installer_package_name(&self) -> Result<BridgeReply, BridgeError> {
        let package = self.host.package_name();
        self.host
            .installer_package_name(package)
            .map(BridgeReply::Text)
            .map_err(|e| BridgeError::Platform {
                message: "Failed to get installer package name".to_string(),
                details: Some(e.to_string()),
            })
    }

    fn open_install_permission_settings(&self) -> Result<BridgeReply, BridgeError> {
        let intent =
            Intent::install_permission_settings(self.host.package_name(), self.host.sdk_version());

        self.host
            .start_activity(&intent)
            .map(|()| BridgeReply::Bool(true))
            .map_err(|e| BridgeError::Platform {
                message: "Failed to open install permission settings".to_string(),
                details: Some(e.to_string()),
            })
    }

    fn install_apk(&self, file_path: &Path, authority: &str) -> Result<BridgeReply, BridgeError> {
        if !self.host.file_exists(file_path) {
            return Err(BridgeError::NotFound(format!(
                "APK file does not exist: {}",
                file_path.display()
            )));
        }

        let platform = |e: HostError| BridgeError::Platform {
            message: format!("Failed to install APK: {}", e),
            details: Some(e.to_string()),
        };

        let uri = self.host.content_uri(authority, file_path).map_err(platform)?;
        let intent = Intent::install_package(uri);

        if !self.host.resolves(&intent) {
            return Err(BridgeError::NoHandler(
                "No app can handle APK installation".to_string(),
            ));
        }

        self.host.start_activity(&intent).map_err(platform)?;
        Ok(BridgeReply::Bool(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;

    const APP: &str = "com.example.image_edge_extractor";
    const AUTHORITY: &str = "com.example.image_edge_extractor.fileprovider";

    /// Host double recording every capability it is asked for
    struct FakeHost {
        sdk: u32,
        installer: Result<Option<String>, HostError>,
        files: Vec<PathBuf>,
        can_resolve: bool,
        start_fails: bool,
        calls: RefCell<Vec<&'static str>>,
        started: RefCell<Vec<Intent>>,
    }

    impl Default for FakeHost {
        fn default() -> Self {
            Self {
                sdk: 33,
                installer: Ok(Some("com.android.vending".into())),
                files: vec![PathBuf::from("/cache/update.apk")],
                can_resolve: true,
                start_fails: false,
                calls: RefCell::new(Vec::new()),
                started: RefCell::new(Vec::new()),
            }
        }
    }

    impl InstallHost for FakeHost {
        fn package_name(&self) -> &str {
            self.calls.borrow_mut().push("package_name");
            APP
        }

        fn sdk_version(&self) -> u32 {
            self.calls.borrow_mut().push("sdk_version");
            self.sdk
        }

        fn installer_package_name(&self, _package: &str) -> Result<Option<String>, HostError> {
            self.calls.borrow_mut().push("installer_package_name");
            self.installer.clone()
        }

        fn file_exists(&self, path: &Path) -> bool {
            self.calls.borrow_mut().push("file_exists");
            self.files.iter().any(|f| f == path)
        }

        fn content_uri(&self, authority: &str, path: &Path) -> Result<String, HostError> {
            self.calls.borrow_mut().push("content_uri");
            let name = path.file_name().unwrap().to_string_lossy();
            Ok(format!("content://{}/apk/{}", authority, name))
        }

        fn resolves(&self, _intent: &Intent) -> bool {
            self.calls.borrow_mut().push("resolves");
            self.can_resolve
        }

        fn start_activity(&self, intent: &Intent) -> Result<(), HostError> {
            self.calls.borrow_mut().push("start_activity");
            if self.start_fails {
                return Err(HostError::new("ActivityNotFoundException"));
            }
            self.started.borrow_mut().push(intent.clone());
            Ok(())
        }
    }

    fn source_channel() -> String {
        format!("{}/install_source", APP)
    }

    fn apk_channel() -> String {
        format!("{}/install_apk", APP)
    }

    fn install_call(path: &str) -> MethodCall {
        MethodCall::new(INSTALL_APK)
            .with_argument("filePath", path)
            .with_argument("authority", AUTHORITY)
    }

    #[test]
    fn test_install_apk_launches_installer_once() {
        let bridge = InstallBridge::new(APP, FakeHost::default());

        let reply = bridge
            .handle(&apk_channel(), &install_call("/cache/update.apk"))
            .unwrap();

        assert_eq!(reply, BridgeReply::Bool(true));
        let started = bridge.host().started.borrow();
        assert_eq!(started.len(), 1);
        assert_eq!(
            started[0].data.as_deref(),
            Some("content://com.example.image_edge_extractor.fileprovider/apk/update.apk")
        );
        assert_eq!(started[0].mime_type.as_deref(), Some(APK_MIME_TYPE));
    }

    #[test]
    fn test_install_apk_missing_argument_touches_no_host_api() {
        let bridge = InstallBridge::new(APP, FakeHost::default());
        let call = MethodCall::new(INSTALL_APK).with_argument("authority", AUTHORITY);

        let err = bridge.handle(&apk_channel(), &call).unwrap_err();

        assert_eq!(err.code(), "INVALID_ARGUMENT");
        assert!(bridge.host().calls.borrow().is_empty());
    }

    #[test]
    fn test_install_apk_missing_file() {
        let bridge = InstallBridge::new(APP, FakeHost::default());

        let err = bridge
            .handle(&apk_channel(), &install_call("/cache/missing.apk"))
            .unwrap_err();

        assert_eq!(
            err,
            BridgeError::NotFound("APK file does not exist: /cache/missing.apk".into())
        );
        assert!(bridge.host().started.borrow().is_empty());
    }

    #[test]
    fn test_install_apk_without_handler() {
        let host = FakeHost {
            can_resolve: false,
            ..FakeHost::default()
        };
        let bridge = InstallBridge::new(APP, host);

        let err = bridge
            .handle(&apk_channel(), &install_call("/cache/update.apk"))
            .unwrap_err();

        assert_eq!(err.code(), "NO_HANDLER");
        assert!(!bridge.host().calls.borrow().contains(&"start_activity"));
    }

    #[test]
    fn test_install_apk_start_failure_is_platform_error() {
        let host = FakeHost {
            start_fails: true,
            ..FakeHost::default()
        };
        let bridge = InstallBridge::new(APP, host);

        let failure = bridge
            .handle(&apk_channel(), &install_call("/cache/update.apk"))
            .unwrap_err()
            .to_failure();

        assert_eq!(failure.code, "PLATFORM_ERROR");
        assert_eq!(failure.message, "Failed to install APK: ActivityNotFoundException");
    }

    #[test]
    fn test_installer_package_name() {
        let bridge = InstallBridge::new(APP, FakeHost::default());
        let reply = bridge
            .handle(&source_channel(), &MethodCall::new(GET_INSTALLER_PACKAGE_NAME))
            .unwrap();

        assert_eq!(reply, BridgeReply::Text(Some("com.android.vending".into())));
        assert_eq!(reply.to_value(), serde_json::json!("com.android.vending"));
    }

    #[test]
    fn test_installer_package_name_side_loaded() {
        let host = FakeHost {
            installer: Ok(None),
            ..FakeHost::default()
        };
        let bridge = InstallBridge::new(APP, host);
        let reply = bridge
            .handle(&source_channel(), &MethodCall::new(GET_INSTALLER_PACKAGE_NAME))
            .unwrap();

        assert_eq!(reply.to_value(), serde_json::Value::Null);
    }

    #[test]
    fn test_installer_package_name_host_failure() {
        let host = FakeHost {
            installer: Err(HostError::new("NameNotFoundException")),
            ..FakeHost::default()
        };
        let bridge = InstallBridge::new(APP, host);
        let err = bridge
            .handle(&source_channel(), &MethodCall::new(GET_INSTALLER_PACKAGE_NAME))
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to get installer package name");
        assert_eq!(err.details(), Some("NameNotFoundException"));
    }

    #[test]
    fn test_open_settings_depends_on_sdk() {
        let modern = InstallBridge::new(APP, FakeHost::default());
        modern
            .handle(&source_channel(), &MethodCall::new(OPEN_INSTALL_PERMISSION_SETTINGS))
            .unwrap();
        assert_eq!(
            modern.host().started.borrow()[0].action,
            actions::MANAGE_UNKNOWN_APP_SOURCES
        );

        let legacy = InstallBridge::new(
            APP,
            FakeHost {
                sdk: 24,
                ..FakeHost::default()
            },
        );
        let reply = legacy
            .handle(&source_channel(), &MethodCall::new(OPEN_INSTALL_PERMISSION_SETTINGS))
            .unwrap();
        assert_eq!(reply, BridgeReply::Bool(true));
        assert_eq!(legacy.host().started.borrow()[0].action, actions::SECURITY_SETTINGS);
    }

    #[test]
    fn test_unknown_method_and_channel() {
        let bridge = InstallBridge::new(APP, FakeHost::default());

        let err = bridge
            .handle(&source_channel(), &MethodCall::new("uninstall"))
            .unwrap_err();
        assert_eq!(err.code(), "NOT_IMPLEMENTED");

        let err = bridge
            .handle("com.example.other/install_apk", &install_call("/cache/update.apk"))
            .unwrap_err();
        assert_eq!(err.code(), "NOT_IMPLEMENTED");
        assert!(bridge.host().calls.borrow().is_empty());
    }
}
