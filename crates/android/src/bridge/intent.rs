//! Platform intents issued by the bridge

/// Intent action names
pub mod actions {
    pub const VIEW: &str = "android.intent.action.VIEW";
    pub const MANAGE_UNKNOWN_APP_SOURCES: &str = "android.settings.MANAGE_UNKNOWN_APP_SOURCES";
    pub const SECURITY_SETTINGS: &str = "android.settings.SECURITY_SETTINGS";
}

pub const FLAG_GRANT_READ_URI_PERMISSION: u32 = 0x0000_0001;
pub const FLAG_ACTIVITY_NEW_TASK: u32 = 0x1000_0000;

/// MIME type of an installable package archive
pub const APK_MIME_TYPE: &str = "application/vnd.android.package-archive";

/// First SDK level (Android 8.0) with a per-app "install unknown apps" screen
pub const SDK_PER_APP_UNKNOWN_SOURCES: u32 = 26;

/// Description of an activity launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    pub action: String,
    pub data: Option<String>,
    pub mime_type: Option<String>,
    pub flags: u32,
}

impl Intent {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            data: None,
            mime_type: None,
            flags: 0,
        }
    }

    pub fn with_data(mut self, uri: impl Into<String>) -> Self {
        self.data = Some(uri.into());
        self
    }

    pub fn with_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn add_flags(mut self, flags: u32) -> Self {
        self.flags |= flags;
        self
    }

    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags & flag == flag
    }

    /// Settings screen letting the user allow installs from `package`
    pub fn install_permission_settings(package: &str, sdk_version: u32) -> Self {
        if sdk_version >= SDK_PER_APP_UNKNOWN_SOURCES {
            Self::new(actions::MANAGE_UNKNOWN_APP_SOURCES).with_data(format!("package:{}", package))
        } else {
            Self::new(actions::SECURITY_SETTINGS)
        }
    }

    /// View intent handing an APK content URI to the system installer
    pub fn install_package(content_uri: impl Into<String>) -> Self {
        Self::new(actions::VIEW)
            .with_data(content_uri)
            .with_type(APK_MIME_TYPE)
            .add_flags(FLAG_GRANT_READ_URI_PERMISSION)
            .add_flags(FLAG_ACTIVITY_NEW_TASK)
    }
}
