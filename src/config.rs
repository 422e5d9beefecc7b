//! Application configuration constants.

use std::time::Duration;

/// Supported image file extensions for scanning the target directory.
pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// Maximum number of remembered (directory, template) pairs.
pub const MAX_HISTORY: usize = 20;

/// Template used on first launch and by "reset template".
pub const INITIAL_TEMPLATE: &str = r#"![images/SomeDir/$1]("images/SomeDir/$1")"#;

/// Token in the template replaced with the saved file's name.
pub const TEMPLATE_PLACEHOLDER: &str = "$1";

/// Directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "mdimgr";

/// Persisted settings file name.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Overrides the settings directory when set.
pub const CONFIG_DIR_ENV: &str = "MDIMGR_CONFIG_DIR";

/// chrono format for names of saved images.
pub const SAVED_FILE_TIME_FORMAT: &str = "%Y_%m%d_%H%M%S";

/// Extension used when a data URL carries no recognizable image MIME type.
pub const DEFAULT_IMAGE_EXTENSION: &str = "png";

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_millis(2500);

/// Debounce window for target directory change notifications.
pub const WATCH_DEBOUNCE: Duration = Duration::from_millis(500);
