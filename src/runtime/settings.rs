use crate::config;

/// Load settings, falling back to defaults when the config is unreadable or
/// invalid. The second value explains why defaults were used.
///
/// Logging is not up yet at this point, so the caller reports the reason.
pub fn load_settings() -> (config::Settings, Option<String>) {
    match config::Settings::load() {
        Ok(s) => match s.validate() {
            Ok(()) => (s, None),
            Err(msg) => (
                config::Settings::default(),
                Some(format!("invalid config: {msg}")),
            ),
        },
        // Config is optional; failures should not prevent the app from starting.
        Err(e) => (
            config::Settings::default(),
            Some(format!("failed to load config: {e}")),
        ),
    }
}
