//! Optional capabilities of an embedding host (a chat-platform mini-app
//! shell). Consumers hold a `&dyn HostPlatform` and call capabilities
//! unconditionally; standalone runs use [`NoHost`], whose defaults do
//! nothing.

/// Color scheme the host wants the client to render with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

/// Capability surface an embedding host may provide. Every method has a
/// no-op default, so hosts implement only what they support.
pub trait HostPlatform {
    /// Short tactile pulse, e.g. when a favorite is toggled.
    fn haptic_impact(&self) {}

    /// Show a host-native notification or alert.
    fn notify(&self, _message: &str) {}

    /// Open an external link through the host.
    fn open_link(&self, _url: &str) {}

    fn color_scheme(&self) -> ColorScheme {
        ColorScheme::default()
    }
}

/// Stand-in used when no host is embedding the client.
pub struct NoHost;

impl HostPlatform for NoHost {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingHost {
        notifications: RefCell<Vec<String>>,
    }

    impl HostPlatform for RecordingHost {
        fn notify(&self, message: &str) {
            self.notifications.borrow_mut().push(message.to_string());
        }

        fn color_scheme(&self) -> ColorScheme {
            ColorScheme::Dark
        }
    }

    #[test]
    fn no_host_defaults_are_callable_no_ops() {
        let host = NoHost;
        host.haptic_impact();
        host.notify("ignored");
        host.open_link("https://example.com");
        assert_eq!(host.color_scheme(), ColorScheme::Light);
    }

    #[test]
    fn hosts_override_only_what_they_support() {
        let host = RecordingHost::default();
        host.haptic_impact(); // still the default no-op
        host.notify("favorite saved");
        assert_eq!(host.notifications.borrow().as_slice(), ["favorite saved"]);
        assert_eq!(host.color_scheme(), ColorScheme::Dark);
    }
}
