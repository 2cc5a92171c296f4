//! Screensaver inhibition while the night light is on screen.
//!
//! Uses the freedesktop `org.freedesktop.ScreenSaver` interface on the session
//! bus through zbus's blocking API. Inhibition is best effort: without a
//! session bus or a screensaver service the light simply runs uninhibited.

use anyhow::{Context, Result};
use zbus::blocking::Connection;

use crate::common::constants::{APP_NAME, IDLE_INHIBIT_REASON};

/// D-Bus proxy trait for the freedesktop screensaver interface.
#[zbus::proxy(
    interface = "org.freedesktop.ScreenSaver",
    default_service = "org.freedesktop.ScreenSaver",
    default_path = "/org/freedesktop/ScreenSaver"
)]
trait ScreenSaver {
    /// Returns a cookie identifying this inhibition.
    fn inhibit(&self, application_name: &str, reason_for_inhibit: &str) -> zbus::Result<u32>;

    #[zbus(name = "UnInhibit")]
    fn un_inhibit(&self, cookie: u32) -> zbus::Result<()>;
}

/// Held screensaver inhibition.
///
/// Released by `release` or on drop. The D-Bus connection is kept open for
/// the lifetime of the inhibition since services drop inhibitions whose
/// owner disconnects.
pub struct IdleInhibitor {
    connection: Connection,
    cookie: Option<u32>,
    debug_enabled: bool,
}

impl IdleInhibitor {
    /// Ask the session screensaver not to blank the display.
    pub fn acquire(debug_enabled: bool) -> Result<Self> {
        let connection =
            Connection::session().context("Failed to connect to D-Bus session bus")?;
        let proxy = ScreenSaverProxyBlocking::new(&connection)
            .context("Failed to create screensaver proxy")?;
        let cookie = proxy
            .inhibit(APP_NAME, IDLE_INHIBIT_REASON)
            .context("Screensaver refused the inhibit request")?;

        if debug_enabled {
            log_pipe!();
            log_debug!("Screensaver inhibited (cookie {cookie})");
        }

        Ok(Self {
            connection,
            cookie: Some(cookie),
            debug_enabled,
        })
    }

    /// Give the inhibition back. Later calls do nothing.
    pub fn release(&mut self) {
        let Some(cookie) = self.cookie.take() else {
            return;
        };

        let result = ScreenSaverProxyBlocking::new(&self.connection)
            .and_then(|proxy| proxy.un_inhibit(cookie));
        match result {
            Ok(()) => {
                if self.debug_enabled {
                    log_debug!("Screensaver inhibition released");
                }
            }
            Err(e) => {
                log_warning!("Failed to release screensaver inhibition: {e}");
            }
        }
    }
}

impl Drop for IdleInhibitor {
    fn drop(&mut self) {
        self.release();
    }
}

/// Acquire an inhibitor when enabled, logging instead of failing.
pub fn inhibit_if_enabled(enabled: bool, debug_enabled: bool) -> Option<IdleInhibitor> {
    if !enabled {
        return None;
    }

    match IdleInhibitor::acquire(debug_enabled) {
        Ok(inhibitor) => Some(inhibitor),
        Err(e) => {
            log_pipe!();
            log_warning!("Screensaver inhibition unavailable: {e}");
            log_indented!("The display may blank while the light is on");
            None
        }
    }
}
