//! Liveness watchdog
//!
//! The node feeds the watchdog on every loop iteration and every MAC event.
//! A hang in any core logic stops the feeds and the hardware restarts the
//! node after [`TIMEOUT_S`](crate::config::watchdog::TIMEOUT_S).

/// Hardware liveness counter
pub trait Watchdog {
    /// Reset the countdown
    fn feed(&mut self);
}

/// The RTC watchdog of the ESP32 family
#[cfg(feature = "embedded")]
impl Watchdog for esp_hal::rtc_cntl::Rwdt {
    fn feed(&mut self) {
        esp_hal::rtc_cntl::Rwdt::feed(self);
    }
}

/// Arm the RTC watchdog with the node's timeout and start it
#[cfg(feature = "embedded")]
pub fn arm_rtc_watchdog(rwdt: &mut esp_hal::rtc_cntl::Rwdt) {
    use crate::config::watchdog::TIMEOUT_S;
    use esp_hal::rtc_cntl::RwdtStage;
    use esp_hal::time::Duration;

    rwdt.set_timeout(RwdtStage::Stage0, Duration::from_secs(TIMEOUT_S as u64));
    rwdt.enable();
    log::info!("Watchdog armed: {} s", TIMEOUT_S);
}
