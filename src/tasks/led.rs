//! TX indicator LED task
//!
//! The LED is driven from its own task so a flash never delays the node
//! loop. The node side only pushes a flash duration onto [`LED_CHANNEL`].

use crate::config::led::{SELF_TEST_BLINKS, SELF_TEST_BLINK_MS, TX_FLASH_MS};
use crate::status::{NodeStatus, StatusSink, TxActivity};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_time::{Duration, Timer};
use embedded_hal::digital::OutputPin;

/// Type alias for the LED flash channel sender (flash length in ms)
pub type LedSender = Sender<'static, CriticalSectionRawMutex, u64, 4>;

/// Type alias for the LED flash channel receiver (flash length in ms)
pub type LedReceiver = Receiver<'static, CriticalSectionRawMutex, u64, 4>;

/// Channel for LED flash signals
pub static LED_CHANNEL: Channel<CriticalSectionRawMutex, u64, 4> = Channel::new();

/// Blink the LED a few times, then flash it for every request
pub async fn led_task<P: OutputPin>(mut led: P, receiver: LedReceiver) {
    for _ in 0..SELF_TEST_BLINKS {
        let _ = led.set_high();
        Timer::after(Duration::from_millis(SELF_TEST_BLINK_MS)).await;
        let _ = led.set_low();
        Timer::after(Duration::from_millis(SELF_TEST_BLINK_MS)).await;
    }

    loop {
        let duration_ms = receiver.receive().await;

        // Active high
        let _ = led.set_high();
        Timer::after(Duration::from_millis(duration_ms)).await;
        let _ = led.set_low();
    }
}

/// Sink wrapper that requests a flash whenever the uplink counter moves
pub struct LedSink<O> {
    inner: O,
    sender: LedSender,
    activity: TxActivity,
}

impl<O: StatusSink> LedSink<O> {
    pub fn new(inner: O, sender: LedSender) -> Self {
        Self {
            inner,
            sender,
            activity: TxActivity::new(),
        }
    }
}

impl<O: StatusSink> StatusSink for LedSink<O> {
    fn publish(&mut self, status: &NodeStatus) {
        if self.activity.observe(status) {
            // Full channel means a flash is already queued
            let _ = self.sender.try_send(TX_FLASH_MS);
        }
        self.inner.publish(status);
    }
}
