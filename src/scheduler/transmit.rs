//! Transmission scheduling state machine
//!
//! `attempt` is called whenever the send timer fires (and once directly at
//! start-up). It either submits an uplink or arms exactly one retry on the
//! send timer, so the node is never left without a pending trigger:
//!
//! | Condition                       | Action                         | State                |
//! |---------------------------------|--------------------------------|----------------------|
//! | MAC busy                        | retry in 500 ms                | `AwaitingSendWindow` |
//! | Not joined                      | retry in 1000 ms               | `AwaitingJoin`       |
//! | Inside the cadence window       | retry at the window boundary   | `AwaitingSendWindow` |
//! | Due, forced or never sent       | acquire, encode, submit        | `Sending`            |
//!
//! After a submission no retry is armed: the TX-complete event arms the
//! next cycle. A frame the stack refused is kept and resubmitted by the
//! retry, so a refusing stack never drives extra sensor reads.

use crate::config::cadence::{BUSY_RETRY_MS, JOIN_RETRY_MS, TX_INTERVAL_MS};
use crate::config::payload::{CONFIRMED, FPORT};
use crate::network::session::SessionState;
use crate::payload::{self, SensorReading, UplinkFrame};
use crate::radio::traits::{RadioError, RadioStack};
use crate::scheduler::cadence::CadenceState;
use crate::scheduler::timing::TimingMonitor;
use crate::sensor::{HumiditySensor, SensorAcquisition};
use crate::timer::{DeferredAction, Millis};

/// Scheduler state, as left by the most recent call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    AwaitingJoin,
    AwaitingSendWindow,
    Sending,
}

/// Why an attempt did not send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferReason {
    /// A transmission is still in flight
    RadioBusy,
    /// The session is not joined
    NotJoined,
    /// The cadence interval has not elapsed
    CadenceWindow,
    /// The stack refused the uplink
    SubmitRejected(RadioError),
}

/// Result of a single attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttemptOutcome {
    /// An uplink was handed to the MAC stack
    Sent {
        reading: SensorReading,
        frame: UplinkFrame,
        tx_count: u32,
    },
    /// A retry was armed on the send timer
    Deferred { delay_ms: u32, reason: DeferReason },
}

/// Decides when to send and keeps the cadence
pub struct TransmitScheduler {
    state: SchedulerState,
    cadence: CadenceState,
    timing: TimingMonitor,
    tx_count: u32,
    last_reading: SensorReading,
    /// Reading and frame refused by the stack, awaiting resubmission
    pending: Option<(SensorReading, UplinkFrame)>,
}

impl TransmitScheduler {
    pub fn new(target_interval_ms: u32) -> Self {
        Self {
            state: SchedulerState::Idle,
            cadence: CadenceState::new(target_interval_ms),
            timing: TimingMonitor::new(),
            tx_count: 0,
            last_reading: SensorReading::invalid(),
            pending: None,
        }
    }

    /// Run one scheduling decision at `now`
    pub async fn attempt<R, S>(
        &mut self,
        now: Millis,
        radio: &mut R,
        session: &SessionState,
        sensor: &mut SensorAcquisition<S>,
        timer: &mut DeferredAction,
    ) -> AttemptOutcome
    where
        R: RadioStack,
        S: HumiditySensor,
    {
        if radio.is_send_busy() {
            log::debug!("TX busy, retrying in {} ms", BUSY_RETRY_MS);
            return self.defer(
                now,
                timer,
                BUSY_RETRY_MS,
                DeferReason::RadioBusy,
                SchedulerState::AwaitingSendWindow,
            );
        }

        if !session.joined {
            log::debug!("Not joined, retrying in {} ms", JOIN_RETRY_MS);
            return self.defer(
                now,
                timer,
                JOIN_RETRY_MS,
                DeferReason::NotJoined,
                SchedulerState::AwaitingJoin,
            );
        }

        if !self.cadence.is_due(now) {
            let wait_ms = self.cadence.remaining_ms(now);
            log::debug!("Waiting {} ms for cadence boundary", wait_ms);
            return self.defer(
                now,
                timer,
                wait_ms,
                DeferReason::CadenceWindow,
                SchedulerState::AwaitingSendWindow,
            );
        }

        self.send(now, radio, sensor, timer).await
    }

    async fn send<R, S>(
        &mut self,
        now: Millis,
        radio: &mut R,
        sensor: &mut SensorAcquisition<S>,
        timer: &mut DeferredAction,
    ) -> AttemptOutcome
    where
        R: RadioStack,
        S: HumiditySensor,
    {
        let (reading, frame) = match self.pending.take() {
            Some(pending) => pending,
            None => {
                let reading = sensor.acquire().await;
                (reading, payload::encode(&reading))
            }
        };

        log::debug!("Payload: {:02X?}", frame.as_bytes());

        if let Err(e) = radio.submit_uplink(FPORT, frame.as_bytes(), CONFIRMED) {
            log::warn!("Uplink rejected ({:?}), retrying in {} ms", e, BUSY_RETRY_MS);
            self.pending = Some((reading, frame));
            return self.defer(
                now,
                timer,
                BUSY_RETRY_MS,
                DeferReason::SubmitRejected(e),
                SchedulerState::AwaitingSendWindow,
            );
        }

        if !self.cadence.never_transmitted() {
            let interval = self.cadence.elapsed(now).min(u32::MAX as Millis) as u32;
            self.timing.record(interval);
            log::info!(
                "Interval: {} ms (target {} ms), average of last {}: {:.1} s",
                interval,
                self.cadence.target_interval_ms,
                self.timing.len(),
                self.timing.average() / 1000.0
            );
        }

        // 0 means "never sent"; a send at clock origin is stored as 1 ms
        self.cadence.last_transmission_ms = now.max(1);
        self.cadence.force_next = false;
        self.last_reading = reading;
        self.tx_count = self.tx_count.wrapping_add(1);
        self.state = SchedulerState::Sending;

        log::info!("TX #{} submitted", self.tx_count);

        AttemptOutcome::Sent {
            reading,
            frame,
            tx_count: self.tx_count,
        }
    }

    fn defer(
        &mut self,
        now: Millis,
        timer: &mut DeferredAction,
        delay_ms: u32,
        reason: DeferReason,
        state: SchedulerState,
    ) -> AttemptOutcome {
        timer.schedule(now, delay_ms);
        self.state = state;
        AttemptOutcome::Deferred { delay_ms, reason }
    }

    /// Force the next attempt to send and forget the previous uplink.
    ///
    /// Called when a join succeeds. A frame still waiting from the previous
    /// session is dropped so the first uplink carries a fresh reading.
    pub fn rearm_after_join(&mut self) {
        self.cadence.force_next = true;
        self.cadence.last_transmission_ms = 0;
        self.pending = None;
        self.state = SchedulerState::Idle;
    }

    /// The MAC finished the in-flight uplink
    pub fn on_send_complete(&mut self) {
        self.state = SchedulerState::Idle;
    }

    /// Whole seconds until the next uplink is due, 0 if due now
    pub fn seconds_until_next(&self, now: Millis) -> u32 {
        self.cadence.remaining_ms(now) / 1000
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn cadence(&self) -> &CadenceState {
        &self.cadence
    }

    pub fn timing(&self) -> &TimingMonitor {
        &self.timing
    }

    /// Uplinks submitted since start-up
    pub fn tx_count(&self) -> u32 {
        self.tx_count
    }

    /// Reading carried by the most recent submitted uplink
    pub fn last_reading(&self) -> SensorReading {
        self.last_reading
    }

    /// Configured cadence in milliseconds
    pub fn target_interval_ms(&self) -> u32 {
        self.cadence.target_interval_ms
    }
}

impl Default for TransmitScheduler {
    fn default() -> Self {
        Self::new(TX_INTERVAL_MS)
    }
}
