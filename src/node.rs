//! Telemetry node: one owner for all scheduling state
//!
//! The node owns the radio, sensor, watchdog and output sink together with
//! the scheduler, event bridge and send timer. Everything is mutated only
//! through `&mut self`, so the single-writer rule holds by construction
//! wherever the node lives (on target, inside one embassy task).

use crate::config::cadence::TX_INTERVAL_MS;
use crate::network::{NetworkEventBridge, SessionState};
use crate::radio::events::RadioEvent;
use crate::radio::policy::LinkPolicy;
use crate::radio::traits::RadioStack;
use crate::scheduler::{AttemptOutcome, TransmitScheduler};
use crate::sensor::{HumiditySensor, SensorAcquisition};
use crate::status::{NodeStatus, StatusSink};
use crate::timer::{DeferredAction, Millis};
use crate::watchdog::Watchdog;

/// Periodic DHT22 telemetry node
pub struct TelemetryNode<R, S, W, O> {
    radio: R,
    sensor: SensorAcquisition<S>,
    watchdog: W,
    sink: O,
    scheduler: TransmitScheduler,
    bridge: NetworkEventBridge,
    send_timer: DeferredAction,
}

impl<R, S, W, O> TelemetryNode<R, S, W, O>
where
    R: RadioStack,
    S: HumiditySensor,
    W: Watchdog,
    O: StatusSink,
{
    /// Create a node with the default cadence and link policy
    pub fn new(radio: R, sensor: S, watchdog: W, sink: O) -> Self {
        Self::with_policy(radio, sensor, watchdog, sink, TX_INTERVAL_MS, LinkPolicy::default())
    }

    pub fn with_policy(
        radio: R,
        sensor: S,
        watchdog: W,
        sink: O,
        target_interval_ms: u32,
        policy: LinkPolicy,
    ) -> Self {
        Self {
            radio,
            sensor: SensorAcquisition::new(sensor),
            watchdog,
            sink,
            scheduler: TransmitScheduler::new(target_interval_ms),
            bridge: NetworkEventBridge::new(policy),
            send_timer: DeferredAction::new(),
        }
    }

    /// Bring the MAC up, start joining and make the first attempt.
    ///
    /// The first attempt finds the session unjoined and arms the join
    /// retry, which keeps the send timer alive until the join succeeds.
    pub async fn start(&mut self, now: Millis) -> AttemptOutcome {
        self.watchdog.feed();
        self.sensor.self_test().await;

        self.radio.reset();
        self.bridge.policy().prepare_join(&mut self.radio);

        log::info!("Starting join...");
        self.radio.start_joining();
        self.publish_status(now);

        self.run_attempt(now).await
    }

    /// One iteration of the cooperative loop.
    ///
    /// Pumps the MAC stack once, then fires the send timer if it is due.
    pub async fn poll(&mut self, now: Millis) -> Option<AttemptOutcome> {
        self.watchdog.feed();

        if let Some(event) = self.radio.poll() {
            self.handle_event(event, now);
        }

        if self.send_timer.fire(now) {
            Some(self.run_attempt(now).await)
        } else {
            None
        }
    }

    fn handle_event(&mut self, event: RadioEvent, now: Millis) {
        self.watchdog.feed();
        self.bridge.handle(
            event,
            now,
            &mut self.radio,
            &mut self.scheduler,
            &mut self.send_timer,
        );
        self.publish_status(now);
    }

    async fn run_attempt(&mut self, now: Millis) -> AttemptOutcome {
        let outcome = self
            .scheduler
            .attempt(
                now,
                &mut self.radio,
                self.bridge.session(),
                &mut self.sensor,
                &mut self.send_timer,
            )
            .await;

        if let AttemptOutcome::Sent { .. } = outcome {
            self.publish_status(now);
        }
        outcome
    }

    fn publish_status(&mut self, now: Millis) {
        let status = self.status(now);
        self.sink.publish(&status);
    }

    /// Snapshot of the node for the output sink
    pub fn status(&self, now: Millis) -> NodeStatus {
        let session = self.bridge.session();
        NodeStatus {
            reading: self.scheduler.last_reading(),
            tx_count: self.scheduler.tx_count(),
            seconds_until_next: self.scheduler.seconds_until_next(now),
            last_event: session.last_event,
            consecutive_errors: self.sensor.consecutive_errors(),
            joined: session.joined,
            network_status: session.network_status,
            average_interval_ms: self.scheduler.timing().average(),
        }
    }

    pub fn session(&self) -> &SessionState {
        self.bridge.session()
    }

    pub fn scheduler(&self) -> &TransmitScheduler {
        &self.scheduler
    }

    pub fn send_timer(&self) -> &DeferredAction {
        &self.send_timer
    }

    pub fn radio(&self) -> &R {
        &self.radio
    }

    pub fn sensor(&self) -> &SensorAcquisition<S> {
        &self.sensor
    }

    pub fn watchdog(&self) -> &W {
        &self.watchdog
    }

    pub fn sink(&self) -> &O {
        &self.sink
    }
}
