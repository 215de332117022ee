//! Translation of MAC events into session and scheduler transitions
//!
//! | Event        | Session                     | Scheduler                                     |
//! |--------------|-----------------------------|-----------------------------------------------|
//! | Joining      | not joined                  | -                                             |
//! | Joined       | joined                      | link policy, force next send, attempt in 2 s  |
//! | JoinFailed   | not joined                  | - (the MAC stack owns join retries)           |
//! | TxComplete   | ack / downlink recorded     | next attempt after the target interval        |
//! | Reset        | diagnostics cleared         | -                                             |
//! | Other(code)  | recorded                    | -                                             |

use crate::config::cadence::JOIN_SETTLE_MS;
use crate::network::session::{NetworkStatus, SessionState};
use crate::radio::events::RadioEvent;
use crate::radio::policy::LinkPolicy;
use crate::radio::traits::RadioStack;
use crate::scheduler::TransmitScheduler;
use crate::timer::{DeferredAction, Millis};

/// Owns the session state and reacts to MAC events
pub struct NetworkEventBridge {
    session: SessionState,
    policy: LinkPolicy,
}

impl NetworkEventBridge {
    pub fn new(policy: LinkPolicy) -> Self {
        Self {
            session: SessionState::new(),
            policy,
        }
    }

    /// Handle one event raised by the MAC stack
    pub fn handle<R: RadioStack>(
        &mut self,
        event: RadioEvent,
        now: Millis,
        radio: &mut R,
        scheduler: &mut TransmitScheduler,
        send_timer: &mut DeferredAction,
    ) {
        self.session.last_event = Some(event);

        match event {
            RadioEvent::Joining => {
                log::info!("Joining network...");
                self.session.joined = false;
                self.session.network_status = NetworkStatus::Joining;
            }
            RadioEvent::Joined => {
                log::info!("Joined network");
                self.session.joined = true;
                self.session.network_status = NetworkStatus::Joined;

                self.policy.apply(radio);

                scheduler.rearm_after_join();
                send_timer.schedule(now, JOIN_SETTLE_MS);
                log::info!("First uplink in {} ms", JOIN_SETTLE_MS);
            }
            RadioEvent::JoinFailed => {
                log::warn!("Join failed");
                self.session.joined = false;
                self.session.network_status = NetworkStatus::JoinFailed;
            }
            RadioEvent::TxComplete { ack, downlink_len } => {
                log::info!("TX complete");
                self.session.network_status = NetworkStatus::TxOk;
                self.session.last_ack = ack;
                self.session.last_downlink_len = downlink_len;

                if ack {
                    log::info!("ACK received");
                }
                if downlink_len > 0 {
                    log::info!("Downlink: {} bytes", downlink_len);
                }

                scheduler.on_send_complete();
                let interval = scheduler.target_interval_ms();
                send_timer.schedule(now, interval);
                log::info!("Next uplink scheduled in {} ms", interval);
            }
            RadioEvent::Reset => {
                log::info!("MAC reset");
                self.session.network_status = NetworkStatus::Reset;
                self.session.last_ack = false;
                self.session.last_downlink_len = 0;
            }
            RadioEvent::Other(code) => {
                log::debug!("MAC event: {}", code);
            }
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn policy(&self) -> &LinkPolicy {
        &self.policy
    }
}

impl Default for NetworkEventBridge {
    fn default() -> Self {
        Self::new(LinkPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radio::traits::mock::MockRadio;
    use crate::radio::traits::SpreadingFactor;
    use crate::scheduler::{AttemptOutcome, SchedulerState};
    use crate::sensor::traits::mock::MockSensor;
    use crate::sensor::SensorAcquisition;

    struct Fixture {
        bridge: NetworkEventBridge,
        radio: MockRadio,
        scheduler: TransmitScheduler,
        timer: DeferredAction,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                bridge: NetworkEventBridge::default(),
                radio: MockRadio::new(),
                scheduler: TransmitScheduler::default(),
                timer: DeferredAction::new(),
            }
        }

        fn handle(&mut self, event: RadioEvent, now: Millis) {
            self.bridge.handle(
                event,
                now,
                &mut self.radio,
                &mut self.scheduler,
                &mut self.timer,
            );
        }
    }

    #[test]
    fn test_joining() {
        let mut fx = Fixture::new();

        fx.handle(RadioEvent::Joining, 0);

        let session = fx.bridge.session();
        assert!(!session.joined);
        assert_eq!(session.network_status, NetworkStatus::Joining);
        assert_eq!(session.last_event, Some(RadioEvent::Joining));
        assert!(!fx.timer.is_pending());
    }

    #[test]
    fn test_joined_applies_policy_and_arms_first_attempt() {
        let mut fx = Fixture::new();

        fx.handle(RadioEvent::Joined, 7_000);

        assert!(fx.bridge.session().joined);
        assert_eq!(fx.timer.due_at(), Some(9_000));
        assert!(fx.scheduler.cadence().force_next);
        assert!(fx.scheduler.cadence().never_transmitted());
        assert_eq!(fx.radio.disabled_channels().len(), 64);
        assert!(!fx.radio.adr());
        assert_eq!(fx.radio.data_rate(), Some((SpreadingFactor::Sf7, 14)));
    }

    #[test]
    fn test_joined_replaces_pending_join_retry() {
        let mut fx = Fixture::new();
        fx.timer.schedule(6_500, 1_000);

        fx.handle(RadioEvent::Joined, 7_000);

        // Single slot: the 1 s retry is gone, only the settle delay remains
        assert!(!fx.timer.fire(7_500));
        assert!(fx.timer.fire(9_000));
    }

    #[test]
    fn test_join_then_attempt_sends_immediately() {
        let mut fx = Fixture::new();
        let mut sensor = SensorAcquisition::new(MockSensor::new(20.0, 40.0));

        fx.handle(RadioEvent::Joined, 1_000);
        let outcome = futures::executor::block_on(fx.scheduler.attempt(
            3_000,
            &mut fx.radio,
            fx.bridge.session(),
            &mut sensor,
            &mut fx.timer,
        ));

        assert!(matches!(outcome, AttemptOutcome::Sent { tx_count: 1, .. }));
        assert!(!fx.scheduler.cadence().force_next);
    }

    #[test]
    fn test_join_failed_does_not_rearm() {
        let mut fx = Fixture::new();
        fx.handle(RadioEvent::Joined, 0);
        fx.timer.cancel();

        fx.handle(RadioEvent::JoinFailed, 500);

        assert!(!fx.bridge.session().joined);
        assert_eq!(fx.bridge.session().network_status, NetworkStatus::JoinFailed);
        assert!(!fx.timer.is_pending());
        assert_eq!(fx.radio.join_requests(), 0);
    }

    #[test]
    fn test_tx_complete_arms_target_interval() {
        let mut fx = Fixture::new();

        fx.handle(
            RadioEvent::TxComplete {
                ack: true,
                downlink_len: 3,
            },
            12_345,
        );

        let session = fx.bridge.session();
        assert!(session.last_ack);
        assert_eq!(session.last_downlink_len, 3);
        assert_eq!(session.network_status, NetworkStatus::TxOk);
        assert_eq!(fx.timer.due_at(), Some(22_345));
        assert_eq!(fx.scheduler.state(), SchedulerState::Idle);
    }

    #[test]
    fn test_reset_clears_diagnostics_only() {
        let mut fx = Fixture::new();
        fx.handle(RadioEvent::Joined, 0);
        fx.handle(
            RadioEvent::TxComplete {
                ack: true,
                downlink_len: 8,
            },
            3_000,
        );

        fx.handle(RadioEvent::Reset, 4_000);

        let session = fx.bridge.session();
        assert!(session.joined);
        assert!(!session.last_ack);
        assert_eq!(session.last_downlink_len, 0);
        assert_eq!(session.network_status, NetworkStatus::Reset);
        assert_eq!(fx.timer.due_at(), Some(13_000));
    }

    #[test]
    fn test_other_event_recorded() {
        let mut fx = Fixture::new();

        fx.handle(RadioEvent::Other(17), 0);

        assert_eq!(fx.bridge.session().last_event, Some(RadioEvent::Other(17)));
        assert_eq!(fx.bridge.session().network_status, NetworkStatus::Starting);
        assert!(!fx.timer.is_pending());
    }
}
