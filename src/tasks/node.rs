//! Node task: drives the telemetry node from the embassy clock

use crate::config::cadence::LOOP_TICK_MS;
use crate::node::TelemetryNode;
use crate::radio::traits::RadioStack;
use crate::sensor::HumiditySensor;
use crate::status::StatusSink;
use crate::timer::Millis;
use crate::watchdog::Watchdog;
use embassy_time::{Duration, Instant, Timer};

/// Milliseconds since the task started.
///
/// The clock starts at 0. The scheduler stores a send at 0 as 1 ms, since 0
/// marks "never sent".
fn now_ms(boot: Instant) -> Millis {
    boot.elapsed().as_millis()
}

/// Start the node and poll it forever.
///
/// Every scheduling decision happens inside this task, so the node needs no
/// locking. The watchdog is fed on each tick.
pub async fn node_task<R, S, W, O>(mut node: TelemetryNode<R, S, W, O>)
where
    R: RadioStack,
    S: HumiditySensor,
    W: Watchdog,
    O: StatusSink,
{
    let boot = Instant::now();

    log::info!("Node: starting");
    node.start(now_ms(boot)).await;

    loop {
        node.poll(now_ms(boot)).await;
        Timer::after(Duration::from_millis(LOOP_TICK_MS)).await;
    }
}
