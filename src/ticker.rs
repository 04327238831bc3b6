use std::time::Duration;

use tokio::{
    sync::mpsc::UnboundedSender,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};

use crate::event::Event;

/// Repeating timer of one animation session.
///
/// Posts [`Event::AnimationTick`] stamped with the session generation every
/// `period`, starting one period after creation. Dropping the ticker cancels
/// it; ticks already queued still carry the old generation and must be
/// discarded by the receiver.
#[derive(Debug)]
pub struct Ticker {
    generation: u64,
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn spawn(generation: u64, period: Duration, sender: UnboundedSender<Event>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if sender.send(Event::AnimationTick(generation)).is_err() {
                    break;
                }
            }
        });
        Self { generation, handle }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    fn generation(event: Event) -> u64 {
        match event {
            Event::AnimationTick(generation) => generation,
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_every_period() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let _ticker = Ticker::spawn(7, Duration::from_secs(1), sender);

        time::sleep(Duration::from_millis(500)).await;
        assert!(receiver.try_recv().is_err());

        time::sleep(Duration::from_millis(2600)).await;
        let mut ticks = Vec::new();
        while let Ok(event) = receiver.try_recv() {
            ticks.push(generation(event));
        }
        assert_eq!(ticks, vec![7, 7, 7]);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_ticks() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let ticker = Ticker::spawn(1, Duration::from_secs(1), sender);

        time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(generation(receiver.try_recv().unwrap()), 1);

        drop(ticker);
        time::sleep(Duration::from_secs(5)).await;
        assert!(receiver.try_recv().is_err());
    }
}
