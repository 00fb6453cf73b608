use std::{
    sync::{
        Arc, RwLock,
        mpsc::{self, Sender},
    },
    thread,
    time::Duration,
};

use crate::{SimulationState, StepOutcome};

/// Handle to a spawned periodic tick thread.
///
/// The thread sleeps one interval, then takes the state write lock, checks
/// for a stop request and runs one [`SimulationState::step`]. Because the
/// stop check happens under the same lock a caller holds while requesting
/// the stop, a tick either completed before the request or never runs; a
/// tick is never half-applied around a cancellation.
pub struct TickerHandle {
    stop_sender: Sender<()>,
}

impl TickerHandle {
    pub fn start(state_arc: Arc<RwLock<SimulationState>>, interval: Duration) -> Self {
        let (stop_sender, stop_receiver) = mpsc::channel();

        thread::spawn(move || {
            loop {
                thread::sleep(interval);

                let mut state = state_arc.write().unwrap();

                if stop_receiver.try_recv().is_ok() {
                    break;
                }

                if state.step() == StepOutcome::Extinct {
                    // step() already performed the auto-clear transition;
                    // the ticker stops itself.
                    break;
                }
            }
        });

        Self { stop_sender }
    }

    /// Request the ticker to stop before its next tick. The send is ignored
    /// if the thread already stopped itself on extinction.
    pub fn stop(self) {
        let _ = self.stop_sender.send(());
    }
}
