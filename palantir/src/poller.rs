// SPDX-License-Identifier: MIT OR Apache-2.0

//! Periodic execution of an interactor.
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::config::Config;
use crate::response::{Response, ResponseCode};
use crate::traits::Interactor;

/// Shortest accepted interval, `tokio` does not support empty periods.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

struct PollerInner<I: Interactor> {
    interactor: I,
    request: I::Request,
    in_flight: AtomicBool,
    last_code: Mutex<Option<ResponseCode>>,
}

/// Resets the in-flight flag, also when a run gets dropped half-way.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<I> PollerInner<I>
where
    I: Interactor,
    I::Request: Clone,
{
    async fn tick(&self) -> Option<Response<I::Output>> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            trace!("previous run still in flight, skip tick");
            return None;
        }
        let _guard = InFlightGuard(&self.in_flight);

        let response = self.interactor.execute(self.request.clone()).await;
        *self
            .last_code
            .lock()
            .expect("acquire exclusive access on last response code") = Some(response.code());
        Some(response)
    }
}

struct PollerTask {
    cancel_token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Runs an interactor with the same request in a fixed interval.
///
/// A run is skipped while the previous one is still in flight. The loop is started and stopped
/// explicitly, dropping the poller does not stop it.
///
/// ```no_run
/// # use palantir::Poller;
/// # use palantir::memory::{MemoryContactRepository, MemoryLedger};
/// # use palantir::usecase::{CheckUserInteractor, CheckUserRequest};
/// # async fn run(request: CheckUserRequest) {
/// let ledger = MemoryLedger::new();
/// let interactor = CheckUserInteractor::new(ledger.clone(), MemoryContactRepository::new(ledger));
///
/// let poller = Poller::from_config(interactor, request, &Default::default());
/// poller.start();
/// // ..
/// poller.stop().await;
/// # }
/// ```
pub struct Poller<I: Interactor> {
    inner: Arc<PollerInner<I>>,
    interval: Duration,
    task: Arc<Mutex<Option<PollerTask>>>,
}

impl<I> Poller<I>
where
    I: Interactor + Send + Sync + 'static,
    I::Request: Clone + Send + Sync + 'static,
    I::Output: Send + 'static,
{
    pub fn new(interactor: I, request: I::Request, interval: Duration) -> Self {
        Self {
            inner: Arc::new(PollerInner {
                interactor,
                request,
                in_flight: AtomicBool::new(false),
                last_code: Mutex::new(None),
            }),
            interval: interval.max(MIN_INTERVAL),
            task: Arc::default(),
        }
    }

    /// Poller running in [`Config::check_user_interval`].
    pub fn from_config(interactor: I, request: I::Request, config: &Config) -> Self {
        Self::new(interactor, request, config.check_user_interval)
    }

    /// Runs the interactor once, unless a run is already in flight in which case `None` is
    /// returned.
    pub async fn tick(&self) -> Option<Response<I::Output>> {
        self.inner.tick().await
    }

    /// Starts the loop. The first run happens right away. Does nothing when already running.
    pub fn start(&self) {
        let mut task = self
            .task
            .lock()
            .expect("acquire exclusive access on poller task");
        if task.is_some() {
            return;
        }

        let cancel_token = CancellationToken::new();
        let inner = self.inner.clone();
        let period = self.interval;
        let token = cancel_token.clone();
        let handle = tokio::task::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = interval.tick() => (),
                }

                // Runs are awaited outside of `select!`, cancellation only lands between them.
                inner.tick().await;
            }
        });

        debug!(interval = ?period, "started poller");
        *task = Some(PollerTask {
            cancel_token,
            handle,
        });
    }

    /// Stops the loop and waits for it to terminate.
    ///
    /// A run in flight is not interrupted, `stop` returns after it finished.
    pub async fn stop(&self) {
        let task = self
            .task
            .lock()
            .expect("acquire exclusive access on poller task")
            .take();
        let Some(task) = task else {
            return;
        };

        task.cancel_token.cancel();
        if let Err(err) = task.handle.await {
            warn!("poller task terminated abnormally: {err}");
        }
        debug!("stopped poller");
    }

    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .expect("acquire exclusive access on poller task")
            .is_some()
    }

    /// Code of the most recent finished run.
    pub fn last_code(&self) -> Option<ResponseCode> {
        *self
            .inner
            .last_code
            .lock()
            .expect("acquire exclusive access on last response code")
    }

    pub fn interactor(&self) -> &I {
        &self.inner.interactor
    }
}

impl<I: Interactor> Clone for Poller<I> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            interval: self.interval,
            task: self.task.clone(),
        }
    }
}

impl<I: Interactor> fmt::Debug for Poller<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poller")
            .field("interval", &self.interval)
            .field("in_flight", &self.inner.in_flight.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use tokio::sync::Notify;

    use crate::response::{Response, ResponseCode};
    use crate::traits::Interactor;

    use super::Poller;

    /// Interactor counting its runs, each run waits for the gate when one is set.
    #[derive(Clone, Debug, Default)]
    struct CountingInteractor {
        calls: Arc<AtomicUsize>,
        gate: Option<Arc<Notify>>,
    }

    impl Interactor for CountingInteractor {
        type Request = ();

        type Output = usize;

        async fn execute(&self, _request: ()) -> Response<usize> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            Response::success(call)
        }
    }

    #[tokio::test]
    async fn skip_while_in_flight() {
        let gate = Arc::new(Notify::new());
        let interactor = CountingInteractor {
            gate: Some(gate.clone()),
            ..Default::default()
        };
        let calls = interactor.calls.clone();
        let poller = Poller::new(interactor, (), Duration::from_secs(60));

        let first = tokio::spawn({
            let poller = poller.clone();
            async move { poller.tick().await }
        });
        while calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        // The first run waits for the gate, a second one is not started.
        assert!(poller.tick().await.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(poller.last_code(), None);

        gate.notify_one();
        let response = first.await.unwrap().unwrap();
        assert_eq!(response.payload(), Some(&1));
        assert_eq!(poller.last_code(), Some(ResponseCode::Success));

        // Guard is released after the run finished.
        gate.notify_one();
        assert!(poller.tick().await.is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn start_and_stop() {
        let interactor = CountingInteractor::default();
        let calls = interactor.calls.clone();
        let poller = Poller::new(interactor, (), Duration::from_secs(60));
        assert!(!poller.is_running());

        poller.start();
        poller.start();
        assert!(poller.is_running());

        tokio::time::sleep(Duration::from_secs(150)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert!(calls.load(Ordering::SeqCst) >= 2);

        poller.stop().await;
        assert!(!poller.is_running());
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        let stopped_at = calls.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_secs(300)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(calls.load(Ordering::SeqCst), stopped_at);

        // Stopping twice is fine.
        poller.stop().await;
    }

    #[tokio::test]
    async fn stop_waits_for_run_in_flight() {
        let gate = Arc::new(Notify::new());
        let interactor = CountingInteractor {
            gate: Some(gate.clone()),
            ..Default::default()
        };
        let calls = interactor.calls.clone();
        let poller = Poller::new(interactor, (), Duration::from_secs(60));

        poller.start();
        while calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        let stopping = tokio::spawn({
            let poller = poller.clone();
            async move { poller.stop().await }
        });
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert!(!stopping.is_finished());
        assert_eq!(poller.last_code(), None);

        gate.notify_one();
        stopping.await.unwrap();
        assert!(!poller.is_running());
        assert_eq!(poller.last_code(), Some(ResponseCode::Success));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
