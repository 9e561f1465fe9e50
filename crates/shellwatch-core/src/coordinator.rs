// ── Update coordinator ──
//
// One coordinator per configured account. Owns the cached snapshot, the
// refresh schedule, and the single-flight fetch against the cloud. All
// mutation funnels through `refresh_locked` under one async mutex; reads
// go through the watch channel and never block on a refresh in progress.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use shellwatch_api::{CloudClient, FwInfo, TransportConfig};

use crate::config::AccountConfig;
use crate::error::CoreError;
use crate::snapshot::Snapshot;

/// Shared, rate-limited, cached view of one account's device fleet.
///
/// Cheaply cloneable; all clones share the same cache and refresh lock, so
/// N concurrent readers trigger at most one network fetch per interval.
#[derive(Clone)]
pub struct Coordinator {
    inner: Arc<CoordinatorInner>,
}

struct CoordinatorInner {
    client: CloudClient,
    update_interval: Duration,

    /// Current snapshot. `watch` gives readers an atomic wholesale swap
    /// (old or new generation, never a mix) plus push notification for
    /// sensor views.
    snapshot: watch::Sender<Arc<Snapshot>>,

    /// Refresh critical section: freshness check, fetch, and publish all
    /// happen under this lock. A caller that arrives mid-refresh waits
    /// here, then sees a fresh timestamp and returns without fetching.
    refresh: Mutex<RefreshState>,
}

struct RefreshState {
    /// Completion time of the last refresh attempt, successful or not.
    /// Gating on attempts (not successes) keeps single-flight intact
    /// against a failing upstream: callers queued behind a failed fetch
    /// see a recent attempt and do not launch their own. A failure is
    /// retried no sooner than the next interval.
    last_attempt: Option<Instant>,
}

impl Coordinator {
    /// Create a coordinator over an existing [`CloudClient`].
    ///
    /// Starts with an empty snapshot; call [`refresh_now`](Self::refresh_now)
    /// to perform the setup-time initial fetch.
    pub fn new(client: CloudClient, update_interval: Duration) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Snapshot::default()));
        Self {
            inner: Arc::new(CoordinatorInner {
                client,
                update_interval,
                snapshot,
                refresh: Mutex::new(RefreshState { last_attempt: None }),
            }),
        }
    }

    /// Create a coordinator from an account configuration.
    pub fn from_config(config: &AccountConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::default().with_timeout(config.timeout);
        let client = CloudClient::new(&config.server, config.auth_key.clone(), &transport)?;
        Ok(Self::new(client, config.clamped_interval()))
    }

    /// The configured freshness bound.
    pub fn update_interval(&self) -> Duration {
        self.inner.update_interval
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// The current snapshot (cheap `Arc` clone, never waits on a refresh).
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.inner.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot publications.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.inner.snapshot.subscribe()
    }

    /// Read-only lookup of a numeric reading in the current snapshot.
    pub fn reading(&self, device_id: &str, path: &[&str]) -> Result<f64, CoreError> {
        self.snapshot().reading(device_id, path)
    }

    /// Device identifiers matching a firmware predicate, in discovery order.
    pub fn devices_matching(&self, predicate: impl Fn(&FwInfo) -> bool) -> Vec<String> {
        self.snapshot().devices_matching(predicate)
    }

    /// Identifiers of H&T sensors in the current snapshot.
    pub fn ht_device_ids(&self) -> Vec<String> {
        self.snapshot().ht_device_ids()
    }

    // ── Refresh ──────────────────────────────────────────────────────

    /// Refresh the snapshot if it is older than the update interval.
    ///
    /// Safe to call concurrently from any number of readers: callers
    /// serialize on the refresh lock, exactly one performs the fetch, and
    /// the rest observe its result -- whether it succeeded or failed. A
    /// failed refresh keeps the previous snapshot and is logged, not
    /// returned -- stale data beats a crash in steady-state polling. The
    /// next call after the interval elapses retries.
    pub async fn ensure_fresh(&self) {
        let mut state = self.inner.refresh.lock().await;

        if let Some(at) = state.last_attempt {
            if at.elapsed() < self.inner.update_interval {
                debug!("refresh attempted within the interval, skipping fetch");
                return;
            }
        }

        if let Err(err) = self.refresh_locked(&mut state).await {
            match err {
                // isok=false: the cloud answered but refused us. Alarmed
                // separately from transport faults and garbled responses.
                shellwatch_api::Error::Rejected { ref message } => {
                    warn!(%message, "cloud rejected status request, keeping stale snapshot");
                }
                ref other => {
                    error!(error = %other, "refresh failed, keeping stale snapshot");
                }
            }
        }
    }

    /// Force a refresh regardless of freshness, propagating failures.
    ///
    /// This is the setup path: the initial fetch after configuration must
    /// surface `AuthenticationFailed` (and any other failure) to the caller
    /// so the user can be shown a corrective message.
    pub async fn refresh_now(&self) -> Result<(), CoreError> {
        let mut state = self.inner.refresh.lock().await;
        self.refresh_locked(&mut state).await.map_err(CoreError::from)
    }

    /// Fetch, parse, and publish. Caller holds the refresh lock.
    ///
    /// The attempt timestamp advances on success and failure alike; the
    /// snapshot is replaced wholesale only on success. Returns the raw API
    /// error so `ensure_fresh` can classify the log severity per variant.
    async fn refresh_locked(&self, state: &mut RefreshState) -> Result<(), shellwatch_api::Error> {
        let result = self.inner.client.all_status().await;
        state.last_attempt = Some(Instant::now());

        let devices = result?;
        debug!(device_count = devices.len(), "publishing new snapshot");

        self.inner
            .snapshot
            .send_replace(Arc::new(Snapshot::new(devices)));
        Ok(())
    }

    // ── Background polling ───────────────────────────────────────────

    /// Spawn the periodic refresh loop.
    ///
    /// Ticks at the update interval until `cancel` fires. Each tick goes
    /// through [`ensure_fresh`](Self::ensure_fresh), so an on-demand caller
    /// that just refreshed suppresses the next scheduled fetch.
    pub fn spawn_poll_task(&self, cancel: CancellationToken) -> JoinHandle<()> {
        let coordinator = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(coordinator.inner.update_interval);
            interval.tick().await; // consume the immediate first tick

            loop {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => break,
                    _ = interval.tick() => coordinator.ensure_fresh().await,
                }
            }
        })
    }
}
