//! Registration gate watcher
//!
//! 周期性拉取站点设置与服务端时间，在两次拉取之间用本地时钟 + 偏移量
//! 推算业务时区的"当前时间"，本地计算开关状态与倒计时。
//!
//! 倒计时越过切换时刻时回调恰好触发一次 (见 [`CountdownTrigger`])。

use crate::{ClientResult, HttpClient};
use chrono::{Duration as ChronoDuration, NaiveDateTime, Utc};
use shared::countdown::CountdownTrigger;
use shared::gate::{self, GateStatus};
use shared::models::WebsiteSettings;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Pure gate state machine driven by explicit clock readings
#[derive(Debug, Clone)]
pub struct GateTracker {
    settings: WebsiteSettings,
    /// server business time minus local UTC
    offset: ChronoDuration,
    trigger: CountdownTrigger,
    last: Option<GateStatus>,
}

impl GateTracker {
    pub fn new(settings: WebsiteSettings) -> Self {
        Self {
            settings,
            offset: ChronoDuration::zero(),
            trigger: CountdownTrigger::new(),
            last: None,
        }
    }

    /// Adopt fresh settings and re-anchor the clock offset
    pub fn sync(
        &mut self,
        settings: WebsiteSettings,
        server_time: NaiveDateTime,
        local_now: NaiveDateTime,
    ) {
        // 排期变化后，旧的倒计时目标不再有效
        if !same_schedule(&self.settings, &settings) {
            self.last = None;
        }
        self.settings = settings;
        self.offset = server_time - local_now;
    }

    pub fn offset(&self) -> ChronoDuration {
        self.offset
    }

    pub fn last(&self) -> Option<&GateStatus> {
        self.last.as_ref()
    }

    /// Re-evaluate at `local_now`; the flag is `true` when a countdown expired
    pub fn tick(&mut self, local_now: NaiveDateTime) -> (GateStatus, bool) {
        let now = local_now + self.offset;

        // 上一次倒计时的目标时刻已过 → 到期
        let mut expired = false;
        if let Some(target) = self.last.as_ref().and_then(|s| s.next_transition) {
            expired = self.trigger.observe((target - now).num_seconds());
        }

        let status = gate::evaluate(&self.settings, now);
        if let Some(remaining) = status.remaining_seconds {
            expired |= self.trigger.observe(remaining);
        }
        self.last = Some(status.clone());
        (status, expired)
    }
}

fn same_schedule(a: &WebsiteSettings, b: &WebsiteSettings) -> bool {
    a.is_open == b.is_open
        && a.auto_schedule == b.auto_schedule
        && a.open_time == b.open_time
        && a.close_time == b.close_time
}

/// Background poller publishing [`GateStatus`] updates
pub struct GateWatcher {
    client: HttpClient,
    interval: Duration,
    tx: watch::Sender<Option<GateStatus>>,
    shutdown: CancellationToken,
}

impl GateWatcher {
    pub fn new(client: HttpClient, interval: Duration) -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            client,
            interval,
            tx,
            shutdown: CancellationToken::new(),
        }
    }

    /// Latest status, `None` until the first successful poll
    pub fn subscribe(&self) -> watch::Receiver<Option<GateStatus>> {
        self.tx.subscribe()
    }

    /// Token that stops [`GateWatcher::run`]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    async fn fetch(&self) -> ClientResult<(WebsiteSettings, GateStatus)> {
        let settings = self.client.settings().await?;
        let status = self.client.gate_status().await?;
        Ok((settings, status))
    }

    /// Poll until cancelled, calling `on_expire` whenever a countdown reaches zero
    pub async fn run<F>(self, mut on_expire: F)
    where
        F: FnMut(&GateStatus) + Send,
    {
        let mut tracker: Option<GateTracker> = None;
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    tracing::debug!("Gate watcher stopped");
                    break;
                }
                _ = ticker.tick() => {}
            }

            match self.fetch().await {
                Ok((settings, status)) => {
                    let local_now = Utc::now().naive_utc();
                    tracker
                        .get_or_insert_with(|| GateTracker::new(settings.clone()))
                        .sync(settings, status.server_time, local_now);
                }
                // 拉取失败时沿用上一次的设置与偏移量
                Err(e) => tracing::warn!(error = %e, "Failed to refresh gate settings"),
            }

            let Some(tracker) = tracker.as_mut() else {
                continue;
            };
            let (status, expired) = tracker.tick(Utc::now().naive_utc());
            if expired {
                tracing::info!(is_open = status.is_open, "Registration countdown expired");
                on_expire(&status);
            }
            self.tx.send_replace(Some(status));
        }
    }

    /// Run on the tokio runtime
    pub fn spawn<F>(self, on_expire: F) -> JoinHandle<()>
    where
        F: FnMut(&GateStatus) + Send + 'static,
    {
        tokio::spawn(self.run(on_expire))
    }
}
