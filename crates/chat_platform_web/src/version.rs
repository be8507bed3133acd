//! Deployed-version fetching and unattended update polling for the browser.

use std::rc::Rc;

use chat_platform::{
    unix_time_ms_now, version_from_response, version_request_url, Platform, PlatformConfig,
    PlatformFuture, VersionError, VersionFetcher,
};

use crate::bridge;

#[derive(Debug, Clone)]
/// Fetches `<page>/<version_path>?cachebuster=<now>` and returns the trimmed body.
pub struct WebVersionFetcher {
    version_path: String,
}

impl WebVersionFetcher {
    /// Creates a fetcher for a path relative to the current page.
    pub fn new(version_path: impl Into<String>) -> Self {
        Self {
            version_path: version_path.into(),
        }
    }

    /// Path joined onto the page URL.
    pub fn version_path(&self) -> &str {
        &self.version_path
    }
}

impl VersionFetcher for WebVersionFetcher {
    fn fetch_version<'a>(&'a self) -> PlatformFuture<'a, Result<String, VersionError>> {
        Box::pin(async move {
            let page_url = bridge::page_href().ok_or(VersionError::Unavailable)?;
            let url = version_request_url(&page_url, &self.version_path, unix_time_ms_now())?;
            let (status, body) = bridge::fetch_text(&url)
                .await
                .map_err(VersionError::Transport)?;
            version_from_response(status, &body)
        })
    }
}

/// Interval timer driving the update poller.
pub trait PollTimer {
    /// Calls `tick` every `interval_ms` and returns a callback that cancels the timer.
    ///
    /// # Errors
    ///
    /// Returns an error when the timer cannot be registered.
    fn start(
        &self,
        interval_ms: u32,
        tick: Box<dyn FnMut()>,
    ) -> Result<Box<dyn FnOnce()>, String>;
}

/// [`PollTimer`] backed by the page's `setInterval`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserPollTimer;

impl PollTimer for BrowserPollTimer {
    fn start(
        &self,
        interval_ms: u32,
        tick: Box<dyn FnMut()>,
    ) -> Result<Box<dyn FnOnce()>, String> {
        let interval = bridge::set_interval(interval_ms, tick)?;
        Ok(Box::new(move || bridge::clear_interval(&interval)))
    }
}

/// Running update poller. Polling stops when the handle is stopped or dropped.
pub struct UpdatePollHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl std::fmt::Debug for UpdatePollHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdatePollHandle")
            .field("running", &self.is_running())
            .finish()
    }
}

impl UpdatePollHandle {
    /// Returns whether the timer is still registered.
    pub fn is_running(&self) -> bool {
        self.cancel.is_some()
    }

    /// Cancels the timer. Polls already in flight still complete.
    pub fn stop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for UpdatePollHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Polls `platform` for a new deployment now and then every `config.update_poll_interval_ms`.
///
/// # Errors
///
/// Returns an error when `config` is invalid or the interval timer cannot be registered; no
/// poll runs in either case.
pub fn start_update_polling<P>(
    platform: Rc<P>,
    config: &PlatformConfig,
) -> Result<UpdatePollHandle, String>
where
    P: Platform + ?Sized + 'static,
{
    start_update_polling_on(&BrowserPollTimer, platform, config)
}

/// [`start_update_polling`] driven by a caller-supplied timer.
///
/// # Errors
///
/// Returns an error when `config` is invalid or `timer` fails to register.
pub fn start_update_polling_on<T, P>(
    timer: &T,
    platform: Rc<P>,
    config: &PlatformConfig,
) -> Result<UpdatePollHandle, String>
where
    T: PollTimer + ?Sized,
    P: Platform + ?Sized + 'static,
{
    config.validate().map_err(|err| err.to_string())?;
    poll_on_interval(
        timer,
        config.update_poll_interval_ms,
        move || -> PlatformFuture<'static, ()> {
            let platform = platform.clone();
            Box::pin(async move { platform.poll_for_update().await })
        },
    )
}

fn poll_on_interval<T, F>(timer: &T, interval_ms: u32, poll: F) -> Result<UpdatePollHandle, String>
where
    T: PollTimer + ?Sized,
    F: Fn() -> PlatformFuture<'static, ()> + 'static,
{
    let poll = Rc::new(poll);
    let ticking = poll.clone();
    let cancel = timer.start(interval_ms, Box::new(move || bridge::spawn_local(ticking())))?;

    bridge::spawn_local(poll());
    Ok(UpdatePollHandle {
        cancel: Some(cancel),
    })
}

// Off wasm, `spawn_local` runs each poll to completion before returning.
#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        collections::VecDeque,
    };

    use chat_platform::{HostAction, MemoryActionDispatcher, VersionTracker};
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Default)]
    struct ManualTimer {
        interval_ms: Cell<Option<u32>>,
        tick: RefCell<Option<Box<dyn FnMut()>>>,
        cancels: Rc<Cell<u32>>,
    }

    impl ManualTimer {
        fn fire(&self) {
            if let Some(tick) = self.tick.borrow_mut().as_mut() {
                tick();
            }
        }
    }

    impl PollTimer for ManualTimer {
        fn start(
            &self,
            interval_ms: u32,
            tick: Box<dyn FnMut()>,
        ) -> Result<Box<dyn FnOnce()>, String> {
            self.interval_ms.set(Some(interval_ms));
            *self.tick.borrow_mut() = Some(tick);
            let cancels = self.cancels.clone();
            Ok(Box::new(move || cancels.set(cancels.get() + 1)))
        }
    }

    struct QueuedFetcher {
        responses: RefCell<VecDeque<Result<String, VersionError>>>,
        calls: Cell<u32>,
    }

    impl QueuedFetcher {
        fn new(responses: &[&str]) -> Self {
            Self {
                responses: RefCell::new(
                    responses
                        .iter()
                        .map(|version| Ok((*version).to_string()))
                        .collect(),
                ),
                calls: Cell::new(0),
            }
        }
    }

    impl VersionFetcher for QueuedFetcher {
        fn fetch_version<'a>(&'a self) -> PlatformFuture<'a, Result<String, VersionError>> {
            self.calls.set(self.calls.get() + 1);
            let next = self
                .responses
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(VersionError::Unavailable));
            Box::pin(async move { next })
        }
    }

    fn tracked_poll(
        tracker: Rc<VersionTracker>,
        fetcher: Rc<QueuedFetcher>,
        dispatcher: MemoryActionDispatcher,
    ) -> impl Fn() -> PlatformFuture<'static, ()> {
        move || -> PlatformFuture<'static, ()> {
            let tracker = tracker.clone();
            let fetcher = fetcher.clone();
            let dispatcher = dispatcher.clone();
            Box::pin(async move {
                let _ = tracker
                    .poll_for_update(fetcher.as_ref(), &dispatcher)
                    .await;
            })
        }
    }

    #[test]
    fn polling_runs_immediately_then_on_every_tick() {
        let timer = ManualTimer::default();
        let tracker = Rc::new(VersionTracker::new());
        let fetcher = Rc::new(QueuedFetcher::new(&["1.2.3", "1.2.4"]));
        let dispatcher = MemoryActionDispatcher::default();

        let mut handle = poll_on_interval(
            &timer,
            60_000,
            tracked_poll(tracker.clone(), fetcher.clone(), dispatcher.clone()),
        )
        .expect("manual timer registers");

        assert!(handle.is_running());
        assert_eq!(timer.interval_ms.get(), Some(60_000));
        assert_eq!(fetcher.calls.get(), 1);
        assert_eq!(tracker.running_version().as_deref(), Some("1.2.3"));
        assert!(dispatcher.actions().is_empty());

        timer.fire();
        assert_eq!(fetcher.calls.get(), 2);
        assert_eq!(
            dispatcher.actions(),
            vec![HostAction::NewVersion {
                current_version: "1.2.3".to_string(),
                new_version: "1.2.4".to_string(),
            }]
        );

        handle.stop();
        assert!(!handle.is_running());
        assert_eq!(timer.cancels.get(), 1);
        drop(handle);
        assert_eq!(timer.cancels.get(), 1);
    }

    #[test]
    fn dropping_the_handle_cancels_the_timer_once() {
        let timer = ManualTimer::default();
        {
            let _handle = poll_on_interval(&timer, 1_000, || -> PlatformFuture<'static, ()> {
                Box::pin(async {})
            })
                .expect("manual timer registers");
            assert_eq!(timer.cancels.get(), 0);
        }
        assert_eq!(timer.cancels.get(), 1);
    }

    #[test]
    fn poll_interval_comes_from_config() {
        let timer = ManualTimer::default();
        let config = PlatformConfig::from_json(r#"{"updatePollIntervalMs": 60000}"#)
            .expect("valid config");

        let handle = start_update_polling_on(
            &timer,
            Rc::new(chat_platform::NoopPlatform::default()),
            &config,
        )
        .expect("manual timer registers");

        assert!(handle.is_running());
        assert_eq!(timer.interval_ms.get(), Some(60_000));
    }

    #[test]
    fn invalid_config_registers_no_timer() {
        let timer = ManualTimer::default();
        let config = PlatformConfig {
            update_poll_interval_ms: 0,
            ..PlatformConfig::default()
        };

        let err = start_update_polling_on(
            &timer,
            Rc::new(chat_platform::NoopPlatform::default()),
            &config,
        )
        .expect_err("zero interval is rejected");

        assert!(err.contains("updatePollIntervalMs"), "{err}");
        assert_eq!(timer.interval_ms.get(), None);
    }

    #[test]
    fn non_wasm_fetch_is_unavailable_without_a_page() {
        let fetcher = WebVersionFetcher::new("version");
        assert_eq!(fetcher.version_path(), "version");
        assert_eq!(
            block_on(fetcher.fetch_version()),
            Err(VersionError::Unavailable)
        );
    }

    #[test]
    fn non_wasm_polling_fails_to_register_interval() {
        let platform = Rc::new(chat_platform::NoopPlatform::default());
        let err = start_update_polling(platform.clone(), &PlatformConfig::default())
            .expect_err("no timers off wasm");
        assert_eq!(
            err,
            "Browser platform APIs are only available when compiled for wasm32"
        );
        assert_eq!(platform.running_version(), None);
    }
}
