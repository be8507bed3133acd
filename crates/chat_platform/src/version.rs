//! Deployed-version lookup and update polling.
//!
//! [`VersionTracker`] remembers the first build identifier it sees and compares every later poll
//! against it. A divergent poll emits [`HostAction::NewVersion`] but leaves the stored identifier
//! alone, so the host keeps being told about the new build until it reloads.

use std::cell::RefCell;

use leptos::logging;
use thiserror::Error;
use url::Url;

use crate::{
    actions::{ActionDispatcher, HostAction},
    platform::PlatformFuture,
};

/// Query parameter carrying the cache-defeating timestamp.
pub const CACHEBUSTER_PARAM: &str = "cachebuster";

/// Failure fetching the deployed build identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// The endpoint answered with a non-2xx status.
    #[error("version endpoint returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },
    /// The request never produced a response.
    #[error("version request failed: {0}")]
    Transport(String),
    /// The endpoint URL could not be built from the page location.
    #[error("version endpoint URL is invalid: {0}")]
    InvalidUrl(String),
    /// The environment has no way to fetch the version.
    #[error("version lookup is unavailable on this platform")]
    Unavailable,
}

/// Source of the currently deployed build identifier.
pub trait VersionFetcher {
    /// Performs one fetch. No retry and no timeout.
    fn fetch_version<'a>(&'a self) -> PlatformFuture<'a, Result<String, VersionError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Fetcher for targets that cannot look up a deployed version.
pub struct NoopVersionFetcher;

impl VersionFetcher for NoopVersionFetcher {
    fn fetch_version<'a>(&'a self) -> PlatformFuture<'a, Result<String, VersionError>> {
        Box::pin(async { Err(VersionError::Unavailable) })
    }
}

/// Builds the version endpoint URL for a page, appending the cachebuster timestamp.
///
/// `version_path` is resolved relative to `page_url`, so an app served from a sub-path asks its
/// own deployment rather than the origin root.
///
/// # Errors
///
/// Returns [`VersionError::InvalidUrl`] when the page URL or joined path cannot be parsed.
pub fn version_request_url(
    page_url: &str,
    version_path: &str,
    now_ms: u64,
) -> Result<String, VersionError> {
    let base = Url::parse(page_url).map_err(|err| VersionError::InvalidUrl(err.to_string()))?;
    let mut url = base
        .join(version_path)
        .map_err(|err| VersionError::InvalidUrl(err.to_string()))?;
    url.set_fragment(None);
    url.query_pairs_mut()
        .clear()
        .append_pair(CACHEBUSTER_PARAM, &now_ms.to_string());
    Ok(url.into())
}

/// Maps a fetched response onto the build identifier.
///
/// # Errors
///
/// Returns [`VersionError::Status`] for any status outside `200..300`.
pub fn version_from_response(status: u16, body: &str) -> Result<String, VersionError> {
    if !(200..300).contains(&status) {
        return Err(VersionError::Status { status });
    }
    Ok(body.trim().to_string())
}

#[derive(Debug, Default)]
/// Remembers the running build and diffs later polls against it.
pub struct VersionTracker {
    running_version: RefCell<Option<String>>,
}

impl VersionTracker {
    /// Creates a tracker that has not observed any version yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// First identifier observed by a successful poll.
    pub fn running_version(&self) -> Option<String> {
        self.running_version.borrow().clone()
    }

    /// Returns the running version if known, otherwise fetches a fresh one without storing it.
    ///
    /// # Errors
    ///
    /// Propagates the fetcher's [`VersionError`].
    pub async fn app_version<F>(&self, fetcher: &F) -> Result<String, VersionError>
    where
        F: VersionFetcher + ?Sized,
    {
        if let Some(version) = self.running_version() {
            return Ok(version);
        }
        fetcher.fetch_version().await
    }

    /// Fetches the deployed version and reports divergence to `dispatcher`.
    ///
    /// Returns the action that was dispatched, if any. Fetch failures are logged and swallowed.
    pub async fn poll_for_update<F, D>(&self, fetcher: &F, dispatcher: &D) -> Option<HostAction>
    where
        F: VersionFetcher + ?Sized,
        D: ActionDispatcher + ?Sized,
    {
        let fetched = match fetcher.fetch_version().await {
            Ok(version) => version,
            Err(err) => {
                logging::error!("Failed to poll for update: {err}");
                return None;
            }
        };

        let action = {
            let mut running = self.running_version.borrow_mut();
            match running.as_deref() {
                None => {
                    *running = Some(fetched);
                    None
                }
                Some(current) if current != fetched => Some(HostAction::NewVersion {
                    current_version: current.to_string(),
                    new_version: fetched,
                }),
                Some(_) => None,
            }
        };

        if let Some(action) = &action {
            dispatcher.dispatch(action.clone());
        }
        action
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, collections::VecDeque};

    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::actions::MemoryActionDispatcher;

    #[derive(Default)]
    struct ScriptedFetcher {
        responses: RefCell<VecDeque<Result<String, VersionError>>>,
        calls: Cell<usize>,
    }

    impl ScriptedFetcher {
        fn with(responses: impl IntoIterator<Item = Result<&'static str, VersionError>>) -> Self {
            Self {
                responses: RefCell::new(
                    responses
                        .into_iter()
                        .map(|response| response.map(str::to_string))
                        .collect(),
                ),
                calls: Cell::new(0),
            }
        }
    }

    impl VersionFetcher for ScriptedFetcher {
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

    #[test]
    fn first_poll_stores_then_divergent_polls_signal_without_updating() {
        let tracker = VersionTracker::new();
        let fetcher = ScriptedFetcher::with([Ok("1.2.3"), Ok("1.2.4"), Ok("1.2.3")]);
        let dispatcher = MemoryActionDispatcher::default();

        assert_eq!(block_on(tracker.poll_for_update(&fetcher, &dispatcher)), None);
        assert_eq!(tracker.running_version().as_deref(), Some("1.2.3"));

        let signalled = block_on(tracker.poll_for_update(&fetcher, &dispatcher));
        assert_eq!(
            signalled,
            Some(HostAction::NewVersion {
                current_version: "1.2.3".to_string(),
                new_version: "1.2.4".to_string(),
            })
        );
        assert_eq!(tracker.running_version().as_deref(), Some("1.2.3"));

        assert_eq!(block_on(tracker.poll_for_update(&fetcher, &dispatcher)), None);
        assert_eq!(dispatcher.actions().len(), 1);
    }

    #[test]
    fn repeated_divergent_polls_keep_signalling() {
        let tracker = VersionTracker::new();
        let fetcher = ScriptedFetcher::with([Ok("a"), Ok("b"), Ok("b"), Ok("c")]);
        let dispatcher = MemoryActionDispatcher::default();

        for _ in 0..4 {
            block_on(tracker.poll_for_update(&fetcher, &dispatcher));
        }

        let new_versions: Vec<_> = dispatcher
            .actions()
            .into_iter()
            .map(|action| match action {
                HostAction::NewVersion {
                    current_version,
                    new_version,
                } => (current_version, new_version),
                other => panic!("unexpected action {other:?}"),
            })
            .collect();
        assert_eq!(
            new_versions,
            vec![
                ("a".to_string(), "b".to_string()),
                ("a".to_string(), "b".to_string()),
                ("a".to_string(), "c".to_string()),
            ]
        );
    }

    #[test]
    fn failed_polls_are_swallowed_and_do_not_store() {
        let tracker = VersionTracker::new();
        let fetcher = ScriptedFetcher::with([
            Err(VersionError::Status { status: 502 }),
            Err(VersionError::Transport("offline".to_string())),
            Ok("2.0.0"),
        ]);
        let dispatcher = MemoryActionDispatcher::default();

        assert_eq!(block_on(tracker.poll_for_update(&fetcher, &dispatcher)), None);
        assert_eq!(block_on(tracker.poll_for_update(&fetcher, &dispatcher)), None);
        assert_eq!(tracker.running_version(), None);

        block_on(tracker.poll_for_update(&fetcher, &dispatcher));
        assert_eq!(tracker.running_version().as_deref(), Some("2.0.0"));
        assert!(dispatcher.actions().is_empty());
    }

    #[test]
    fn app_version_fetches_every_call_until_a_poll_succeeds() {
        let tracker = VersionTracker::new();
        let fetcher = ScriptedFetcher::with([Ok("0.9"), Ok("1.0"), Ok("1.0")]);

        assert_eq!(block_on(tracker.app_version(&fetcher)).as_deref(), Ok("0.9"));
        assert_eq!(tracker.running_version(), None);
        assert_eq!(fetcher.calls.get(), 1);

        block_on(tracker.poll_for_update(&fetcher, &MemoryActionDispatcher::default()));
        assert_eq!(fetcher.calls.get(), 2);

        assert_eq!(block_on(tracker.app_version(&fetcher)).as_deref(), Ok("1.0"));
        assert_eq!(block_on(tracker.app_version(&fetcher)).as_deref(), Ok("1.0"));
        assert_eq!(fetcher.calls.get(), 2);
    }

    #[test]
    fn app_version_rejects_with_fetch_error() {
        let tracker = VersionTracker::new();
        let fetcher = ScriptedFetcher::with([Err(VersionError::Status { status: 404 })]);
        assert_eq!(
            block_on(tracker.app_version(&fetcher)),
            Err(VersionError::Status { status: 404 })
        );
    }

    #[test]
    fn request_url_resolves_against_page_and_replaces_query() {
        assert_eq!(
            version_request_url("https://chat.example.org/?foo=1#/room/!a:hs", "version", 42)
                .expect("url"),
            "https://chat.example.org/version?cachebuster=42"
        );
        assert_eq!(
            version_request_url("https://example.org/app/index.html", "version", 7).expect("url"),
            "https://example.org/app/version?cachebuster=7"
        );
        assert!(matches!(
            version_request_url("not a url", "version", 1),
            Err(VersionError::InvalidUrl(_))
        ));
    }

    #[test]
    fn response_mapping_trims_body_and_rejects_non_success() {
        assert_eq!(version_from_response(200, " 1.2.3\n"), Ok("1.2.3".to_string()));
        assert_eq!(version_from_response(204, ""), Ok(String::new()));
        assert_eq!(
            version_from_response(304, "1.2.3"),
            Err(VersionError::Status { status: 304 })
        );
        assert_eq!(
            version_from_response(500, "oops"),
            Err(VersionError::Status { status: 500 })
        );
    }

    #[test]
    fn noop_fetcher_is_unavailable() {
        assert_eq!(
            block_on(NoopVersionFetcher.fetch_version()),
            Err(VersionError::Unavailable)
        );
    }
}
