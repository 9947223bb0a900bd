//! Host threads for running preparation work next to a kernel dispatch.
//!
//! One handle type, [`HostThread`], covers start, join, cancel and
//! join-all. The platform part is confined to [`NativeThread`], which
//! exposes the OS handle behind a thread and has exactly one backend per
//! target (`unix.rs` or `windows.rs`), chosen by `cfg` at build time.
//!
//! Cancellation is cooperative. `cancel` raises the thread's
//! [`CancelToken`] and releases the handle; the thread body is expected to
//! poll the token and return.

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

use crate::error::VizError;
use crate::status::check;
use log::{debug, warn};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{Builder, JoinHandle};

/// Access to the OS-level identity of a running thread.
pub trait NativeThread {
    /// `pthread_t` on unix, `HANDLE` on windows.
    type RawId: fmt::Debug;

    fn raw_id(&self) -> Self::RawId;
}

/// Shared flag a thread body polls to learn it should stop.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }
}

/// A named OS thread returning `T`.
pub struct HostThread<T> {
    name: String,
    handle: JoinHandle<T>,
    token: CancelToken,
}

/// Spawns `f` on a new named thread. The closure receives the thread's
/// cancel token and owns whatever it captured.
///
/// Spawn failures come back as `VizError::Status` at the caller's location.
#[track_caller]
pub fn start_thread<F, T>(name: &str, f: F) -> Result<HostThread<T>, VizError>
where
    F: FnOnce(CancelToken) -> T + Send + 'static,
    T: Send + 'static,
{
    let token = CancelToken::default();
    let inner = token.clone();
    let handle = check(Builder::new().name(name.to_owned()).spawn(move || f(inner)))?;
    debug!("started host thread '{name}'");
    Ok(HostThread {
        name: name.to_owned(),
        handle,
        token,
    })
}

impl<T> HostThread<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Blocks until the thread returns and reclaims it.
    ///
    /// Returns `VizError::ThreadPanicked` if the body panicked.
    pub fn join(self) -> Result<T, VizError> {
        match self.handle.join() {
            Ok(value) => {
                debug!("joined host thread '{}'", self.name);
                Ok(value)
            }
            Err(_) => {
                warn!("host thread '{}' panicked", self.name);
                Err(VizError::ThreadPanicked(self.name))
            }
        }
    }

    /// Signals the thread to stop and releases the handle without waiting.
    pub fn cancel(self) {
        warn!("cancelling host thread '{}'", self.name);
        self.token.cancel();
    }
}

#[cfg(any(unix, windows))]
impl<T> HostThread<T> {
    /// OS handle of the thread.
    pub fn native_id(&self) -> <JoinHandle<T> as NativeThread>::RawId {
        self.handle.raw_id()
    }
}

impl<T> fmt::Debug for HostThread<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostThread")
            .field("name", &self.name)
            .field("finished", &self.handle.is_finished())
            .field("cancelled", &self.token.is_cancelled())
            .finish()
    }
}

/// Waits for every thread in `threads` to finish.
///
/// All threads are joined even if one of them panicked; the first failure
/// is reported after the rest have been reclaimed.
pub fn join_all<T, I>(threads: I) -> Result<Vec<T>, VizError>
where
    I: IntoIterator<Item = HostThread<T>>,
{
    let mut values = Vec::new();
    let mut first_err = None;
    for thread in threads {
        match thread.join() {
            Ok(v) => values.push(v),
            Err(e) => {
                first_err.get_or_insert(e);
            }
        }
    }
    match first_err {
        Some(e) => Err(e),
        None => Ok(values),
    }
}

/// Signals every thread in `threads` to stop, then waits for all of them.
///
/// Bodies that already passed their last token check run to completion, so
/// nothing is left half-done when this returns. Errors as in [`join_all`].
pub fn cancel_all<T, I>(threads: I) -> Result<Vec<T>, VizError>
where
    I: IntoIterator<Item = HostThread<T>>,
{
    let threads: Vec<_> = threads.into_iter().collect();
    for thread in &threads {
        thread.token.cancel();
    }
    if !threads.is_empty() {
        warn!("cancelling {} host thread(s)", threads.len());
    }
    join_all(threads)
}
