//! POSIX backend: threads are pthreads underneath `std::thread`.

use super::NativeThread;
use std::os::unix::thread::{JoinHandleExt, RawPthread};
use std::thread::JoinHandle;

impl<T> NativeThread for JoinHandle<T> {
    type RawId = RawPthread;

    fn raw_id(&self) -> RawPthread {
        self.as_pthread_t()
    }
}
