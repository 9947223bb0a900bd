//! Win32 backend: threads are `HANDLE`s underneath `std::thread`.

use super::NativeThread;
use std::os::windows::io::{AsRawHandle, RawHandle};
use std::thread::JoinHandle;

impl<T> NativeThread for JoinHandle<T> {
    type RawId = RawHandle;

    fn raw_id(&self) -> RawHandle {
        self.as_raw_handle()
    }
}
