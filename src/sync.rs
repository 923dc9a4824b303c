#[cfg(feature = "loom")]
pub use loom::sync::atomic::{AtomicI64, Ordering, fence};
#[cfg(not(feature = "loom"))]
pub use std::sync::atomic::{AtomicI64, Ordering, fence};

use std::time::Duration;

#[cfg(not(feature = "loom"))]
pub use antidote::{Mutex, MutexGuard};

#[cfg(feature = "loom")]
pub use loom::sync::MutexGuard;

#[cfg(feature = "loom")]
#[derive(Debug, Default)]
pub struct Mutex<T>(loom::sync::Mutex<T>);

#[cfg(feature = "loom")]
impl<T> Mutex<T> {
    pub fn new(t: T) -> Self {
        Self(loom::sync::Mutex::new(t))
    }

    pub fn lock(&self) -> MutexGuard<'_, T> {
        // loom mutexes only poison if a model thread panicked, which already fails the model
        self.0.lock().unwrap()
    }
}

/// Wait between two polls of the flip loop.
/// `Duration::ZERO` yields the processor, anything else sleeps that long.
///
/// 翻转循环两次轮询之间的等待。
/// `Duration::ZERO` 让出处理器，否则休眠指定时长。
#[cfg(not(feature = "loom"))]
#[inline]
pub fn pause(backoff: Duration) {
    if backoff.is_zero() {
        std::thread::yield_now();
    } else {
        std::thread::sleep(backoff);
    }
}

// loom cannot model sleeping, every pause is a yield
#[cfg(feature = "loom")]
#[inline]
pub fn pause(_backoff: Duration) {
    loom::thread::yield_now();
}
