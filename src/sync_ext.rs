use std::sync::{Mutex, MutexGuard, PoisonError};

/// Extension trait for `Mutex<T>` to provide `lock_unpoisoned`
pub trait MutexExt<T> {
    fn lock_unpoisoned(&self) -> MutexGuard<'_, T>;
}

impl<T> MutexExt<T> for Mutex<T> {
    fn lock_unpoisoned(&self) -> MutexGuard<'_, T> {
        self.lock().unwrap_or_else(|err| {
            self.clear_poison();
            PoisonError::into_inner(err)
        })
    }
}
