use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use super::FarmerId;

/// Exclusive-access token guarding a shared storage.
///
/// Clones share the same token. Locking is not reentrant: a farmer that
/// already holds the token is refused like anybody else.
#[derive(Clone, Default)]
pub struct NetMutex {
    holder: Rc<Cell<Option<FarmerId>>>,
}

impl NetMutex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holder(&self) -> Option<FarmerId> {
        self.holder.get()
    }

    pub fn is_locked(&self) -> bool {
        self.holder.get().is_some()
    }

    /// Acquires the token for `farmer`.
    ///
    /// # Errors
    ///
    /// Returns the current holder when the token is already taken.
    pub fn try_lock(&self, farmer: FarmerId) -> Result<MutexGuard, FarmerId> {
        match self.holder.get() {
            Some(holder) => Err(holder),
            None => {
                self.holder.set(Some(farmer));
                Ok(MutexGuard {
                    holder: Rc::clone(&self.holder),
                    farmer,
                })
            }
        }
    }
}

impl PartialEq for NetMutex {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.holder, &other.holder)
    }
}

impl Eq for NetMutex {}

impl fmt::Debug for NetMutex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetMutex")
            .field("holder", &self.holder.get())
            .finish()
    }
}

/// Held token; released when dropped.
#[must_use = "the token is released as soon as the guard is dropped"]
pub struct MutexGuard {
    holder: Rc<Cell<Option<FarmerId>>>,
    farmer: FarmerId,
}

impl MutexGuard {
    pub fn farmer(&self) -> FarmerId {
        self.farmer
    }
}

impl Drop for MutexGuard {
    fn drop(&mut self) {
        self.holder.set(None);
    }
}

impl fmt::Debug for MutexGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutexGuard")
            .field("farmer", &self.farmer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contention_reports_the_holder_until_the_guard_drops() {
        let mutex = NetMutex::new();
        let guard = mutex.try_lock(FarmerId(1)).expect("first lock");

        assert_eq!(mutex.try_lock(FarmerId(2)).unwrap_err(), FarmerId(1));
        assert_eq!(mutex.try_lock(FarmerId(1)).unwrap_err(), FarmerId(1));
        assert_eq!(guard.farmer(), FarmerId(1));

        drop(guard);
        assert!(!mutex.is_locked());
        assert!(mutex.try_lock(FarmerId(2)).is_ok());
    }

    #[test]
    fn early_return_paths_release_the_token() {
        fn busy_work(mutex: &NetMutex, bail: bool) -> Option<u32> {
            let _guard = mutex.try_lock(FarmerId(3)).ok()?;
            if bail {
                return None;
            }
            Some(1)
        }

        let mutex = NetMutex::new();
        assert_eq!(busy_work(&mutex, true), None);
        assert!(!mutex.is_locked());
        assert_eq!(busy_work(&mutex, false), Some(1));
        assert!(!mutex.is_locked());
    }

    #[test]
    fn clones_share_one_token() {
        let mutex = NetMutex::new();
        let shared = mutex.clone();
        let _guard = mutex.try_lock(FarmerId(1)).expect("lock");
        assert_eq!(shared.holder(), Some(FarmerId(1)));
        assert_eq!(mutex, shared);
        assert_ne!(mutex, NetMutex::new());
    }
}
