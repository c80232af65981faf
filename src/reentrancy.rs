//! Debug-only guard against nested entry into a table operation.
//!
//! The table hands control to user code only through its `BuildHasher`.
//! Should that code find a way back into the same table mid-operation
//! (a chain half relinked during growth, say), debug builds panic
//! instead of observing the partial state. Release builds compile the
//! guard away.

#[cfg(debug_assertions)]
use core::cell::Cell;
use core::marker::PhantomData;

#[derive(Debug)]
pub(crate) struct BusyFlag {
    #[cfg(debug_assertions)]
    busy: Cell<bool>,
    // !Send + !Sync, matching the single-threaded table.
    _nosend: PhantomData<*mut ()>,
}

impl BusyFlag {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            busy: Cell::new(false),
            _nosend: PhantomData,
        }
    }

    /// Mark the owner busy until the returned guard drops.
    #[inline]
    #[track_caller]
    pub(crate) fn enter(&self) -> BusyGuard<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.busy.replace(true),
                "hash table re-entered while an operation was in progress"
            );
            BusyGuard { owner: self }
        }

        #[cfg(not(debug_assertions))]
        {
            BusyGuard { _z: PhantomData }
        }
    }
}

impl Default for BusyFlag {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) struct BusyGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a BusyFlag,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.owner.busy.set(false);
    }
}
