use alloc::vec::Vec;

use super::handle::{Handle, RawHandle};

struct Slot<T> {
    generation: RawHandle,
    element: Option<T>,
}

/// Sole owner of the nodes of one tree.
///
/// Freed slots are recycled through `free`; their generation is bumped first so handles to the
/// previous occupant stop resolving. A slot whose generation is exhausted is retired instead of
/// recycled, so no generation is ever handed out twice for the same index.
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    retired: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            retired: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            retired: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    #[cfg(test)]
    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len() + self.retired)
    }

    #[cfg(test)]
    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(index) = self.free.pop() {
            // Reuse a free slot under its current generation.
            let slot = &mut self.slots[index];
            slot.element = Some(element);
            Handle::new(index, slot.generation)
        } else {
            // Strict less-than keeps every index representable by `Handle`.
            assert!(
                self.slots.len() < Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX
            );
            self.slots.push(Slot {
                generation: 0,
                element: Some(element),
            });
            Handle::new(self.slots.len() - 1, 0)
        }
    }

    /// Returns the element behind `handle`, or `None` if the handle is stale or foreign.
    #[inline]
    pub(crate) fn try_get(&self, handle: Handle) -> Option<&T> {
        self.slots
            .get(handle.to_index())
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.element.as_ref())
    }

    #[inline]
    pub(crate) fn contains(&self, handle: Handle) -> bool {
        self.try_get(handle).is_some()
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.try_get(handle).expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots
            .get_mut(handle.to_index())
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.element.as_mut())
            .expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let index = handle.to_index();
        let slot = self
            .slots
            .get_mut(index)
            .filter(|slot| slot.generation == handle.generation())
            .expect("`Arena::take()` - `handle` is invalid!");
        let element = slot.element.take().expect("`Arena::take()` - `handle` is invalid!");
        slot.generation += 1;
        if slot.generation == RawHandle::MAX {
            self.retired += 1;
        } else {
            self.free.push(index);
        }
        element
    }

    pub(crate) fn free(&mut self, handle: Handle) {
        drop(self.take(handle));
    }
}
