use core::num::NonZero;

#[cfg(test)]
pub(crate) type RawHandle = u16;
#[cfg(not(test))]
pub(crate) type RawHandle = u32;

/// Stable address of a slot in an [`Arena`](super::arena::Arena).
///
/// The generation is bumped every time the slot is freed, so a handle that outlives its node
/// no longer resolves, even after the slot has been recycled.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) struct Handle {
    slot: NonZero<RawHandle>,
    generation: RawHandle,
}

impl Handle {
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn new(index: usize, generation: RawHandle) -> Self {
        assert!(index <= Self::MAX, "`Handle::new()` - `index` > `Handle::MAX`!");
        // `index + 1` cannot be zero and cannot overflow.
        #[allow(clippy::cast_possible_truncation)]
        Self {
            slot: NonZero::new((index + 1) as RawHandle).unwrap(),
            generation,
        }
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        (self.slot.get() - 1) as usize
    }

    #[inline]
    pub(crate) const fn generation(self) -> RawHandle {
        self.generation
    }
}
