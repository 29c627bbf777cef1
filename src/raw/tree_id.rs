use core::num::NonZero;
use core::sync::atomic::{AtomicUsize, Ordering};

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

/// Identity of one tree's node storage.
///
/// Travels with the arena on swap, so positions keep pointing at the same nodes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) struct TreeId(NonZero<usize>);

impl TreeId {
    pub(crate) fn next() -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        Self(NonZero::new(id).expect("`TreeId::next()` - identifier space exhausted!"))
    }
}
