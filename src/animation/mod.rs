pub(crate) mod animator;
pub(crate) mod clock;
pub(crate) mod events;
pub(crate) mod tick;
pub(crate) mod timing;
