pub(crate) mod interpolate;
pub(crate) mod state;
pub(crate) mod trajectory;
pub(crate) mod viewport;
