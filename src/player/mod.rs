pub(crate) mod controller;
pub(crate) mod opts;
pub(crate) mod transition;
