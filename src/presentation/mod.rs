pub(crate) mod builder;
pub(crate) mod model;
pub(crate) mod svg;
