pub(crate) mod backend;
pub(crate) mod map;
pub(crate) mod trigger;
