pub(crate) mod content;
pub(crate) mod image;
pub(crate) mod map;
pub(crate) mod video;
