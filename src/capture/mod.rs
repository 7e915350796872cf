pub(crate) mod decode;
pub(crate) mod extract;
pub(crate) mod raster;
pub(crate) mod recorder;
