pub(crate) mod fingerprint;
pub(crate) mod pipeline;
pub(crate) mod raster;
pub(crate) mod svg;
