//! Image sources: resolving locators to bytes, decoding, and asynchronous dimension probes.

/// Decoding to premultiplied RGBA8 and header-only dimension probes.
pub mod decode;
/// Probe requests, replies and the probers that answer them.
pub mod probe;
/// Classifying `image-src` values and reading their bytes.
pub mod source;
