pub mod reader;
pub mod writer;

/// Magic bytes opening every npy file.
pub(crate) const MAGIC: &[u8; 6] = b"\x93NUMPY";
