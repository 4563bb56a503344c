/// Failure reported by the firmware variable lookup, carried through as is.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("firmware status {status:#x}")]
pub struct LookupError {
    /// Raw `EFI_STATUS` of the failed call.
    pub status: usize,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Malformed command line, including an unparsable GUID.
    #[error("{0}")]
    BadArgument(&'static str),
    #[error("cannot read variable: {0}")]
    LookupFailure(#[from] LookupError),
    #[error("out of memory")]
    OutOfMemory,
    /// An integer format needs `width` bytes and the variable holds `len`.
    #[error("variable holds {len} bytes, {width} needed")]
    BufferTooShort { width: usize, len: usize },
}
