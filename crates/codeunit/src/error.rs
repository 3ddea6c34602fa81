use thiserror::Error;

/// Failure categories shared by every fallible operation in the crate.
///
/// The set is open: callers should treat unknown kinds as generic failures
/// rather than matching exhaustively.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A multi-unit sequence was cut short by the end of the input, or an
    /// argument made the operation meaningless (bad radix, unterminated
    /// destination).
    #[error("invalid argument")]
    InvalidArgument,
    /// The output buffer cannot hold the result plus its terminator.
    #[error("no space in output buffer")]
    NoSpace,
    /// A bounded copy or concatenate would overflow the destination.
    #[error("destination capacity exceeded")]
    Range,
    /// A byte order mark was found while [`FORBID_BOM`] was set.
    ///
    /// [`FORBID_BOM`]: crate::ConvertFlags::FORBID_BOM
    #[error("byte order mark forbidden")]
    BomForbidden,
    /// [`STRICT_CODE_POINTS`] was set and an invalid scalar was decoded.
    ///
    /// [`STRICT_CODE_POINTS`]: crate::ConvertFlags::STRICT_CODE_POINTS
    #[error("invalid code point")]
    InvalidCodePoint,
}

/// Error returned by the conversion entry points.
///
/// Failures are resumable: `written` destination units hold valid output,
/// and `processed` source units were fully consumed before the failure.
/// For truncated sequences and strict-mode rejections `processed` is the
/// offset of the offending source unit itself, so all units strictly
/// before it round-tripped cleanly.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at source unit {processed}")]
pub struct ConvertError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Destination units written before the failure.
    pub written: usize,
    /// Source units fully consumed before the failure.
    pub processed: usize,
}

impl ConvertError {
    pub(crate) fn new(kind: ErrorKind, written: usize, processed: usize) -> Self {
        Self {
            kind,
            written,
            processed,
        }
    }
}
