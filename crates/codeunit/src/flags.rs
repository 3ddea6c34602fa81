use bitflags::bitflags;

bitflags! {
    /// Per-call conversion behavior switches.
    ///
    /// The bitset is open for future flags: bits outside the named ones are
    /// retained and ignored, so flag values received from elsewhere can be
    /// passed through unchanged.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ConvertFlags: u32 {
        /// Reject input that starts with a byte order mark instead of
        /// consuming it.
        const FORBID_BOM = 0x0000_0001;

        /// Halt on the first invalid scalar instead of substituting
        /// U+FFFD and continuing.
        ///
        /// The halting offset is reported through
        /// [`ConvertError::processed`](crate::ConvertError::processed).
        const STRICT_CODE_POINTS = 0x0000_0002;

        // Open set: unknown bits survive `from_bits_retain` round trips.
        const _ = !0;
    }
}
