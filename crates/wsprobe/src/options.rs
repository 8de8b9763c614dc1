/// Configuration for a [`StreamSplitter`](crate::StreamSplitter).
///
/// # Examples
///
/// ```rust
/// use wsprobe::{SplitterOptions, StreamSplitter};
///
/// let mut splitter = StreamSplitter::new(SplitterOptions {
///     retain_partial: true,
///     ..Default::default()
/// });
/// assert!(splitter.feed(r#"{"id":"#).values.is_empty());
/// assert_eq!(splitter.feed("7}").values.len(), 1);
/// ```
///
/// # Default
///
/// One-shot scanning with no fragment size limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitterOptions {
    /// Whether an unfinished fragment is kept for the next `feed`.
    ///
    /// When `false`, every `feed` is independent: a trailing fragment that
    /// has not closed by the end of the chunk is dropped (counted in
    /// `SplitOutcome::discarded`, never reported as an error) and the scan
    /// state resets. When `true`, nesting depth, string state and the partial
    /// fragment carry over so objects may span several chunks.
    ///
    /// # Default
    ///
    /// `false`
    pub retain_partial: bool,

    /// Upper bound on the bytes buffered for a single fragment.
    ///
    /// A fragment that grows past the limit stops being buffered. Its
    /// structure is still tracked, and when it closes it is reported as
    /// `FragmentError::TooLarge` rather than parsed.
    ///
    /// # Default
    ///
    /// `None` (unbounded)
    pub max_fragment_len: Option<usize>,
}
