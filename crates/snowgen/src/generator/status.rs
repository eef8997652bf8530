/// The outcome of a single, non-blocking generation attempt.
///
/// Returned by [`IdGenerator::try_next_id`]:
///
/// - [`IdGenStatus::Ready`] carries a freshly minted ID.
/// - [`IdGenStatus::Pending`] means every sequence value of the current
///   millisecond is spent and the clock has not ticked over yet. The
///   generator's state is untouched; poll again once `yield_for` milliseconds
///   have passed.
///
/// This lets callers build their own backoff or put a deadline around the
/// wait instead of blocking in [`IdGenerator::next_id`].
///
/// # Example
///
/// ```
/// use snowgen::{GeneratorConfig, IdGenStatus, IdGenerator, ManualClock};
///
/// let clock = ManualClock::new(1_528_538_400_000);
/// let config = GeneratorConfig::default().with_sequence_bits(1);
/// let generator = IdGenerator::new(786, config, clock.clone()).unwrap();
///
/// assert!(matches!(generator.try_next_id(), Ok(IdGenStatus::Ready { .. })));
/// assert!(matches!(generator.try_next_id(), Ok(IdGenStatus::Ready { .. })));
/// assert_eq!(
///     generator.try_next_id(),
///     Ok(IdGenStatus::Pending { yield_for: 1 })
/// );
///
/// clock.advance(1);
/// assert!(matches!(generator.try_next_id(), Ok(IdGenStatus::Ready { .. })));
/// ```
///
/// [`IdGenerator::try_next_id`]: crate::IdGenerator::try_next_id
/// [`IdGenerator::next_id`]: crate::IdGenerator::next_id
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IdGenStatus {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated ID.
        id: u64,
    },
    /// No ID could be generated because the sequence is exhausted for the
    /// current millisecond.
    Pending {
        /// Milliseconds to wait before polling again.
        yield_for: u64,
    },
}
