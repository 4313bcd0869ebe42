//! Signal routing constraints
//!
//! Some allocations must respect fixed hardware routing: a DMA channel is only
//! useful if its trigger input can be reached from the peripheral that paces
//! the transfer. The resource manager does not know the interconnect; the
//! caller provides it through [`SignalRouting`].

use crate::resource::ResourceInstance;

/// Interconnect knowledge used by
/// [`ResourceManager::allocate_with_connection`](crate::ResourceManager::allocate_with_connection).
pub trait SignalRouting {
    /// Signal produced by a resource (e.g. a trigger output).
    type Source: Copy;
    /// Signal consumed by a resource (e.g. a trigger input).
    type Dest: Copy;

    /// The signal `candidate` drives, if it has one.
    fn output_of(&self, candidate: &ResourceInstance) -> Option<Self::Source>;

    /// The signal `candidate` listens to, if it has one.
    fn input_of(&self, candidate: &ResourceInstance) -> Option<Self::Dest>;

    /// Whether `source` can be routed to `dest`.
    fn can_connect(&self, source: Self::Source, dest: Self::Dest) -> bool;

    /// Whether `candidate` can receive `source` (if given) and drive `dest`
    /// (if given).
    fn accepts(
        &self,
        candidate: &ResourceInstance,
        source: Option<Self::Source>,
        dest: Option<Self::Dest>,
    ) -> bool {
        let input_ok = source.map_or(true, |s| {
            self.input_of(candidate)
                .is_some_and(|d| self.can_connect(s, d))
        });
        let output_ok = dest.map_or(true, |d| {
            self.output_of(candidate)
                .is_some_and(|s| self.can_connect(s, d))
        });
        input_ok && output_ok
    }
}
