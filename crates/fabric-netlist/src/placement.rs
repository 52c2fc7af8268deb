//! Nets for placement
//!
//! Placement only cares about which vertices talk to which, so every
//! source of an N:M net simply becomes the source of its own 1:M net.

use crate::net::{NMNet, Net};

/// Expand N:M nets into 1:M nets suitable for placement
///
/// Yields one net per source per input net, in net order then source order.
/// Nets without sources yield nothing.
pub fn expand_for_placement<'a, I>(nets: I) -> impl Iterator<Item = Net> + 'a
where
    I: IntoIterator<Item = &'a NMNet>,
    I::IntoIter: 'a,
{
    nets.into_iter().flat_map(|net| {
        net.sources
            .iter()
            .map(move |&source| Net::new(source, net.sinks.clone(), net.weight))
    })
}
