use num_traits::Float;
use ordered_float::OrderedFloat;

/// What happened to a neighbour when an edge was considered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relaxation {
    /// The neighbour is no longer eligible; no step is emitted
    Skipped,
    /// Considered, but the known distance was already as good
    Unchanged,
    /// Distance and predecessor were updated
    Improved,
}

/// The set of nodes eligible for the next pathfinding iteration.
///
/// `dist` holds tentative distances (`None` is infinity) and `prev` the
/// predecessor links; both are owned by the search and lent to the frontier.
pub trait Frontier<W>
where
    W: Float,
{
    /// Reset for a search from `start` over `node_count` nodes
    fn open(&mut self, start: usize, node_count: usize);

    /// Remove and return the next node to expand
    fn select(&mut self, dist: &[Option<W>]) -> Option<usize>;

    /// Consider the edge `from -> to`
    fn relax(
        &mut self,
        from: usize,
        to: usize,
        weight: W,
        dist: &mut [Option<W>],
        prev: &mut [Option<usize>],
    ) -> Relaxation;
}

/// Lowest `key` among `candidates`; ties go to the lowest node index
pub(crate) fn min_by_key<W, I>(candidates: I) -> Option<usize>
where
    W: Float,
    I: Iterator<Item = (usize, W)>,
{
    candidates
        .min_by_key(|&(node, key)| (OrderedFloat(key), node))
        .map(|(node, _)| node)
}

/// Standard relax: take `dist[from] + weight` if it beats `dist[to]`
pub(crate) fn relax_shorter<W>(
    from: usize,
    to: usize,
    weight: W,
    dist: &mut [Option<W>],
    prev: &mut [Option<usize>],
) -> Relaxation
where
    W: Float,
{
    let Some(base) = dist[from] else {
        return Relaxation::Unchanged;
    };
    let candidate = base + weight;
    match dist[to] {
        Some(known) if known <= candidate => Relaxation::Unchanged,
        _ => {
            dist[to] = Some(candidate);
            prev[to] = Some(from);
            Relaxation::Improved
        }
    }
}
