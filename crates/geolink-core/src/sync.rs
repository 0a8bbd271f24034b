//! Writes projected positions to the graph and maintains derived anchors.

use crate::anchor::{AnchorSource, AnchorTable, GeoResolver, NodeClass};
use crate::constants::{HIDDEN_CLASS, POSITION_EPSILON};
use crate::options::PositionAccessor;
use crate::state::NodeId;
use crate::surface::{GraphSurface, MapSurface};
use fnv::FnvHashSet;

/// Per-node side effects the handler applied and must undo on teardown.
#[derive(Clone, Debug, Default)]
pub struct NodeLedger {
    /// Natively anchored nodes locked because they cannot be dragged.
    pub anchor_locks: FnvHashSet<NodeId>,
    /// Nodes locked for the duration of a map move.
    pub move_locks: FnvHashSet<NodeId>,
    /// Nodes carrying [`HIDDEN_CLASS`] because of the handler.
    pub hidden: FnvHashSet<NodeId>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncPolicy {
    /// Only natively anchored nodes take part; everything else is left as is.
    pub native_only: bool,
    pub hide_non_positional: bool,
    /// Lock natively anchored nodes against user drags.
    pub lock_native: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub written: usize,
    pub unchanged: usize,
    pub hidden: usize,
    pub shown: usize,
    pub skipped: usize,
}

/// Moves every anchored node in `ids` to its projected position.
///
/// Nodes already at their target are not written, so repeated passes over an
/// unchanged map produce no graph updates.
pub fn apply_positions<G, M>(
    graph: &mut G,
    resolver: &GeoResolver<'_, M>,
    ledger: &mut NodeLedger,
    ids: &[NodeId],
    policy: SyncPolicy,
) -> SyncReport
where
    G: GraphSurface,
    M: MapSurface,
{
    let mut report = SyncReport::default();
    for id in ids {
        // an anchor the map cannot project yet counts as no anchor
        let placed = resolver
            .resolve(id, policy.native_only)
            .and_then(|anchor| resolver.project_anchor(anchor).map(|target| (anchor, target)));
        let Some((anchor, target)) = placed else {
            if policy.native_only {
                report.skipped += 1;
                continue;
            }
            release_anchor_lock(graph, ledger, id);
            if policy.hide_non_positional
                && !ledger.hidden.contains(id)
                && !graph.has_class(id, HIDDEN_CLASS)
            {
                graph.set_class(id, HIDDEN_CLASS, true);
                ledger.hidden.insert(id.clone());
                report.hidden += 1;
            } else {
                report.skipped += 1;
            }
            continue;
        };

        match graph.position(id) {
            Some(current) if current.distance(target) <= POSITION_EPSILON => report.unchanged += 1,
            _ => {
                graph.set_position(id, target);
                report.written += 1;
            }
        }

        if ledger.hidden.remove(id) {
            graph.set_class(id, HIDDEN_CLASS, false);
            report.shown += 1;
        }

        if policy.lock_native && anchor.source == AnchorSource::Native {
            if !ledger.anchor_locks.contains(id) {
                if ledger.move_locks.contains(id) {
                    // our move lock becomes the anchor lock and outlives the settle
                    ledger.anchor_locks.insert(id.clone());
                } else if !graph.is_locked(id) {
                    graph.set_locked(id, true);
                    ledger.anchor_locks.insert(id.clone());
                }
            }
        } else {
            release_anchor_lock(graph, ledger, id);
        }
    }
    report
}

fn release_anchor_lock<G: GraphSurface>(graph: &mut G, ledger: &mut NodeLedger, id: &NodeId) {
    if ledger.anchor_locks.remove(id) && !ledger.move_locks.contains(id) {
        graph.set_locked(id, false);
    }
}

/// Caches the current placement of every non-native node in `ids` as its
/// derived anchor. Returns the number of anchors written.
pub fn capture_derived<G, M>(
    graph: &G,
    map: &M,
    accessor: &PositionAccessor,
    table: &mut AnchorTable,
    ids: &[NodeId],
) -> usize
where
    G: GraphSurface,
    M: MapSurface,
{
    let captured: Vec<_> = {
        let resolver = GeoResolver::new(accessor, table, map);
        ids.iter()
            .filter(|id| resolver.is_class(id, NodeClass::NotNativeGeographic))
            .filter_map(|id| {
                let coord = map.unproject(graph.position(id)?)?;
                Some((id.clone(), coord))
            })
            .collect()
    };
    let count = captured.len();
    for (id, coord) in captured {
        log::trace!("[sync] derived anchor {} -> {}", id, coord);
        table.insert(id, coord);
    }
    count
}

/// Drops derived anchors for `ids`. Returns how many existed.
pub fn clear_derived(table: &mut AnchorTable, ids: &[NodeId]) -> usize {
    ids.iter().filter(|id| table.remove(id).is_some()).count()
}
