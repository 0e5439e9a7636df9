//! Construction: derive regions and build the two flow networks.
//!
//! Node layout per axis network
//! - node 0: fixed reference;
//! - node `i + 1`: cell `i`;
//! - nodes `1 + n + 2k` and `2 + n + 2k`: upper and lower bound of net `k`.
//!
//! Arcs (all `π(dest) − π(source) ≤ cost`)
//! - region: `ref → cell` with cost `max`, `cell → ref` with cost `−min`;
//! - pin with offset `[lo, hi]` on owner `o` (a cell node, or the reference
//!   for external pins): `upper → o` with cost `−hi`, `o → lower` with cost `lo`.
//!
//! Each non-empty net starts with one unit of flow `upper → o → lower`
//! through its first pin. Those arcs form a forest, so the starting flow is
//! optimal and every other arc can be added incrementally. The upper node is
//! a unit source and the lower node a unit sink, which makes the running cost
//! equal to `Σ (upper − lower)`, the half-perimeter wirelength on this axis.

use std::sync::Arc;

use crate::flow::{Edge, FlowNetwork, NodeId};
use crate::geometry::{Axis, Cell, Net, Rect};

use super::state::Legalizer;
use super::types::{cell_node, net_nodes, LegalizeError, Placement, REFERENCE};

impl Legalizer {
    /// Build the root sub-problem.
    ///
    /// Obstacles are clipped to `bbox`; cell regions are `bbox` shrunk by the
    /// cell's extent. An empty region is not an error: the sub-problem is
    /// simply infeasible.
    pub fn new(
        bbox: Rect,
        cells: Vec<Cell>,
        nets: Vec<Net>,
        obstacles: Vec<Rect>,
    ) -> Result<Self, LegalizeError> {
        validate(&bbox, &cells, &nets)?;
        let obstacles: Vec<Rect> = obstacles
            .iter()
            .filter_map(|o| o.intersection(&bbox))
            .collect();
        let regions: Vec<Rect> = cells
            .iter()
            .map(|c| {
                let mut region = bbox;
                for axis in Axis::BOTH {
                    region.set_hi(axis, bbox.hi(axis) - c.extent(axis));
                }
                region
            })
            .collect();
        let placement = Placement {
            bbox,
            cells,
            nets,
            obstacles,
        };
        let x_flow = axis_network(&placement, &regions, Axis::X);
        let y_flow = axis_network(&placement, &regions, Axis::Y);
        tracing::debug!(
            cells = placement.cells.len(),
            nets = placement.nets.len(),
            obstacles = placement.obstacles.len(),
            cost = x_flow.cost() + y_flow.cost(),
            "built legalizer"
        );
        Ok(Self {
            placement: Arc::new(placement),
            x_flow,
            y_flow,
            regions,
            x_constraints: Vec::new(),
            y_constraints: Vec::new(),
            tightened: false,
        })
    }
}

fn validate(bbox: &Rect, cells: &[Cell], nets: &[Net]) -> Result<(), LegalizeError> {
    if bbox.is_inverted() {
        return Err(LegalizeError::InvalidBoundingBox(*bbox));
    }
    for (index, cell) in cells.iter().enumerate() {
        if cell.x_pitch <= 0 || cell.y_pitch <= 0 {
            return Err(LegalizeError::InvalidPitch {
                index,
                x_pitch: cell.x_pitch,
                y_pitch: cell.y_pitch,
            });
        }
        if cell.width < 0 || cell.height < 0 {
            return Err(LegalizeError::NegativeExtent {
                index,
                width: cell.width,
                height: cell.height,
            });
        }
    }
    for (net, n) in nets.iter().enumerate() {
        for (pin, p) in n.pins.iter().enumerate() {
            if let Some(owner) = p.owner {
                if owner >= cells.len() {
                    return Err(LegalizeError::UnknownOwner {
                        net,
                        pin,
                        owner,
                        cells: cells.len(),
                    });
                }
            }
        }
    }
    Ok(())
}

fn axis_network(placement: &Placement, regions: &[Rect], axis: Axis) -> FlowNetwork {
    let n = placement.cells.len();
    let node_count = 1 + n + 2 * placement.nets.len();
    let mut seed = Vec::new();
    let mut arcs: Vec<(NodeId, NodeId, i64)> = Vec::new();
    for (k, net) in placement.nets.iter().enumerate() {
        let (upper, lower) = net_nodes(n, k);
        for (p, pin) in net.pins.iter().enumerate() {
            let owner = pin.owner.map_or(REFERENCE, cell_node);
            let (lo, hi) = (pin.offset.lo(axis), pin.offset.hi(axis));
            if p == 0 {
                seed.push(Edge::with_flow(upper, owner, -hi, 1));
                seed.push(Edge::with_flow(owner, lower, lo, 1));
            } else {
                arcs.push((upper, owner, -hi));
                arcs.push((owner, lower, lo));
            }
        }
    }
    for (i, region) in regions.iter().enumerate() {
        arcs.push((REFERENCE, cell_node(i), region.hi(axis)));
        arcs.push((cell_node(i), REFERENCE, -region.lo(axis)));
    }
    let mut flow = FlowNetwork::new(node_count, seed);
    flow.add_edges(arcs);
    flow
}
