// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The electrical topology that accompanies a composed diagram.

use crate::topology::TopologyGraph;
use crate::Error;

pub(crate) const MV_BUS: &str = "MV_BUS";
pub(crate) const MV_SWITCH: &str = "MV_SWITCH";
pub(crate) const MV_BREAKER: &str = "MV_BREAKER";
pub(crate) const CT: &str = "CT";
pub(crate) const TAP: &str = "TAP";
pub(crate) const EARTHING_SWITCH: &str = "EARTHING_SWITCH";
pub(crate) const SURGE_ARRESTER: &str = "SURGE_ARRESTER";
pub(crate) const TRANSFORMER_HV: &str = "TRANSFORMER_HV";
pub(crate) const TRANSFORMER_LV: &str = "TRANSFORMER_LV";
pub(crate) const LV_BUS: &str = "LV_BUS";

pub(crate) fn feeder_breaker(k: usize) -> String {
    format!("FEEDER_BREAKER_{k}")
}

pub(crate) fn pcs_feeder(k: usize) -> String {
    format!("PCS_FEEDER_{k}")
}

/// Builds the topology of an AC block with `feeders` PCS feeders, numbered
/// from 1.
pub(crate) fn ac_block_topology(feeders: usize) -> Result<TopologyGraph, Error> {
    let mut nodes: Vec<String> = [
        MV_BUS,
        MV_SWITCH,
        MV_BREAKER,
        CT,
        TAP,
        EARTHING_SWITCH,
        SURGE_ARRESTER,
        TRANSFORMER_HV,
        TRANSFORMER_LV,
        LV_BUS,
    ]
    .into_iter()
    .map(str::to_string)
    .collect();

    let mut edges: Vec<(String, String)> = [
        (MV_BUS, MV_SWITCH),
        (MV_SWITCH, MV_BREAKER),
        (MV_BREAKER, CT),
        (CT, TAP),
        (TAP, EARTHING_SWITCH),
        (TAP, SURGE_ARRESTER),
        (TAP, TRANSFORMER_HV),
        (TRANSFORMER_HV, TRANSFORMER_LV),
        (TRANSFORMER_LV, LV_BUS),
    ]
    .into_iter()
    .map(|(a, b)| (a.to_string(), b.to_string()))
    .collect();

    for k in 1..=feeders {
        nodes.push(feeder_breaker(k));
        nodes.push(pcs_feeder(k));
        edges.push((LV_BUS.to_string(), feeder_breaker(k)));
        edges.push((feeder_breaker(k), pcs_feeder(k)));
    }

    TopologyGraph::try_new(nodes, edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ac_block_topology() -> Result<(), Error> {
        let graph = ac_block_topology(3)?;
        assert_eq!(graph.root(), Some(MV_BUS));
        assert_eq!(graph.nodes().count(), 16);
        assert_eq!(graph.edges().count(), 15);
        assert!(graph
            .leaves_with_prefix("PCS_FEEDER_")
            .eq(["PCS_FEEDER_1", "PCS_FEEDER_2", "PCS_FEEDER_3"]));
        assert!(graph.path_exists(MV_BUS, "PCS_FEEDER_3")?);
        assert!(graph.path_exists(TAP, TRANSFORMER_HV)?);
        assert!(!graph.path_exists(EARTHING_SWITCH, LV_BUS)?);
        Ok(())
    }
}
