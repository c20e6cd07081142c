// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the `SymbolKind` enum, which represents the closed set
//! of electrical symbols, together with the anchor names and roles attached
//! to them.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::Error;

/// The voltage level a busbar belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusClass {
    #[serde(rename = "MV")]
    Mv,
    #[serde(rename = "LV")]
    Lv,
}

impl Display for BusClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BusClass::Mv => write!(f, "MV"),
            BusClass::Lv => write!(f, "LV"),
        }
    }
}

/// Represents the kind of a symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Busbar(BusClass),
    Conductor,
    NodeDot,
    Switch,
    CircuitBreaker,
    EarthingSwitch,
    Ct,
    SurgeArrester,
    Transformer,
    PcsBox,
}

impl Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolKind::Busbar(class) => write!(f, "{}Busbar", class),
            other => write!(f, "{}", other.tag()),
        }
    }
}

/// The type tag of a symbol, as it appears in the scene-graph document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolTag {
    Busbar,
    Conductor,
    NodeDot,
    Switch,
    CircuitBreaker,
    EarthingSwitch,
    #[serde(rename = "CT")]
    Ct,
    SurgeArrester,
    Transformer,
    #[serde(rename = "PCSBox")]
    PcsBox,
}

impl Display for SymbolTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SymbolTag::Busbar => "Busbar",
            SymbolTag::Conductor => "Conductor",
            SymbolTag::NodeDot => "NodeDot",
            SymbolTag::Switch => "Switch",
            SymbolTag::CircuitBreaker => "CircuitBreaker",
            SymbolTag::EarthingSwitch => "EarthingSwitch",
            SymbolTag::Ct => "CT",
            SymbolTag::SurgeArrester => "SurgeArrester",
            SymbolTag::Transformer => "Transformer",
            SymbolTag::PcsBox => "PCSBox",
        };
        write!(f, "{name}")
    }
}

/// A named connection point of a symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    Left,
    Right,
    Start,
    End,
    Center,
    In,
    Out,
    Ground,
    Tap,
    Hv,
    Lv,
    Top,
}

impl Display for Anchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Anchor::Left => "left",
            Anchor::Right => "right",
            Anchor::Start => "start",
            Anchor::End => "end",
            Anchor::Center => "center",
            Anchor::In => "in",
            Anchor::Out => "out",
            Anchor::Ground => "ground",
            Anchor::Tap => "tap",
            Anchor::Hv => "hv",
            Anchor::Lv => "lv",
            Anchor::Top => "top",
        };
        write!(f, "{name}")
    }
}

/// The semantic role of a placed symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Conductor,
    Bus,
    Junction,
    Device,
    /// A breaker that ties two sections of a split bus together.
    Coupler,
}

/// The axis along which a symbol's primary and secondary anchors lie.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Secondary anchor below the primary one.
    #[default]
    Vertical,
    /// Secondary anchor to the right of the primary one.
    Horizontal,
}

impl SymbolKind {
    /// Returns the exact set of anchors a symbol of this kind carries, primary
    /// anchor first.
    pub fn anchor_set(&self) -> &'static [Anchor] {
        match self {
            SymbolKind::Busbar(_) => &[Anchor::Left, Anchor::Right],
            SymbolKind::Conductor => &[Anchor::Start, Anchor::End],
            SymbolKind::NodeDot => &[Anchor::Center],
            SymbolKind::Switch | SymbolKind::CircuitBreaker | SymbolKind::Ct => {
                &[Anchor::In, Anchor::Out]
            }
            SymbolKind::EarthingSwitch => &[Anchor::In, Anchor::Ground],
            SymbolKind::SurgeArrester => &[Anchor::Tap, Anchor::Ground],
            SymbolKind::Transformer => &[Anchor::Hv, Anchor::Lv],
            SymbolKind::PcsBox => &[Anchor::Top],
        }
    }

    /// Returns the role a symbol of this kind has unless stated otherwise.
    pub fn default_role(&self) -> Role {
        match self {
            SymbolKind::Busbar(_) => Role::Bus,
            SymbolKind::Conductor => Role::Conductor,
            SymbolKind::NodeDot => Role::Junction,
            _ => Role::Device,
        }
    }

    /// Returns the document tag of this kind.
    pub fn tag(&self) -> SymbolTag {
        match self {
            SymbolKind::Busbar(_) => SymbolTag::Busbar,
            SymbolKind::Conductor => SymbolTag::Conductor,
            SymbolKind::NodeDot => SymbolTag::NodeDot,
            SymbolKind::Switch => SymbolTag::Switch,
            SymbolKind::CircuitBreaker => SymbolTag::CircuitBreaker,
            SymbolKind::EarthingSwitch => SymbolTag::EarthingSwitch,
            SymbolKind::Ct => SymbolTag::Ct,
            SymbolKind::SurgeArrester => SymbolTag::SurgeArrester,
            SymbolKind::Transformer => SymbolTag::Transformer,
            SymbolKind::PcsBox => SymbolTag::PcsBox,
        }
    }

    /// Returns the bus class, for busbars.
    pub fn bus_class(&self) -> Option<BusClass> {
        match self {
            SymbolKind::Busbar(class) => Some(*class),
            _ => None,
        }
    }

    /// Rebuilds a kind from its document tag and optional bus class.
    ///
    /// Busbars must carry a class and no other kind may.
    pub fn from_tag(tag: SymbolTag, class: Option<BusClass>) -> Result<Self, Error> {
        let kind = match (tag, class) {
            (SymbolTag::Busbar, Some(class)) => SymbolKind::Busbar(class),
            (SymbolTag::Busbar, None) => {
                return Err(Error::invalid_symbol("Busbar is missing its MV/LV class."))
            }
            (tag, Some(class)) => {
                return Err(Error::invalid_symbol(format!(
                    "{tag} can't carry a bus class, found {class}."
                )))
            }
            (SymbolTag::Conductor, None) => SymbolKind::Conductor,
            (SymbolTag::NodeDot, None) => SymbolKind::NodeDot,
            (SymbolTag::Switch, None) => SymbolKind::Switch,
            (SymbolTag::CircuitBreaker, None) => SymbolKind::CircuitBreaker,
            (SymbolTag::EarthingSwitch, None) => SymbolKind::EarthingSwitch,
            (SymbolTag::Ct, None) => SymbolKind::Ct,
            (SymbolTag::SurgeArrester, None) => SymbolKind::SurgeArrester,
            (SymbolTag::Transformer, None) => SymbolKind::Transformer,
            (SymbolTag::PcsBox, None) => SymbolKind::PcsBox,
        };
        Ok(kind)
    }
}

/// Predicates for checking the kind of a symbol.
pub(crate) trait KindPredicates {
    fn symbol_kind(&self) -> SymbolKind;

    fn is_conductor(&self) -> bool {
        self.symbol_kind() == SymbolKind::Conductor
    }

    fn is_busbar(&self) -> bool {
        matches!(self.symbol_kind(), SymbolKind::Busbar(_))
    }

    fn is_mv_busbar(&self) -> bool {
        self.symbol_kind() == SymbolKind::Busbar(BusClass::Mv)
    }

    fn is_lv_busbar(&self) -> bool {
        self.symbol_kind() == SymbolKind::Busbar(BusClass::Lv)
    }

    fn is_node_dot(&self) -> bool {
        self.symbol_kind() == SymbolKind::NodeDot
    }

    fn is_transformer(&self) -> bool {
        self.symbol_kind() == SymbolKind::Transformer
    }

    /// Whether the symbol is a device that must touch at least one conductor.
    fn needs_connection(&self) -> bool {
        !(self.is_conductor() || self.is_busbar() || self.is_node_dot())
    }

    /// Whether the symbol sits on top of a through conductor instead of
    /// interrupting it.
    fn is_inline(&self) -> bool {
        self.symbol_kind() == SymbolKind::Ct
    }
}

impl KindPredicates for SymbolKind {
    fn symbol_kind(&self) -> SymbolKind {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(SymbolKind::Busbar(BusClass::Mv).to_string(), "MVBusbar");
        assert_eq!(SymbolKind::Ct.to_string(), "CT");
        assert_eq!(SymbolKind::PcsBox.to_string(), "PCSBox");
        assert_eq!(Anchor::Hv.to_string(), "hv");
    }

    #[test]
    fn test_from_tag() {
        assert_eq!(
            SymbolKind::from_tag(SymbolTag::Busbar, Some(BusClass::Lv)),
            Ok(SymbolKind::Busbar(BusClass::Lv))
        );
        assert_eq!(
            SymbolKind::from_tag(SymbolTag::Busbar, None),
            Err(Error::invalid_symbol("Busbar is missing its MV/LV class."))
        );
        assert_eq!(
            SymbolKind::from_tag(SymbolTag::Ct, Some(BusClass::Mv)),
            Err(Error::invalid_symbol("CT can't carry a bus class, found MV."))
        );
        for kind in [
            SymbolKind::Conductor,
            SymbolKind::NodeDot,
            SymbolKind::Switch,
            SymbolKind::CircuitBreaker,
            SymbolKind::EarthingSwitch,
            SymbolKind::Ct,
            SymbolKind::SurgeArrester,
            SymbolKind::Transformer,
            SymbolKind::PcsBox,
        ] {
            assert_eq!(SymbolKind::from_tag(kind.tag(), None), Ok(kind));
        }
    }

    #[test]
    fn test_predicates() {
        assert!(SymbolKind::PcsBox.needs_connection());
        assert!(!SymbolKind::NodeDot.needs_connection());
        assert!(!SymbolKind::Busbar(BusClass::Lv).needs_connection());
        assert!(SymbolKind::Busbar(BusClass::Lv).is_lv_busbar());
        assert!(SymbolKind::Ct.is_inline());
        assert!(!SymbolKind::CircuitBreaker.is_inline());
    }
}
