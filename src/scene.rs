// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The scene graph: placed symbol instances, labels and decorative shapes,
//! together with the electrical topology they depict.
//!
//! The scene graph is the contract shared by the validator and by any
//! renderer or document exporter.  Its JSON form carries, for every symbol,
//! the local anchors and the placement offset; absolute anchors are always
//! derived as `position + local`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::geometry::{Bounds, Point, Size};
use crate::symbol_kind::{Anchor, BusClass, KindPredicates, Role, SymbolKind, SymbolTag};
use crate::symbols::{Primitive, SymbolDefinition};
use crate::topology::{TopologyDoc, TopologyGraph};
use crate::Error;

/// The format tag written into every scene-graph document.
pub const SCENE_FORMAT: &str = "bess-sld/scene";

/// The current scene-graph document version.
pub const SCENE_VERSION: u32 = 1;

/// A symbol definition translated to an absolute position.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(into = "InstanceDoc")]
pub struct PlacedInstance {
    id: String,
    definition: SymbolDefinition,
    position: Point,
}

impl PlacedInstance {
    /// Places `definition` with its local origin at `position`.
    pub fn new(id: impl Into<String>, definition: SymbolDefinition, position: Point) -> Self {
        Self {
            id: id.into(),
            definition,
            position,
        }
    }

    /// Places `definition` so that its `anchor` lands exactly on `target`.
    ///
    /// Falls back to putting the local origin on `target` when the symbol
    /// has no such anchor.
    pub fn with_anchor_at(
        id: impl Into<String>,
        definition: SymbolDefinition,
        anchor: Anchor,
        target: Point,
    ) -> Self {
        let local = definition.anchor(anchor).unwrap_or_default();
        Self::new(id, definition, target.sub_point(local))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn definition(&self) -> &SymbolDefinition {
        &self.definition
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn kind(&self) -> SymbolKind {
        self.definition.kind()
    }

    pub fn role(&self) -> Role {
        self.definition.role()
    }

    /// Returns the absolute position of the given anchor.
    pub fn anchor(&self, anchor: Anchor) -> Option<Point> {
        self.definition
            .anchor(anchor)
            .map(|local| local.add_point(self.position))
    }

    /// Returns all anchors in absolute space, ordered by name.
    pub fn anchors(&self) -> impl Iterator<Item = (Anchor, Point)> + '_ {
        self.definition
            .anchors()
            .map(|(a, local)| (a, local.add_point(self.position)))
    }

    /// Returns the `(start, end)` points of a conductor, `None` for other
    /// symbols.
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        if !self.is_conductor() {
            return None;
        }
        Some((self.anchor(Anchor::Start)?, self.anchor(Anchor::End)?))
    }

    /// Returns the symbol's shapes in absolute space.
    pub fn shapes(&self) -> Vec<Primitive> {
        self.definition
            .shapes()
            .iter()
            .map(|s| s.translate(self.position))
            .collect()
    }

    /// Returns the absolute bounds of the symbol.
    pub fn bounds(&self) -> Bounds {
        self.definition.bounds().translate(self.position)
    }

    /// Moves the instance by `offset`.
    pub fn translate(&mut self, offset: Point) {
        self.position = self.position.add_point(offset);
    }
}

impl KindPredicates for PlacedInstance {
    fn symbol_kind(&self) -> SymbolKind {
        self.definition.kind()
    }
}

/// The semantic metadata block of a symbol node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct SymbolMeta {
    #[serde(rename = "type")]
    tag: SymbolTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    class: Option<BusClass>,
    role: Role,
    anchors: BTreeMap<Anchor, Point>,
    /// Overall width and height, written for transformers as layout
    /// metadata.  Recomputed from the shapes on decode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<Size>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct InstanceDoc {
    id: String,
    position: Point,
    shapes: Vec<Primitive>,
    meta: SymbolMeta,
}

impl TryFrom<InstanceDoc> for PlacedInstance {
    type Error = Error;

    fn try_from(doc: InstanceDoc) -> Result<Self, Self::Error> {
        let kind = SymbolKind::from_tag(doc.meta.tag, doc.meta.class)
            .map_err(|e| Error::invalid_symbol(format!("{}: {}", doc.id, e.description())))?;
        let definition =
            SymbolDefinition::try_new(kind, doc.meta.role, doc.shapes, doc.meta.anchors)
                .map_err(|e| Error::invalid_symbol(format!("{}: {}", doc.id, e.description())))?;
        Ok(PlacedInstance::new(doc.id, definition, doc.position))
    }
}

impl From<PlacedInstance> for InstanceDoc {
    fn from(instance: PlacedInstance) -> Self {
        let kind = instance.kind();
        InstanceDoc {
            meta: SymbolMeta {
                tag: kind.tag(),
                class: kind.bus_class(),
                role: instance.role(),
                anchors: instance.definition.anchors().collect(),
                size: instance
                    .is_transformer()
                    .then(|| instance.definition.size()),
            },
            shapes: instance.definition.shapes().to_vec(),
            id: instance.id,
            position: instance.position,
        }
    }
}

/// A text label with the box it occupies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    text: String,
    position: Point,
    bounds: Bounds,
    font_size: f64,
}

impl Label {
    /// Creates a label occupying `bounds`; its position is the top-left
    /// corner of the box.
    pub fn new(text: impl Into<String>, bounds: Bounds, font_size: f64) -> Self {
        Self {
            text: text.into(),
            position: bounds.min_point(),
            bounds,
            font_size,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }
}

/// A drawable node of the scene graph.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "primitive", rename_all = "snake_case")]
pub enum SceneNode {
    Symbol(PlacedInstance),
    Text(Label),
}

/// An ordered collection of drawable nodes plus the topology they depict.
///
/// Node order only affects paint order.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneGraph {
    format: String,
    version: u32,
    width: f64,
    height: f64,
    background: String,
    nodes: Vec<SceneNode>,
    topology: TopologyGraph,
}

/// The undecoded form of a [`SceneNode`].
#[derive(Deserialize)]
#[serde(tag = "primitive", rename_all = "snake_case")]
enum NodeDoc {
    Symbol(InstanceDoc),
    Text(Label),
}

/// The undecoded form of a [`SceneGraph`].  Symbols and topology are checked
/// while converting, so their errors keep their kind.
#[derive(Deserialize)]
struct SceneDoc {
    format: String,
    version: u32,
    width: f64,
    height: f64,
    background: String,
    nodes: Vec<NodeDoc>,
    #[serde(default)]
    topology: TopologyDoc,
}

impl TryFrom<SceneDoc> for SceneGraph {
    type Error = Error;

    fn try_from(doc: SceneDoc) -> Result<Self, Self::Error> {
        let mut scene = SceneGraph {
            format: doc.format,
            version: doc.version,
            width: doc.width,
            height: doc.height,
            background: doc.background,
            nodes: Vec::with_capacity(doc.nodes.len()),
            topology: TopologyGraph::default(),
        };
        scene.check_header()?;

        for node in doc.nodes {
            scene.nodes.push(match node {
                NodeDoc::Symbol(instance) => SceneNode::Symbol(instance.try_into()?),
                NodeDoc::Text(label) => SceneNode::Text(label),
            });
        }
        scene.topology = doc.topology.try_into()?;
        Ok(scene)
    }
}

impl SceneGraph {
    /// Creates an empty scene graph with a white background.
    pub fn new(size: Size, topology: TopologyGraph) -> Self {
        Self {
            format: SCENE_FORMAT.to_string(),
            version: SCENE_VERSION,
            width: size.width(),
            height: size.height(),
            background: "#ffffff".to_string(),
            nodes: Vec::new(),
            topology,
        }
    }

    /// Appends a node, painting it on top of the existing ones.
    pub fn push(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }

    pub fn push_instance(&mut self, instance: PlacedInstance) {
        self.push(SceneNode::Symbol(instance));
    }

    pub fn push_label(&mut self, label: Label) {
        self.push(SceneNode::Text(label));
    }

    /// Replaces the canvas size.
    pub fn set_size(&mut self, size: Size) {
        self.width = size.width();
        self.height = size.height();
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn background(&self) -> &str {
        &self.background
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn topology(&self) -> &TopologyGraph {
        &self.topology
    }

    /// Returns an iterator over the placed symbols, in paint order.
    pub fn instances(&self) -> impl Iterator<Item = &PlacedInstance> + '_ {
        self.nodes.iter().filter_map(|n| match n {
            SceneNode::Symbol(instance) => Some(instance),
            _ => None,
        })
    }

    /// Returns an iterator over the conductors, in paint order.
    pub fn conductors(&self) -> impl Iterator<Item = &PlacedInstance> + '_ {
        self.instances().filter(|i| i.is_conductor())
    }

    /// Returns an iterator over the labels, in paint order.
    pub fn labels(&self) -> impl Iterator<Item = &Label> + '_ {
        self.nodes.iter().filter_map(|n| match n {
            SceneNode::Text(label) => Some(label),
            _ => None,
        })
    }

    /// Returns the symbol with the given id.
    pub fn instance(&self, id: &str) -> Result<&PlacedInstance, Error> {
        self.instances()
            .find(|i| i.id() == id)
            .ok_or_else(|| Error::node_not_found(format!("Symbol {} not found.", id)))
    }

    /// Returns a mutable reference to the symbol with the given id.
    pub fn instance_mut(&mut self, id: &str) -> Result<&mut PlacedInstance, Error> {
        self.nodes
            .iter_mut()
            .find_map(|n| match n {
                SceneNode::Symbol(instance) if instance.id == id => Some(instance),
                _ => None,
            })
            .ok_or_else(|| Error::node_not_found(format!("Symbol {} not found.", id)))
    }

    /// Serialises the scene graph into its JSON document form.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialises the scene graph into indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a scene graph from its JSON document form, re-checking every
    /// symbol's anchor set and the topology.
    ///
    /// Malformed JSON is a `Serialization` error; a bad symbol or topology
    /// keeps its `InvalidSymbol` or `InvalidTopology` kind.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let doc: SceneDoc = serde_json::from_str(json)?;
        doc.try_into()
    }

    /// Like [`from_json`][Self::from_json], for an already parsed document.
    pub(crate) fn from_value(value: serde_json::Value) -> Result<Self, Error> {
        let doc: SceneDoc = serde_json::from_value(value)?;
        doc.try_into()
    }

    fn check_header(&self) -> Result<(), Error> {
        if self.format != SCENE_FORMAT {
            return Err(Error::serialization(format!(
                "Unknown scene format `{}`, expected `{}`.",
                self.format, SCENE_FORMAT
            )));
        }
        if self.version > SCENE_VERSION {
            return Err(Error::serialization(format!(
                "Scene version {} is newer than the supported version {}.",
                self.version, SCENE_VERSION
            )));
        }
        Ok(())
    }
}
