//! Character leaf nodes

use textfx_core::{Mat4, NodeId, NodeIdGenerator, Size};

/// Description of one character leaf, handed to the node factory
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceSpec {
    /// The single character shown by the leaf
    pub content: String,
    pub size: Size,
    /// Anchor within the parent, as fractions of its size
    pub align: [f32; 2],
    /// Anchor within the leaf itself, as fractions of `size`
    pub origin: [f32; 2],
}

impl SurfaceSpec {
    /// A centred leaf for `character`
    pub fn centered(character: char, size: Size) -> Self {
        Self {
            content: character.to_string(),
            size,
            align: [0.5, 0.5],
            origin: [0.5, 0.5],
        }
    }
}

/// Base trait for anything a character leaf can be
pub trait RenderNode {
    /// Payload emitted as the target of a render entry
    type Target;

    /// Produce this node's render payload
    fn render(&self) -> Self::Target;
}

/// Default leaf: a sized, centred surface holding one character
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    id: NodeId,
    spec: SurfaceSpec,
}

impl Surface {
    pub fn new(id: NodeId, spec: SurfaceSpec) -> Self {
        Self { id, spec }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn spec(&self) -> &SurfaceSpec {
        &self.spec
    }

    pub fn content(&self) -> &str {
        &self.spec.content
    }

    /// Factory that hands out surfaces with sequential ids
    pub fn factory() -> impl FnMut(SurfaceSpec) -> Surface {
        let mut ids = NodeIdGenerator::new();
        move |spec| Surface::new(ids.next(), spec)
    }
}

impl RenderNode for Surface {
    type Target = NodeId;

    fn render(&self) -> NodeId {
        self.id
    }
}

/// A leaf plus its fixed place in the text
#[derive(Clone, Debug)]
pub struct CharacterNode<N> {
    index: usize,
    character: char,
    base_transform: Mat4,
    node: N,
}

impl<N: RenderNode> CharacterNode<N> {
    pub(crate) fn new(index: usize, character: char, spacing: f32, node: N) -> Self {
        Self {
            index,
            character,
            base_transform: Mat4::translation(spacing * (index + 1) as f32, 0.0, 0.0),
            node,
        }
    }

    /// Position of the character in the text
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn character(&self) -> char {
        self.character
    }

    /// Offset of this character from the component origin
    pub fn base_transform(&self) -> &Mat4 {
        &self.base_transform
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    pub fn render(&self) -> N::Target {
        self.node.render()
    }
}
