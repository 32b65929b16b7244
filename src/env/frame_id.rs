//! Handles into the frame arena.

use std::fmt;
use std::rc::Rc;


pub type FrameIndex = usize;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialOrd, PartialEq)]
pub struct FrameId(FrameIndex);

/// Counted handle to a captured frame, as held by closures.
///
/// The arena keeps a captured frame while any FrameRef to it is held outside
/// the arena, or while the frame is reachable from the root.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRef(Rc<FrameId>);


impl FrameId {
    pub const fn new(index: FrameIndex) -> FrameId {
        FrameId(index)
    }

    pub const fn index(&self) -> FrameIndex {
        self.0
    }
}

impl FrameRef {
    pub(crate) fn new(anchor: Rc<FrameId>) -> FrameRef {
        FrameRef(anchor)
    }

    pub fn id(&self) -> FrameId {
        *self.0
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Frame_{}]", self.index())
    }
}
