//! In-memory arena of environment frames.

use log::{debug, trace};
use std::collections::{HashMap, HashSet};
use std::rc::{Rc, Weak};

use super::frame_id::{FrameId, FrameRef};
use crate::primitive::{Primitive, Procedure, Symbol};
use crate::sexp::{List, Sexp};


#[derive(Debug)]
pub struct MemEnv {
    frames: Vec<Option<Frame>>,
    free: Vec<usize>,
    live: usize,
}

#[derive(Debug, Default)]
struct Frame {
    parent: Option<FrameId>,
    bindings: HashMap<Symbol, Sexp>,
    // Set once a closure captures this frame; the FrameRefs handed out share
    // this allocation.
    anchor: Option<Weak<FrameId>>,
}


impl MemEnv {
    /// Create an arena holding only the root frame.
    pub fn new() -> Self {
        Self {
            frames: vec![Some(Frame::default())],
            free: Vec::new(),
            live: 1,
        }
    }

    pub fn root(&self) -> FrameId {
        FrameId::new(0)
    }

    /// Allocate a child frame of `parent`, reusing a freed slot if any.
    pub fn derive(&mut self, parent: FrameId) -> FrameId {
        let frame = Frame {
            parent: Some(parent),
            ..Default::default()
        };
        self.live += 1;
        match self.free.pop() {
            Some(index) => {
                self.frames[index] = Some(frame);
                FrameId::new(index)
            }
            None => {
                self.frames.push(Some(frame));
                FrameId::new(self.frames.len() - 1)
            }
        }
    }

    fn frame(&self, id: FrameId) -> Option<&Frame> {
        self.frames.get(id.index()).and_then(Option::as_ref)
    }

    fn frame_mut(&mut self, id: FrameId) -> Option<&mut Frame> {
        self.frames.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn parent(&self, frame: FrameId) -> Option<FrameId> {
        self.frame(frame).and_then(|f| f.parent)
    }

    /// Walk the chain from `frame` outward; the innermost binding wins.
    pub fn lookup(&self, frame: FrameId, name: &str) -> Option<&Sexp> {
        let mut curr = Some(frame);
        while let Some(id) = curr {
            let f = self.frame(id)?;
            if let Some(value) = f.bindings.get(name) {
                trace!("Found {} in {}", name, id);
                return Some(value);
            }
            curr = f.parent;
        }
        trace!("{} unbound from {}", name, frame);
        None
    }

    /// Like lookup, but yields the binding slot itself.
    pub fn lookup_mut(&mut self, frame: FrameId, name: &str) -> Option<&mut Sexp> {
        let id = self.resolve(frame, name)?;
        self.frame_mut(id)?.bindings.get_mut(name)
    }

    /// Find the frame holding the innermost binding of `name`.
    pub fn resolve(&self, frame: FrameId, name: &str) -> Option<FrameId> {
        let mut curr = Some(frame);
        while let Some(id) = curr {
            let f = self.frame(id)?;
            if f.bindings.contains_key(name) {
                return Some(id);
            }
            curr = f.parent;
        }
        None
    }

    /// Bind in `frame` itself, creating or overwriting.
    pub fn define(&mut self, frame: FrameId, name: Symbol, value: Sexp) {
        trace!("Binding {} in {}", name, frame);
        if let Some(f) = self.frame_mut(frame) {
            f.bindings.insert(name, value);
        }
    }

    /// Symbols bound directly in `frame`.
    pub fn symbols(&self, frame: FrameId) -> impl Iterator<Item = &Symbol> {
        self.frame(frame).into_iter().flat_map(|f| f.bindings.keys())
    }

    /// Number of live frames, root included.
    pub fn frame_count(&self) -> usize {
        self.live
    }

    /// Hand out a counted reference to `frame` for a closure to hold.
    ///
    /// From here on the frame outlives its call, until collect finds it
    /// unreachable.
    pub fn capture(&mut self, frame: FrameId) -> FrameRef {
        let f = match self.frame_mut(frame) {
            Some(f) => f,
            None => return FrameRef::new(Rc::new(frame)),
        };
        if let Some(anchor) = f.anchor.as_ref().and_then(Weak::upgrade) {
            return FrameRef::new(anchor);
        }
        let anchor = Rc::new(frame);
        f.anchor = Some(Rc::downgrade(&anchor));
        FrameRef::new(anchor)
    }

    /// Free `frame` at the end of its call, unless it was captured.
    pub fn release(&mut self, frame: FrameId) {
        if frame == self.root() {
            return;
        }
        let captured = match self.frame(frame) {
            Some(f) => f.anchor.is_some(),
            None => return,
        };
        if !captured {
            trace!("Releasing {}", frame);
            self.free_slot(frame.index());
        }
    }

    fn free_slot(&mut self, index: usize) -> Option<Frame> {
        let frame = self.frames.get_mut(index)?.take()?;
        self.free.push(index);
        self.live -= 1;
        Some(frame)
    }

    /// Whether any frame besides the root is live. Outside of a call, only
    /// captured frames can be.
    pub fn has_captured(&self) -> bool {
        self.live > 1
    }

    /// Free every captured frame that can no longer be reached, returning
    /// how many were freed.
    ///
    /// A frame is kept if it is the root, if a FrameRef to it (or a list
    /// holding one) is referenced from outside the arena, or if a kept frame
    /// reaches it through its parent or a closure in its bindings. References
    /// from outside are those not accounted for by the bindings themselves.
    ///
    /// Must not be called while a call is in progress: uncaptured call frames
    /// are only referenced from the host stack.
    pub fn collect(&mut self) -> usize {
        let mut internal = HashMap::new();
        let mut lists = Vec::new();
        for frame in self.frames.iter().flatten() {
            for value in frame.bindings.values() {
                count_refs(value, &mut internal, &mut lists);
            }
        }
        let held = |addr: usize, count: usize| count > internal.get(&addr).copied().unwrap_or(0);

        let mut pending = vec![self.root()];
        for (index, frame) in self.frames.iter().enumerate() {
            let anchor = frame.as_ref().and_then(|f| f.anchor.as_ref());
            if let Some(anchor) = anchor {
                if held(anchor.as_ptr() as usize, anchor.strong_count()) {
                    pending.push(FrameId::new(index));
                }
            }
        }
        let mut visited = HashSet::new();
        for list in lists.iter().filter(|l| held(l.addr(), l.ref_count())) {
            for elem in list.iter() {
                closure_frames(elem, &mut visited, &mut pending);
            }
        }

        let mut marked = vec![false; self.frames.len()];
        while let Some(id) = pending.pop() {
            let frame = match self.frame(id) {
                Some(frame) if !marked[id.index()] => frame,
                _ => continue,
            };
            marked[id.index()] = true;
            pending.extend(frame.parent);
            for value in frame.bindings.values() {
                closure_frames(value, &mut visited, &mut pending);
            }
        }
        drop(lists);

        // Bindings are dropped only once the arena is consistent again.
        let mut garbage = Vec::new();
        for (index, kept) in marked.into_iter().enumerate() {
            if !kept {
                garbage.extend(self.free_slot(index));
            }
        }
        if !garbage.is_empty() {
            debug!("Collected {} frames, {} live", garbage.len(), self.live);
        }
        garbage.len()
    }
}

impl Default for MemEnv {
    fn default() -> Self {
        Self::new()
    }
}


/// Count each reference to a list allocation or a frame anchor reachable
/// from `value`, descending into each list once.
fn count_refs<'a>(value: &'a Sexp, counts: &mut HashMap<usize, usize>, lists: &mut Vec<&'a List>) {
    let mut pending = vec![value];
    while let Some(value) = pending.pop() {
        match value {
            Sexp::List(list) => {
                let count = counts.entry(list.addr()).or_insert(0);
                *count += 1;
                if *count == 1 {
                    lists.push(list);
                    pending.extend(list.iter());
                }
            }
            Sexp::Primitive(Primitive::Procedure(Procedure::Closure(closure))) => {
                *counts.entry(closure.frame_ref().addr()).or_insert(0) += 1;
            }
            Sexp::Primitive(_) => {}
        }
    }
}

/// Push the frame of every closure reachable from `value`.
fn closure_frames(value: &Sexp, visited: &mut HashSet<usize>, frames: &mut Vec<FrameId>) {
    let mut pending = vec![value];
    while let Some(value) = pending.pop() {
        match value {
            Sexp::List(list) => {
                if visited.insert(list.addr()) {
                    pending.extend(list.iter());
                }
            }
            Sexp::Primitive(Primitive::Procedure(Procedure::Closure(closure))) => {
                frames.push(closure.env());
            }
            Sexp::Primitive(_) => {}
        }
    }
}


#[cfg(test)]
#[path = "./mem_env_test.rs"]
mod mem_env_test;
