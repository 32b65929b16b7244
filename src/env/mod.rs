//! Lexical environments.
//!
//! Frames live in a single arena and refer to their parent by FrameId. A call
//! frame is freed when its call returns unless a closure captured it; captured
//! frames are reclaimed by `MemEnv::collect` once unreachable, including frames
//! kept alive only by closures stored in themselves.

pub mod frame_id;
pub mod mem_env;

pub use frame_id::{FrameId, FrameRef};
pub use mem_env::MemEnv;
