//! Rendering module
//!
//! Static sprite blits only. The draw list is platform independent; the
//! browser backend lives in `platform::web`.

pub mod scene;

pub use scene::draw_scene;
