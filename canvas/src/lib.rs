//! Polygon annotation overlay for live video frames.
//!
//! This crate is compiled to WebAssembly and runs in the browser, on top of
//! the video element that displays frames from the relay. It owns the full
//! editing lifecycle of the overlay: translating raw pointer events into
//! polygon mutations, hit-testing vertices, and redrawing the scene. The host
//! JavaScript layer only wires DOM events to the engine and feeds it decoded
//! [`frames::VideoFrame`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`polygon`] | Polygon model and the per-session polygon set |
//! | [`geom`] | Points and the proximity predicate |
//! | [`input`] | Editing modes, cursor affordance, and the gesture state machine |
//! | [`hit`] | Vertex hit-testing across the polygon set |
//! | [`surface`] | Overlay size and frame-feed liveness |
//! | [`render`] | Scene drawing through the [`render::Renderer`] adapter |
//! | [`consts`] | Shared constants (proximity threshold, marker sizes, colors) |

pub mod consts;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod input;
pub mod polygon;
pub mod render;
pub mod surface;
