//! DOLO Backdrop Animation
//!
//! Decorative canvas effects for the landing page background.
//!
//! # Features
//!
//! - **Reactive Outline**: a closed curve whose center lazily chases the
//!   pointer and whose radius breathes and stretches under damped springs
//! - **Self-scheduling loop**: one frame request in flight at a time, with a
//!   clean stop that cancels it and detaches the pointer listener
//! - **Grid**: vertical guide lines that follow the light/dark scheme

pub mod config;
pub mod error;
pub mod follower;
pub mod grid;
pub mod outline;
pub mod outline_loop;
pub mod ring;

pub use config::{GridConfig, OutlineConfig};
pub use error::{AnimationError, Result};
pub use follower::SmoothedCenter;
pub use grid::GridBackground;
pub use outline::{FrameStats, OutlineAnimator, PointerTarget};
pub use outline_loop::{HostContext, LoopState, OutlineLoop};
pub use ring::{RingSample, SampleRing};
