//! # Animation Module
//!
//! Tween-style animation of scene transforms, driven cooperatively by the frame loop.
//!
//! - [`AnimationClip`] - one property, one duration, one easing curve
//! - [`Timeline`] - clips composed with explicit start-time relationships
//! - [`AnimationScheduler`] - advances timelines once per frame
//! - [`TimelineHandle`] - scoped ownership; disposing (or dropping) it cancels every
//!   pending clip
//! - [`EntranceTimeline`] / [`EntranceSlot`] - the showcase's scripted entrance
//!
//! ## Usage
//!
//! ```no_run
//! use std::{cell::RefCell, rc::Rc};
//! use vitrine::animation::{AnimationScheduler, EntranceSlot};
//! use vitrine::gfx::scene::Transform;
//!
//! let ball = Rc::new(RefCell::new(Transform::from_position(0.0, 0.5, 0.0)));
//! let mut scheduler = AnimationScheduler::new();
//! let mut slot = EntranceSlot::new();
//!
//! slot.mount(&mut scheduler, &Rc::downgrade(&ball)).unwrap();
//! // once per frame
//! scheduler.tick(1.0 / 60.0);
//! // on teardown
//! slot.unmount();
//! ```

pub mod clip;
pub mod easing;
pub mod entrance;
pub mod scheduler;
pub mod timeline;

pub use clip::{AnimationClip, Axis, ClipMode, StartToken, TargetPath};
pub use easing::Easing;
pub use entrance::{EntranceSlot, EntranceTimeline};
pub use scheduler::AnimationScheduler;
pub use timeline::{Timeline, TimelineEvent, TimelineHandle, TimelineState};

use thiserror::Error;

/// Failures local to a single timeline; never propagated into the frame loop
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AnimationError {
    /// The target transform is not mounted; nothing was scheduled
    #[error("animation target is not mounted")]
    TargetUnavailable,
    /// Another live timeline already drives the target
    #[error("animation target already has a live timeline")]
    TargetBusy,
}
