//! Cooperative, frame-synchronised animation scheduler

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use crate::gfx::scene::Transform;

use super::{
    timeline::{Timeline, TimelineHandle},
    AnimationError,
};

/// Advances every live timeline once per render frame
///
/// Timelines suspend between ticks and never block the frame. The scheduler keeps
/// only weak references: the [`TimelineHandle`] returned by [`play`](Self::play)
/// owns the timeline.
#[derive(Default)]
pub struct AnimationScheduler {
    timelines: Vec<Weak<RefCell<Timeline>>>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `timeline`, starting on the next tick
    ///
    /// Rejects the timeline if another live one already drives the same target, or if
    /// the target is not mounted. On rejection the target is left untouched.
    pub fn play(&mut self, mut timeline: Timeline) -> Result<TimelineHandle, AnimationError> {
        let busy = self.timelines.iter().filter_map(Weak::upgrade).any(|live| {
            let live = live.borrow();
            !live.is_disposed() && timeline_shares_target(&live, &timeline)
        });
        if busy {
            return Err(AnimationError::TargetBusy);
        }

        timeline.prime()?;

        let shared = Rc::new(RefCell::new(timeline));
        self.timelines.push(Rc::downgrade(&shared));
        Ok(TimelineHandle::new(shared))
    }

    /// Whether a live timeline currently drives `target`
    pub fn is_animating(&self, target: &Weak<RefCell<Transform>>) -> bool {
        self.timelines.iter().filter_map(Weak::upgrade).any(|live| {
            let live = live.borrow();
            !live.is_disposed() && live.binds(target)
        })
    }

    /// Advances all live timelines by `delta_time` seconds, dropping released ones
    pub fn tick(&mut self, delta_time: f32) {
        self.timelines.retain(|weak| match weak.upgrade() {
            Some(timeline) => match timeline.try_borrow_mut() {
                Ok(mut timeline) => {
                    timeline.advance(delta_time);
                    !timeline.is_disposed()
                }
                Err(_) => true,
            },
            None => false,
        });
    }

    /// Number of timelines still registered
    pub fn live_count(&self) -> usize {
        self.timelines
            .iter()
            .filter_map(Weak::upgrade)
            .filter(|timeline| !timeline.borrow().is_disposed())
            .count()
    }
}

fn timeline_shares_target(a: &Timeline, b: &Timeline) -> bool {
    a.binds(&b.target())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{
        clip::{AnimationClip, Axis, TargetPath},
        timeline::{TimelineEvent, TimelineState},
    };
    use crate::gfx::scene::SharedTransform;

    fn slide(target: &SharedTransform) -> Timeline {
        Timeline::new(&Rc::downgrade(target))
            .add(AnimationClip::to(TargetPath::Position(Axis::X), 1.0, 1.0))
    }

    #[test]
    fn test_tick_drives_timeline_to_completion() {
        let target: SharedTransform = Rc::new(RefCell::new(Transform::default()));
        let mut scheduler = AnimationScheduler::new();
        let handle = scheduler.play(slide(&target)).unwrap();

        assert_eq!(handle.state(), TimelineState::Created);
        scheduler.tick(0.5);
        assert_eq!(handle.state(), TimelineState::Playing);
        scheduler.tick(0.5);
        assert_eq!(handle.state(), TimelineState::Completed);
        assert_eq!(target.borrow().position.x, 1.0);
    }

    #[test]
    fn test_overlapping_timeline_is_rejected() {
        let target: SharedTransform = Rc::new(RefCell::new(Transform::default()));
        let mut scheduler = AnimationScheduler::new();
        let first = scheduler.play(slide(&target)).unwrap();

        assert_eq!(
            scheduler.play(slide(&target)).err(),
            Some(AnimationError::TargetBusy)
        );

        first.dispose();
        assert!(scheduler.play(slide(&target)).is_ok());
    }

    #[test]
    fn test_other_targets_are_independent() {
        let a: SharedTransform = Rc::new(RefCell::new(Transform::default()));
        let b: SharedTransform = Rc::new(RefCell::new(Transform::default()));
        let mut scheduler = AnimationScheduler::new();

        let _first = scheduler.play(slide(&a)).unwrap();
        let _second = scheduler.play(slide(&b)).unwrap();
        assert_eq!(scheduler.live_count(), 2);
        assert!(scheduler.is_animating(&Rc::downgrade(&a)));
    }

    #[test]
    fn test_tick_lets_listeners_read_the_target() {
        let target: SharedTransform = Rc::new(RefCell::new(Transform::default()));
        let reader = target.clone();
        let seen = Rc::new(RefCell::new(None));
        let sink = seen.clone();
        let timeline = slide(&target).on_event(move |event| {
            if let TimelineEvent::ClipCompleted { .. } = event {
                *sink.borrow_mut() = Some(reader.borrow().position.x);
            }
        });

        let mut scheduler = AnimationScheduler::new();
        let _handle = scheduler.play(timeline).unwrap();
        scheduler.tick(1.0);

        assert_eq!(*seen.borrow(), Some(1.0));
    }

    #[test]
    fn test_dropped_handle_is_released() {
        let target: SharedTransform = Rc::new(RefCell::new(Transform::default()));
        let mut scheduler = AnimationScheduler::new();
        let handle = scheduler.play(slide(&target)).unwrap();
        scheduler.tick(0.25);
        drop(handle);

        let x = target.borrow().position.x;
        scheduler.tick(0.25);
        assert_eq!(target.borrow().position.x, x);
        assert_eq!(scheduler.live_count(), 0);
    }
}
