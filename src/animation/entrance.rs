//! Scripted entrance of the showcase's focal object
//!
//! Two back-to-back clips on the target's position: a slide along X, then a drop
//! from above that bounces onto the floor.

use std::{cell::RefCell, rc::Weak};

use crate::gfx::scene::Transform;

use super::{
    clip::{AnimationClip, Axis, TargetPath},
    easing::Easing,
    scheduler::AnimationScheduler,
    timeline::{Timeline, TimelineHandle, TimelineState},
    AnimationError,
};

/// X position the object slides to
pub const ENTRANCE_SLIDE_X: f32 = 1.0;
/// Height the object drops from
pub const ENTRANCE_DROP_HEIGHT: f32 = 2.0;
pub const ENTRANCE_CLIP_SECONDS: f32 = 2.0;

pub struct EntranceTimeline;

impl EntranceTimeline {
    /// The entrance clips for `target`, not yet scheduled
    pub fn build(target: &Weak<RefCell<Transform>>) -> Timeline {
        Timeline::new(target)
            .add(
                AnimationClip::to(
                    TargetPath::Position(Axis::X),
                    ENTRANCE_SLIDE_X,
                    ENTRANCE_CLIP_SECONDS,
                )
                .with_easing(Easing::Power2Out),
            )
            .add(
                AnimationClip::from(
                    TargetPath::Position(Axis::Y),
                    ENTRANCE_DROP_HEIGHT,
                    ENTRANCE_CLIP_SECONDS,
                )
                .with_easing(Easing::BounceOut),
            )
    }

    /// Builds and schedules the entrance for `target`
    ///
    /// # Errors
    /// * [`AnimationError::TargetUnavailable`] if the target is not mounted
    /// * [`AnimationError::TargetBusy`] if a previous handle was not disposed
    pub fn create(
        scheduler: &mut AnimationScheduler,
        target: &Weak<RefCell<Transform>>,
    ) -> Result<TimelineHandle, AnimationError> {
        let handle = scheduler.play(Self::build(target))?;
        log::debug!(
            "Entrance timeline scheduled ({:.1}s)",
            handle.duration()
        );
        Ok(handle)
    }
}

/// Owner-side slot for the entrance timeline of one mounted object
///
/// Remounting reverts and disposes the previous timeline before creating the next
/// one, so a target never has two timelines at once.
#[derive(Default)]
pub struct EntranceSlot {
    handle: Option<TimelineHandle>,
}

impl EntranceSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)starts the entrance for `target`
    ///
    /// On failure the slot is left empty and the error is returned to the caller,
    /// which is expected to log it rather than abort the frame.
    pub fn mount(
        &mut self,
        scheduler: &mut AnimationScheduler,
        target: &Weak<RefCell<Transform>>,
    ) -> Result<(), AnimationError> {
        self.unmount();
        self.handle = Some(EntranceTimeline::create(scheduler, target)?);
        Ok(())
    }

    /// Teardown path: restores the target's resting pose and releases the timeline
    pub fn unmount(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.revert();
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.handle.is_some()
    }

    pub fn state(&self) -> Option<TimelineState> {
        self.handle.as_ref().map(TimelineHandle::state)
    }
}

impl Drop for EntranceSlot {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::timeline::TimelineEvent;
    use crate::gfx::scene::SharedTransform;
    use approx::assert_relative_eq;
    use std::rc::Rc;

    fn ball() -> SharedTransform {
        Rc::new(RefCell::new(Transform::from_position(0.0, 0.5, 0.0)))
    }

    #[test]
    fn test_entrance_schedule_is_sequential() {
        let target = ball();
        let timeline = EntranceTimeline::build(&Rc::downgrade(&target));

        let (first_start, first_end) = timeline.clip_window(0).unwrap();
        let (second_start, second_end) = timeline.clip_window(1).unwrap();
        assert_eq!(first_start, 0.0);
        assert_eq!(second_start, first_end);
        assert_eq!(second_end, 2.0 * ENTRANCE_CLIP_SECONDS);
    }

    #[test]
    fn test_second_clip_starts_when_first_ends_under_frame_ticks() {
        for (first, second) in [(2.0, 2.0), (0.5, 3.0), (1.3, 0.1)] {
            let target = ball();
            let events = Rc::new(RefCell::new(Vec::new()));
            let sink = events.clone();
            let timeline = Timeline::new(&Rc::downgrade(&target))
                .add(AnimationClip::to(TargetPath::Position(Axis::X), 1.0, first))
                .add(AnimationClip::from(TargetPath::Position(Axis::Y), 2.0, second))
                .on_event(move |event| sink.borrow_mut().push(event));

            let mut scheduler = AnimationScheduler::new();
            let _handle = scheduler.play(timeline).unwrap();
            for _ in 0..600 {
                scheduler.tick(1.0 / 60.0);
            }

            let events = events.borrow();
            let first_end = events.iter().find_map(|event| match event {
                TimelineEvent::ClipCompleted { index: 0, at } => Some(*at),
                _ => None,
            });
            let second_start = events.iter().find_map(|event| match event {
                TimelineEvent::ClipStarted { index: 1, at } => Some(*at),
                _ => None,
            });
            assert_eq!(first_end, Some(first));
            assert_eq!(second_start, first_end);
        }
    }

    #[test]
    fn test_entrance_end_pose() {
        let target = ball();
        let mut scheduler = AnimationScheduler::new();
        let handle = EntranceTimeline::create(&mut scheduler, &Rc::downgrade(&target)).unwrap();

        // The drop clip renders immediately
        assert_eq!(target.borrow().position.y, ENTRANCE_DROP_HEIGHT);

        scheduler.tick(1.0);
        {
            let transform = target.borrow();
            assert!(transform.position.x > 0.5, "power2.out runs ahead of linear");
            assert_eq!(transform.position.y, ENTRANCE_DROP_HEIGHT);
        }

        for _ in 0..4 {
            scheduler.tick(1.0);
        }
        let transform = target.borrow();
        assert_eq!(transform.position.x, ENTRANCE_SLIDE_X);
        assert_relative_eq!(transform.position.y, 0.5);
        assert_eq!(handle.state(), TimelineState::Completed);
    }

    #[test]
    fn test_dispose_mid_flight_stops_all_writes() {
        let target = ball();
        let mut scheduler = AnimationScheduler::new();
        let handle = EntranceTimeline::create(&mut scheduler, &Rc::downgrade(&target)).unwrap();

        scheduler.tick(2.5);
        handle.dispose();
        let frozen = target.borrow().position;

        for _ in 0..120 {
            scheduler.tick(1.0 / 60.0);
        }
        assert_eq!(target.borrow().position, frozen);
        assert_eq!(scheduler.live_count(), 0);
    }

    #[test]
    fn test_create_rejects_unmounted_target() {
        let target = ball();
        let weak = Rc::downgrade(&target);
        drop(target);

        let mut scheduler = AnimationScheduler::new();
        assert_eq!(
            EntranceTimeline::create(&mut scheduler, &weak).err(),
            Some(AnimationError::TargetUnavailable)
        );
        assert_eq!(scheduler.live_count(), 0);
    }

    #[test]
    fn test_create_twice_without_dispose_is_rejected() {
        let target = ball();
        let weak = Rc::downgrade(&target);
        let mut scheduler = AnimationScheduler::new();
        let _first = EntranceTimeline::create(&mut scheduler, &weak).unwrap();
        scheduler.tick(0.5);
        let before = target.borrow().position;

        assert_eq!(
            EntranceTimeline::create(&mut scheduler, &weak).err(),
            Some(AnimationError::TargetBusy)
        );
        assert_eq!(target.borrow().position, before);
    }

    #[test]
    fn test_slot_remount_replaces_previous_timeline() {
        let target = ball();
        let weak = Rc::downgrade(&target);
        let mut scheduler = AnimationScheduler::new();
        let mut slot = EntranceSlot::new();

        slot.mount(&mut scheduler, &weak).unwrap();
        scheduler.tick(1.0);
        slot.mount(&mut scheduler, &weak).unwrap();

        assert_eq!(scheduler.live_count(), 1);
        assert_eq!(slot.state(), Some(TimelineState::Created));
        // Reverted to the resting pose, then primed again
        assert_eq!(target.borrow().position.x, 0.0);
        assert_eq!(target.borrow().position.y, ENTRANCE_DROP_HEIGHT);
    }

    #[test]
    fn test_slot_unmount_restores_resting_pose() {
        let target = ball();
        let mut scheduler = AnimationScheduler::new();
        let mut slot = EntranceSlot::new();
        slot.mount(&mut scheduler, &Rc::downgrade(&target)).unwrap();
        scheduler.tick(3.0);

        slot.unmount();
        assert!(!slot.is_mounted());
        assert_eq!(target.borrow().position.x, 0.0);
        assert_eq!(target.borrow().position.y, 0.5);
    }
}
