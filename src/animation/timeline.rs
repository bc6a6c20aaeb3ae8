//! Timelines: ordered compositions of clips bound to one transform
//!
//! A [`Timeline`] is assembled off-line with [`Timeline::add`], handed to an
//! [`AnimationScheduler`](super::AnimationScheduler) which advances it once per
//! frame, and controlled through the returned [`TimelineHandle`].

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use crate::gfx::scene::{SharedTransform, Transform};

use super::{
    clip::{AnimationClip, ClipMode, StartToken, TargetPath},
    AnimationError,
};

/// Lifecycle of a timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineState {
    /// Built and scheduled, not yet advanced
    Created,
    Playing,
    Completed,
    /// Cancelled; no clip will write to the target again
    Disposed,
}

/// Notifications emitted while a timeline plays
///
/// Times are timeline-local seconds taken from the resolved schedule, not from the
/// frame that happened to cross them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelineEvent {
    ClipStarted { index: usize, at: f32 },
    ClipCompleted { index: usize, at: f32 },
    Completed { at: f32 },
}

pub type EventListener = Box<dyn FnMut(TimelineEvent)>;

#[derive(Debug)]
struct ScheduledClip {
    clip: AnimationClip,
    start: f32,
    from_value: f32,
    to_value: f32,
    started: bool,
    finished: bool,
}

impl ScheduledClip {
    fn end(&self) -> f32 {
        self.start + self.clip.duration_seconds()
    }
}

/// Ordered clip sequence driving a single target transform
pub struct Timeline {
    target: Weak<RefCell<Transform>>,
    clips: Vec<ScheduledClip>,
    elapsed: f32,
    state: TimelineState,
    listener: Option<EventListener>,
    /// First value seen per path, restored by `revert`
    captured: Vec<(TargetPath, f32)>,
}

impl Timeline {
    /// Creates an empty timeline for `target`
    ///
    /// The target is held weakly: unmounting it stops the timeline instead of keeping
    /// the transform alive.
    pub fn new(target: &Weak<RefCell<Transform>>) -> Self {
        Self {
            target: target.clone(),
            clips: Vec::new(),
            elapsed: 0.0,
            state: TimelineState::Created,
            listener: None,
            captured: Vec::new(),
        }
    }

    /// Appends a clip, resolving its start time against the previously added clip
    pub fn add(mut self, clip: AnimationClip) -> Self {
        let start = match (clip.start(), self.clips.last()) {
            (StartToken::At(at), _) => at.max(0.0),
            (StartToken::AfterPrevious, Some(previous)) => previous.end(),
            (StartToken::WithPrevious, Some(previous)) => previous.start,
            (_, None) => 0.0,
        };

        self.clips.push(ScheduledClip {
            clip,
            start,
            from_value: 0.0,
            to_value: clip.value(),
            started: false,
            finished: false,
        });
        self
    }

    /// Registers a listener for clip start/completion notifications
    pub fn on_event<F>(mut self, listener: F) -> Self
    where
        F: FnMut(TimelineEvent) + 'static,
    {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Total length: the latest clip end
    pub fn duration(&self) -> f32 {
        self.clips
            .iter()
            .map(ScheduledClip::end)
            .fold(0.0, f32::max)
    }

    /// Resolved `(start, end)` of the clip at `index`
    pub fn clip_window(&self, index: usize) -> Option<(f32, f32)> {
        self.clips.get(index).map(|slot| (slot.start, slot.end()))
    }

    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }

    pub fn state(&self) -> TimelineState {
        self.state
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_disposed(&self) -> bool {
        self.state == TimelineState::Disposed
    }

    pub(crate) fn target(&self) -> Weak<RefCell<Transform>> {
        self.target.clone()
    }

    pub(crate) fn binds(&self, target: &Weak<RefCell<Transform>>) -> bool {
        Weak::ptr_eq(&self.target, target)
    }

    /// Applies `From` clips immediately so the target shows their start value before
    /// the first frame. Fails without touching anything if the target is unmounted.
    pub(crate) fn prime(&mut self) -> Result<(), AnimationError> {
        let target = self
            .target
            .upgrade()
            .ok_or(AnimationError::TargetUnavailable)?;
        let mut transform = target.borrow_mut();

        for slot in self.clips.iter_mut() {
            if slot.clip.mode() != ClipMode::From {
                continue;
            }
            let path = slot.clip.target_path();
            let current = path.read(&transform);
            capture(&mut self.captured, path, current);

            slot.from_value = slot.clip.value();
            slot.to_value = current;
            path.write(&mut transform, slot.from_value);
        }
        Ok(())
    }

    /// Advances the timeline by `dt` seconds and writes interpolated values
    pub(crate) fn advance(&mut self, dt: f32) {
        if matches!(
            self.state,
            TimelineState::Completed | TimelineState::Disposed
        ) {
            return;
        }

        let Some(target) = self.target.upgrade() else {
            log::warn!("Timeline target was unmounted mid-animation, disposing");
            self.dispose();
            return;
        };

        self.state = TimelineState::Playing;
        self.elapsed += dt.max(0.0);

        let Self {
            clips,
            elapsed,
            captured,
            ..
        } = self;
        let mut transform = target.borrow_mut();
        // Listeners run after the target is released so they can read it
        let mut events = Vec::new();

        for (index, slot) in clips.iter_mut().enumerate() {
            if slot.finished || *elapsed < slot.start {
                continue;
            }

            let path = slot.clip.target_path();
            if !slot.started {
                slot.started = true;
                if slot.clip.mode() == ClipMode::To {
                    slot.from_value = path.read(&transform);
                    capture(captured, path, slot.from_value);
                }
                events.push(TimelineEvent::ClipStarted {
                    index,
                    at: slot.start,
                });
            }

            let duration = slot.clip.duration_seconds();
            let progress = if duration > 0.0 {
                ((*elapsed - slot.start) / duration).min(1.0)
            } else {
                1.0
            };

            if progress >= 1.0 {
                path.write(&mut transform, slot.to_value);
                slot.finished = true;
                events.push(TimelineEvent::ClipCompleted {
                    index,
                    at: slot.end(),
                });
            } else {
                let eased = slot.clip.easing().apply(progress);
                let value = slot.from_value + (slot.to_value - slot.from_value) * eased;
                path.write(&mut transform, value);
            }
        }

        if clips.iter().all(|slot| slot.finished) {
            self.state = TimelineState::Completed;
            events.push(TimelineEvent::Completed {
                at: self.duration(),
            });
        }
        drop(transform);

        for event in events {
            emit(&mut self.listener, event);
        }
    }

    /// Cancels every pending clip and releases the listener
    pub(crate) fn dispose(&mut self) {
        if self.state != TimelineState::Disposed {
            log::debug!("Disposing timeline at t={:.3}s", self.elapsed);
        }
        self.state = TimelineState::Disposed;
        self.clips.clear();
        self.listener = None;
    }

    /// Restores every property this timeline touched, then disposes it
    pub(crate) fn revert(&mut self) {
        if let Some(target) = self.target.upgrade() {
            let mut transform = target.borrow_mut();
            for (path, value) in self.captured.iter().rev() {
                path.write(&mut transform, *value);
            }
        }
        self.captured.clear();
        self.dispose();
    }
}

fn capture(captured: &mut Vec<(TargetPath, f32)>, path: TargetPath, value: f32) {
    if !captured.iter().any(|(seen, _)| *seen == path) {
        captured.push((path, value));
    }
}

fn emit(listener: &mut Option<EventListener>, event: TimelineEvent) {
    if let Some(listener) = listener.as_mut() {
        listener(event);
    }
}

/// Scoped ownership of a scheduled timeline
///
/// The scheduler only holds a weak reference, so dropping the handle is enough to
/// guarantee no clip fires again. `dispose` makes that explicit.
pub struct TimelineHandle {
    timeline: Rc<RefCell<Timeline>>,
}

impl TimelineHandle {
    pub(crate) fn new(timeline: Rc<RefCell<Timeline>>) -> Self {
        Self { timeline }
    }

    pub fn state(&self) -> TimelineState {
        self.timeline.borrow().state()
    }

    pub fn elapsed(&self) -> f32 {
        self.timeline.borrow().elapsed()
    }

    pub fn duration(&self) -> f32 {
        self.timeline.borrow().duration()
    }

    pub fn clip_window(&self, index: usize) -> Option<(f32, f32)> {
        self.timeline.borrow().clip_window(index)
    }

    /// Whether the handle still drives `target`
    pub fn binds(&self, target: &SharedTransform) -> bool {
        self.timeline.borrow().binds(&Rc::downgrade(target))
    }

    /// Cancels in-flight clips; the target keeps its current values
    pub fn dispose(self) {
        self.timeline.borrow_mut().dispose();
    }

    /// Restores the target's pre-animation values, then disposes
    pub fn revert(self) {
        self.timeline.borrow_mut().revert();
    }
}

impl Drop for TimelineHandle {
    fn drop(&mut self) {
        // A listener disposing its own timeline already holds the borrow
        if let Ok(mut timeline) = self.timeline.try_borrow_mut() {
            timeline.dispose();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{clip::Axis, easing::Easing};
    use approx::assert_relative_eq;

    fn shared(x: f32, y: f32, z: f32) -> SharedTransform {
        Rc::new(RefCell::new(Transform::from_position(x, y, z)))
    }

    #[test]
    fn test_sequential_clips_resolve_back_to_back() {
        let target = shared(0.0, 0.0, 0.0);
        let timeline = Timeline::new(&Rc::downgrade(&target))
            .add(AnimationClip::to(TargetPath::Position(Axis::X), 1.0, 0.75))
            .add(AnimationClip::to(TargetPath::Position(Axis::Z), 1.0, 1.25))
            .add(AnimationClip::to(TargetPath::Position(Axis::Y), 1.0, 0.5));

        assert_eq!(timeline.clip_window(0), Some((0.0, 0.75)));
        assert_eq!(timeline.clip_window(1), Some((0.75, 2.0)));
        assert_eq!(timeline.clip_window(2), Some((2.0, 2.5)));
        assert_eq!(timeline.duration(), 2.5);
    }

    #[test]
    fn test_with_previous_and_absolute_placement() {
        let target = shared(0.0, 0.0, 0.0);
        let timeline = Timeline::new(&Rc::downgrade(&target))
            .add(AnimationClip::to(TargetPath::Position(Axis::X), 1.0, 2.0).starting(StartToken::At(1.0)))
            .add(AnimationClip::to(TargetPath::Position(Axis::Y), 1.0, 0.5).starting(StartToken::WithPrevious));

        assert_eq!(timeline.clip_window(0), Some((1.0, 3.0)));
        assert_eq!(timeline.clip_window(1), Some((1.0, 1.5)));
        assert_eq!(timeline.duration(), 3.0);
    }

    #[test]
    fn test_to_clip_captures_value_at_start() {
        let target = shared(0.5, 0.0, 0.0);
        let mut timeline = Timeline::new(&Rc::downgrade(&target))
            .add(AnimationClip::to(TargetPath::Position(Axis::X), 2.5, 1.0));

        timeline.advance(0.5);
        assert_relative_eq!(target.borrow().position.x, 1.5);
        timeline.advance(0.5);
        assert_eq!(target.borrow().position.x, 2.5);
        assert_eq!(timeline.state(), TimelineState::Completed);
    }

    #[test]
    fn test_from_clip_renders_immediately() {
        let target = shared(0.0, 0.5, 0.0);
        let mut timeline = Timeline::new(&Rc::downgrade(&target)).add(
            AnimationClip::from(TargetPath::Position(Axis::Y), 2.0, 1.0)
                .with_easing(Easing::BounceOut),
        );

        timeline.prime().unwrap();
        assert_eq!(target.borrow().position.y, 2.0);

        timeline.advance(1.0);
        assert_eq!(target.borrow().position.y, 0.5);
    }

    #[test]
    fn test_prime_fails_for_unmounted_target() {
        let target = shared(0.0, 0.5, 0.0);
        let weak = Rc::downgrade(&target);
        drop(target);

        let mut timeline =
            Timeline::new(&weak).add(AnimationClip::from(TargetPath::Position(Axis::Y), 2.0, 1.0));
        assert_eq!(timeline.prime(), Err(AnimationError::TargetUnavailable));
    }

    #[test]
    fn test_events_report_schedule_times() {
        let target = shared(0.0, 0.0, 0.0);
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        let mut timeline = Timeline::new(&Rc::downgrade(&target))
            .add(AnimationClip::to(TargetPath::Position(Axis::X), 1.0, 0.3))
            .add(AnimationClip::to(TargetPath::Position(Axis::Y), 1.0, 0.3))
            .on_event(move |event| sink.borrow_mut().push(event));

        // One oversized step crosses both clips
        timeline.advance(1.0);

        assert_eq!(
            *events.borrow(),
            vec![
                TimelineEvent::ClipStarted { index: 0, at: 0.0 },
                TimelineEvent::ClipCompleted { index: 0, at: 0.3 },
                TimelineEvent::ClipStarted { index: 1, at: 0.3 },
                TimelineEvent::ClipCompleted { index: 1, at: 0.6 },
                TimelineEvent::Completed { at: 0.6 },
            ]
        );
    }

    #[test]
    fn test_listener_can_read_target() {
        let target = shared(0.0, 0.0, 0.0);
        let reader = target.clone();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut timeline = Timeline::new(&Rc::downgrade(&target))
            .add(AnimationClip::to(TargetPath::Position(Axis::X), 1.0, 0.5))
            .on_event(move |event| {
                if let TimelineEvent::ClipCompleted { .. } = event {
                    sink.borrow_mut().push(reader.borrow().position.x);
                }
            });

        timeline.advance(1.0);

        assert_eq!(*seen.borrow(), vec![1.0]);
        assert_eq!(timeline.state(), TimelineState::Completed);
    }

    #[test]
    fn test_revert_restores_captured_values() {
        let target = shared(0.0, 0.5, 0.0);
        let mut timeline = Timeline::new(&Rc::downgrade(&target))
            .add(AnimationClip::to(TargetPath::Position(Axis::X), 1.0, 1.0))
            .add(AnimationClip::from(TargetPath::Position(Axis::Y), 2.0, 1.0));
        timeline.prime().unwrap();
        timeline.advance(0.5);

        timeline.revert();

        let transform = target.borrow();
        assert_eq!(transform.position.x, 0.0);
        assert_eq!(transform.position.y, 0.5);
        assert!(timeline.is_disposed());
    }

    #[test]
    fn test_unmounted_target_disposes_on_advance() {
        let target = shared(0.0, 0.0, 0.0);
        let mut timeline = Timeline::new(&Rc::downgrade(&target))
            .add(AnimationClip::to(TargetPath::Position(Axis::X), 1.0, 1.0));
        timeline.advance(0.25);
        drop(target);

        timeline.advance(0.25);
        assert_eq!(timeline.state(), TimelineState::Disposed);
    }
}
