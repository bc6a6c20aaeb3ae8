//! Animation clips
//!
//! A clip is a single interpolated animation of one transform component over a fixed
//! duration. Clips are immutable once built; a [`Timeline`](super::Timeline) decides
//! when each one starts.

use crate::gfx::scene::Transform;

use super::easing::Easing;

/// Component axis of a vector property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Property of a [`Transform`] a clip writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetPath {
    Position(Axis),
    Rotation(Axis),
    Scale(Axis),
}

impl TargetPath {
    pub fn read(self, transform: &Transform) -> f32 {
        match self {
            TargetPath::Position(axis) => transform.position[axis.index()],
            TargetPath::Rotation(axis) => transform.rotation[axis.index()],
            TargetPath::Scale(axis) => transform.scale[axis.index()],
        }
    }

    pub fn write(self, transform: &mut Transform, value: f32) {
        match self {
            TargetPath::Position(axis) => transform.position[axis.index()] = value,
            TargetPath::Rotation(axis) => transform.rotation[axis.index()] = value,
            TargetPath::Scale(axis) => transform.scale[axis.index()] = value,
        }
    }
}

/// Direction of a clip relative to the property's current value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipMode {
    /// Animate from the current value to the clip value
    To,
    /// Animate from the clip value back to the current value
    From,
}

/// Where a clip is placed on its timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StartToken {
    /// Starts exactly when the previously added clip ends
    AfterPrevious,
    /// Starts together with the previously added clip
    WithPrevious,
    /// Absolute start time in seconds
    At(f32),
}

/// A single tween of one transform component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClip {
    target_path: TargetPath,
    duration_seconds: f32,
    easing: Easing,
    mode: ClipMode,
    value: f32,
    start: StartToken,
}

impl AnimationClip {
    fn new(mode: ClipMode, target_path: TargetPath, value: f32, duration_seconds: f32) -> Self {
        Self {
            target_path,
            duration_seconds: duration_seconds.max(0.0),
            easing: Easing::Linear,
            mode,
            value,
            start: StartToken::AfterPrevious,
        }
    }

    /// Clip animating `target_path` from wherever it is when the clip starts to `value`
    pub fn to(target_path: TargetPath, value: f32, duration_seconds: f32) -> Self {
        Self::new(ClipMode::To, target_path, value, duration_seconds)
    }

    /// Clip animating `target_path` from `value` back to the value it held before
    pub fn from(target_path: TargetPath, value: f32, duration_seconds: f32) -> Self {
        Self::new(ClipMode::From, target_path, value, duration_seconds)
    }

    /// Builder pattern: set the easing curve
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Builder pattern: set the timeline placement
    pub fn starting(mut self, start: StartToken) -> Self {
        self.start = start;
        self
    }

    pub fn target_path(&self) -> TargetPath {
        self.target_path
    }

    pub fn duration_seconds(&self) -> f32 {
        self.duration_seconds
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn mode(&self) -> ClipMode {
        self.mode
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn start(&self) -> StartToken {
        self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_path_reads_and_writes_component() {
        let mut transform = Transform::from_position(1.0, 2.0, 3.0);
        let path = TargetPath::Position(Axis::Y);

        assert_eq!(path.read(&transform), 2.0);
        path.write(&mut transform, 7.5);
        assert_eq!(transform.position.y, 7.5);
        assert_eq!(transform.position.x, 1.0);
        assert_eq!(transform.position.z, 3.0);
    }

    #[test]
    fn test_negative_duration_is_clamped() {
        let clip = AnimationClip::to(TargetPath::Scale(Axis::X), 2.0, -1.0);
        assert_eq!(clip.duration_seconds(), 0.0);
        assert_eq!(clip.start(), StartToken::AfterPrevious);
        assert_eq!(clip.easing(), Easing::Linear);
    }
}
