/// A camera action produced by whatever input layer drives the view.
///
/// The camera consumes actions, never raw key events, so keyboard, gamepad
/// and scripted playback all move it the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraAction {
    /// Move eye and target along the forward direction.
    Forward,
    Backward,
    /// Move eye and target sideways.
    StrafeLeft,
    StrafeRight,
    /// Move only the look-at target, turning the view.
    TargetForward,
    TargetBackward,
    TargetLeft,
    TargetRight,
    /// Switch between flight and walk-on-terrain modes.
    ToggleMode,
}
