/// A high-level request produced by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Close the window and end the frame loop.
    Quit,
    /// Dump the next presented frame to disk.
    CaptureFrame,
    /// Key with no binding, or an event that should not trigger anything.
    Noop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_are_distinct() {
        assert_ne!(Action::Quit, Action::CaptureFrame);
        assert_ne!(Action::CaptureFrame, Action::Noop);
    }
}
