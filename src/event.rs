/// A user-input event, independent of the terminal it was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Start,
    Reset,
    Quit,
    Resize,
}
