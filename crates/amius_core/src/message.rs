//! Payloads exchanged between the game thread and the render/loader side

/// Kind of cross-thread notification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageType {
    /// The sender hit a fatal condition
    Panic,
    /// The sender finished loading and is ready
    Ready,
    /// The sender is shutting down
    End,
}

/// Message sent to the game thread
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameBoundMessage {
    pub kind: MessageType,
}

/// Message sent to the render side
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderBoundMessage {
    pub kind: MessageType,
}

impl GameBoundMessage {
    pub const fn new(kind: MessageType) -> Self {
        Self { kind }
    }
}

impl RenderBoundMessage {
    pub const fn new(kind: MessageType) -> Self {
        Self { kind }
    }
}
