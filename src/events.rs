use std::fmt;

/// Lifecycle notifications emitted by a [`crate::loader::Loader`] and
/// consumed by the overlay each frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderEvent {
    UrlChanged { locator: String },
    LoadingBegin,
    LoadingEnd,
}

impl fmt::Display for LoaderEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoaderEvent::UrlChanged { locator } => write!(f, "UrlChanged locator={locator}"),
            LoaderEvent::LoadingBegin => write!(f, "LoadingBegin"),
            LoaderEvent::LoadingEnd => write!(f, "LoadingEnd"),
        }
    }
}

/// Drain-style queue owned by a loader implementation. The frame loop drains
/// it once per frame; dropping the queue drops any undelivered events.
#[derive(Default)]
pub struct LoaderEventQueue {
    events: Vec<LoaderEvent>,
}

impl LoaderEventQueue {
    pub fn push(&mut self, event: LoaderEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> Vec<LoaderEvent> {
        self.events.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
