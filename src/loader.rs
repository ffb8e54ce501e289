use crate::events::{LoaderEvent, LoaderEventQueue};
use std::path::Path;
use tracing::{error, info, warn};

/// Boundary to the asset-loading component. The overlay only ever issues
/// locators and reacts to the drained lifecycle events; everything else is
/// the loader's business.
pub trait Loader {
    fn load_url(&mut self, locator: &str);

    /// Advances any in-flight load by one frame step and drains the events it
    /// produced.
    fn poll_events(&mut self) -> Vec<LoaderEvent>;
}

enum LoadPhase {
    Idle,
    Queued(String),
    Importing(String),
}

/// Loader backed by the `gltf` crate. Accepts `file://` and plain-path
/// locators; the import runs on the frame after the request was accepted so
/// begin/end are observable as separate frames. Remote locators are
/// acknowledged but not retrieved.
pub struct GltfLoader {
    phase: LoadPhase,
    events: LoaderEventQueue,
}

impl GltfLoader {
    pub fn new() -> Self {
        Self { phase: LoadPhase::Idle, events: LoaderEventQueue::default() }
    }

    fn import(locator: &str) {
        if locator.starts_with("http://") || locator.starts_with("https://") {
            warn!("Remote retrieval is not wired into this harness, skipping {locator}");
            return;
        }
        let path = locator.strip_prefix("file://").unwrap_or(locator);
        match gltf::import(Path::new(path)) {
            Ok((document, buffers, images)) => {
                info!(
                    "Imported {path}: {} scenes, {} nodes, {} meshes, {} buffers, {} images",
                    document.scenes().count(),
                    document.nodes().count(),
                    document.meshes().count(),
                    buffers.len(),
                    images.len()
                );
            }
            Err(err) => error!("glTF import failed for {path}: {err}"),
        }
    }
}

impl Default for GltfLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader for GltfLoader {
    fn load_url(&mut self, locator: &str) {
        self.events.push(LoaderEvent::UrlChanged { locator: locator.to_string() });
        self.phase = LoadPhase::Queued(locator.to_string());
    }

    fn poll_events(&mut self) -> Vec<LoaderEvent> {
        match std::mem::replace(&mut self.phase, LoadPhase::Idle) {
            LoadPhase::Queued(locator) => {
                self.events.push(LoaderEvent::LoadingBegin);
                self.phase = LoadPhase::Importing(locator);
            }
            LoadPhase::Importing(locator) => {
                Self::import(&locator);
                self.events.push(LoaderEvent::LoadingEnd);
            }
            LoadPhase::Idle => {}
        }
        self.events.drain()
    }
}
