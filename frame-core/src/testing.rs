//! Test host shared by the unit tests.

use crate::{EditorConfig, EditorHost, Frame, ModeFlags, Size};

/// Records every callback it receives.
pub(crate) struct RecordingHost {
    pub config: EditorConfig,
    pub modes: ModeFlags,
    pub size: Size,
    pub redraws: usize,
    pub commits: usize,
    pub reverts: usize,
    pub last_commit: Option<Frame>,
}

impl RecordingHost {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            config: EditorConfig::default(),
            modes: ModeFlags::default(),
            size: Size::new(width, height),
            redraws: 0,
            commits: 0,
            reverts: 0,
            last_commit: None,
        }
    }
}

impl EditorHost for RecordingHost {
    fn canvas_size(&self) -> Size {
        self.size
    }

    fn modes(&self) -> ModeFlags {
        self.modes
    }

    fn config(&self) -> &EditorConfig {
        &self.config
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }

    fn on_commit(&mut self, tree: &Frame) {
        self.commits += 1;
        self.last_commit = Some(tree.clone());
    }

    fn on_revert(&mut self) {
        self.reverts += 1;
    }
}
