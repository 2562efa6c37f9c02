use crate::field::{FrameParams, PanelField, TowerFrame};

/// Which demo is on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scene {
    #[default]
    TowerFlow,
    PanelErosion,
}

impl Scene {
    pub fn next(self) -> Self {
        match self {
            Scene::TowerFlow => Scene::PanelErosion,
            Scene::PanelErosion => Scene::TowerFlow,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Scene::TowerFlow => "tower",
            Scene::PanelErosion => "panels",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "tower" => Some(Scene::TowerFlow),
            "panels" => Some(Scene::PanelErosion),
            _ => None,
        }
    }
}

/// Everything one pipeline invocation hands to the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderableArrays {
    /// Snapshot the arrays were computed from.
    pub params: FrameParams,
    pub tower: TowerFrame,
    pub panels: PanelField,
}
