//! Mock app catalog.
//!
//! The simulated phone renders a static set of apps. Role decides what a tap
//! does: utilities pass straight through, distractions trigger the intercept.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppRole {
    Utility,
    Distraction,
}

/// One icon on the simulated home screen. Static catalog, never mutated at
/// runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockApp {
    pub id: String,
    pub name: String,
    /// Icon reference (font-awesome token).
    pub icon: String,
    /// Opaque style token consumed by the presentation layer.
    pub color: String,
    pub role: AppRole,
}

impl MockApp {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
        role: AppRole,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            color: color.into(),
            role,
        }
    }

    pub fn is_distraction(&self) -> bool {
        self.role == AppRole::Distraction
    }
}

/// The default home-screen catalog: the six grid apps plus the four dock
/// utilities.
pub fn default_catalog() -> Vec<MockApp> {
    vec![
        MockApp::new(
            "insta",
            "InstaScroll",
            "fa-camera-retro",
            "bg-gradient-to-tr from-yellow-400 via-red-500 to-purple-600",
            AppRole::Distraction,
        ),
        MockApp::new(
            "tok",
            "TikTime",
            "fa-music",
            "bg-black border border-gray-700",
            AppRole::Distraction,
        ),
        MockApp::new("tube", "YouWatch", "fa-play", "bg-red-600", AppRole::Distraction),
        MockApp::new("mail", "Mail", "fa-envelope", "bg-blue-500", AppRole::Utility),
        MockApp::new("maps", "Maps", "fa-map-marker-alt", "bg-green-500", AppRole::Utility),
        MockApp::new("notes", "Notes", "fa-sticky-note", "bg-yellow-500", AppRole::Utility),
        // Dock
        MockApp::new("phone", "Phone", "fa-phone", "bg-green-500", AppRole::Utility),
        MockApp::new("safari", "Safari", "fa-compass", "bg-blue-400", AppRole::Utility),
        MockApp::new("messages", "Messages", "fa-comment", "bg-green-400", AppRole::Utility),
        MockApp::new("music", "Music", "fa-music", "bg-red-400", AppRole::Utility),
    ]
}

/// Look up an app by id.
pub fn find<'a>(catalog: &'a [MockApp], id: &str) -> Option<&'a MockApp> {
    catalog.iter().find(|app| app.id == id)
}
