use serde::{Deserialize, Serialize};

/// Surfaces the screen shows but does not implement.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Search,
    Notifications,
    Menu,
    Compose,
    Profile,
    Navigation,
    Groups,
    Shortcuts,
}

impl Feature {
    pub const ALL: [Feature; 8] = [
        Feature::Search,
        Feature::Notifications,
        Feature::Menu,
        Feature::Compose,
        Feature::Profile,
        Feature::Navigation,
        Feature::Groups,
        Feature::Shortcuts,
    ];

    /// Every gated surface reports "not yet available".
    pub fn is_available(self) -> bool {
        false
    }

    pub fn label(self) -> &'static str {
        match self {
            Feature::Search => "Search",
            Feature::Notifications => "Notifications",
            Feature::Menu => "Menu",
            Feature::Compose => "Ask a question",
            Feature::Profile => "Profile",
            Feature::Navigation => "Navigation",
            Feature::Groups => "Groups",
            Feature::Shortcuts => "Shortcuts",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_gated_is_available() {
        for feature in Feature::ALL {
            assert!(!feature.is_available());
        }
    }
}
