// src/controller/section.rs — The six view sections and the navigation targets.

/// A top-level view. Exactly one is visible at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Home,
    Upload,
    Analyze,
    Results,
    History,
    Login,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Home,
        Section::Upload,
        Section::Analyze,
        Section::Results,
        Section::History,
        Section::Login,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Upload => "Upload CV",
            Section::Analyze => "Analyze",
            Section::Results => "Results",
            Section::History => "History",
            Section::Login => "Account",
        }
    }

    /// Element id of the section container.
    pub fn element_id(&self) -> &'static str {
        match self {
            Section::Home => "home-section",
            Section::Upload => "upload-section",
            Section::Analyze => "analyze-section",
            Section::Results => "results-section",
            Section::History => "history-section",
            Section::Login => "login-section",
        }
    }
}

/// Something the user can click to move between sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Home,
    Upload,
    Analyze,
    History,
    /// "Get started" on the home section.
    GetStarted,
    /// "Go to analyze" on the upload confirmation panel.
    GoToAnalyze,
    /// The login button, which doubles as logout.
    LoginControl,
}

impl NavTarget {
    /// Entries of the navigation bar, in display order.
    pub const NAV_BAR: [NavTarget; 5] = [
        NavTarget::Home,
        NavTarget::Upload,
        NavTarget::Analyze,
        NavTarget::History,
        NavTarget::LoginControl,
    ];

    /// Section that ends up visible after following this target.
    pub fn destination(&self) -> Section {
        match self {
            NavTarget::Home => Section::Home,
            NavTarget::Upload | NavTarget::GetStarted => Section::Upload,
            NavTarget::Analyze | NavTarget::GoToAnalyze => Section::Analyze,
            NavTarget::History => Section::History,
            NavTarget::LoginControl => Section::Login,
        }
    }

    /// Position in the navigation bar for a section, if it has one.
    pub fn nav_index(section: Section) -> Option<usize> {
        NavTarget::NAV_BAR
            .iter()
            .position(|t| t.destination() == section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sections_distinct_ids() {
        let mut ids: Vec<_> = Section::ALL.iter().map(|s| s.element_id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_destinations() {
        assert_eq!(NavTarget::GetStarted.destination(), Section::Upload);
        assert_eq!(NavTarget::GoToAnalyze.destination(), Section::Analyze);
        assert_eq!(NavTarget::LoginControl.destination(), Section::Login);
    }

    #[test]
    fn test_results_not_in_nav_bar() {
        assert_eq!(NavTarget::nav_index(Section::Results), None);
        assert_eq!(NavTarget::nav_index(Section::Home), Some(0));
        assert_eq!(NavTarget::nav_index(Section::Login), Some(4));
    }
}
