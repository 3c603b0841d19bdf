// src/controller/tabs.rs — Grouped tab buttons and their content panes.
//
// A button declares a tab id `t`; the pane it controls is `"{t}-tab"`.
// Groups are independent: activating a tab only touches its own container.

use crate::infra::errors::CvScanError;

/// Container holding the login / register forms.
pub const AUTH_TABS: &str = "auth-tabs";
pub const LOGIN_FORM_TAB: &str = "login-form";
pub const REGISTER_FORM_TAB: &str = "register-form";

/// Container holding the result panes.
pub const RESULT_TABS: &str = "result-tabs";
pub const FEEDBACK_TAB: &str = "feedback";
pub const SUGGESTIONS_TAB: &str = "suggestions";
pub const IMPROVED_CV_TAB: &str = "improved-cv";

/// Id of the content pane matching a tab button.
pub fn pane_id(tab: &str) -> String {
    format!("{tab}-tab")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabGroup {
    container: String,
    tabs: Vec<String>,
    active: Option<usize>,
}

impl TabGroup {
    /// New group with the first tab active.
    pub fn new(container: &str, tabs: &[&str]) -> Self {
        Self {
            container: container.to_string(),
            tabs: tabs.iter().map(|t| t.to_string()).collect(),
            active: if tabs.is_empty() { None } else { Some(0) },
        }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn tabs(&self) -> &[String] {
        &self.tabs
    }

    pub fn contains(&self, tab: &str) -> bool {
        self.tabs.iter().any(|t| t == tab)
    }

    /// Deactivate every sibling, then activate `tab` and its pane.
    pub fn activate(&mut self, tab: &str) -> Result<(), CvScanError> {
        let idx = self
            .tabs
            .iter()
            .position(|t| t == tab)
            .ok_or_else(|| {
                CvScanError::Validation(format!(
                    "No tab '{tab}' in container '{}'",
                    self.container
                ))
            })?;
        self.active = Some(idx);
        Ok(())
    }

    pub fn active_tab(&self) -> Option<&str> {
        self.active.map(|i| self.tabs[i].as_str())
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn is_button_active(&self, tab: &str) -> bool {
        self.active_tab() == Some(tab)
    }

    pub fn is_pane_active(&self, pane: &str) -> bool {
        self.active_tab().map(pane_id).as_deref() == Some(pane)
    }

    pub fn activate_next(&mut self) {
        if let Some(i) = self.active {
            self.active = Some((i + 1) % self.tabs.len());
        }
    }

    pub fn activate_prev(&mut self) {
        if let Some(i) = self.active {
            self.active = Some((i + self.tabs.len() - 1) % self.tabs.len());
        }
    }
}

/// All tab containers on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabGroups {
    groups: Vec<TabGroup>,
}

impl Default for TabGroups {
    fn default() -> Self {
        Self {
            groups: vec![
                TabGroup::new(AUTH_TABS, &[LOGIN_FORM_TAB, REGISTER_FORM_TAB]),
                TabGroup::new(RESULT_TABS, &[FEEDBACK_TAB, SUGGESTIONS_TAB, IMPROVED_CV_TAB]),
            ],
        }
    }
}

impl TabGroups {
    pub fn get(&self, container: &str) -> Option<&TabGroup> {
        self.groups.iter().find(|g| g.container == container)
    }

    pub fn get_mut(&mut self, container: &str) -> Option<&mut TabGroup> {
        self.groups.iter_mut().find(|g| g.container == container)
    }

    pub fn activate(&mut self, container: &str, tab: &str) -> Result<(), CvScanError> {
        self.get_mut(container)
            .ok_or_else(|| CvScanError::Validation(format!("No tab container '{container}'")))?
            .activate(tab)
    }

    /// Active tab of a container, if the container exists.
    pub fn active_tab(&self, container: &str) -> Option<&str> {
        self.get(container).and_then(|g| g.active_tab())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tab_active_by_default() {
        let g = TabGroup::new(AUTH_TABS, &[LOGIN_FORM_TAB, REGISTER_FORM_TAB]);
        assert_eq!(g.active_tab(), Some(LOGIN_FORM_TAB));
        assert!(g.is_pane_active("login-form-tab"));
        assert!(!g.is_pane_active("register-form-tab"));
    }

    #[test]
    fn test_activate_deactivates_siblings() {
        let mut g = TabGroup::new(RESULT_TABS, &[FEEDBACK_TAB, SUGGESTIONS_TAB, IMPROVED_CV_TAB]);
        g.activate(IMPROVED_CV_TAB).unwrap();

        let active_buttons: Vec<_> = g.tabs().iter().filter(|t| g.is_button_active(t)).collect();
        assert_eq!(active_buttons, vec![IMPROVED_CV_TAB]);

        let active_panes: Vec<_> = g
            .tabs()
            .iter()
            .map(|t| pane_id(t))
            .filter(|p| g.is_pane_active(p))
            .collect();
        assert_eq!(active_panes, vec!["improved-cv-tab".to_string()]);
    }

    #[test]
    fn test_unknown_tab_changes_nothing() {
        let mut g = TabGroup::new(AUTH_TABS, &[LOGIN_FORM_TAB, REGISTER_FORM_TAB]);
        g.activate(REGISTER_FORM_TAB).unwrap();
        assert!(g.activate("feedback").is_err());
        assert_eq!(g.active_tab(), Some(REGISTER_FORM_TAB));
    }

    #[test]
    fn test_containers_are_independent() {
        let mut groups = TabGroups::default();
        groups.activate(RESULT_TABS, SUGGESTIONS_TAB).unwrap();
        assert_eq!(groups.active_tab(AUTH_TABS), Some(LOGIN_FORM_TAB));
        groups.activate(AUTH_TABS, REGISTER_FORM_TAB).unwrap();
        assert_eq!(groups.active_tab(RESULT_TABS), Some(SUGGESTIONS_TAB));
    }

    #[test]
    fn test_cycle_wraps() {
        let mut g = TabGroup::new(AUTH_TABS, &[LOGIN_FORM_TAB, REGISTER_FORM_TAB]);
        g.activate_prev();
        assert_eq!(g.active_tab(), Some(REGISTER_FORM_TAB));
        g.activate_next();
        assert_eq!(g.active_tab(), Some(LOGIN_FORM_TAB));
    }

    #[test]
    fn test_empty_group_has_no_active_tab() {
        let mut g = TabGroup::new("empty", &[]);
        g.activate_next();
        assert_eq!(g.active_tab(), None);
    }
}
