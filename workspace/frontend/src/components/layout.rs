pub mod content;
pub mod error_panel;
pub mod navbar;
pub mod sidebar;

pub use content::Content;
pub use error_panel::ErrorPanel;
pub use navbar::Navbar;
pub use sidebar::Sidebar;

/// The page shown in the content area. Held by the root `App`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActivePage {
    #[default]
    Dashboard,
    DemandForecasting,
    Inventory,
    Logistics,
    Scenarios,
    Reports,
    Settings,
}

impl ActivePage {
    pub const ALL: [ActivePage; 7] = [
        ActivePage::Dashboard,
        ActivePage::DemandForecasting,
        ActivePage::Inventory,
        ActivePage::Logistics,
        ActivePage::Scenarios,
        ActivePage::Reports,
        ActivePage::Settings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ActivePage::Dashboard => "Dashboard",
            ActivePage::DemandForecasting => "Demand Forecasting",
            ActivePage::Inventory => "Inventory Management",
            ActivePage::Logistics => "Logistics",
            ActivePage::Scenarios => "What-If Scenarios",
            ActivePage::Reports => "Reports",
            ActivePage::Settings => "Settings",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ActivePage::Dashboard => "fas fa-home",
            ActivePage::DemandForecasting => "fas fa-chart-line",
            ActivePage::Inventory => "fas fa-boxes",
            ActivePage::Logistics => "fas fa-truck",
            ActivePage::Scenarios => "fas fa-sliders-h",
            ActivePage::Reports => "fas fa-file-alt",
            ActivePage::Settings => "fas fa-cog",
        }
    }

    /// Pages that need a complete business profile to show anything useful.
    pub fn needs_profile(&self) -> bool {
        matches!(self, ActivePage::DemandForecasting | ActivePage::Scenarios)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_have_distinct_labels() {
        let mut labels: Vec<&str> = ActivePage::ALL.iter().map(|p| p.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 7);
        assert_eq!(ActivePage::default(), ActivePage::Dashboard);
    }

    #[test]
    fn test_profile_gated_pages() {
        assert!(ActivePage::DemandForecasting.needs_profile());
        assert!(!ActivePage::Settings.needs_profile());
        assert!(!ActivePage::Inventory.needs_profile());
    }
}
