/// Views derived from the project list.
/// Pure functions, recomputed on every render.

use super::data::Project;

/// Which projects the card grid shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    /// Not delivered yet
    Active,
    Delivered,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Delivered];

    pub fn matches(self, project: &Project) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !project.is_delivered(),
            Filter::Delivered => project.is_delivered(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "In progress",
            Filter::Delivered => "Delivered",
        }
    }
}

/// Counters shown above the grid. `active + delivered == total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub active: usize,
    pub delivered: usize,
}

pub fn filter(projects: &[Project], mode: Filter) -> Vec<&Project> {
    projects.iter().filter(|project| mode.matches(project)).collect()
}

pub fn stats(projects: &[Project]) -> Stats {
    let delivered = projects.iter().filter(|project| project.is_delivered()).count();
    Stats {
        total: projects.len(),
        active: projects.len() - delivered,
        delivered,
    }
}
