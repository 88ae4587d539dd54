use chrono::Utc;

use super::data::{Project, ProjectData, ProjectId};
use super::derive::{self, Filter, Stats};
use super::store::ProjectStore;
use crate::error::RepositoryError;

/// The ProjectRepository owns the in-memory project list.
///
/// Every mutation commits in memory first and then writes the whole
/// collection back to the store. Store failures are logged and dropped:
/// the in-memory state stays authoritative for the rest of the session.
pub struct ProjectRepository {
    projects: Vec<Project>,
    store: Box<dyn ProjectStore>,
}

impl ProjectRepository {
    /// Build the repository from whatever the store holds.
    /// Unreadable or missing data yields an empty list.
    pub fn load(store: Box<dyn ProjectStore>) -> Self {
        let projects = match store.load() {
            Ok(projects) => {
                tracing::info!("Loaded {} projects", projects.len());
                projects
            }
            Err(err) => {
                tracing::warn!("Starting with an empty project list: {err}");
                Vec::new()
            }
        };

        ProjectRepository { projects, store }
    }

    /// Current collection in insertion order
    pub fn list(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| &project.id == id)
    }

    /// Add a new project with a fresh id and creation timestamp
    pub fn create(&mut self, data: ProjectData) -> Project {
        let id = self.fresh_id();
        let project = Project::from_data(id, Utc::now(), data);

        tracing::debug!("Created project {} ({})", project.id, project.title);
        self.projects.push(project.clone());
        self.persist();

        project
    }

    /// Replace every editable field of an existing project
    pub fn update(&mut self, id: &ProjectId, data: ProjectData) -> Result<Project, RepositoryError> {
        let project = self
            .projects
            .iter_mut()
            .find(|project| &project.id == id)
            .ok_or_else(|| RepositoryError::NotFound { id: id.clone() })?;

        project.apply(data);
        let updated = project.clone();

        tracing::debug!("Updated project {}", updated.id);
        self.persist();

        Ok(updated)
    }

    /// Remove a project. Unknown ids leave everything untouched.
    pub fn delete(&mut self, id: &ProjectId) -> Result<Project, RepositoryError> {
        let index = self
            .projects
            .iter()
            .position(|project| &project.id == id)
            .ok_or_else(|| RepositoryError::NotFound { id: id.clone() })?;

        let removed = self.projects.remove(index);

        tracing::debug!("Deleted project {}", removed.id);
        self.persist();

        Ok(removed)
    }

    pub fn filter(&self, mode: Filter) -> Vec<&Project> {
        derive::filter(&self.projects, mode)
    }

    pub fn stats(&self) -> Stats {
        derive::stats(&self.projects)
    }

    /// Random ids, re-rolled on the (astronomically unlikely) clash
    /// with an id already in the list, e.g. one loaded from disk.
    fn fresh_id(&self) -> ProjectId {
        loop {
            let id = ProjectId::random();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    /// Best-effort write of the whole collection
    fn persist(&self) {
        if let Err(err) = self.store.save(&self.projects) {
            tracing::warn!("Could not save projects: {err}");
        }
    }
}

impl std::fmt::Debug for ProjectRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectRepository")
            .field("projects", &self.projects.len())
            .finish()
    }
}
