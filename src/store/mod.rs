use serde::Deserialize;

use crate::core::{Priority, Project, ProjectType, Repetition};

// Only the fields present in the request change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectUpdate {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub project_type: Option<ProjectType>,
    pub start_date: Option<String>,
    pub total_value: Option<f64>,
    pub is_term_project: Option<bool>,
    pub has_airfare: Option<bool>,
    pub repetition: Option<Repetition>,
    pub repetition_count: Option<u32>,
    pub priority: Option<Priority>,
    pub is_active: Option<bool>,
}

impl ProjectUpdate {
    fn apply_to(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(project_type) = self.project_type {
            project.project_type = project_type;
        }
        if let Some(start_date) = self.start_date {
            project.start_date = start_date;
        }
        if let Some(total_value) = self.total_value {
            project.total_value = total_value;
        }
        if let Some(is_term_project) = self.is_term_project {
            project.is_term_project = is_term_project;
        }
        if let Some(has_airfare) = self.has_airfare {
            project.has_airfare = has_airfare;
        }
        if let Some(repetition) = self.repetition {
            project.repetition = repetition;
        }
        if let Some(repetition_count) = self.repetition_count {
            project.repetition_count = repetition_count;
        }
        if let Some(priority) = self.priority {
            project.priority = priority;
        }
        if let Some(is_active) = self.is_active {
            project.is_active = is_active;
        }
    }
}

// Insertion ordered; ids are assigned by the store.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    projects: Vec<Project>,
    next_id: u64,
}

impl ProjectStore {
    pub fn new() -> Self {
        ProjectStore {
            projects: Vec::new(),
            next_id: 1,
        }
    }

    pub fn list(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    // Any id the caller sent is overwritten with a fresh one.
    pub fn add(&mut self, mut project: Project) -> &Project {
        project.id = self.next_id.to_string();
        self.next_id += 1;
        self.projects.push(project);
        self.projects.last().expect("just pushed")
    }

    pub fn update(&mut self, id: &str, update: ProjectUpdate) -> Option<&Project> {
        let project = self.projects.iter_mut().find(|project| project.id == id)?;
        update.apply_to(project);
        Some(project)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.projects.len();
        self.projects.retain(|project| project.id != id);
        self.projects.len() < before
    }

    pub fn toggle_active(&mut self, id: &str) -> Option<&Project> {
        let project = self.projects.iter_mut().find(|project| project.id == id)?;
        project.is_active = !project.is_active;
        Some(project)
    }
}

impl Default for ProjectStore {
    fn default() -> Self {
        ProjectStore::new()
    }
}
