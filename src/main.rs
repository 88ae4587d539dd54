use iced::widget::{button, column, container, horizontal_space, image, row, scrollable, text};
use iced::{Alignment, Element, Length, Task, Theme};
use rfd::FileDialog;
use std::collections::HashMap;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod photo;
mod state;
mod ui;

use config::Settings;
use error::PhotoError;
use state::data::{Project, ProjectId};
use state::derive::Filter;
use state::form::{Field, ProjectForm};
use state::repository::ProjectRepository;

/// Main application state
struct PrintTracker {
    /// All projects, persisted on every change
    repository: ProjectRepository,
    /// Which projects the grid shows
    filter: Filter,
    /// Open create/edit form, if any
    form: Option<ProjectForm>,
    /// Photo preview of the open form
    form_photo: Option<image::Handle>,
    /// Project whose delete button was pressed and awaits confirmation
    pending_delete: Option<ProjectId>,
    /// Decoded card photos, keyed by project
    photos: HashMap<ProjectId, image::Handle>,
    /// Problems to show in the form (photo loading)
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked "New project"
    NewProject,
    /// User clicked a card's edit button
    EditProject(ProjectId),
    /// A form input changed
    FieldChanged(Field, String),
    /// User asked to choose a photo
    PickPhoto,
    /// Background photo read finished
    PhotoLoaded(Result<String, PhotoError>),
    RemovePhoto,
    SaveProject,
    CancelForm,
    /// First click on delete, asks for confirmation
    RequestDelete(ProjectId),
    ConfirmDelete(ProjectId),
    CancelDelete,
    SetFilter(Filter),
}

impl PrintTracker {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::for_current_user();
        let store = state::store::open_store(settings.as_ref());
        let repository = ProjectRepository::load(store);

        let stats = repository.stats();
        tracing::info!(
            "Print Tracker started with {} projects ({} in progress, {} delivered)",
            stats.total,
            stats.active,
            stats.delivered
        );

        (Self::with_repository(repository), Task::none())
    }

    fn with_repository(repository: ProjectRepository) -> Self {
        let mut app = PrintTracker {
            repository,
            filter: Filter::All,
            form: None,
            form_photo: None,
            pending_delete: None,
            photos: HashMap::new(),
            status: String::new(),
        };

        let projects = app.repository.list().to_vec();
        for project in &projects {
            app.cache_photo(project);
        }
        app
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::NewProject => {
                let today = chrono::Local::now().date_naive();
                self.open_form(ProjectForm::new(today), None);
            }
            Message::EditProject(id) => {
                if let Some(project) = self.repository.get(&id) {
                    let form = ProjectForm::edit(project);
                    let photo = self.photos.get(&id).cloned();
                    self.open_form(form, photo);
                }
            }
            Message::FieldChanged(field, value) => {
                if let Some(form) = &mut self.form {
                    form.set(field, value);
                }
            }
            Message::PickPhoto => {
                // Show the native file picker dialog
                let file = FileDialog::new()
                    .set_title("Select a photo of the project")
                    .add_filter("Images", &photo::PHOTO_EXTENSIONS[..])
                    .pick_file();

                if let Some(path) = file {
                    self.status.clear();
                    return Task::perform(photo::load_photo(path), Message::PhotoLoaded);
                }
            }
            Message::PhotoLoaded(Ok(uri)) => {
                if let Some(form) = &mut self.form {
                    self.form_photo = photo::decode_data_uri(&uri).map(image::Handle::from_bytes);
                    form.set_image(uri);
                    self.status.clear();
                }
            }
            Message::PhotoLoaded(Err(err)) => {
                tracing::warn!("Photo not loaded: {err}");
                self.status = err.to_string();
            }
            Message::RemovePhoto => {
                if let Some(form) = &mut self.form {
                    form.clear_image();
                    self.form_photo = None;
                }
            }
            Message::SaveProject => self.save_form(),
            Message::CancelForm => self.close_form(),
            Message::RequestDelete(id) => {
                self.pending_delete = Some(id);
            }
            Message::ConfirmDelete(id) => {
                self.pending_delete = None;
                match self.repository.delete(&id) {
                    Ok(_) => {
                        self.photos.remove(&id);
                    }
                    Err(err) => tracing::warn!("Delete ignored: {err}"),
                }
            }
            Message::CancelDelete => {
                self.pending_delete = None;
            }
            Message::SetFilter(filter) => {
                self.filter = filter;
            }
        }

        Task::none()
    }

    fn open_form(&mut self, form: ProjectForm, photo: Option<image::Handle>) {
        self.form = Some(form);
        self.form_photo = photo;
        self.pending_delete = None;
        self.status.clear();
    }

    fn close_form(&mut self) {
        self.form = None;
        self.form_photo = None;
        self.status.clear();
    }

    /// Validate the open form and create or update its project
    fn save_form(&mut self) {
        let Some(form) = &mut self.form else {
            return;
        };

        let data = match form.validate() {
            Ok(data) => data,
            Err(errors) => {
                form.errors = errors;
                return;
            }
        };

        let saved = match form.editing.clone() {
            Some(id) => match self.repository.update(&id, data) {
                Ok(project) => Some(project),
                Err(err) => {
                    tracing::warn!("Update ignored: {err}");
                    None
                }
            },
            None => Some(self.repository.create(data)),
        };

        if let Some(project) = saved {
            self.cache_photo(&project);
        }
        self.close_form();
    }

    /// Keep the decoded photo of `project` in sync with its data URI
    fn cache_photo(&mut self, project: &Project) {
        let handle = project
            .image
            .as_deref()
            .and_then(photo::decode_data_uri)
            .map(image::Handle::from_bytes);

        match handle {
            Some(handle) => {
                self.photos.insert(project.id.clone(), handle);
            }
            None => {
                self.photos.remove(&project.id);
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let header = row![
            column![
                text("3D Print Projects").size(36),
                text("Track your 3D printing commissions").size(16),
            ]
            .spacing(4),
            horizontal_space(),
            button("New project")
                .padding([12, 24])
                .on_press(Message::NewProject),
        ]
        .align_y(Alignment::Center);

        let projects = self.repository.filter(self.filter);
        let grid: Element<Message> = if projects.is_empty() {
            container(
                column![
                    text("No projects").size(22),
                    text("Start by adding your first 3D printing project").size(16),
                    button("Create project")
                        .padding([12, 24])
                        .on_press(Message::NewProject),
                ]
                .spacing(16)
                .align_x(Alignment::Center),
            )
            .width(Length::Fill)
            .padding(48)
            .center_x(Length::Fill)
            .style(container::rounded_box)
            .into()
        } else {
            let cards = projects
                .into_iter()
                .map(|project| {
                    ui::card::project_card(
                        project,
                        self.photos.get(&project.id),
                        self.pending_delete.as_ref() == Some(&project.id),
                    )
                })
                .collect();

            iced_aw::Wrap::with_elements(cards)
                .spacing(24.0)
                .line_spacing(24.0)
                .into()
        };

        let page = scrollable(
            column![
                header,
                ui::summary::stats_row(self.repository.stats()),
                ui::summary::filter_bar(self.filter),
                grid,
            ]
            .spacing(32)
            .padding(40),
        )
        .width(Length::Fill)
        .height(Length::Fill);

        match &self.form {
            Some(form) => ui::modal(
                page,
                ui::editor::project_form(form, self.form_photo.as_ref(), &self.status),
                Message::CancelForm,
            ),
            None => page.into(),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config::DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    iced::application("Print Tracker", PrintTracker::update, PrintTracker::view)
        .theme(PrintTracker::theme)
        .centered()
        .run_with(PrintTracker::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::tests::date;
    use crate::state::repository::tests::MemoryStore;

    fn app() -> (MemoryStore, PrintTracker) {
        let store = MemoryStore::default();
        let repository = ProjectRepository::load(Box::new(store.clone()));
        (store, PrintTracker::with_repository(repository))
    }

    fn fill(app: &mut PrintTracker, field: Field, value: &str) {
        let _ = app.update(Message::FieldChanged(field, value.to_string()));
    }

    fn create_dragon(app: &mut PrintTracker) -> ProjectId {
        let _ = app.update(Message::NewProject);
        fill(app, Field::Title, "Dragon");
        fill(app, Field::Quantity, "2");
        fill(app, Field::Deposit, "10");
        fill(app, Field::Total, "30");
        let _ = app.update(Message::SaveProject);
        app.repository.list().last().unwrap().id.clone()
    }

    #[test]
    fn test_create_through_form() {
        let (store, mut app) = app();

        let id = create_dragon(&mut app);

        assert!(app.form.is_none());
        let project = app.repository.get(&id).unwrap();
        assert_eq!(project.title, "Dragon");
        assert_eq!(project.quantity, 2);
        assert_eq!(project.pending(), 20.0);
        assert_eq!(store.stored().len(), 1);
    }

    #[test]
    fn test_invalid_form_stays_open() {
        let (store, mut app) = app();
        let _ = app.update(Message::NewProject);
        fill(&mut app, Field::Quantity, "0");

        let _ = app.update(Message::SaveProject);

        let form = app.form.as_ref().unwrap();
        assert!(form.errors.get(Field::Title).is_some());
        assert!(form.errors.get(Field::Quantity).is_some());
        assert!(app.repository.list().is_empty());
        assert!(store.stored().is_empty());
    }

    #[test]
    fn test_edit_marks_delivered() {
        let (_store, mut app) = app();
        let id = create_dragon(&mut app);
        let created_at = app.repository.get(&id).unwrap().created_at;

        let _ = app.update(Message::EditProject(id.clone()));
        assert_eq!(app.form.as_ref().unwrap().title, "Dragon");
        fill(&mut app, Field::DeliveredDate, "2024-05-01");
        let _ = app.update(Message::SaveProject);

        let project = app.repository.get(&id).unwrap();
        assert_eq!(project.delivered_date, Some(date("2024-05-01")));
        assert_eq!(project.created_at, created_at);
        assert_eq!(app.repository.list().len(), 1);
        assert_eq!(app.repository.stats().delivered, 1);
    }

    #[test]
    fn test_cancel_discards_changes() {
        let (_store, mut app) = app();
        let id = create_dragon(&mut app);

        let _ = app.update(Message::EditProject(id.clone()));
        fill(&mut app, Field::Title, "Changed");
        let _ = app.update(Message::CancelForm);

        assert!(app.form.is_none());
        assert_eq!(app.repository.get(&id).unwrap().title, "Dragon");
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let (store, mut app) = app();
        let id = create_dragon(&mut app);

        let _ = app.update(Message::RequestDelete(id.clone()));
        assert_eq!(app.pending_delete, Some(id.clone()));
        assert!(app.repository.get(&id).is_some());

        let _ = app.update(Message::CancelDelete);
        assert_eq!(app.pending_delete, None);
        assert!(app.repository.get(&id).is_some());

        let _ = app.update(Message::RequestDelete(id.clone()));
        let _ = app.update(Message::ConfirmDelete(id.clone()));
        assert!(app.repository.get(&id).is_none());
        assert!(store.stored().is_empty());
    }

    #[test]
    fn test_confirm_delete_of_unknown_id() {
        let (_store, mut app) = app();
        create_dragon(&mut app);

        let _ = app.update(Message::ConfirmDelete(ProjectId::from("gone")));

        assert_eq!(app.repository.list().len(), 1);
    }

    #[test]
    fn test_photo_flow() {
        let (_store, mut app) = app();
        let _ = app.update(Message::NewProject);
        fill(&mut app, Field::Title, "Photo frame");
        fill(&mut app, Field::Total, "5");

        // Smallest valid GIF header is enough for format detection
        let uri = photo::encode_data_uri(b"GIF89a\x01\x00\x01\x00\x00\x00\x00;").unwrap();
        let _ = app.update(Message::PhotoLoaded(Ok(uri.clone())));
        assert!(app.form_photo.is_some());

        let _ = app.update(Message::SaveProject);
        let project = app.repository.list()[0].clone();
        assert_eq!(project.image, Some(uri));
        assert!(app.photos.contains_key(&project.id));

        let _ = app.update(Message::EditProject(project.id.clone()));
        let _ = app.update(Message::RemovePhoto);
        let _ = app.update(Message::SaveProject);
        assert_eq!(app.repository.list()[0].image, None);
        assert!(!app.photos.contains_key(&project.id));
    }

    #[test]
    fn test_photo_error_is_reported() {
        let (_store, mut app) = app();
        let _ = app.update(Message::NewProject);

        let _ = app.update(Message::PhotoLoaded(Err(PhotoError::NotAnImage)));

        assert_eq!(app.status, "not a supported image");
        assert_eq!(app.form.as_ref().unwrap().image, None);
    }

    #[test]
    fn test_filter_selection() {
        let (_store, mut app) = app();
        create_dragon(&mut app);

        let _ = app.update(Message::SetFilter(Filter::Delivered));
        assert_eq!(app.filter, Filter::Delivered);
        assert!(app.repository.filter(app.filter).is_empty());

        let _ = app.update(Message::SetFilter(Filter::Active));
        assert_eq!(app.repository.filter(app.filter).len(), 1);
    }
}
