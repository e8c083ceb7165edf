use iced::widget::{button, column, container, horizontal_rule, image, row, scrollable, text};
use iced::{window, Alignment, Element, Event, Length, Subscription, Task, Theme};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod net;
mod preview;
mod state;
mod ui;

use net::UploadOutcome;
use preview::{PreviewDescriptor, Thumbnail};
use state::session::Session;
use state::upload::UploadState;

/// Base URL of the file server.
const SERVER_BASE_URL: &str = "http://127.0.0.1:5000";

/// Subject loaded automatically at startup.
const DEFAULT_SUBJECT: &str = "DS";

/// The subject roster shown in the sidebar.
const SUBJECTS: &[&str] = &["DS", "OS", "DBMS", "CN", "MATHS"];

/// Main application state
struct SubjectShelf {
    /// Selected subject and its file listing
    session: Session,
    /// Pending upload selection (picker / drag-and-drop)
    upload: UploadState,
    /// Thumbnails for the current listing, keyed by filename.
    /// Cleared whenever the listing is replaced.
    thumbnails: HashMap<String, image::Handle>,
    /// Status line shown to the user (alerts and success messages)
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User activated a subject link in the sidebar
    SubjectSelected(String),
    /// `GET /files/{subject}` resolved, possibly for a stale subject
    FilesLoaded {
        subject: String,
        result: Result<Vec<String>, String>,
    },
    /// User clicked the drop zone to open the file picker
    BrowseFile,
    /// User dropped a file onto the window
    FileDropped(PathBuf),
    /// User submitted the upload form
    SubmitUpload,
    /// `POST /upload` resolved for the subject active at submission
    UploadFinished {
        subject: String,
        result: Result<UploadOutcome, String>,
    },
    /// One file's preview finished fetching/rasterizing
    ThumbnailReady {
        subject: String,
        filename: String,
        result: Result<Option<Thumbnail>, String>,
    },
    /// User asked to view a file in the browser
    ViewFile(String),
    /// User asked to save a file locally
    DownloadFile(String),
    /// A download task resolved
    DownloadFinished {
        filename: String,
        result: Result<PathBuf, String>,
    },
}

impl SubjectShelf {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let mut shelf = SubjectShelf {
            session: Session::new(DEFAULT_SUBJECT),
            upload: UploadState::new(),
            thumbnails: HashMap::new(),
            status: String::new(),
        };

        // Auto-load the default subject, exactly like clicking its link
        let initial = shelf.select_subject(DEFAULT_SUBJECT.to_owned());
        (shelf, initial)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SubjectSelected(subject) => self.select_subject(subject),

            Message::FilesLoaded { subject, result } => match result {
                Ok(files) => {
                    if self.session.apply_listing(&subject, files.clone()) {
                        self.spawn_preview_tasks(&subject, &files)
                    } else {
                        tracing::debug!(%subject, "discarding listing for stale subject");
                        Task::none()
                    }
                }
                Err(error) => {
                    // The loading placeholder stays up; no retry, no banner.
                    tracing::error!(%subject, %error, "error fetching files");
                    Task::none()
                }
            },

            Message::BrowseFile => {
                let picked = rfd::FileDialog::new()
                    .set_title("Choose a file to upload")
                    .pick_file();

                if let Some(path) = picked {
                    self.upload.choose(path);
                }
                Task::none()
            }

            Message::FileDropped(path) => {
                self.upload.choose(path);
                Task::none()
            }

            Message::SubmitUpload => match self.upload.prepare(self.session.selected()) {
                Ok(request) => {
                    self.status = format!("Uploading {}...", request.file_name);

                    let subject = request.subject.clone();
                    Task::perform(
                        async move {
                            net::upload_file(SERVER_BASE_URL, request)
                                .await
                                .map_err(|e| e.to_string())
                        },
                        move |result| Message::UploadFinished {
                            subject: subject.clone(),
                            result,
                        },
                    )
                }
                Err(guard) => {
                    self.status = guard.to_string();
                    Task::none()
                }
            },

            Message::UploadFinished { subject, result } => match result {
                Ok(UploadOutcome::Accepted(message)) => {
                    self.status = message;

                    // Refresh first, then reset the picker: the refresh must
                    // target the subject that was active at submission time.
                    let refresh = self.select_subject(subject);
                    self.upload.clear();
                    refresh
                }
                Ok(UploadOutcome::Rejected(error)) => {
                    // Selection stays intact so the user can retry.
                    self.status = format!("Upload failed: {error}");
                    Task::none()
                }
                Err(error) => {
                    tracing::error!(%subject, %error, "error uploading file");
                    Task::none()
                }
            },

            Message::ThumbnailReady {
                subject,
                filename,
                result,
            } => {
                if !self.session.is_current(&subject) {
                    tracing::debug!(%subject, %filename, "discarding thumbnail for stale subject");
                    return Task::none();
                }

                match result {
                    Ok(Some(thumb)) => {
                        let handle =
                            image::Handle::from_rgba(thumb.width, thumb.height, thumb.rgba);
                        self.thumbnails.insert(filename, handle);
                    }
                    Ok(None) => {}
                    Err(error) => {
                        // Isolated per file: this row keeps its glyph,
                        // sibling thumbnails are unaffected.
                        tracing::warn!(%subject, %filename, %error, "error loading preview");
                    }
                }

                Task::none()
            }

            Message::ViewFile(name) => {
                let url = net::file_url(SERVER_BASE_URL, self.session.selected(), &name);
                if let Err(error) = open::that(&url) {
                    tracing::error!(%url, %error, "could not open file in browser");
                }
                Task::none()
            }

            Message::DownloadFile(name) => {
                let url = net::file_url(SERVER_BASE_URL, self.session.selected(), &name);

                let Some(dest) = rfd::FileDialog::new().set_file_name(name.as_str()).save_file() else {
                    return Task::none();
                };

                Task::perform(
                    async move {
                        net::download_file(url, dest)
                            .await
                            .map_err(|e| e.to_string())
                    },
                    move |result| Message::DownloadFinished {
                        filename: name.clone(),
                        result,
                    },
                )
            }

            Message::DownloadFinished { filename, result } => {
                match result {
                    Ok(dest) => {
                        self.status = format!("Saved {filename} to {}", dest.display());
                    }
                    Err(error) => {
                        tracing::error!(%filename, %error, "error downloading file");
                    }
                }
                Task::none()
            }
        }
    }

    /// Select a subject: update the selection, show the loading
    /// placeholder, and fetch its listing.
    fn select_subject(&mut self, subject: String) -> Task<Message> {
        self.session.select(&subject);
        self.thumbnails.clear();

        let fetched = subject.clone();
        Task::perform(
            async move {
                net::fetch_files(SERVER_BASE_URL, &fetched)
                    .await
                    .map_err(|e| e.to_string())
            },
            move |result| Message::FilesLoaded {
                subject: subject.clone(),
                result,
            },
        )
    }

    /// One independent task per previewable row of the freshly applied
    /// listing. Rows that resolve to the generic icon spawn nothing.
    fn spawn_preview_tasks(&mut self, subject: &str, files: &[String]) -> Task<Message> {
        self.thumbnails.clear();

        let tasks = files.iter().filter_map(|name| {
            let descriptor = preview::resolve_preview(SERVER_BASE_URL, subject, name);
            if descriptor == PreviewDescriptor::GenericIcon {
                return None;
            }

            let subject = subject.to_owned();
            let filename = name.clone();
            Some(Task::perform(
                async move {
                    preview::load_thumbnail(descriptor)
                        .await
                        .map_err(|e| e.to_string())
                },
                move |result| Message::ThumbnailReady {
                    subject: subject.clone(),
                    filename: filename.clone(),
                    result,
                },
            ))
        });

        Task::batch(tasks)
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let subject_links = SUBJECTS.iter().map(|subject| {
            button(text(*subject))
                .width(Length::Fill)
                .on_press(Message::SubjectSelected((*subject).to_owned()))
                .into()
        });

        let sidebar = container(
            column![text("Subjects").size(20)]
                .extend(subject_links)
                .spacing(8),
        )
        .width(180.0)
        .padding(16);

        let file_panel = scrollable(ui::file_list::view(
            self.session.selected(),
            self.session.listing(),
            &self.thumbnails,
        ))
        .height(Length::Fill);

        let drop_zone = button(
            text("Drag & drop a file here, or click to browse")
                .width(Length::Fill)
                .center(),
        )
        .on_press(Message::BrowseFile)
        .padding(24)
        .width(Length::Fill);

        let upload_panel = column![
            text("Upload File").size(20),
            drop_zone,
            row![
                text(self.upload.label()).size(14).width(Length::Fill),
                button("Upload").on_press(Message::SubmitUpload).padding(10),
            ]
            .spacing(12)
            .align_y(Alignment::Center),
            text(&self.status).size(14),
        ]
        .spacing(10);

        let content = column![
            text(self.session.selected()).size(32),
            text(format!("Selected subject: {}", self.session.selected())).size(14),
            horizontal_rule(1),
            file_panel,
            horizontal_rule(1),
            upload_panel,
        ]
        .spacing(12)
        .padding(20)
        .width(Length::Fill);

        row![sidebar, content].into()
    }

    /// Dropped files arrive as window events, making drag-and-drop
    /// equivalent to the click-to-browse path.
    fn subscription(&self) -> Subscription<Message> {
        iced::event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("subject_shelf=info")),
        )
        .init();

    iced::application("Subject Shelf", SubjectShelf::update, SubjectShelf::view)
        .subscription(SubjectShelf::subscription)
        .theme(SubjectShelf::theme)
        .centered()
        .run_with(SubjectShelf::new)
}
