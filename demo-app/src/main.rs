//! Demo application for universe-editor.
//!
//! A toolbar drives the editor attributes (language, theme, mode, height)
//! and an output pane below the editor logs the events it emits. Press
//! Ctrl+Enter in the editor to "run" the query.
//!
//! Set `RUST_LOG=universe_editor=debug` to trace attribute changes.

use iced::widget::{
    Space, button, checkbox, column, container, pick_list, row, scrollable,
    text,
};
use iced::{Color, Element, Length, Subscription, Task, Theme};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use universe_editor::{
    Attribute, EditorEvent, EditorRegistry, Message as EditorMessage,
    TAG_NAME, UniverseEditor,
};

/// Main entry point for the demo application.
fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    iced::application(DemoApp::new, DemoApp::update, DemoApp::view)
        .subscription(DemoApp::subscription)
        .theme(DemoApp::theme)
        .run()
}

const LANGUAGES: [&str; 7] =
    ["sql", "python", "rust", "javascript", "lua", "json", "yaml"];

const THEMES: [&str; 6] =
    ["moondust", "invasion", "Dracula", "Nord", "Tokyo Night", "Gruvbox Dark"];

const HEIGHTS: [&str; 4] = ["240px", "400px", "600px", "auto"];

/// Code templates available in the dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Template {
    Empty,
    Query,
    Join,
    Python,
}

impl Template {
    const ALL: [Template; 4] =
        [Template::Empty, Template::Query, Template::Join, Template::Python];

    fn language(self) -> &'static str {
        match self {
            Template::Python => "python",
            Template::Empty | Template::Query | Template::Join => "sql",
        }
    }

    fn content(self) -> &'static str {
        match self {
            Template::Empty => "",
            Template::Query => {
                r"-- Active users
SELECT id, name, email
FROM users
WHERE active = TRUE
ORDER BY name;
"
            }
            Template::Join => {
                r"-- Orders per customer
SELECT c.name, COUNT(o.id) AS orders, SUM(o.total) AS spent
FROM customers c
LEFT JOIN orders o ON o.customer_id = c.id
GROUP BY c.name
HAVING COUNT(o.id) > 0
ORDER BY spent DESC;
"
            }
            Template::Python => {
                r#"# Fibonacci
def fibonacci(n):
    if n <= 1:
        return n
    return fibonacci(n - 1) + fibonacci(n - 2)

print([fibonacci(i) for i in range(10)])
"#
            }
        }
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Template::Empty => "Empty",
            Template::Query => "Simple query",
            Template::Join => "Join",
            Template::Python => "Python",
        };
        write!(f, "{name}")
    }
}

/// Demo application state.
struct DemoApp {
    editor: UniverseEditor,
    language: &'static str,
    theme: &'static str,
    height: &'static str,
    light_mode: bool,
    /// Number of edits since the last run
    edits: usize,
    current_file: Option<PathBuf>,
    log_messages: Vec<String>,
}

/// Application messages.
#[derive(Debug, Clone)]
enum Message {
    Editor(EditorMessage),
    LanguageSelected(&'static str),
    ThemeSelected(&'static str),
    HeightSelected(&'static str),
    LightModeToggled(bool),
    TemplateSelected(Template),
    OpenFile,
    FileOpened(Result<(PathBuf, String), String>),
    ClearLog,
}

impl DemoApp {
    /// Creates a new instance of the application.
    fn new() -> (Self, Task<Message>) {
        let mut log_messages = vec!["[INFO] Application started".to_string()];

        let registry = EditorRegistry::with_defaults();
        let mut editor = match registry.create(TAG_NAME) {
            Ok(editor) => editor,
            Err(error) => {
                log_messages.push(format!("[ERROR] {error}"));
                UniverseEditor::default()
            }
        };
        editor.set_attribute(Attribute::Language, "sql");
        editor.set_attribute(Attribute::Code, Template::Query.content());
        editor.set_attribute(Attribute::Height, "400px");

        (
            Self {
                editor,
                language: "sql",
                theme: THEMES[0],
                height: HEIGHTS[1],
                light_mode: false,
                edits: 0,
                current_file: None,
                log_messages,
            },
            Task::none(),
        )
    }

    /// Adds a log message.
    fn log(&mut self, level: &str, message: &str) {
        self.log_messages.push(format!("[{level}] {message}"));
    }

    /// Handles messages and updates the application state.
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Editor(EditorMessage::Emitted(event)) => {
                match event {
                    EditorEvent::Changed { code } => {
                        self.edits += 1;
                        tracing::debug!(length = code.len(), "editor changed");
                    }
                    EditorEvent::Submit { code } => {
                        let lines = code.lines().count();
                        self.log(
                            "OUTPUT",
                            &format!(
                                "Ran {lines} line(s) after {} edit(s)",
                                self.edits
                            ),
                        );
                        self.edits = 0;
                    }
                }
                Task::none()
            }
            Message::Editor(event) => {
                self.editor.update(&event).map(Message::Editor)
            }
            Message::LanguageSelected(language) => {
                self.language = language;
                self.editor.set_attribute(Attribute::Language, language);
                Task::none()
            }
            Message::ThemeSelected(theme) => {
                self.theme = theme;
                self.editor.set_attribute(Attribute::Theme, theme);
                Task::none()
            }
            Message::HeightSelected(height) => {
                self.height = height;
                let value = if height == "auto" { "" } else { height };
                self.editor.set_attribute(Attribute::Height, value);
                Task::none()
            }
            Message::LightModeToggled(light) => {
                self.light_mode = light;
                let mode = if light { "light" } else { "dark" };
                self.editor.set_attribute(Attribute::Mode, mode);
                Task::none()
            }
            Message::TemplateSelected(template) => {
                self.language = template.language();
                self.current_file = None;
                self.editor.set_attribute(Attribute::Language, self.language);
                self.editor.set_attribute(Attribute::Code, template.content());
                self.log("INFO", &format!("Loaded template: {template}"));
                Task::none()
            }
            Message::OpenFile => {
                Task::perform(open_file_dialog(), Message::FileOpened)
            }
            Message::FileOpened(Ok((path, content))) => {
                if let Some(language) = language_for(&path) {
                    self.language = language;
                    self.editor.set_attribute(Attribute::Language, language);
                }
                self.editor.set_attribute(Attribute::Code, &content);
                self.log("INFO", &format!("Opened {}", path.display()));
                self.current_file = Some(path);
                Task::none()
            }
            Message::FileOpened(Err(error)) => {
                self.log("ERROR", &error);
                Task::none()
            }
            Message::ClearLog => {
                self.log_messages.clear();
                Task::none()
            }
        }
    }

    /// Frames for deferred renders and the active-line pulse.
    fn subscription(&self) -> Subscription<Message> {
        self.editor.subscription().map(Message::Editor)
    }

    /// Returns the application theme, following the editor mode.
    fn theme(&self) -> Theme {
        if self.light_mode { Theme::Light } else { Theme::TokyoNightStorm }
    }

    fn view(&self) -> Element<'_, Message> {
        let file_name = self
            .current_file
            .as_ref()
            .and_then(|path| path.file_name())
            .and_then(|name| name.to_str())
            .unwrap_or("Untitled");

        let toolbar = row![
            button(text("Open")).on_press(Message::OpenFile),
            pick_list(Template::ALL, None::<Template>, Message::TemplateSelected)
                .placeholder("Template"),
            text(file_name),
            Space::new().width(Length::Fill),
            text("Language:"),
            pick_list(
                LANGUAGES,
                Some(self.language),
                Message::LanguageSelected
            ),
            text("Theme:"),
            pick_list(THEMES, Some(self.theme), Message::ThemeSelected),
            text("Height:"),
            pick_list(HEIGHTS, Some(self.height), Message::HeightSelected),
            checkbox(self.light_mode)
                .label("Light mode")
                .on_toggle(Message::LightModeToggled)
                .text_size(14),
        ]
        .spacing(10)
        .padding(10)
        .align_y(iced::Center);

        let editor = container(self.editor.view().map(Message::Editor))
            .padding(10)
            .width(Length::Fill);

        column![toolbar, editor, self.view_output_pane()]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn view_output_pane(&self) -> Element<'_, Message> {
        let header = row![
            text(format!("Output ({} pending edits)", self.edits)).size(13),
            Space::new().width(Length::Fill),
            button(text("Clear").size(12))
                .on_press(Message::ClearLog)
                .padding(4),
        ]
        .padding(5)
        .align_y(iced::Center);

        let log_content: Vec<Element<'_, Message>> = self
            .log_messages
            .iter()
            .map(|msg| {
                let color = if msg.contains("[ERROR]") {
                    Some(Color::from_rgb(1.0, 0.4, 0.4))
                } else if msg.contains("[OUTPUT]") {
                    Some(Color::from_rgb(0.4, 1.0, 0.4))
                } else {
                    None
                };

                text(msg)
                    .size(13)
                    .style(move |_| text::Style { color })
                    .into()
            })
            .collect();

        let log_scrollable = scrollable(
            column(log_content).spacing(2).padding(10).width(Length::Fill),
        )
        .height(Length::Fill)
        .width(Length::Fill);

        column![header, log_scrollable]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

/// Grammar name for a file, from its extension.
fn language_for(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    LANGUAGES.into_iter().find(|language| match extension.as_str() {
        "py" => *language == "python",
        "rs" => *language == "rust",
        "js" => *language == "javascript",
        "yml" => *language == "yaml",
        other => *language == other,
    })
}

/// Opens a file dialog.
async fn open_file_dialog() -> Result<(PathBuf, String), String> {
    let file = rfd::AsyncFileDialog::new()
        .add_filter("SQL Files", &["sql"])
        .add_filter("All Files", &["*"])
        .set_title("Open File")
        .pick_file()
        .await;

    if let Some(file) = file {
        let path = file.path().to_path_buf();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| format!("Unable to read file: {e}"))?;
        Ok((path, content))
    } else {
        Err("No file selected".to_string())
    }
}
