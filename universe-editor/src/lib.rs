//! An embeddable code editor widget for Iced.
//!
//! The editor is a plain input surface with a stack of derived layers kept
//! in sync with it: a line-number gutter, a band behind the active line, a
//! syntax-highlighted copy of the text and a custom horizontal scrollbar.
//!
//! # Features
//!
//! - **Attributes** (`code`, `language`, `theme`, `mode`, `height`, `schema`)
//!   applied by name, each refreshing only the layers it affects
//! - **Syntax highlighting** through `syntect`, falling back to plain text
//!   when a language is unknown
//! - **Line numbers** with the active line emphasized
//! - **Active-line highlight** with a short pulse when the caret changes line
//! - **Custom horizontal scrollbar** with a draggable thumb
//! - **Keyboard shortcuts** for indentation, comments and submitting
//! - **Registry** for creating editors by tag name
//!
//! # Example
//!
//! ```no_run
//! use iced::widget::container;
//! use iced::{Element, Subscription, Task};
//! use universe_editor::{EditorEvent, Message as EditorMessage, UniverseEditor};
//!
//! struct MyApp {
//!     editor: UniverseEditor,
//! }
//!
//! #[derive(Debug, Clone)]
//! enum Message {
//!     Editor(EditorMessage),
//! }
//!
//! impl Default for MyApp {
//!     fn default() -> Self {
//!         Self { editor: UniverseEditor::new("SELECT * FROM users;", "sql") }
//!     }
//! }
//!
//! impl MyApp {
//!     fn update(&mut self, message: Message) -> Task<Message> {
//!         match message {
//!             Message::Editor(EditorMessage::Emitted(EditorEvent::Submit { code })) => {
//!                 println!("run: {code}");
//!                 Task::none()
//!             }
//!             Message::Editor(event) => self.editor.update(&event).map(Message::Editor),
//!         }
//!     }
//!
//!     fn view(&self) -> Element<'_, Message> {
//!         container(self.editor.view().map(Message::Editor)).padding(20).into()
//!     }
//!
//!     fn subscription(&self) -> Subscription<Message> {
//!         self.editor.subscription().map(Message::Editor)
//!     }
//! }
//!
//! fn main() -> iced::Result {
//!     iced::application(MyApp::default, MyApp::update, MyApp::view)
//!         .subscription(MyApp::subscription)
//!         .run()
//! }
//! ```
//!
//! # Attributes
//!
//! ```no_run
//! use universe_editor::{Attribute, UniverseEditor};
//!
//! let mut editor = UniverseEditor::default();
//! editor.set_attribute(Attribute::Theme, "invasion");
//! editor.set_attribute(Attribute::Mode, "light");
//!
//! if let Err(error) = editor.set_attribute_by_name("code", "SELECT 1;") {
//!     eprintln!("{error}");
//! }
//! ```
//!
//! Setting `code` shows the new text immediately and highlights it on the
//! next frame, so [`UniverseEditor::subscription`] must be wired up.
//!
//! # Keyboard Shortcuts
//!
//! | Shortcut | Action |
//! |----------|--------|
//! | **Arrow Keys** | Move caret |
//! | **Shift + Arrows** | Move caret with selection |
//! | **Home** / **End** | Jump to start/end of line |
//! | **Ctrl + Home** / **Ctrl + End** | Jump to start/end of document |
//! | **Tab** / **Shift + Tab** | Indent / outdent the selected lines |
//! | **Ctrl + /** | Toggle line comments |
//! | **Ctrl + Enter** | Emit [`EditorEvent::Submit`] |
//! | **Ctrl + A** | Select all |
//! | **Ctrl + C** / **Ctrl + X** / **Ctrl + V** | Copy / cut / paste |

mod editor;

pub mod attributes;
pub mod document;
pub mod error;
pub mod gutter;
pub mod highlight;
pub mod keyboard;
pub mod measure;
pub mod registry;
pub mod scrollbar;
pub mod syntax;
pub mod theme;

pub use attributes::{Attribute, Attributes, Mode};
pub use editor::{DEFAULT_PLACEHOLDER, Message, RenderSet, UniverseEditor};
pub use error::Error;
pub use keyboard::{EditorEvent, Shortcut};
pub use registry::{EditorRegistry, TAG_NAME};
pub use theme::Style;
