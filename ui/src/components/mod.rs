//! Reusable UI components

pub mod chat_input;
pub mod chat_message;
pub mod footer;
pub mod guard;
pub mod loading;
pub mod navbar;
pub mod notification_popup;

pub use chat_input::ChatInput;
pub use chat_message::ChatMessage;
pub use footer::Footer;
pub use guard::RequireSession;
pub use loading::{LoadingDots, LoadingSpinner, TypingIndicator};
pub use navbar::Navbar;
pub use notification_popup::NotificationPopup;
