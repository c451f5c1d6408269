pub mod detail;
pub mod loading_button;
pub mod selector;

pub use detail::{DetailMessage, DetailView, Transition};
pub use loading_button::{ButtonState, LoadingButton};
pub use selector::{SelectorMessage, SelectorView};
