//! Stateless text widgets. Each one is built from plain values and renders
//! through [`std::fmt::Display`].

mod button;
mod form_field;
mod input;
mod select;

pub use button::Button;
pub use form_field::FormField;
pub use input::Input;
pub use select::Select;
