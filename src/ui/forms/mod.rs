//! Form rendering

mod field_renderer;
mod subscribe_form;

pub use subscribe_form::draw_subscribe_form;
