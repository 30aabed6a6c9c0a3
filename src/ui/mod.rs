pub mod components;
pub mod dashboard;
pub mod form;
pub mod layout;
pub mod projects;
pub mod settings;
pub mod skills;
