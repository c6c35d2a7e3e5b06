pub mod auth_handlers;
pub mod problem_handlers;
pub mod language_handlers;
pub mod submission_handlers;
pub mod contest_handlers;
pub mod contest_admin_handlers;
pub mod plugin_handlers;
pub mod contest_extension_handlers;
pub mod scoring_handlers;
pub mod rejudge_handlers;

