pub mod relay_job;
pub mod render_message;
