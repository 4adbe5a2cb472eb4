#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod errors;
pub mod form;
pub mod sync_opts;
pub mod typeform_instance;
