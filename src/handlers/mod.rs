mod url_mapping;

pub use url_mapping::{dump_handler, method_not_allowed, redirect_handler, shorten_handler};
