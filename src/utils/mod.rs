pub mod constants;
pub mod string_utils;
pub mod url_utils;

pub use constants::*;
pub use string_utils::{collapse_whitespace, normalize_lines};
pub use url_utils::{
    is_http_url, normalize_input_url, report_filename_stem, resolve_image_src, resolve_link_href,
    url_host,
};
