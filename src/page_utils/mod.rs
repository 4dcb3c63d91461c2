mod email_extract;
mod page_fetching;
mod page_parser;
mod url_data_proc;
use crate::CResult;

pub use email_extract::*;
pub use page_fetching::*;
pub use page_parser::*;
pub use url_data_proc::*;
