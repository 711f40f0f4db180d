mod export_request;
mod list_id;
mod page_size;

pub use {
    export_request::ExportRequest,
    list_id::{ListId, ListIdValidationError},
    page_size::{PageSize, PageSizeValidationError},
};
