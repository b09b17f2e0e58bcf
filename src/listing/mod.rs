//! Property search pipeline: filter, sort, then cut a page window.

pub mod pipeline;

pub use pipeline::{
    filter, paginate, run, sort, ListingError, ListingPage, ListingParams, ListingQuery,
    ListingResult, SortOrder, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
