//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod nav;
pub(crate) mod new_page;
pub(crate) mod page;
mod project;
pub(crate) mod toc;

pub(crate) use check::CheckArgs;
pub(crate) use nav::NavArgs;
pub(crate) use new_page::NewArgs;
pub(crate) use page::PageArgs;
pub(crate) use toc::TocArgs;
