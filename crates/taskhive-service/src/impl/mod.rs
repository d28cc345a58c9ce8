//! Service implementations.

mod task_service_impl;

pub use task_service_impl::TaskServiceImpl;
