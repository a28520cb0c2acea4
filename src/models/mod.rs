// Wire models for the backend dashboard API

mod container;
mod system;

pub use container::{
    ActionSuccess, BackendErrorBody, ContainerAction, ContainerListResponse, ContainerState,
    ContainerSummary,
};
pub use system::SystemStatus;
