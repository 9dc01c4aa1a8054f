use crate::ecs::SystemRole;
use thiserror::Error;

/// Errors that can occur while registering a system with a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SystemRegistrationError {
    #[error("{role} system '{name}' is already registered")]
    DuplicateName { name: String, role: SystemRole },
}
