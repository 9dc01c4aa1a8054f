use crate::ecs::SystemRole;
use std::fmt;

/// Handle assigned to each registered system: its role list and position in it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SystemHandle {
    role: SystemRole,
    index: u32,
}

impl SystemHandle {
    pub(crate) fn new(role: SystemRole, index: u32) -> Self {
        Self { role, index }
    }

    #[inline]
    pub fn role(self) -> SystemRole {
        self.role
    }

    /// Return the position of the system within its role list.
    #[inline]
    pub fn index(self) -> u32 {
        self.index
    }
}

impl fmt::Display for SystemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.role, self.index)
    }
}
