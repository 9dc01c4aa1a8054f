use std::fmt;

/// Phase of the frame a system participates in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SystemRole {
    Setup,
    Input,
    Update,
    Render,
}

impl SystemRole {
    /// Every role, in frame order.
    pub const ALL: [SystemRole; 4] = [
        SystemRole::Setup,
        SystemRole::Input,
        SystemRole::Update,
        SystemRole::Render,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SystemRole::Setup => "setup",
            SystemRole::Input => "input",
            SystemRole::Update => "update",
            SystemRole::Render => "render",
        }
    }
}

impl fmt::Display for SystemRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registration record of one system under one role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemDescriptor {
    name: String,
    role: SystemRole,
}

impl SystemDescriptor {
    pub fn new(name: impl Into<String>, role: SystemRole) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> SystemRole {
        self.role
    }
}
