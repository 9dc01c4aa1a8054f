use crate::ecs::{SystemDescriptor, SystemHandle, SystemRegistrationError, SystemRole};
use std::collections::HashMap;

/// Bookkeeping for registered systems, one ordered list per role.
///
/// The registry holds descriptors only. Whoever owns the system objects keeps
/// them in a parallel list indexed by [`SystemHandle::index`].
pub struct SystemRegistry {
    systems: HashMap<SystemRole, Vec<SystemDescriptor>>,
    name_lookup: HashMap<(SystemRole, String), SystemHandle>,
}

impl SystemRegistry {
    pub fn new() -> Self {
        Self {
            systems: HashMap::new(),
            name_lookup: HashMap::new(),
        }
    }

    pub fn register(
        &mut self,
        descriptor: SystemDescriptor,
    ) -> Result<SystemHandle, SystemRegistrationError> {
        let role = descriptor.role();
        let name_key = (role, descriptor.name().to_string());
        if self.name_lookup.contains_key(&name_key) {
            return Err(SystemRegistrationError::DuplicateName {
                name: name_key.1,
                role,
            });
        }

        let list = self.systems.entry(role).or_default();
        let handle = SystemHandle::new(role, list.len() as u32);
        list.push(descriptor);
        self.name_lookup.insert(name_key, handle);

        Ok(handle)
    }

    /// Number of systems registered for a role.
    pub fn len(&self, role: SystemRole) -> usize {
        self.systems.get(&role).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.systems.values().all(Vec::is_empty)
    }

    /// Descriptors of one role, in registration order.
    pub fn iter(&self, role: SystemRole) -> impl Iterator<Item = (SystemHandle, &SystemDescriptor)> {
        self.systems
            .get(&role)
            .into_iter()
            .flatten()
            .enumerate()
            .map(move |(index, descriptor)| (SystemHandle::new(role, index as u32), descriptor))
    }
}

impl Default for SystemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_indexed_per_role() {
        let mut registry = SystemRegistry::new();
        let a = registry
            .register(SystemDescriptor::new("movement", SystemRole::Update))
            .unwrap();
        let b = registry
            .register(SystemDescriptor::new("camera", SystemRole::Update))
            .unwrap();
        let c = registry
            .register(SystemDescriptor::new("sprite", SystemRole::Render))
            .unwrap();

        assert_eq!((a.role(), a.index()), (SystemRole::Update, 0));
        assert_eq!((b.role(), b.index()), (SystemRole::Update, 1));
        assert_eq!((c.role(), c.index()), (SystemRole::Render, 0));
        assert_eq!(registry.len(SystemRole::Update), 2);
        assert_eq!(registry.len(SystemRole::Render), 1);
    }

    #[test]
    fn duplicate_name_in_same_role_is_rejected() {
        let mut registry = SystemRegistry::new();
        registry
            .register(SystemDescriptor::new("sprite", SystemRole::Update))
            .unwrap();

        let err = registry
            .register(SystemDescriptor::new("sprite", SystemRole::Update))
            .unwrap_err();
        assert_eq!(
            err,
            SystemRegistrationError::DuplicateName {
                name: "sprite".into(),
                role: SystemRole::Update
            }
        );

        // Same name under another role is a different registration.
        assert!(registry
            .register(SystemDescriptor::new("sprite", SystemRole::Render))
            .is_ok());
    }

    #[test]
    fn iteration_follows_registration_order() {
        let mut registry = SystemRegistry::new();
        for name in ["tilemap", "sprite"] {
            registry
                .register(SystemDescriptor::new(name, SystemRole::Render))
                .unwrap();
        }

        let names: Vec<&str> = registry
            .iter(SystemRole::Render)
            .map(|(_, d)| d.name())
            .collect();
        assert_eq!(names, ["tilemap", "sprite"]);
        assert!(registry.iter(SystemRole::Setup).next().is_none());
    }
}
