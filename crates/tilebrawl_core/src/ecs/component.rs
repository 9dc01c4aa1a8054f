// component.rs - Component identity and metadata
//
// Components are identified by u32 IDs declared next to the type, not by
// Rust TypeIds alone. The TypeId is still recorded so a World can reject two
// distinct types that claim the same ID.

use std::any::{type_name, TypeId};

pub type ComponentId = u32;

/// Metadata describing a registered component kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentMeta {
    pub id: ComponentId,
    pub name: &'static str,
    pub type_id: TypeId,
    pub type_name: &'static str,
}

/// Trait for plain-data components.
///
/// Implementors should be plain records without behavior. Use
/// [`define_component!`](crate::define_component) rather than implementing
/// this by hand.
pub trait Component: 'static + Sized {
    /// Unique component ID within a World.
    const ID: ComponentId;

    /// Human-readable name, used in errors and logs.
    const NAME: &'static str;

    /// Layout-free metadata for this component kind.
    fn meta() -> ComponentMeta {
        ComponentMeta {
            id: Self::ID,
            name: Self::NAME,
            type_id: TypeId::of::<Self>(),
            type_name: type_name::<Self>(),
        }
    }
}

/// Helper macro to implement the Component trait.
///
/// # Example
/// ```ignore
/// #[derive(Clone, Copy)]
/// struct Position { x: i32, y: i32 }
///
/// define_component!(Position, 1, "Position");
/// ```
#[macro_export]
macro_rules! define_component {
    ($ty:ty, $id:expr, $name:expr) => {
        impl $crate::ecs::Component for $ty {
            const ID: $crate::ecs::ComponentId = $id;
            const NAME: &'static str = $name;
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;
    define_component!(Marker, 900, "Marker");

    #[test]
    fn meta_reflects_declaration() {
        let meta = Marker::meta();
        assert_eq!(meta.id, 900);
        assert_eq!(meta.name, "Marker");
        assert_eq!(meta.type_id, TypeId::of::<Marker>());
        assert!(meta.type_name.ends_with("Marker"));
    }
}
