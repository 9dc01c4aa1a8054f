//! Query macro

/// Entities holding every listed component type, in ascending index order.
///
/// ```ignore
/// for entity in query!(world, [Transform, Movement, Tag, Sprite]) {
///     let transform = world.component::<Transform>(entity)?;
/// }
/// ```
#[macro_export]
macro_rules! query {
    ($world:expr, [$($Component:ty),+ $(,)?]) => {{
        $world.query(&[$(<$Component as $crate::ecs::Component>::ID),+])
    }};
}
