/// Vector math used for pointer coordinates.
///
/// Re-exports the [`glam`] types the docking engine works with. Pointer
/// positions are plain [`Vec2`] values in the same coordinate space as every
/// [`LayoutRect`](crate::geometry::LayoutRect) handed to a station.
///
/// ```
/// use stackdock_core::math::Vec2;
///
/// let pointer = Vec2::new(10.0, 20.0);
/// let local = pointer - Vec2::new(4.0, 4.0);
/// assert_eq!(local, Vec2::new(6.0, 16.0));
/// ```
///
/// [`glam`]: https://docs.rs/glam
pub mod fast {
    pub use glam::{Vec2, vec2};
}

pub use fast::*;
