pub mod kind;
pub mod shape;

pub use kind::ElementKind;
pub use shape::Shape;
