//! @ai:module:intent Concrete property rules shipped with the crate
//! @ai:module:layer domain
//! @ai:module:public_api native, accessors, declared

pub mod accessors;
pub mod declared;
pub mod native;

pub use accessors::{GetterRule, SetterRule};
pub use declared::{DeclaredComplexRule, DeclaredSimpleRule};
pub use native::GenCodeTemplateRule;
