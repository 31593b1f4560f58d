mod error;
mod model;
mod views;

pub use error::{SpecError, SpecResult};
pub use model::{Field, Group, Lang, PhpLang, Spec, TsLang};
pub use views::{
    aggregate_groups, deserialize_views, serialize_views, upper_first, DeserializeView, FieldEntry,
    GroupMember, GroupView, SerializeView,
};

#[cfg(test)]
mod tests;
