use std::collections::HashMap;

use crate::model::{Field, Group};

/// A field selected into a group, at its position in the full field list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupMember<'f> {
    pub position: usize,
    pub field: &'f Field,
    pub group: &'f Group,
}

/// All members of one group, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupView<'f> {
    name: &'f str,
    arity: usize,
    members: Vec<GroupMember<'f>>,
}

impl<'f> GroupView<'f> {
    pub fn name(&self) -> &'f str {
        self.name
    }

    /// Length of the full field list.
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn members(&self) -> &[GroupMember<'f>] {
        &self.members
    }
}

/// Bucket fields by group name. Groups come out in the order they are first
/// seen; fields without groups appear in no bucket.
pub fn aggregate_groups(fields: &[Field]) -> Vec<GroupView<'_>> {
    let arity = fields.len();
    let mut views: Vec<GroupView<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for (position, field) in fields.iter().enumerate() {
        for group in &field.groups {
            let slot = *index.entry(group.name.as_str()).or_insert_with(|| {
                views.push(GroupView {
                    name: &group.name,
                    arity,
                    members: Vec::new(),
                });
                views.len() - 1
            });
            views[slot].members.push(GroupMember {
                position,
                field,
                group,
            });
        }
    }

    views
}

/// A field paired with the key it is serialized under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldEntry<'f> {
    pub field: &'f Field,
    pub key: &'f str,
}

/// Entries of one serializer method. `group` is `None` for the method that
/// covers every field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializeView<'f> {
    pub group: Option<&'f str>,
    pub entries: Vec<FieldEntry<'f>>,
}

impl<'f> SerializeView<'f> {
    pub fn all(fields: &'f [Field]) -> Self {
        Self {
            group: None,
            entries: fields
                .iter()
                .map(|field| FieldEntry { field, key: &field.name })
                .collect(),
        }
    }

    pub fn grouped(view: &GroupView<'f>) -> Self {
        Self {
            group: Some(view.name),
            entries: view
                .members
                .iter()
                .map(|member| FieldEntry {
                    field: member.field,
                    key: &member.group.member,
                })
                .collect(),
        }
    }

    /// `all_name` for the full view, `prefix` + capitalised group otherwise.
    pub fn method_name(&self, all_name: &str, prefix: &str) -> String {
        method_name(self.group, all_name, prefix)
    }
}

/// Positional arguments of one deserializer's constructor call; `None`
/// marks a slot filled with a null placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeserializeView<'f> {
    pub group: Option<&'f str>,
    pub slots: Vec<Option<FieldEntry<'f>>>,
}

impl<'f> DeserializeView<'f> {
    pub fn all(fields: &'f [Field]) -> Self {
        Self {
            group: None,
            slots: fields
                .iter()
                .map(|field| Some(FieldEntry { field, key: &field.name }))
                .collect(),
        }
    }

    pub fn grouped(view: &GroupView<'f>) -> Self {
        let mut slots = vec![None; view.arity];
        for member in &view.members {
            if let Some(slot) = slots.get_mut(member.position) {
                *slot = Some(FieldEntry {
                    field: member.field,
                    key: &member.group.member,
                });
            }
        }
        Self {
            group: Some(view.name),
            slots,
        }
    }

    pub fn arity(&self) -> usize {
        self.slots.len()
    }

    pub fn method_name(&self, all_name: &str, prefix: &str) -> String {
        method_name(self.group, all_name, prefix)
    }
}

/// The full serializer followed by one per group.
pub fn serialize_views(fields: &[Field]) -> Vec<SerializeView<'_>> {
    std::iter::once(SerializeView::all(fields))
        .chain(aggregate_groups(fields).iter().map(SerializeView::grouped))
        .collect()
}

/// The full deserializer followed by one per group.
pub fn deserialize_views(fields: &[Field]) -> Vec<DeserializeView<'_>> {
    std::iter::once(DeserializeView::all(fields))
        .chain(aggregate_groups(fields).iter().map(DeserializeView::grouped))
        .collect()
}

fn method_name(group: Option<&str>, all_name: &str, prefix: &str) -> String {
    match group {
        Some(group) => format!("{}{}", prefix, upper_first(group)),
        None => all_name.to_string(),
    }
}

pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
