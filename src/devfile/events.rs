//! Lifecycle events

use super::WorkspaceContent;
use crate::error::{Error, Result};
use crate::model::Events;

pub(super) fn get(content: &WorkspaceContent) -> Events {
    content.events.clone().unwrap_or_default()
}

/// Fill the empty slots of the document from `incoming`.
///
/// A non-empty incoming slot over a non-empty existing slot is a conflict.
/// All slots are checked before anything is written.
pub(super) fn add(content: &mut WorkspaceContent, incoming: Events) -> Result<()> {
    if let Some(existing) = &content.events {
        for ((field, new), (_, old)) in incoming.slots().into_iter().zip(existing.slots()) {
            if !new.is_empty() && !old.is_empty() {
                return Err(Error::FieldAlreadyExists {
                    field: field.to_string(),
                });
            }
        }
    }
    overwrite_non_empty(
        content.events.get_or_insert_with(Events::default),
        incoming,
    );
    Ok(())
}

pub(super) fn update(content: &mut WorkspaceContent, incoming: Events) {
    let existing = content.events.get_or_insert_with(Events::default);
    overwrite_non_empty(existing, incoming);
}

fn overwrite_non_empty(existing: &mut Events, incoming: Events) {
    let Events {
        pre_start,
        post_start,
        pre_stop,
        post_stop,
    } = incoming;
    for (slot, value) in [
        (&mut existing.pre_start, pre_start),
        (&mut existing.post_start, post_start),
        (&mut existing.pre_stop, pre_stop),
        (&mut existing.post_stop, post_stop),
    ] {
        if !value.is_empty() {
            *slot = value;
        }
    }
}
