//! Property tests for the column editor submit path.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use proptest::prelude::*;
use taskboard::columns::{
    derive_option_value, ColumnDraft, ColumnEditor, ColumnOption, ColumnRecord, ColumnStore,
    ColumnType,
};
use taskboard::errors::{ColumnError, ColumnResult};

/// Counts persistence calls and echoes the draft back.
#[derive(Default)]
struct CountingStore {
    calls: AtomicUsize,
}

impl CountingStore {
    fn echo(&self, project_id: i32, id: i32, draft: &ColumnDraft) -> ColumnResult<ColumnRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ColumnRecord {
            id,
            project_id,
            name: draft.name().trim().to_string(),
            column_type: draft.column_type(),
            width: draft.width(),
            visible: draft.visible(),
            is_default: draft.is_default(),
            position: 0,
            options: draft
                .options()
                .iter()
                .enumerate()
                .map(|(i, o)| ColumnOption {
                    id: i as i32,
                    label: o.label.clone(),
                    value: o.value.clone(),
                    color: o.color,
                    position: i as i32,
                })
                .collect(),
        })
    }
}

#[async_trait]
impl ColumnStore for CountingStore {
    async fn create_column(
        &self,
        project_id: i32,
        draft: &ColumnDraft,
    ) -> ColumnResult<ColumnRecord> {
        self.echo(project_id, 1, draft)
    }

    async fn update_column(
        &self,
        project_id: i32,
        column_id: i32,
        draft: &ColumnDraft,
    ) -> ColumnResult<ColumnRecord> {
        self.echo(project_id, column_id, draft)
    }
}

fn column_type() -> impl Strategy<Value = ColumnType> {
    prop::sample::select(ColumnType::ALL.to_vec())
}

proptest! {
    #[test]
    fn enumerated_without_options_never_persists(
        name in "[A-Za-z][A-Za-z0-9 ]{0,40}",
        multi in any::<bool>(),
    ) {
        let store = CountingStore::default();
        let mut editor = ColumnEditor::for_new_column(1);
        editor.set_name(name);
        let column_type = if multi { ColumnType::Multiselect } else { ColumnType::Select };
        editor.set_type(column_type).unwrap();

        let err = tokio_test::block_on(editor.submit(&store)).unwrap_err();
        prop_assert!(matches!(err, ColumnError::OptionsRequired));
        prop_assert_eq!(editor.error(), Some("Please add at least one option"));
        prop_assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn valid_drafts_persist_with_one_call(
        name in "[A-Za-z][A-Za-z0-9 ]{0,99}",
        column_type in column_type(),
        labels in prop::collection::vec("[A-Za-z][A-Za-z ]{0,20}", 1..6),
        width in -1000i32..2000,
    ) {
        let store = CountingStore::default();
        let mut editor = ColumnEditor::for_new_column(3);
        editor.set_name(name);
        editor.set_type(column_type).unwrap();
        editor.set_width(width);
        for label in &labels {
            let added = editor.add_option(label, None, None);
            prop_assert_eq!(added.is_ok(), column_type.is_enumerated());
        }

        let record = tokio_test::block_on(editor.submit(&store)).unwrap();
        prop_assert_eq!(store.calls.load(Ordering::SeqCst), 1);
        prop_assert!(editor.error().is_none());
        prop_assert!((60..=600).contains(&record.width));
        if column_type.is_enumerated() {
            prop_assert_eq!(record.options.len(), labels.len());
        } else {
            prop_assert!(record.options.is_empty());
        }
    }

    #[test]
    fn leaving_enumerated_types_clears_options(
        labels in prop::collection::vec("[a-z]{1,10}", 1..8),
        target in prop::sample::select(vec![
            ColumnType::Text,
            ColumnType::Number,
            ColumnType::Date,
            ColumnType::User,
            ColumnType::Checkbox,
        ]),
    ) {
        let mut draft = ColumnDraft::new("Stage", ColumnType::Select);
        for label in &labels {
            draft.add_option(label, None, None).unwrap();
        }
        draft.set_type(target).unwrap();
        prop_assert!(draft.options().is_empty());
    }

    #[test]
    fn default_columns_keep_their_type(
        original in column_type(),
        requested in column_type(),
    ) {
        let mut draft = ColumnDraft::new_default("Built in", original);
        let result = draft.set_type(requested);
        prop_assert_eq!(draft.column_type(), original);
        prop_assert_eq!(result.is_err(), original != requested);
    }

    #[test]
    fn derived_values_have_no_whitespace(label in "\\PC{1,30}") {
        let value = derive_option_value(&label);
        prop_assert!(!value.chars().any(char::is_whitespace));
    }
}

#[test]
fn in_progress_slug() {
    assert_eq!(derive_option_value("In Progress"), "in-progress");
    assert_eq!(derive_option_value("  Ready   for  QA "), "ready-for-qa");
}
