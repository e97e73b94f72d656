use tracing::{debug, warn};

use super::{duplicate_values, ColumnDraft, ColumnRecord, ColumnStore, ColumnType, OptionColor};
use crate::errors::{ColumnError, ColumnResult};

/// Whether the editor creates a new column or edits an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorMode {
    Create { project_id: i32 },
    Edit { project_id: i32, column_id: i32 },
}

impl EditorMode {
    pub fn project_id(&self) -> i32 {
        match self {
            EditorMode::Create { project_id } | EditorMode::Edit { project_id, .. } => *project_id,
        }
    }
}

/// A validated snapshot of the draft, ready for exactly one persistence call.
#[derive(Clone, Debug)]
pub struct ColumnSubmission {
    pub mode: EditorMode,
    pub draft: ColumnDraft,
}

impl ColumnSubmission {
    /// Send the create or update to the store.
    pub async fn dispatch<S>(&self, store: &S) -> ColumnResult<ColumnRecord>
    where
        S: ColumnStore + ?Sized,
    {
        match self.mode {
            EditorMode::Create { project_id } => store.create_column(project_id, &self.draft).await,
            EditorMode::Edit {
                project_id,
                column_id,
            } => {
                store
                    .update_column(project_id, column_id, &self.draft)
                    .await
            }
        }
    }
}

/// An editing session for one column definition.
///
/// The session owns its draft; dropping the editor discards unsaved changes.
/// Failures from validation or from the store land in a single error slot and
/// leave the draft untouched so it can be corrected and resubmitted.
#[derive(Debug)]
pub struct ColumnEditor {
    mode: EditorMode,
    draft: ColumnDraft,
    loading: bool,
    error: Option<String>,
}

impl ColumnEditor {
    pub fn for_new_column(project_id: i32) -> Self {
        Self {
            mode: EditorMode::Create { project_id },
            draft: ColumnDraft::new("", ColumnType::Text),
            loading: false,
            error: None,
        }
    }

    pub fn for_existing_column(record: &ColumnRecord) -> Self {
        Self {
            mode: EditorMode::Edit {
                project_id: record.project_id,
                column_id: record.id,
            },
            draft: ColumnDraft::from_record(record),
            loading: false,
            error: None,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn draft(&self) -> &ColumnDraft {
        &self.draft
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The message shown to the user, if the last submit failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.set_name(name);
    }

    pub fn set_type(&mut self, column_type: ColumnType) -> ColumnResult<()> {
        self.draft.set_type(column_type)
    }

    pub fn set_width(&mut self, width: i32) -> i32 {
        self.draft.set_width(width)
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.draft.set_visible(visible);
    }

    pub fn add_option(
        &mut self,
        label: &str,
        value: Option<&str>,
        color: Option<OptionColor>,
    ) -> ColumnResult<()> {
        self.draft.add_option(label, value, color)
    }

    pub fn update_option(
        &mut self,
        index: usize,
        label: &str,
        value: Option<&str>,
        color: Option<OptionColor>,
    ) -> ColumnResult<()> {
        self.draft.update_option(index, label, value, color)
    }

    pub fn remove_option(&mut self, index: usize) -> ColumnResult<()> {
        self.draft.remove_option(index).map(|_| ())
    }

    pub fn move_option(&mut self, from: usize, to: usize) -> ColumnResult<()> {
        self.draft.move_option(from, to)
    }

    pub fn validate(&self) -> ColumnResult<()> {
        self.draft.validate()
    }

    /// Validate the draft and raise the loading flag.
    ///
    /// Fails without touching the draft while another submission is in flight.
    pub fn begin_submit(&mut self) -> ColumnResult<ColumnSubmission> {
        if self.loading {
            return Err(ColumnError::SubmissionInProgress);
        }

        if let Err(err) = self.draft.validate() {
            self.error = Some(err.to_string());
            return Err(err);
        }

        let duplicates = duplicate_values(self.draft.options());
        if !duplicates.is_empty() {
            warn!(
                "Column '{}' has options sharing values: {}",
                self.draft.name().trim(),
                duplicates.join(", ")
            );
        }

        self.error = None;
        self.loading = true;
        Ok(ColumnSubmission {
            mode: self.mode,
            draft: self.draft.clone(),
        })
    }

    /// Lower the loading flag and record the outcome of a submission.
    ///
    /// On success the editor switches to editing the saved column.
    pub fn finish_submit(
        &mut self,
        result: ColumnResult<ColumnRecord>,
    ) -> ColumnResult<ColumnRecord> {
        self.loading = false;
        match result {
            Ok(record) => {
                debug!(
                    "Column {} saved in project {}",
                    record.id, record.project_id
                );
                self.mode = EditorMode::Edit {
                    project_id: record.project_id,
                    column_id: record.id,
                };
                self.draft = ColumnDraft::from_record(&record);
                Ok(record)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Validate, then create or update through the store with a single call.
    pub async fn submit<S>(&mut self, store: &S) -> ColumnResult<ColumnRecord>
    where
        S: ColumnStore + ?Sized,
    {
        let submission = self.begin_submit()?;
        let result = submission.dispatch(store).await;
        self.finish_submit(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::ColumnOption;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        calls: Mutex<Vec<String>>,
        reject: bool,
    }

    impl RecordingStore {
        fn rejecting() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reject: true,
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(
            &self,
            project_id: i32,
            id: i32,
            draft: &ColumnDraft,
        ) -> ColumnResult<ColumnRecord> {
            if self.reject {
                return Err(ColumnError::ProjectNotFound(project_id));
            }
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
                    .map(|(index, option)| ColumnOption {
                        id: index as i32 + 1,
                        label: option.label.clone(),
                        value: option.value.clone(),
                        color: option.color,
                        position: index as i32,
                    })
                    .collect(),
            })
        }
    }

    #[async_trait]
    impl ColumnStore for RecordingStore {
        async fn create_column(
            &self,
            project_id: i32,
            draft: &ColumnDraft,
        ) -> ColumnResult<ColumnRecord> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("create:{}", project_id));
            self.record(project_id, 42, draft)
        }

        async fn update_column(
            &self,
            project_id: i32,
            column_id: i32,
            draft: &ColumnDraft,
        ) -> ColumnResult<ColumnRecord> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("update:{}:{}", project_id, column_id));
            self.record(project_id, column_id, draft)
        }
    }

    #[tokio::test]
    async fn select_without_options_fails_before_persisting() {
        let store = RecordingStore::default();
        let mut editor = ColumnEditor::for_new_column(1);
        editor.set_name("Stage");
        editor.set_type(ColumnType::Select).unwrap();

        let err = editor.submit(&store).await.unwrap_err();
        assert!(matches!(err, ColumnError::OptionsRequired));
        assert_eq!(editor.error(), Some("Please add at least one option"));
        assert!(!editor.is_loading());
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_name_is_reported() {
        let store = RecordingStore::default();
        let mut editor = ColumnEditor::for_new_column(1);
        let err = editor.submit(&store).await.unwrap_err();
        assert!(matches!(err, ColumnError::NameRequired));
        assert_eq!(editor.error(), Some("Column name is required"));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn create_then_update_uses_one_call_each() {
        let store = RecordingStore::default();
        let mut editor = ColumnEditor::for_new_column(7);
        editor.set_name("Status");
        editor.set_type(ColumnType::Select).unwrap();
        editor.add_option("In Progress", None, None).unwrap();

        let record = editor.submit(&store).await.unwrap();
        assert_eq!(record.options[0].value, "in-progress");
        assert_eq!(store.calls(), vec!["create:7".to_string()]);
        assert_eq!(
            editor.mode(),
            EditorMode::Edit {
                project_id: 7,
                column_id: 42
            }
        );

        editor.set_width(300);
        editor.submit(&store).await.unwrap();
        assert_eq!(
            store.calls(),
            vec!["create:7".to_string(), "update:7:42".to_string()]
        );
    }

    #[tokio::test]
    async fn store_rejection_is_shown_verbatim_and_draft_kept() {
        let store = RecordingStore::rejecting();
        let mut editor = ColumnEditor::for_new_column(1);
        editor.set_name("Notes");

        let err = editor.submit(&store).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(editor.error(), Some("Project 1 not found"));
        assert_eq!(editor.draft().name(), "Notes");
        assert!(!editor.is_loading());
        assert_eq!(store.calls().len(), 1);
    }

    #[test]
    fn loading_flag_blocks_second_submission() {
        let mut editor = ColumnEditor::for_new_column(1);
        editor.set_name("Notes");

        let _first = editor.begin_submit().unwrap();
        assert!(editor.is_loading());
        assert!(matches!(
            editor.begin_submit(),
            Err(ColumnError::SubmissionInProgress)
        ));
    }

    #[test]
    fn existing_default_column_keeps_its_type() {
        let record = ColumnRecord {
            id: 3,
            project_id: 1,
            name: "Due date".to_string(),
            column_type: ColumnType::Date,
            width: 150,
            visible: true,
            is_default: true,
            position: 1,
            options: Vec::new(),
        };
        let mut editor = ColumnEditor::for_existing_column(&record);
        assert!(editor.set_type(ColumnType::Number).is_err());
        assert_eq!(editor.draft().column_type(), ColumnType::Date);
    }
}
