use async_trait::async_trait;

use super::{ColumnDraft, ColumnRecord};
use crate::errors::ColumnResult;

/// Persistence boundary for column definitions.
///
/// Implementations write the column and its full option list atomically: the
/// options of an updated column are replaced by the draft's options.
#[async_trait]
pub trait ColumnStore: Send + Sync {
    async fn create_column(&self, project_id: i32, draft: &ColumnDraft)
        -> ColumnResult<ColumnRecord>;

    async fn update_column(
        &self,
        project_id: i32,
        column_id: i32,
        draft: &ColumnDraft,
    ) -> ColumnResult<ColumnRecord>;
}
