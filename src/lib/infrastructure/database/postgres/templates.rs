//! Postgres implementation of the TemplateStore trait

use async_trait::async_trait;
use sqlx::query_scalar;

use crate::{
    domain::communication::{
        errors::StoreError,
        purposes::{EmailPurpose, TemplateCategory},
        templates::{TemplateFragment, TemplateStore},
    },
    infrastructure::database::postgres::PostgresDatabase,
};

#[async_trait]
impl TemplateStore for PostgresDatabase {
    #[mutants::skip]
    async fn find_template(
        &self,
        category: TemplateCategory,
        purpose: EmailPurpose,
    ) -> Result<Option<TemplateFragment>, StoreError> {
        let contents = query_scalar::<_, String>(
            r#"
            SELECT contents
            FROM email_templates
            WHERE category = $1 AND purpose = $2
            "#,
        )
        .bind(category.as_str())
        .bind(purpose.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(contents.map(TemplateFragment::new))
    }
}
