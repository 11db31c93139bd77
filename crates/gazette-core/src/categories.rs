use crate::error::AppError;
use crate::models::Category;
use crate::traits::CategorySource;

/// Public category listing on top of a [`CategorySource`].
#[derive(Clone)]
pub struct CategoryService<C: CategorySource> {
    source: C,
}

impl<C: CategorySource> CategoryService<C> {
    pub fn new(source: C) -> Self {
        Self { source }
    }

    /// Categories with at least one post, in upstream order.
    pub async fn published(&self) -> Result<Vec<Category>, AppError> {
        let categories = self.source.categories().await?;
        let total = categories.len();
        let published: Vec<Category> = categories.into_iter().filter(|c| c.count > 0).collect();
        tracing::debug!(total, published = published.len(), "Listed categories");
        Ok(published)
    }
}
