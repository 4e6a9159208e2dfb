//! 商品目录数据模型

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

pub type ProductId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
}

/// 新增或编辑商品时提交的三个字段
///
/// 只要求非空，全空白字符串也算有效。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ProductDraft {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub name: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub category: String,
}

impl ProductDraft {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category: category.into(),
        }
    }

    /// 校验必填字段
    pub fn check(&self) -> Result<(), CatalogError> {
        self.validate().map_err(CatalogError::from)
    }

    pub(crate) fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            category: self.category,
        }
    }
}

/// 商品目录错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// 有必填字段为空，`fields` 为空字段名（按字母排序）
    #[error("Please fill in all fields")]
    Validation { fields: Vec<String> },

    #[error("Product {0} not found")]
    NotFound(ProductId),
}

impl From<ValidationErrors> for CatalogError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        CatalogError::Validation { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_draft_passes() {
        assert!(ProductDraft::new("Bong", "Glass", "Glassware").check().is_ok());
    }

    #[test]
    fn whitespace_counts_as_filled() {
        assert!(ProductDraft::new(" ", " ", " ").check().is_ok());
    }

    #[test]
    fn empty_fields_are_reported() {
        let err = ProductDraft::new("", "d", "").check().unwrap_err();
        assert_eq!(
            err,
            CatalogError::Validation {
                fields: vec!["category".to_string(), "name".to_string()]
            }
        );
        assert_eq!(err.to_string(), "Please fill in all fields");
    }
}
