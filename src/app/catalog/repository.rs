//! 商品目录仓储
//!
//! `CatalogRepository` 是目录的读写契约，视图只依赖这个 trait。
//! `InMemoryCatalog` 是唯一的实现，数据只存在内存里。

use tracing::{debug, info};

use super::model::{CatalogError, Product, ProductDraft, ProductId};

/// 商品目录契约
pub trait CatalogRepository: Send + Sync {
    /// 按当前顺序返回全部商品
    fn list(&self) -> Vec<Product>;

    /// 返回分类完全相等（区分大小写）的商品，保持原有顺序
    fn filter_by_category(&self, category: &str) -> Vec<Product>;

    fn get(&self, id: ProductId) -> Option<Product>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 新增商品，id 为当前最大 id 加一，追加到末尾
    fn add(&mut self, draft: ProductDraft) -> Result<Product, CatalogError>;

    /// 原地替换三个文本字段，id 和位置不变
    fn update(&mut self, id: ProductId, draft: ProductDraft) -> Result<Product, CatalogError>;

    /// 删除商品，不存在时什么也不做
    fn remove(&mut self, id: ProductId);
}

/// 内存商品目录
///
/// id 分配依赖单写者：同一目录的写操作由会话锁串行化。
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 用已有记录初始化，记录需自带唯一 id
    pub fn with_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    fn next_id(&self) -> ProductId {
        self.products.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }
}

impl CatalogRepository for InMemoryCatalog {
    fn list(&self) -> Vec<Product> {
        self.products.clone()
    }

    fn filter_by_category(&self, category: &str) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect()
    }

    fn get(&self, id: ProductId) -> Option<Product> {
        self.products.iter().find(|p| p.id == id).cloned()
    }

    fn len(&self) -> usize {
        self.products.len()
    }

    fn add(&mut self, draft: ProductDraft) -> Result<Product, CatalogError> {
        draft.check()?;

        let product = draft.into_product(self.next_id());
        self.products.push(product.clone());

        info!("新增商品 {} ({})", product.id, product.name);
        Ok(product)
    }

    fn update(&mut self, id: ProductId, draft: ProductDraft) -> Result<Product, CatalogError> {
        let slot = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CatalogError::NotFound(id))?;

        draft.check()?;

        *slot = draft.into_product(id);

        info!("更新商品 {}", id);
        Ok(slot.clone())
    }

    fn remove(&mut self, id: ProductId) {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);

        if self.products.len() < before {
            info!("删除商品 {}", id);
        } else {
            debug!("删除的商品 {} 不存在，忽略", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, category: &str) -> ProductDraft {
        ProductDraft::new(name, "d", category)
    }

    #[test]
    fn add_assigns_increasing_ids() {
        let mut catalog = InMemoryCatalog::new();
        let mut last = 0;
        for name in ["A", "B", "C", "D"] {
            let product = catalog.add(draft(name, "Glassware")).unwrap();
            assert!(catalog.list().iter().filter(|p| p.id != product.id).all(|p| p.id < product.id));
            assert!(product.id > last);
            last = product.id;
        }
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn add_on_empty_catalog_starts_at_one() {
        let mut catalog = InMemoryCatalog::new();
        assert_eq!(catalog.add(draft("A", "Glassware")).unwrap().id, 1);
    }

    #[test]
    fn add_after_gap_uses_max_plus_one() {
        let mut catalog = InMemoryCatalog::with_products(vec![
            draft("A", "x").into_product(3),
            draft("B", "x").into_product(9),
        ]);
        assert_eq!(catalog.add(draft("C", "x")).unwrap().id, 10);
    }

    #[test]
    fn add_rejects_empty_fields_and_leaves_catalog_unchanged() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add(draft("A", "Glassware")).unwrap();

        let err = catalog.add(ProductDraft::new("B", "", "Glassware")).unwrap_err();
        assert!(matches!(err, CatalogError::Validation { .. }));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn remove_then_list_never_contains_id() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add(draft("A", "Glassware")).unwrap();
        catalog.add(draft("B", "Glassware")).unwrap();

        catalog.remove(1);
        assert!(catalog.list().iter().all(|p| p.id != 1));
        assert!(catalog.get(1).is_none());
    }

    #[test]
    fn remove_missing_id_is_noop() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add(draft("A", "Glassware")).unwrap();
        let before = catalog.list();

        catalog.remove(42);
        assert_eq!(catalog.list(), before);
    }

    #[test]
    fn update_keeps_id_and_position() {
        let mut catalog = InMemoryCatalog::new();
        for name in ["A", "B", "C"] {
            catalog.add(draft(name, "Glassware")).unwrap();
        }

        let updated = catalog
            .update(2, ProductDraft::new("B2", "new", "Electronics"))
            .unwrap();
        assert_eq!(updated.id, 2);
        assert_eq!(updated.name, "B2");

        let ids: Vec<_> = catalog.list().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(catalog.list()[1], updated);
    }

    #[test]
    fn update_missing_id_is_not_found() {
        let mut catalog = InMemoryCatalog::new();
        assert_eq!(
            catalog.update(5, draft("A", "x")).unwrap_err(),
            CatalogError::NotFound(5)
        );
    }

    #[test]
    fn update_checks_existence_before_fields() {
        let mut catalog = InMemoryCatalog::new();
        assert_eq!(
            catalog.update(5, ProductDraft::default()).unwrap_err(),
            CatalogError::NotFound(5)
        );
    }

    #[test]
    fn update_with_empty_field_leaves_record_unchanged() {
        let mut catalog = InMemoryCatalog::new();
        let original = catalog.add(draft("A", "Glassware")).unwrap();

        let err = catalog
            .update(original.id, ProductDraft::new("A2", "d", ""))
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation { .. }));
        assert_eq!(catalog.get(original.id), Some(original));
    }

    #[test]
    fn filter_by_category_is_exact_and_ordered() {
        let mut catalog = InMemoryCatalog::new();
        catalog.add(draft("A", "Glassware")).unwrap();
        catalog.add(draft("B", "Electronics")).unwrap();
        catalog.add(draft("C", "Glassware")).unwrap();
        catalog.add(draft("D", "glassware")).unwrap();

        let names: Vec<_> = catalog
            .filter_by_category("Glassware")
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["A", "C"]);
        assert!(catalog.filter_by_category("Vaporizers").is_empty());
    }

    #[test]
    fn add_add_remove_scenario() {
        let mut catalog = InMemoryCatalog::new();
        assert_eq!(catalog.add(draft("A", "Glassware")).unwrap().id, 1);
        assert_eq!(catalog.add(draft("B", "Glassware")).unwrap().id, 2);

        catalog.remove(1);

        let products = catalog.list();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, 2);
        assert_eq!(products[0].name, "B");
    }
}
