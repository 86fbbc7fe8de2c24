use crate::editor::target::{EditTarget, PropertyMeta};
use crate::{LocaleKey, LocalizedValue, statics};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

/// The localized properties of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Description,
}

impl ProductField {
    /// Name is mandatory; description is long text.
    pub fn property(self) -> PropertyMeta {
        match self {
            ProductField::Name => {
                PropertyMeta::new(statics::PRODUCT_ENTITY, statics::PRODUCT_PROP_NAME)
                    .with_mandatory(true)
            }
            ProductField::Description => {
                PropertyMeta::new(statics::PRODUCT_ENTITY, statics::PRODUCT_PROP_DESCRIPTION)
                    .with_long_text(true)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(default)]
    pub name: Option<LocalizedValue>,
    #[serde(default)]
    pub description: Option<LocalizedValue>,
}

impl Product {
    pub fn value(&self, field: ProductField) -> Option<&LocalizedValue> {
        match field {
            ProductField::Name => self.name.as_ref(),
            ProductField::Description => self.description.as_ref(),
        }
    }

    pub fn value_mut(&mut self, field: ProductField) -> &mut Option<LocalizedValue> {
        match field {
            ProductField::Name => &mut self.name,
            ProductField::Description => &mut self.description,
        }
    }
}

/// Edit target bound to one localized property of one product.
#[derive(Debug)]
pub struct ProductTarget<'a> {
    product: &'a mut Product,
    field: ProductField,
    property: PropertyMeta,
}

impl<'a> ProductTarget<'a> {
    pub fn new(product: &'a mut Product, field: ProductField) -> Self {
        Self {
            product,
            field,
            property: field.property(),
        }
    }
}

impl EditTarget for ProductTarget<'_> {
    fn value(&self) -> Option<&LocalizedValue> {
        self.product.value(self.field)
    }

    fn set_value_from_client(&mut self, value: LocalizedValue) {
        *self.product.value_mut(self.field) = Some(value);
    }

    fn property(&self) -> Option<&PropertyMeta> {
        Some(&self.property)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
}

/// The demo's product list, preserving the bytes it was loaded from so an
/// unmodified catalog saves back unchanged.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub source_path: Option<PathBuf>,
    pub original_bytes: Vec<u8>,
    pub products: Vec<Product>,
    pub dirty: bool,
}

impl Catalog {
    pub fn empty() -> Self {
        Self {
            source_path: None,
            original_bytes: Vec::new(),
            products: Vec::new(),
            dirty: false,
        }
    }

    /// A couple of products to play with when no file is opened.
    pub fn sample() -> anyhow::Result<Self> {
        let en = LocaleKey::parse("en")?;
        let ru = LocaleKey::parse("ru_RU")?;
        let text = |en_text: &str, ru_text: &str| -> LocalizedValue {
            [
                (en.clone(), en_text.to_string()),
                (ru.clone(), ru_text.to_string()),
            ]
            .into_iter()
            .collect()
        };

        let mut catalog = Self::empty();
        catalog.products = vec![
            Product {
                id: 1,
                name: Some(text("Chair", "Стул")),
                description: Some(text("A wooden chair.\nFits any kitchen.", "Деревянный стул.")),
            },
            Product {
                id: 2,
                name: Some(text("Table", "Стол")),
                description: None,
            },
        ];
        Ok(catalog)
    }

    pub fn load_path(path: &Path) -> anyhow::Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("reading {path:?}"))?;
        let file: CatalogFile =
            serde_json::from_slice(&bytes).context("parsing catalog JSON")?;
        info!(path = %path.display(), products = file.products.len(), "loaded catalog");

        Ok(Self {
            source_path: Some(path.to_path_buf()),
            original_bytes: bytes,
            products: file.products,
            dirty: false,
        })
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Recompute `dirty` by comparing the current serialized bytes to `original_bytes`.
    pub fn refresh_dirty(&mut self) {
        let Ok(current) = self.generate_bytes() else {
            self.dirty = true;
            return;
        };
        self.dirty = current != self.original_bytes;
    }

    pub fn generate_bytes(&self) -> anyhow::Result<Vec<u8>> {
        let file = CatalogFile {
            products: self.products.clone(),
        };
        let mut bytes = serde_json::to_vec_pretty(&file).context("encoding catalog JSON")?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    pub fn save_bytes(&self) -> anyhow::Result<Vec<u8>> {
        if !self.dirty && !self.original_bytes.is_empty() {
            return Ok(self.original_bytes.clone());
        }
        self.generate_bytes()
    }

    pub fn save_to_path(&mut self, path: &Path) -> anyhow::Result<()> {
        let bytes = self.save_bytes()?;
        fs::write(path, &bytes).with_context(|| format!("writing {path:?}"))?;
        info!(path = %path.display(), products = self.products.len(), "saved catalog");

        self.source_path = Some(path.to_path_buf());
        self.original_bytes = bytes;
        self.dirty = false;
        Ok(())
    }

    pub fn product(&self, id: u64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn product_mut(&mut self, id: u64) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    /// Appends a product without values and returns its id.
    pub fn add_product(&mut self) -> u64 {
        let id = self.products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        self.products.push(Product {
            id,
            name: None,
            description: None,
        });
        self.mark_dirty();
        id
    }

    pub fn remove_product(&mut self, id: u64) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        let removed = self.products.len() != before;
        if removed {
            self.mark_dirty();
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::{Catalog, ProductField, ProductTarget};
    use crate::editor::target::EditTarget;
    use crate::{LocaleKey, LocalizedValue};

    #[test]
    fn property_metadata_per_field() {
        assert!(ProductField::Name.property().is_required());
        assert!(!ProductField::Name.property().long_text);
        assert!(ProductField::Description.property().long_text);
        assert!(!ProductField::Description.property().is_required());
    }

    #[test]
    fn product_target_writes_back_into_product() {
        let mut catalog = Catalog::sample().unwrap();
        let product = catalog.product_mut(2).unwrap();
        let mut target = ProductTarget::new(product, ProductField::Description);
        assert!(target.value().is_none());

        let en = LocaleKey::parse("en").unwrap();
        target.set_value_from_client(LocalizedValue::single(en.clone(), "Round"));
        assert_eq!(
            catalog.product(2).unwrap().description.as_ref().unwrap().get(&en),
            "Round"
        );
    }

    #[test]
    fn add_and_remove_products_track_dirty() {
        let mut catalog = Catalog::empty();
        assert_eq!(catalog.add_product(), 1);
        assert_eq!(catalog.add_product(), 2);
        assert!(catalog.dirty);
        assert!(catalog.remove_product(1));
        assert!(!catalog.remove_product(1));
        assert_eq!(catalog.products.len(), 1);
    }
}
