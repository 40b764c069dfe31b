//! Step machine behind the product creation wizard.
//!
//! Pure state: the view feeds it form input and performs the network calls
//! it asks for.

use contracts::domain::a001_product::{BaseProductDto, ProductId};
use contracts::domain::a002_product_variant::ProductVariantDto;
use contracts::domain::a003_brand::BrandId;
use contracts::domain::a004_category::CategoryId;

use crate::domain::a002_product_variant::ui::form::VariantForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    BaseInfo,
    Variant,
    Review,
}

impl WizardStep {
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::BaseInfo => "1. Datos del producto",
            WizardStep::Variant => "2. Presentación y precio",
            WizardStep::Review => "3. Confirmar",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseInfoForm {
    pub name: String,
    pub description: String,
    pub brand_id: Option<BrandId>,
    pub category_id: Option<CategoryId>,
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductWizard {
    step: WizardStep,
    pub base: BaseInfoForm,
    pub variant: VariantForm,
    created_product: Option<ProductId>,
    min_barcode_length: usize,
}

impl ProductWizard {
    pub fn new(min_barcode_length: usize) -> Self {
        Self {
            step: WizardStep::BaseInfo,
            base: BaseInfoForm::default(),
            variant: VariantForm::default(),
            created_product: None,
            min_barcode_length,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Base product already stored by an earlier submit attempt
    pub fn created_product(&self) -> Option<ProductId> {
        self.created_product
    }

    pub fn record_product_created(&mut self, id: ProductId) {
        self.created_product = Some(id);
    }

    pub fn base_dto(&self) -> Result<BaseProductDto, String> {
        let dto = BaseProductDto {
            id: None,
            name: self.base.name.trim().to_string(),
            description: non_empty(&self.base.description),
            brand_id: self.base.brand_id,
            category_id: self.base.category_id,
        };
        dto.validate()?;
        Ok(dto)
    }

    /// Variant payload; `product_id` is absent until the base product exists
    pub fn variant_dto(&self, product_id: Option<ProductId>) -> Result<ProductVariantDto, String> {
        self.variant
            .to_dto(None, product_id, self.min_barcode_length)
    }

    /// Validates the current step and moves forward.
    pub fn next(&mut self) -> Result<WizardStep, String> {
        self.step = match self.step {
            WizardStep::BaseInfo => {
                self.base_dto()?;
                WizardStep::Variant
            }
            WizardStep::Variant => {
                self.variant_dto(None)?;
                WizardStep::Review
            }
            WizardStep::Review => return Err("Ya está en el último paso".into()),
        };
        Ok(self.step)
    }

    /// Steps back. The base info is frozen once the product was created.
    pub fn back(&mut self) -> WizardStep {
        self.step = match self.step {
            WizardStep::Review => WizardStep::Variant,
            WizardStep::Variant if self.created_product.is_none() => WizardStep::BaseInfo,
            other => other,
        };
        self.step
    }

    pub fn can_submit(&self) -> bool {
        self.step == WizardStep::Review
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ProductWizard {
        let mut w = ProductWizard::new(8);
        w.base.name = "  Cola  ".into();
        w.base.brand_id = Some(BrandId(3));
        w.variant.price = "12,50".into();
        w
    }

    #[test]
    fn test_name_is_required() {
        let mut w = ProductWizard::new(8);
        w.base.name = "   ".into();
        assert!(w.next().is_err());
        assert_eq!(w.step(), WizardStep::BaseInfo);
    }

    #[test]
    fn test_happy_path_reaches_review() {
        let mut w = filled();
        assert_eq!(w.next(), Ok(WizardStep::Variant));
        assert_eq!(w.next(), Ok(WizardStep::Review));
        assert!(w.can_submit());
        assert!(w.next().is_err());

        let base = w.base_dto().unwrap();
        assert_eq!(base.name, "Cola");
        assert_eq!(base.description, None);
        assert_eq!(base.brand_id, Some(BrandId(3)));
    }

    #[test]
    fn test_price_must_parse() {
        let mut w = filled();
        w.variant.price = "abc".into();
        w.next().unwrap();
        assert!(w.next().is_err());
        assert_eq!(w.step(), WizardStep::Variant);

        w.variant.price = "".into();
        assert!(w.next().is_err());

        w.variant.price = "-1".into();
        assert!(w.next().is_err());
    }

    #[test]
    fn test_barcode_optional_but_validated() {
        let mut w = filled();
        assert_eq!(w.variant_dto(None).unwrap().barcode, None);

        w.variant.barcode = "12AB".into();
        assert!(w.variant_dto(None).is_err());

        w.variant.barcode = "1234567".into();
        assert!(w.variant_dto(None).is_err());

        w.variant.barcode = " 12345678 ".into();
        assert_eq!(
            w.variant_dto(None).unwrap().barcode.as_deref(),
            Some("12345678")
        );
    }

    #[test]
    fn test_variant_dto_carries_product_and_optionals() {
        let mut w = filled();
        w.variant.capacity = "500".into();
        w.variant.unit = "ml".into();
        w.variant.stock = "7".into();
        let dto = w.variant_dto(Some(ProductId(42))).unwrap();
        assert_eq!(dto.product_id, Some(ProductId(42)));
        assert_eq!(dto.price, 12.5);
        assert_eq!(dto.capacity.as_deref(), Some("500"));
        assert_eq!(dto.unit.as_deref(), Some("ml"));
        assert_eq!(dto.stock_quantity, Some(7.0));
        assert!(dto.validate().is_ok());

        w.variant.stock = "x".into();
        assert!(w.variant_dto(None).is_err());
    }

    #[test]
    fn test_back_navigation() {
        let mut w = filled();
        w.next().unwrap();
        w.next().unwrap();
        assert_eq!(w.back(), WizardStep::Variant);
        assert_eq!(w.back(), WizardStep::BaseInfo);
        assert_eq!(w.back(), WizardStep::BaseInfo);
    }

    #[test]
    fn test_created_product_survives_retry_and_freezes_base() {
        let mut w = filled();
        w.next().unwrap();
        w.next().unwrap();
        w.record_product_created(ProductId(9));

        // variant call failed; cashier goes back to fix the price
        assert_eq!(w.back(), WizardStep::Variant);
        assert_eq!(w.back(), WizardStep::Variant);
        assert_eq!(w.created_product(), Some(ProductId(9)));
    }
}
