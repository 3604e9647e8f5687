//! Create-form input and the request bodies it validates into

use crate::entity::StoreId;
use crate::error::{FormField, ValidationError, ValidationErrors};
use crate::status::ProductStatus;
use crate::validation::{parse_floor_area, validate_email, validate_rating};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/Stores`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreDraft {
    /// Display name
    #[serde(rename = "Name")]
    pub name: String,
    /// Contact email
    #[serde(rename = "Email")]
    pub email: String,
    /// Contact phone number
    #[serde(rename = "PhoneNumber")]
    pub phone_number: String,
    /// Street address
    #[serde(rename = "Address")]
    pub address: String,
    /// Opening date
    #[serde(rename = "Established")]
    pub established: String,
    /// Floor area in square metres
    #[serde(rename = "FloorArea")]
    pub floor_area: f64,
}

/// Body of `POST /api/Products`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    /// Display name
    #[serde(rename = "Name")]
    pub name: String,
    /// Price in USD
    #[serde(rename = "Price")]
    pub price: f64,
    /// Specifications
    #[serde(rename = "Specs")]
    pub specs: String,
    /// Rating from 0 to 5
    #[serde(rename = "Rating")]
    pub rating: u8,
    /// Supplier information
    #[serde(rename = "SupplierInfo")]
    pub supplier_info: String,
    /// Country of manufacture
    #[serde(rename = "MadeIn")]
    pub made_in: String,
    /// Production company
    #[serde(rename = "ProductionCompanyName")]
    pub production_company_name: String,
    /// Stock status
    #[serde(rename = "Status")]
    pub status: ProductStatus,
    /// Owning store
    #[serde(rename = "StoreId")]
    pub store_id: StoreId,
}

/// Store form input, as typed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoreForm {
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Contact phone number
    pub phone_number: String,
    /// Street address
    pub address: String,
    /// Opening date
    pub established: String,
    /// Floor area in square metres, as typed
    pub floor_area: String,
}

impl StoreForm {
    /// Validate into a request body
    ///
    /// # Errors
    /// Every failing field is reported, floor area first, then email.
    pub fn validate(&self) -> Result<StoreDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let floor_area = parse_floor_area(&self.floor_area);
        if floor_area.is_none() {
            errors.push(ValidationError::InvalidField {
                field: FormField::FloorArea,
                value: self.floor_area.clone(),
            });
        }
        if !validate_email(&self.email) {
            errors.push(ValidationError::InvalidField {
                field: FormField::Email,
                value: self.email.clone(),
            });
        }

        match floor_area {
            Some(floor_area) if errors.is_empty() => Ok(StoreDraft {
                name: self.name.clone(),
                email: self.email.clone(),
                phone_number: self.phone_number.clone(),
                address: self.address.clone(),
                established: self.established.clone(),
                floor_area,
            }),
            _ => Err(errors),
        }
    }
}

/// Product form input, as typed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductForm {
    /// Display name
    pub name: String,
    /// Price in USD, as typed
    pub price: String,
    /// Specifications
    pub specs: String,
    /// Rating from 0 to 5, as typed
    pub rating: String,
    /// Supplier information
    pub supplier_info: String,
    /// Country of manufacture
    pub made_in: String,
    /// Production company
    pub production_company_name: String,
    /// Stock status
    pub status: String,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: String::new(),
            specs: String::new(),
            rating: String::new(),
            supplier_info: String::new(),
            made_in: String::new(),
            production_company_name: String::new(),
            status: ProductStatus::Ok.as_str().to_string(),
        }
    }
}

impl ProductForm {
    /// Validate into a request body owned by `store`
    ///
    /// # Errors
    /// Reports price, rating and status failures together.
    pub fn validate(&self, store: StoreId) -> Result<ProductDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0);
        if price.is_none() {
            errors.push(ValidationError::InvalidField {
                field: FormField::Price,
                value: self.price.clone(),
            });
        }

        let rating = self
            .rating
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|r| validate_rating(*r))
            .and_then(|r| u8::try_from(r).ok());
        if rating.is_none() {
            errors.push(ValidationError::InvalidField {
                field: FormField::Rating,
                value: self.rating.clone(),
            });
        }

        let status = match self.status.parse::<ProductStatus>() {
            Ok(status) => Some(status),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        match (price, rating, status) {
            (Some(price), Some(rating), Some(status)) => Ok(ProductDraft {
                name: self.name.clone(),
                price,
                specs: self.specs.clone(),
                rating,
                supplier_info: self.supplier_info.clone(),
                made_in: self.made_in.clone(),
                production_company_name: self.production_company_name.clone(),
                status,
                store_id: store,
            }),
            _ => Err(errors),
        }
    }
}
